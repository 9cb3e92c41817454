use crate::scroll::coordinator::Direction;

/// A pair of parameter sets, one per scroll direction.
///
/// Backward scrolling typically gets the more pronounced variant (faster parallax, overshoot
/// eases, reversed stagger).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Directional<T> {
    /// Used when scrolling down, and before any movement.
    pub down: T,
    /// Used when scrolling up.
    pub up: T,
}

impl<T> Directional<T> {
    /// Build from both variants.
    pub const fn new(down: T, up: T) -> Self {
        Self { down, up }
    }

    /// Variant for `direction`; [`Direction::None`] selects `down`.
    pub fn select(&self, direction: Direction) -> &T {
        match direction {
            Direction::Up => &self.up,
            Direction::Down | Direction::None => &self.down,
        }
    }

    /// Apply `f` to both variants.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Directional<U> {
        Directional {
            down: f(self.down),
            up: f(self.up),
        }
    }
}

impl<T: Clone> Directional<T> {
    /// Same value in both directions.
    pub fn symmetric(value: T) -> Self {
        Self {
            down: value.clone(),
            up: value,
        }
    }
}
