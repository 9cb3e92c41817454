use crate::foundation::core::{NodeId, Property, Rgba8, Shadow};
use crate::render::surface::Surface;

/// Default glow color (`#60a5fa`).
pub const GLOW_BLUE: Rgba8 = Rgba8::rgb(96, 165, 250);

/// Glow that grows with progress: blur `max_glow * p`, offset a third of that, alpha `0.4 * p`.
pub fn glow_shadow(progress: f64, max_glow: f64, color: Rgba8) -> Shadow {
    let p = crate::foundation::math::clamp01(progress);
    let glow = max_glow * p;
    Shadow {
        offset_y: glow / 3.0,
        blur: glow,
        color: color.with_alpha(0.4 * p),
    }
}

/// Bell-shaped glow peaking halfway through a flip: 40px blur, alpha 0.5 at the peak.
pub fn flip_glow(progress: f64, color: Rgba8) -> Shadow {
    let p = crate::foundation::math::clamp01(progress);
    let bell = 1.0 - (p - 0.5).abs() * 2.0;
    let glow = 40.0 * bell;
    Shadow {
        offset_y: glow / 2.0,
        blur: glow,
        color: color.with_alpha(0.5 * bell),
    }
}

/// `on_update` hook writing [`glow_shadow`] to every target of a tween.
pub fn glow_on_update(
    max_glow: f64,
    color: Rgba8,
) -> impl FnMut(f64, &[NodeId], &mut dyn Surface) + 'static {
    move |p, targets, surface| {
        let shadow = glow_shadow(p, max_glow, color);
        for &node in targets {
            if surface.is_attached(node) {
                surface.set_property(node, Property::BoxShadow, shadow.into());
            }
        }
    }
}

/// `on_update` hook writing [`flip_glow`] to every target of a tween.
pub fn flip_glow_on_update(color: Rgba8) -> impl FnMut(f64, &[NodeId], &mut dyn Surface) + 'static {
    move |p, targets, surface| {
        let shadow = flip_glow(p, color);
        for &node in targets {
            if surface.is_attached(node) {
                surface.set_property(node, Property::BoxShadow, shadow.into());
            }
        }
    }
}
