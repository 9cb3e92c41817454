//! Scrollfx orchestrates scroll-driven animation for long-form pages.
//!
//! Elements reveal as they cross viewport regions, and scrolling back up replays them with
//! their own (usually more pronounced) variant. Everything runs on a single-threaded frame
//! loop:
//!
//! - Describe regions and animations with [`Trigger`], [`Timeline`] and [`BatchController`]
//! - Group them in a [`View`] and mount it on a [`Page`]
//! - Feed raw scroll and pointer events, then call [`Page::frame`] once per animation frame
//!
//! All reads and writes go through the [`Surface`] trait; [`InMemorySurface`] records them
//! for tests and for the [`Scenario`] simulator.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Tweens, timelines and eases.
pub mod animation;
/// Batched viewport reveals.
pub mod batch;
/// Page-wide motion settings.
pub mod config;
/// Ready-made direction-aware effects.
pub mod effects;
/// Shared primitives and errors.
pub mod foundation;
/// Host page access.
pub mod render;
/// Scroll, direction and pointer input.
pub mod scroll;
/// Headless scenario simulation.
pub mod sim;
/// Text effects.
pub mod text;
/// Viewport triggers.
pub mod trigger;
/// Views and the page frame loop.
pub mod view;

pub use crate::foundation::core::{
    ElementBox, Fps, NodeId, Property, PropertyValue, Rgba8, Shadow, Vec2,
};
pub use crate::foundation::error::{ScrollfxError, ScrollfxResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::set::{Control, TimelineId, TimelineSet};
pub use crate::animation::stagger::{Stagger, StaggerFrom};
pub use crate::animation::timeline::{Position, Timeline, Tween};
pub use crate::batch::controller::{BatchConfig, BatchController, BatchFired};
pub use crate::config::MotionConfig;
pub use crate::render::surface::{InMemorySurface, StyleWrite, Surface};
pub use crate::scroll::coordinator::{Direction, ScrollCoordinator, ScrollState};
pub use crate::scroll::directional::Directional;
pub use crate::scroll::pointer::{PointerState, PointerTracker};
pub use crate::scroll::scroll_to::{ScrollTo, ScrollToStatus};
pub use crate::sim::scenario::{Report, Scenario};
pub use crate::text::count_up::CountUp;
pub use crate::text::scramble::{ScrambleConfig, Scrambler};
pub use crate::trigger::region::{Edge, Region};
pub use crate::trigger::registry::{
    Fired, Scrub, ToggleActions, Transition, Trigger, TriggerId, TriggerRegistry,
};
pub use crate::view::mount::{View, ViewEvents};
pub use crate::view::page::{FrameReport, Page, ViewId};
