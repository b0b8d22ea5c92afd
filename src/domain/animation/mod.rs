//! Time-to-value curves and the per-frame tween runner shared by every
//! animation in the scene.

mod easing;
mod tween;

pub use easing::{bounce, ease_in_out_quad, lerp};
pub use tween::Tween;
