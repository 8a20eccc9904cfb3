//! Design-on-mockup compositing
//!
//! This module resolves where a design goes on a mockup and produces the
//! flattened image. Resampling, rotation and blending are delegated to the
//! `image` and `imageproc` crates.

mod adjust;
mod compositor;
mod placement;

pub use self::adjust::{adjust_design, needs_inversion};
pub use self::compositor::{
    composite, create_mockup, fit_contain, prepare_design, rotate_expanded, rotated_bounds,
};
pub use self::placement::{resolve_placement, Placement};
