//! Animated background rendering for the glyphveil landing page.
//!
//! The background is a field of glyph particles falling down (and a few
//! drifting sideways) over a full-viewport [`Surface`]. A [`Backdrop`] owns
//! the mount/unmount lifecycle, an [`AnimationLoop`] repaints the surface
//! once per frame until its [`AnimationHandle`] is stopped, and a
//! [`Dissolve`] plays the tile animation over the hero card.

mod animations;
mod backdrop;
mod chars;
mod color;
mod surface;

pub use animations::dissolve::{Dissolve, Tile};
pub use animations::particle::{Orientation, Particle, ParticleField};
pub use animations::rain::{AnimationHandle, AnimationLoop, FrameParams};
pub use backdrop::{Backdrop, BackdropSettings};
pub use chars::{RAIN_GLYPHS, glyph_set};
pub use color::Rgba;
pub use surface::{Canvas, Surface};
