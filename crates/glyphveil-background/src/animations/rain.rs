//! Glyph rain animation loop (stateful).

use std::{cell::Cell, rc::Rc};

use glyphveil_core::{AnimationSpeed, Theme};
use rand::{Rng, rngs::StdRng};

use crate::animations::particle::{Orientation, ParticleField, pick_glyph};
use crate::color::Rgba;
use crate::surface::Surface;

/// Per-tick painting parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    /// Alpha of the overlay painted before the glyphs. Lower means longer trails.
    pub fade_alpha: f32,
    /// Probability that a particle re-rolls its glyph on a given tick.
    pub glyph_change_chance: f64,
    /// Multiplier on every particle's speed.
    pub speed_multiplier: f32,
    /// Overlay color (alpha is replaced by `fade_alpha`).
    pub overlay: Rgba,
    /// Glyph color (alpha is replaced by each particle's opacity).
    pub ink: Rgba,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self::for_theme(Theme::Dark, AnimationSpeed::Medium)
    }
}

impl FrameParams {
    /// Defaults for a theme and speed.
    pub fn for_theme(theme: Theme, speed: AnimationSpeed) -> Self {
        Self {
            fade_alpha: 0.02,
            glyph_change_chance: 0.01,
            speed_multiplier: speed.rain_multiplier(),
            overlay: Rgba::opaque(theme.background_rgb()),
            ink: Rgba::opaque(theme.ink_rgb()),
        }
    }

    /// Swap the colors for another theme.
    pub fn with_theme(self, theme: Theme) -> Self {
        Self {
            overlay: Rgba::opaque(theme.background_rgb()),
            ink: Rgba::opaque(theme.ink_rgb()),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    /// Next tick will run on the next frame.
    Scheduled,
    /// A tick is in progress.
    Running,
    /// Cancelled. No further ticks.
    Stopped,
}

/// Handle to a started [`AnimationLoop`].
///
/// Stopping is idempotent and takes effect before the next frame.
#[derive(Debug, Clone)]
pub struct AnimationHandle {
    state: Rc<Cell<LoopState>>,
}

impl AnimationHandle {
    /// Cancel the loop. Stopping an already stopped loop does nothing.
    pub fn stop(&self) {
        self.state.set(LoopState::Stopped);
    }

    /// Whether the loop will still run ticks.
    pub fn is_running(&self) -> bool {
        self.state.get() != LoopState::Stopped
    }
}

/// The glyph rain: a particle field repainted once per display frame.
///
/// The host drives the loop by calling [`AnimationLoop::run_frame`] on every
/// refresh. A tick only runs when the previous one completed and rescheduled
/// itself, so ticks never overlap.
#[derive(Debug)]
pub struct AnimationLoop {
    field: ParticleField,
    params: FrameParams,
    rng: StdRng,
    state: Rc<Cell<LoopState>>,
    ticks: u64,
}

impl AnimationLoop {
    /// Start animating `field`. The first tick is scheduled immediately.
    pub fn start(field: ParticleField, params: FrameParams, rng: StdRng) -> (Self, AnimationHandle) {
        let state = Rc::new(Cell::new(LoopState::Scheduled));
        let handle = AnimationHandle {
            state: Rc::clone(&state),
        };
        let animation = Self {
            field,
            params,
            rng,
            state,
            ticks: 0,
        };
        (animation, handle)
    }

    /// Run the scheduled tick, if any. Returns whether a tick ran.
    ///
    /// A surface without a drawing context skips the frame but keeps the
    /// loop scheduled.
    pub fn run_frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if self.state.get() != LoopState::Scheduled || !surface.has_context() {
            return false;
        }
        self.state.set(LoopState::Running);
        self.tick(surface);
        self.ticks += 1;
        if self.state.get() == LoopState::Running {
            self.state.set(LoopState::Scheduled);
        }
        true
    }

    fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let size = surface.size();
        let params = self.params;
        let chance = params.glyph_change_chance.clamp(0.0, 1.0);

        surface.fill_overlay(params.overlay.with_alpha(params.fade_alpha));

        let (particles, glyphs) = self.field.split_mut();
        for particle in particles {
            if self.rng.gen_bool(chance) {
                particle.glyph = pick_glyph(glyphs, &mut self.rng);
            }

            surface.draw_glyph(
                particle.glyph,
                particle.x,
                particle.y,
                params.ink.with_alpha(particle.opacity),
            );

            let bound = match particle.orientation {
                Orientation::Vertical => size.height,
                Orientation::Horizontal => size.width,
            } as f32;
            particle.advance(
                particle.speed * params.speed_multiplier,
                bound,
                &mut self.rng,
            );
        }
    }

    /// Replace the painting parameters from the next tick on.
    pub fn set_params(&mut self, params: FrameParams) {
        self.params = params;
    }

    pub fn params(&self) -> FrameParams {
        self.params
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
