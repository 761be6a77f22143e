//! Mount/unmount lifecycle of the animated background.

use glyphveil_core::{AnimationSpeed, Size, Theme};
use rand::{SeedableRng, rngs::StdRng};

use crate::animations::particle::{Particle, ParticleField};
use crate::animations::rain::{AnimationHandle, AnimationLoop, FrameParams};
use crate::chars::{RAIN_GLYPHS, glyph_set};
use crate::surface::Surface;

/// Settings fixed for the lifetime of a [`Backdrop`].
#[derive(Debug, Clone, PartialEq)]
pub struct BackdropSettings {
    /// Logical size of one glyph cell.
    pub cell_size: u32,
    /// Alphabet the glyphs are drawn from.
    pub glyphs: Vec<char>,
    pub fade_alpha: f32,
    pub glyph_change_chance: f64,
    pub speed: AnimationSpeed,
    pub theme: Theme,
    /// Fixed RNG seed. `None` seeds from the OS on every mount.
    pub seed: Option<u64>,
}

impl Default for BackdropSettings {
    fn default() -> Self {
        Self {
            cell_size: 14,
            glyphs: glyph_set(RAIN_GLYPHS),
            fade_alpha: 0.02,
            glyph_change_chance: 0.01,
            speed: AnimationSpeed::Medium,
            theme: Theme::Dark,
            seed: None,
        }
    }
}

impl BackdropSettings {
    fn frame_params(&self) -> FrameParams {
        FrameParams {
            fade_alpha: self.fade_alpha,
            glyph_change_chance: self.glyph_change_chance,
            ..FrameParams::for_theme(self.theme, self.speed)
        }
    }
}

/// State that exists only while mounted.
#[derive(Debug)]
struct Mounted {
    animation: AnimationLoop,
    handle: AnimationHandle,
}

/// The animated background component.
///
/// While mounted it is subscribed to viewport resizes and owns a running
/// [`AnimationLoop`]. Unmounting (explicitly or by dropping) stops the loop
/// and drops the subscription.
#[derive(Debug, Default)]
pub struct Backdrop {
    settings: BackdropSettings,
    mounted: Option<Mounted>,
}

impl Backdrop {
    pub fn new(settings: BackdropSettings) -> Self {
        Self {
            settings,
            mounted: None,
        }
    }

    /// Mount onto `surface`, sized to `viewport`.
    ///
    /// A missing surface, or one without a drawing context, is a silent
    /// no-op returning `false`. Mounting while already mounted tears the
    /// previous loop down first.
    pub fn mount<S: Surface + ?Sized>(&mut self, surface: Option<&mut S>, viewport: Size) -> bool {
        let Some(surface) = surface else {
            tracing::debug!("backdrop mount skipped: no surface");
            return false;
        };
        if !surface.has_context() {
            tracing::debug!("backdrop mount skipped: no drawing context");
            return false;
        }

        self.unmount();

        surface.set_size(viewport);

        let mut rng = match self.settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let field = ParticleField::generate(
            viewport,
            self.settings.cell_size,
            &self.settings.glyphs,
            &mut rng,
        );
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            particles = field.len(),
            "backdrop mounted"
        );

        let (animation, handle) = AnimationLoop::start(field, self.settings.frame_params(), rng);
        self.mounted = Some(Mounted { animation, handle });
        true
    }

    /// Stop the loop and unsubscribe from resizes. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            mounted.handle.stop();
            tracing::debug!(ticks = mounted.animation.ticks(), "backdrop unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Apply a new viewport size to the surface. Ignored while unmounted.
    /// Particles keep their positions.
    pub fn handle_resize<S: Surface + ?Sized>(&mut self, surface: &mut S, viewport: Size) {
        if self.mounted.is_none() {
            return;
        }
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            "backdrop resized"
        );
        surface.set_size(viewport);
    }

    /// Display refresh: run the scheduled tick if mounted. Returns whether
    /// anything was painted.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        match &mut self.mounted {
            Some(mounted) => mounted.animation.run_frame(surface),
            None => false,
        }
    }

    /// Recolor the running animation for another theme.
    pub fn set_theme(&mut self, theme: Theme) {
        self.settings.theme = theme;
        if let Some(mounted) = &mut self.mounted {
            let params = mounted.animation.params().with_theme(theme);
            mounted.animation.set_params(params);
        }
    }

    /// Change the animation speed from the next tick on.
    pub fn set_speed(&mut self, speed: AnimationSpeed) {
        self.settings.speed = speed;
        if let Some(mounted) = &mut self.mounted {
            let params = FrameParams {
                speed_multiplier: speed.rain_multiplier(),
                ..mounted.animation.params()
            };
            mounted.animation.set_params(params);
        }
    }

    /// Current particles, while mounted.
    pub fn particles(&self) -> Option<&[Particle]> {
        self.mounted
            .as_ref()
            .map(|m| m.animation.field().particles())
    }

    /// Handle of the running loop, while mounted.
    pub fn handle(&self) -> Option<&AnimationHandle> {
        self.mounted.as_ref().map(|m| &m.handle)
    }
}

impl Drop for Backdrop {
    fn drop(&mut self) {
        self.unmount();
    }
}
