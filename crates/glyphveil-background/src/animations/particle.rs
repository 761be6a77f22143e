//! Glyph particles and the field they live in.

use std::ops::Range;

use glyphveil_core::Size;
use rand::Rng;

use crate::chars::RAIN_GLYPHS;

/// Axis a particle travels along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Falls down the surface (advances `y`).
    Vertical,
    /// Drifts right across the surface (advances `x`).
    Horizontal,
}

impl Orientation {
    /// Range the per-tick speed is drawn from.
    pub fn speed_range(self) -> Range<f32> {
        match self {
            Orientation::Vertical => 1.0..3.0,
            Orientation::Horizontal => 0.5..2.5,
        }
    }

    /// Range the opacity is drawn from, at creation and after every wrap.
    pub fn opacity_range(self) -> Range<f32> {
        match self {
            Orientation::Vertical => 0.1..0.4,
            Orientation::Horizontal => 0.05..0.25,
        }
    }
}

/// A single moving glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    /// Distance advanced per tick. Fixed for the particle's lifetime.
    pub speed: f32,
    pub opacity: f32,
    pub glyph: char,
    pub orientation: Orientation,
}

impl Particle {
    /// Move `distance` along the axis. Past `bound` the particle wraps to 0
    /// with a fresh opacity. Returns whether it wrapped.
    pub fn advance<R: Rng + ?Sized>(&mut self, distance: f32, bound: f32, rng: &mut R) -> bool {
        let pos = match self.orientation {
            Orientation::Vertical => &mut self.y,
            Orientation::Horizontal => &mut self.x,
        };
        *pos += distance;
        if *pos > bound {
            *pos = 0.0;
            self.opacity = sample(rng, self.orientation.opacity_range());
            true
        } else {
            false
        }
    }
}

/// The full particle set for one mount of the background.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    glyphs: Vec<char>,
}

impl ParticleField {
    /// Number of particles [`ParticleField::generate`] creates for a surface:
    /// one per column plus one horizontal drifter per three rows.
    pub fn expected_len(size: Size, cell_size: u32) -> usize {
        if cell_size == 0 {
            return 0;
        }
        let columns = size.width / cell_size;
        let rows = size.height / cell_size;
        (columns + rows / 3) as usize
    }

    /// Populate a field for a surface of `size` with glyph cells of `cell_size`.
    pub fn generate<R: Rng + ?Sized>(
        size: Size,
        cell_size: u32,
        glyphs: &[char],
        rng: &mut R,
    ) -> Self {
        let glyphs: Vec<char> = if glyphs.is_empty() {
            RAIN_GLYPHS.chars().collect()
        } else {
            glyphs.to_vec()
        };

        if cell_size == 0 {
            return Self {
                particles: Vec::new(),
                glyphs,
            };
        }

        let width = size.width as f32;
        let height = size.height as f32;
        let cell = cell_size as f32;
        let columns = size.width / cell_size;
        let rows = size.height / cell_size;

        let mut particles = Vec::with_capacity(Self::expected_len(size, cell_size));

        for col in 0..columns {
            let orientation = Orientation::Vertical;
            particles.push(Particle {
                x: col as f32 * cell,
                y: sample(rng, 0.0..height),
                speed: sample(rng, orientation.speed_range()),
                opacity: sample(rng, orientation.opacity_range()),
                glyph: pick_glyph(&glyphs, rng),
                orientation,
            });
        }

        for _ in 0..rows / 3 {
            let orientation = Orientation::Horizontal;
            particles.push(Particle {
                x: sample(rng, 0.0..width),
                y: rng.gen_range(0..rows) as f32 * cell,
                speed: sample(rng, orientation.speed_range()),
                opacity: sample(rng, orientation.opacity_range()),
                glyph: pick_glyph(&glyphs, rng),
                orientation,
            });
        }

        Self { particles, glyphs }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Particles together with the alphabet, for in-place updates that
    /// need to re-roll glyphs.
    pub(crate) fn split_mut(&mut self) -> (&mut [Particle], &[char]) {
        (&mut self.particles, &self.glyphs)
    }
}

/// Pick a random glyph from a non-empty alphabet.
pub(crate) fn pick_glyph<R: Rng + ?Sized>(glyphs: &[char], rng: &mut R) -> char {
    glyphs[rng.gen_range(0..glyphs.len())]
}

/// Uniform sample from `range`, or its start when the range is empty.
fn sample<R: Rng + ?Sized>(rng: &mut R, range: Range<f32>) -> f32 {
    if range.start < range.end {
        rng.gen_range(range)
    } else {
        range.start
    }
}
