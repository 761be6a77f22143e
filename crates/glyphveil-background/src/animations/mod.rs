//! Animation implementations.

pub mod dissolve;
pub mod particle;
pub mod rain;
