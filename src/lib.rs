//! Municipal complaint intake.
//!
//! * [`classify`]: keyword-weighted category classifier.
//! * [`language`]: language detection / translation collaborators.
//! * [`intake`]: detect → translate → classify orchestration.
//! * [`config`]: TOML settings and platform paths.

pub mod classify;
pub mod config;
pub mod intake;
pub mod language;
