// Compatibility scoring: shared cost policy plus the four-factor engine.
// Pure functions of (profile, career) with no I/O.

pub mod cost;
pub mod engine;
