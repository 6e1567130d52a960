//! Effects.

pub mod tremolo;
