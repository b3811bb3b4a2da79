//! Shared primitive types used across the entire simulation.

/// A simulation tick. One tick = one unit of planning time (a "quarter").
pub type Tick = u64;

/// The canonical run identifier.
pub type RunId = String;
