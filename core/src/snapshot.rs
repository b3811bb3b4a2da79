//! Snapshot serialization — full team state to/from JSON.
//!
//! A snapshot is taken every SNAPSHOT_INTERVAL ticks. It captures the
//! queue, counters and history as they stood at the end of that tick.

use crate::{
    clock::SimClock,
    team::TeamState,
    types::{RunId, Tick},
};
use serde::{Deserialize, Serialize};

pub const SNAPSHOT_INTERVAL: Tick = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub run_id: RunId,
    pub tick:   Tick,
    pub clock:  SimClock,
    pub team:   TeamState,
}
