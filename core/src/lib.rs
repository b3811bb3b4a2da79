//! simsre-core: a tick-by-tick model of how one operations team
//! accumulates, prioritizes and processes work under fixed capacity.

pub mod admission;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod growth;
pub mod history;
pub mod pipeline;
pub mod policy;
pub mod processing;
pub mod queue;
pub mod rng;
pub mod snapshot;
pub mod store;
pub mod team;
pub mod types;
pub mod work;

pub use config::TeamConfig;
pub use engine::SimEngine;
pub use error::{SimError, SimResult};
pub use history::{SeriesKind, WorkHistory};
pub use work::{CategoryCounts, WorkCategory};
