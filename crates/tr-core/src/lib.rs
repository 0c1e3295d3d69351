//! `tr-core` — foundational types for the epoch segment router.
//!
//! This crate is a dependency of every other `tr-*` crate.  It has no `tr-*`
//! dependencies and only `thiserror` (plus optional `serde`) from outside.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `SegmentId`                                |
//! | [`direction`]   | `Direction` turn choices                              |
//! | [`time`]        | `SimTime`                                             |
//! | [`agent`]       | `Agent` routing request                               |
//! | [`strategy`]    | `Strategy` selector                                   |
//! | [`config`]      | `RoutingConfig`                                       |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod agent;
pub mod config;
pub mod direction;
pub mod error;
pub mod ids;
pub mod strategy;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use agent::Agent;
pub use config::RoutingConfig;
pub use direction::Direction;
pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, SegmentId};
pub use strategy::Strategy;
pub use time::SimTime;
