//! `tr-weight` — live traffic input and segment weight models.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`traffic`]  | `TrafficSource` trait, `TrafficSample` (SoA readings)     |
//! | [`model`]    | `EdgeWeight` trait + `Length`, `DensityPenalized`, `TravelTime`, `LogCongestion` |
//! | [`snapshot`] | `WeightSnapshot`, `evaluate_into`                         |
//! | [`error`]    | `WeightError`, `WeightResult<T>`                          |

pub mod error;
pub mod model;
pub mod snapshot;
pub mod traffic;

#[cfg(test)]
mod tests;

pub use error::{WeightError, WeightResult};
pub use model::{DensityPenalized, EdgeWeight, Length, LogCongestion, TravelTime};
pub use snapshot::{WeightSnapshot, evaluate_into};
pub use traffic::{TrafficSample, TrafficSource};
