//! `tr-search` — route searches over the segment graph.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`route`]       | `Route`, `RouteSearch` trait                               |
//! | [`incremental`] | `IncrementalDijkstra` (plain and density-penalized)        |
//! | [`all_pairs`]   | `AllPairsTable` (Floyd–Warshall), `AllPairsRouter`         |
//! | [`astar`]       | `DeadlineAStar`, `DeadlineHeuristic`                       |
//! | [`error`]       | `SearchError`, `SearchResult<T>`                           |
//!
//! Every search implements [`RouteSearch`] and borrows whatever the epoch
//! precomputed, so one instance serves every agent of the epoch.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Relaxes the rows of each all-pairs pass on Rayon.       |

pub mod all_pairs;
pub mod astar;
pub mod error;
pub mod incremental;
pub mod route;

mod queue;


pub use all_pairs::{AllPairsRouter, AllPairsTable};
pub use astar::{DeadlineAStar, DeadlineHeuristic};
pub use error::{SearchError, SearchResult};
pub use incremental::IncrementalDijkstra;
pub use route::{Route, RouteSearch};
