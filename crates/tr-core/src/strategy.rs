//! Routing strategy selector shared by configuration and the engine.
//!
//! Every strategy pairs one search algorithm with one weight model:
//!
//! | Strategy          | Search                       | Weight model       |
//! |-------------------|------------------------------|--------------------|
//! | `PlainDijkstra`   | incremental Dijkstra         | length             |
//! | `DensityDijkstra` | incremental Dijkstra         | density-penalized  |
//! | `FloydWarshall`   | all-pairs table lookup       | travel time        |
//! | `DeadlineAStar`   | A* with deadline heuristic   | log-congestion     |

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    PlainDijkstra,
    #[default]
    DensityDijkstra,
    FloydWarshall,
    DeadlineAStar,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::PlainDijkstra,
        Strategy::DensityDijkstra,
        Strategy::FloydWarshall,
        Strategy::DeadlineAStar,
    ];

    /// Human-readable label, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::PlainDijkstra   => "plain_dijkstra",
            Strategy::DensityDijkstra => "density_dijkstra",
            Strategy::FloydWarshall   => "floyd_warshall",
            Strategy::DeadlineAStar   => "deadline_a_star",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|st| st.as_str() == s.trim())
            .ok_or_else(|| CoreError::Parse(format!("unknown routing strategy {s:?}")))
    }
}
