//! Turn choices that select one outgoing segment at the end of a segment.
//!
//! The single-character codes match the connection table exported by the
//! traffic simulator, so decision lists can be handed to the actuation layer
//! verbatim.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// A named turn choice at a segment.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Continue straight on (`s`).
    Straight,
    /// Turn left (`l`).
    Left,
    /// Turn right (`r`).
    Right,
    /// Bear partially left (`L`).
    PartLeft,
    /// Bear partially right (`R`).
    PartRight,
    /// U-turn onto the opposite segment (`t`).
    TurnAround,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Straight,
        Direction::Left,
        Direction::Right,
        Direction::PartLeft,
        Direction::PartRight,
        Direction::TurnAround,
    ];

    /// The simulator's one-character code.
    pub fn as_char(self) -> char {
        match self {
            Direction::Straight   => 's',
            Direction::Left       => 'l',
            Direction::Right      => 'r',
            Direction::PartLeft   => 'L',
            Direction::PartRight  => 'R',
            Direction::TurnAround => 't',
        }
    }

    /// Inverse of [`as_char`](Self::as_char).
    pub fn from_char(c: char) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.as_char() == c)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Direction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Direction::from_char(c)
                .ok_or_else(|| CoreError::Parse(format!("unknown direction code {c:?}"))),
            _ => Err(CoreError::Parse(format!(
                "invalid direction {s:?}: expected one of s, l, r, L, R, t"
            ))),
        }
    }
}
