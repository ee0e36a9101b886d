//! `RouteCode` — the compact textual encoding of a sub-route.
//!
//! # Format
//!
//! ```text
//! <start_waypoint>:<arrow>-<arrow>-…-<arrow>:<goal_waypoint>
//! ```
//!
//! e.g. `"12:3-4-7:56"` — enter at waypoint 12, traverse arrows 3, 4, 7 in
//! order, leave at waypoint 56.  Route codes travel inside schedule files and
//! traffic-signal status payloads; the structured form is what the framework
//! operates on, the string form is what crosses process boundaries.
//!
//! A traffic signal's code names the stretch it governs: `arrows[0]` is the
//! governed entry arrow and `start` is the stop-line waypoint on it.

use std::fmt;
use std::str::FromStr;

use crate::error::AvError;
use crate::ids::{ArrowId, WaypointId};

/// An ordered sub-route: a start waypoint, the arrows to traverse, and a goal
/// waypoint.  `arrows` is never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RouteCode {
    pub start:  WaypointId,
    pub arrows: Vec<ArrowId>,
    pub goal:   WaypointId,
}

impl RouteCode {
    /// Construct a route code.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `arrows` is empty; parsed codes are always
    /// non-empty and constructed ones are expected to be too.
    pub fn new(start: WaypointId, arrows: Vec<ArrowId>, goal: WaypointId) -> Self {
        debug_assert!(!arrows.is_empty(), "a route code must name at least one arrow");
        Self { start, arrows, goal }
    }

    /// The arrow a signal carrying this code governs — the first arrow of
    /// the coded stretch.
    #[inline]
    pub fn governed_arrow(&self) -> ArrowId {
        self.arrows[0]
    }
}

impl FromStr for RouteCode {
    type Err = AvError;

    fn from_str(s: &str) -> Result<Self, AvError> {
        let bad = || AvError::Parse(format!("invalid route code {s:?}"));

        let mut parts = s.split(':');
        let (start, arrows, goal) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(start), Some(arrows), Some(goal), None) => (start, arrows, goal),
            _ => return Err(bad()),
        };

        let start = start.parse::<u32>().map(WaypointId).map_err(|_| bad())?;
        let goal = goal.parse::<u32>().map(WaypointId).map_err(|_| bad())?;

        let arrows = arrows
            .split('-')
            .map(|a| a.parse::<u32>().map(ArrowId).map_err(|_| bad()))
            .collect::<Result<Vec<_>, _>>()?;
        if arrows.is_empty() {
            return Err(bad());
        }

        Ok(Self { start, arrows, goal })
    }
}

impl fmt::Display for RouteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.start.0)?;
        for (i, arrow) in self.arrows.iter().enumerate() {
            if i > 0 {
                write!(f, "-")?;
            }
            write!(f, "{}", arrow.0)?;
        }
        write!(f, ":{}", self.goal.0)
    }
}

// Serialized as the textual form so payloads and schedule files stay
// human-readable.
#[cfg(feature = "serde")]
impl serde::Serialize for RouteCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RouteCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
