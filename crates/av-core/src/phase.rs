//! The two-state motion phase of a vehicle agent.

/// Lifecycle phase of a vehicle's motion state machine.
///
/// A vehicle is either holding position (`Stop`) or executing the front leg
/// of its schedule (`Move`).  There are no other states; the phase is also
/// broadcast in every vehicle status message so peers can see it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    #[default]
    Stop,
    Move,
}

impl Phase {
    /// `true` while the vehicle is in its moving phase.
    #[inline]
    pub fn is_moving(self) -> bool {
        matches!(self, Phase::Move)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Stop => write!(f, "stop"),
            Phase::Move => write!(f, "move"),
        }
    }
}
