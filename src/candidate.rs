use serde::{Deserialize, Serialize};

use crate::rules::Reach;
use crate::types::Location;

/// The in-progress selection: a source and where it may go.
/// Idle when `from` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveCandidate {
    pub from: Option<Location>,
    pub can_go_to: Vec<Reach>,
}

impl MoveCandidate {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn chosen(from: Location, can_go_to: Vec<Reach>) -> Self {
        Self {
            from: Some(from),
            can_go_to,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.from.is_none()
    }

    pub fn targets(&self) -> Vec<Location> {
        self.can_go_to.iter().map(|reach| reach.to).collect()
    }
}
