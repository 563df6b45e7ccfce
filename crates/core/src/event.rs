//! Game events - consumed by observers such as the event log

use serde::{Serialize, Serializer};

use crate::notation::Move;
use crate::strategy::ResponseSource;
use crate::types::{Outcome, Side};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    /// A removal was staged (player selection or opponent answer).
    Staged {
        #[serde(serialize_with = "side_str")]
        side: Side,
        #[serde(rename = "move")]
        mv: Move,
        generation: u64,
    },
    /// A submission finished; `key` is the canonical board key afterwards.
    Submitted {
        #[serde(serialize_with = "side_str")]
        side: Side,
        #[serde(rename = "move")]
        mv: Option<Move>,
        key: String,
    },
    Responded {
        #[serde(rename = "move")]
        mv: Move,
        source: ResponseSource,
    },
    TableReady {
        oversized: bool,
    },
    Ended {
        #[serde(serialize_with = "outcome_str")]
        outcome: Outcome,
    },
}

fn side_str<S: Serializer>(side: &Side, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(side.as_str())
}

fn outcome_str<S: Serializer>(outcome: &Outcome, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(outcome.as_str())
}
