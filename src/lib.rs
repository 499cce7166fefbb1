#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod clock;
pub mod display;
pub mod error;
pub mod export;
pub mod formation;
pub mod game;
pub mod lineup;
pub mod player;
pub mod rules;
pub mod scores;
pub mod snapshot;
pub mod stats;
pub mod test_util;
pub mod undo;
pub mod utc_time;

pub use clock::MillisDuration;
pub use error::{ActionError, RulesError};
pub use formation::{Formation, Role, Slot};
pub use game::{Gesture, MatchState};
pub use player::{PlayerId, Team};
pub use rules::MatchRules;
pub use snapshot::MatchSnapshot;
pub use stats::{HighlightKind, StatCategory};
