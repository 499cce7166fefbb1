use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::player::{PlayerId, Team};
use crate::utc_time::UtcDateTime;


#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Enum, EnumIter, Display, EnumString,
    Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum StatCategory {
    Goals,
    Assists,
    Blocks,
    Saves,
}

impl StatCategory {
    pub fn pictogram(self) -> char {
        match self {
            StatCategory::Goals => '⚽',
            StatCategory::Assists => '🎯',
            StatCategory::Blocks => '🛡',
            StatCategory::Saves => '🧤',
        }
    }
}

#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum HighlightKind {
    Goal,
    Save,
    Foul,
    #[strum(to_string = "Big Play", serialize = "BigPlay", serialize = "big-play")]
    BigPlay,
    Injury,
}


#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GoalRecord {
    pub team: Team,
    // Always `None` for opponent goals.
    pub scorer: Option<PlayerId>,
    pub quarter: u32,
    pub time: UtcDateTime,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Highlight {
    pub quarter: u32,
    pub kind: HighlightKind,
    pub note: String,
    pub time: UtcDateTime,
}
