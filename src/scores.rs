use std::fmt;

use enum_map::EnumMap;
use serde::{Deserialize, Serialize};

use crate::player::Team;


#[derive(Clone, Default, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Score {
    goals: EnumMap<Team, u32>,
}

impl Score {
    pub fn get(&self, team: Team) -> u32 { self.goals[team] }
    pub fn add_goal(&mut self, team: Team) { self.goals[team] += 1; }
}

// Shown as "us - them", always from our perspective.
impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.goals[Team::Us], self.goals[Team::Them])
    }
}
