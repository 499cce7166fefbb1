use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::RulesError;
use crate::formation::Formation;


// Fatigue warnings are shown for players whose total time played reaches the threshold.
pub const MIN_FATIGUE_THRESHOLD_MINUTES: u32 = 5;
pub const MAX_FATIGUE_THRESHOLD_MINUTES: u32 = 30;
pub const DEFAULT_FATIGUE_THRESHOLD_MINUTES: u32 = 12;

pub fn fatigue_threshold_in_range(minutes: u32) -> bool {
    (MIN_FATIGUE_THRESHOLD_MINUTES..=MAX_FATIGUE_THRESHOLD_MINUTES).contains(&minutes)
}

// Everything fixed for the duration of a match. Reset goes back to exactly this.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MatchRules {
    pub roster: Vec<String>,
    pub formations: Vec<Formation>,
    pub default_formation: String,
    #[serde(default = "default_fatigue_threshold")]
    pub fatigue_threshold_minutes: u32,
}

fn default_fatigue_threshold() -> u32 { DEFAULT_FATIGUE_THRESHOLD_MINUTES }

impl MatchRules {
    // Small-sided 8U setup: 7 on the field, 13 on the roster.
    pub fn eight_u() -> Self {
        let roster = [
            "Mia", "Cameron", "Charlotte", "Sophia", "Joel", "Leo", "Elijah", "Talon", "Thomas",
            "Bryan", "Julian", "Royal", "Sam",
        ];
        MatchRules {
            roster: roster.into_iter().map(str::to_owned).collect(),
            formations: vec![
                Formation::from_counts(3, 1, 2),
                Formation::from_counts(2, 2, 2),
                Formation::from_counts(2, 1, 3),
                Formation::from_counts(1, 2, 3),
                Formation::from_counts(3, 2, 1),
            ],
            default_formation: "3-1-2".to_owned(),
            fatigue_threshold_minutes: DEFAULT_FATIGUE_THRESHOLD_MINUTES,
        }
    }

    // Parses only. Call `validate` (or `MatchState::new`) before use.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> { serde_yaml::from_str(text) }

    pub fn formation(&self, name: &str) -> Option<&Formation> {
        self.formations.iter().find(|f| f.name == name)
    }

    pub fn validate(&self) -> Result<(), RulesError> {
        if self.roster.is_empty() {
            return Err(RulesError::EmptyRoster);
        }
        let mut names = HashSet::new();
        for name in &self.roster {
            if name.trim().is_empty() {
                return Err(RulesError::EmptyPlayerName);
            }
            if !names.insert(name.as_str()) {
                return Err(RulesError::DuplicatePlayer(name.clone()));
            }
        }
        if self.formations.is_empty() {
            return Err(RulesError::NoFormations);
        }
        let mut formation_names = HashSet::new();
        for formation in &self.formations {
            if !formation_names.insert(formation.name.as_str()) {
                return Err(RulesError::DuplicateFormation(formation.name.clone()));
            }
        }
        if self.formation(&self.default_formation).is_none() {
            return Err(RulesError::UnknownDefaultFormation(self.default_formation.clone()));
        }
        if !fatigue_threshold_in_range(self.fatigue_threshold_minutes) {
            return Err(RulesError::FatigueThresholdOutOfRange(self.fatigue_threshold_minutes));
        }
        Ok(())
    }
}
