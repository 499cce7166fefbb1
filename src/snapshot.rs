// Read-only view of a match at a given instant: everything a front-end needs to draw the
// sideline dashboard, with players referred to by name. Taking a snapshot never changes state,
// so it is safe to do on every refresh tick.

use enum_map::EnumMap;
use instant::Instant;
use serde::{Deserialize, Serialize};

use crate::clock::MillisDuration;
use crate::game::MatchState;
use crate::player::{PlayerId, Team};
use crate::scores::Score;
use crate::stats::{Highlight, StatCategory};


#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SlotShowing {
    pub slot: String,
    pub player: Option<String>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SubstitutionShowing {
    pub slot: String,
    pub outgoing: Option<String>,
    pub incoming: String,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct PlayerShowing {
    pub name: String,
    // Includes the live stint, if any.
    pub minutes: f64,
    pub on_field: bool,
    pub fatigued: bool,
    pub stats: EnumMap<StatCategory, u32>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct GoalShowing {
    pub team: Team,
    pub scorer: Option<String>,
    pub quarter: u32,
    pub time: String,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub started: bool,
    pub running: bool,
    pub quarter: u32,
    pub elapsed_game: MillisDuration,
    pub elapsed_quarter: MillisDuration,
    pub formation: String,
    pub score: Score,
    pub fatigue_threshold_minutes: u32,
    pub slots: Vec<SlotShowing>,
    pub bench: Vec<String>,
    pub sub_queue: Vec<SubstitutionShowing>,
    // In roster order.
    pub players: Vec<PlayerShowing>,
    pub goal_log: Vec<GoalShowing>,
    pub highlights: Vec<Highlight>,
    pub goal_pending: bool,
    pub can_undo: bool,
}

impl MatchSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> { serde_json::to_string_pretty(self) }
}

impl MatchState {
    pub fn snapshot(&self, now: Instant) -> MatchSnapshot {
        let name = |id: PlayerId| self.player_name(id).to_owned();
        let lineup = self.lineup();
        MatchSnapshot {
            started: self.is_started(),
            running: self.is_running(),
            quarter: self.quarter(),
            elapsed_game: self.elapsed_game(now),
            elapsed_quarter: self.elapsed_quarter(now),
            formation: self.formation().name.clone(),
            score: self.score().clone(),
            fatigue_threshold_minutes: self.fatigue_threshold_minutes(),
            slots: lineup
                .slots()
                .map(|(slot, occupant)| SlotShowing {
                    slot: slot.to_string(),
                    player: occupant.map(name),
                })
                .collect(),
            bench: lineup.bench().iter().copied().map(name).collect(),
            sub_queue: self
                .sub_queue()
                .iter()
                .map(|(slot, incoming)| SubstitutionShowing {
                    slot: slot.to_string(),
                    outgoing: lineup.occupant(slot).map(name),
                    incoming: name(incoming),
                })
                .collect(),
            players: self
                .roster()
                .iter()
                .map(|(id, player)| PlayerShowing {
                    name: player.name.clone(),
                    minutes: self.total_minutes(id, now),
                    on_field: lineup.slot_of(id).is_some(),
                    fatigued: self.is_fatigued(id, now),
                    stats: player.stats,
                })
                .collect(),
            goal_log: self
                .goal_log()
                .iter()
                .map(|record| GoalShowing {
                    team: record.team,
                    scorer: record.scorer.map(name),
                    quarter: record.quarter,
                    time: record.time.format_hms(),
                })
                .collect(),
            highlights: self.highlights().to_vec(),
            goal_pending: self.is_goal_pending(),
            can_undo: !self.undo_stack().is_empty(),
        }
    }
}
