// Defines `MatchState`: the live model of a match as seen from one team's sideline.
//
// All actions are driven by a single scorekeeper and run to completion one at a time. Anything
// time-dependent takes `now` explicitly; views never mutate state and can be recomputed at will.
//
// Actions either succeed, are silently ignored (harmless misclicks), or are rejected with
// `ActionError` without touching the state.

use instant::Instant;
use itertools::Itertools;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use crate::clock::{MatchClock, MillisDuration};
use crate::error::{ActionError, RulesError};
use crate::formation::{Formation, Slot};
use crate::internal_error_message;
use crate::lineup::{Lineup, SubstitutionQueue};
use crate::player::{Player, PlayerId, Roster, Team};
use crate::rules::{MatchRules, fatigue_threshold_in_range};
use crate::scores::Score;
use crate::stats::{GoalRecord, Highlight, HighlightKind, StatCategory};
use crate::undo::{UndoEntry, UndoStack};
use crate::utc_time::UtcDateTime;


// A half-finished two-click interaction with the lineup. Starting one gesture cancels the other.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Gesture {
    None,
    // A position was chosen; the next bench player clicked goes there.
    Assigning(Slot),
    // An occupied position was chosen; the next occupied position clicked swaps with it.
    Swapping(Slot),
}

#[derive(Clone, Debug)]
pub struct MatchState {
    rules: MatchRules,
    roster: Roster,
    formation: Formation,
    lineup: Lineup,
    sub_queue: SubstitutionQueue,
    clock: MatchClock,
    score: Score,
    goal_log: Vec<GoalRecord>,
    highlights: Vec<Highlight>,
    undo_stack: UndoStack,
    fatigue_threshold_minutes: u32,
    gesture: Gesture,
    // "Add goal (us)" was clicked and the scorer has not been chosen yet.
    goal_pending: bool,
}

impl MatchState {
    pub fn new(rules: MatchRules) -> Result<Self, RulesError> {
        rules.validate()?;
        let roster = Roster::new(rules.roster.iter().cloned());
        let formation = rules
            .formation(&rules.default_formation)
            .cloned()
            .ok_or_else(|| RulesError::UnknownDefaultFormation(rules.default_formation.clone()))?;
        let lineup = Lineup::new(formation.build_slots(), roster.ids().collect());
        Ok(MatchState {
            fatigue_threshold_minutes: rules.fatigue_threshold_minutes,
            rules,
            roster,
            formation,
            lineup,
            sub_queue: SubstitutionQueue::new(),
            clock: MatchClock::new(),
            score: Score::default(),
            goal_log: Vec::new(),
            highlights: Vec::new(),
            undo_stack: UndoStack::new(),
            gesture: Gesture::None,
            goal_pending: false,
        })
    }

    pub fn rules(&self) -> &MatchRules { &self.rules }
    pub fn roster(&self) -> &Roster { &self.roster }
    pub fn player(&self, id: PlayerId) -> Option<&Player> { self.roster.get(id) }
    // Panics if `id` is not from this match's roster.
    pub fn player_name(&self, id: PlayerId) -> &str { &self.roster[id].name }
    pub fn find_player(&self, name: &str) -> Result<PlayerId, ActionError> {
        self.roster.find(name).ok_or(ActionError::UnknownPlayer)
    }
    pub fn formation(&self) -> &Formation { &self.formation }
    pub fn lineup(&self) -> &Lineup { &self.lineup }
    pub fn sub_queue(&self) -> &SubstitutionQueue { &self.sub_queue }
    pub fn score(&self) -> &Score { &self.score }
    pub fn goal_log(&self) -> &[GoalRecord] { &self.goal_log }
    pub fn highlights(&self) -> &[Highlight] { &self.highlights }
    pub fn undo_stack(&self) -> &UndoStack { &self.undo_stack }
    pub fn gesture(&self) -> Gesture { self.gesture }
    pub fn is_goal_pending(&self) -> bool { self.goal_pending }
    pub fn fatigue_threshold_minutes(&self) -> u32 { self.fatigue_threshold_minutes }

    pub fn is_started(&self) -> bool { self.clock.is_started() }
    pub fn is_running(&self) -> bool { self.clock.is_running() }
    pub fn quarter(&self) -> u32 { self.clock.quarter() }
    pub fn has_stint(&self, player: PlayerId) -> bool { self.clock.has_stint(player) }

    pub fn elapsed_game(&self, now: Instant) -> MillisDuration { self.clock.elapsed_game(now) }
    pub fn elapsed_quarter(&self, now: Instant) -> MillisDuration {
        self.clock.elapsed_quarter(now)
    }

    pub fn total_time(&self, player: PlayerId, now: Instant) -> MillisDuration {
        let live = self.clock.live_stint(player, now).unwrap_or(MillisDuration::ZERO);
        self.roster[player].time_played + live
    }
    pub fn total_minutes(&self, player: PlayerId, now: Instant) -> f64 {
        self.total_time(player, now).as_minutes_f64()
    }
    pub fn is_fatigued(&self, player: PlayerId, now: Instant) -> bool {
        self.total_minutes(player, now) >= self.fatigue_threshold_minutes as f64
    }
    // Players currently running on the field who are over the threshold.
    pub fn fatigued_on_field(&self, now: Instant) -> Vec<PlayerId> {
        self.clock.stint_players().filter(|&p| self.is_fatigued(p, now)).collect()
    }

    // Checks invariants that must hold between any two actions.
    pub fn is_consistent(&self) -> bool {
        let stints_ok = if self.clock.is_running() {
            self.clock.stint_players().sorted().eq(self.lineup.on_field().sorted())
        } else {
            self.clock.stint_players().next().is_none()
        };
        let queue_ok = self.sub_queue.iter().all(|(slot, incoming)| {
            self.lineup.has_slot(slot) && self.lineup.is_on_bench(incoming)
        });
        self.lineup.is_consistent(self.roster.len()) && stints_ok && queue_ok
    }

    pub fn start_or_resume(&mut self, now: Instant) {
        if self.clock.is_running() {
            debug!("Clock is already running");
            return;
        }
        let first_start = self.clock.start_or_resume(now);
        for player in self.lineup.on_field().collect_vec() {
            self.clock.begin_stint(player, now);
        }
        if first_start {
            info!("Game started, Q{}", self.quarter());
        } else {
            info!("Clock resumed at {}, Q{}", self.elapsed_game(now), self.quarter());
        }
    }

    pub fn pause(&mut self, now: Instant) {
        if !self.clock.is_running() {
            debug!("Clock is not running");
            return;
        }
        self.flush_stints(now);
        self.clock.pause(now);
        info!("Clock paused at {}", self.elapsed_game(now));
    }

    // Stops the clock and clears the field: the next quarter starts from an empty lineup.
    // Score, stats and logs carry over.
    pub fn end_quarter(&mut self, now: Instant) {
        self.flush_stints(now);
        let quarter = self.quarter();
        self.clock.end_quarter(now);
        let cleared = self.lineup.clear_field();
        self.sub_queue.clear();
        self.gesture = Gesture::None;
        self.goal_pending = false;
        info!("End of Q{}: {} player(s) back on the bench", quarter, cleared.len());
    }

    pub fn set_formation(&mut self, name: &str, now: Instant) -> Result<(), ActionError> {
        let formation = self.rules.formation(name).cloned().ok_or(ActionError::UnknownFormation)?;
        if formation == self.formation {
            debug!("Formation {} is already active", name);
            return Ok(());
        }
        for player in self.lineup.on_field().collect_vec() {
            self.flush_stint(player, now);
        }
        let cleared = self.lineup.rebuild(formation.build_slots());
        self.sub_queue.clear();
        self.gesture = Gesture::None;
        info!(
            "Formation changed to {}: {} player(s) back on the bench",
            formation.name,
            cleared.len()
        );
        self.formation = formation;
        Ok(())
    }

    pub fn set_fatigue_threshold(&mut self, minutes: u32) -> Result<(), ActionError> {
        if !fatigue_threshold_in_range(minutes) {
            return Err(ActionError::FatigueThresholdOutOfRange);
        }
        self.fatigue_threshold_minutes = minutes;
        Ok(())
    }

    pub fn select_slot_for_assignment(&mut self, slot: Slot) -> Result<(), ActionError> {
        if !self.lineup.has_slot(slot) {
            return Err(ActionError::UnknownSlot);
        }
        self.gesture = Gesture::Assigning(slot);
        Ok(())
    }

    // Puts a bench player into the position chosen by `select_slot_for_assignment`. Before
    // kickoff and during stoppages this happens immediately. While the clock is running the
    // substitution is queued instead and the player stays on the bench until
    // `apply_queued_substitutions`.
    pub fn assign_from_bench(&mut self, player: PlayerId) -> Result<(), ActionError> {
        let Gesture::Assigning(slot) = self.gesture else {
            debug!("No position selected for {:?}", player);
            return Ok(());
        };
        self.check_player(player)?;
        if !self.lineup.is_on_bench(player) {
            return Err(ActionError::PlayerNotOnBench);
        }
        if self.clock.is_running() {
            self.sub_queue.enqueue(slot, player)?;
            info!("Queued {} for {}", self.player_name(player), slot);
        } else {
            // Clock is stopped, so nobody has a stint to flush.
            let previous = self.lineup.place(slot, player)?;
            self.sub_queue.remove_player(player);
            match previous {
                Some(previous) => info!(
                    "{} replaces {} at {}",
                    self.player_name(player),
                    self.player_name(previous),
                    slot
                ),
                None => info!("{} takes {}", self.player_name(player), slot),
            }
        }
        self.gesture = Gesture::None;
        Ok(())
    }

    // Applies the whole queue at once: outgoing players are credited with their time and benched,
    // incoming players start their time on the field (if the clock is running).
    pub fn apply_queued_substitutions(&mut self, now: Instant) {
        if self.sub_queue.is_empty() {
            debug!("No substitutions queued");
            return;
        }
        let running = self.clock.is_running();
        for (slot, incoming) in self.sub_queue.take() {
            if !self.lineup.has_slot(slot) || !self.lineup.is_on_bench(incoming) {
                error!("{}", internal_error_message!("cannot sub {:?} into {}", incoming, slot));
                continue;
            }
            let outgoing = self.lineup.occupant(slot);
            if let Some(outgoing) = outgoing {
                self.flush_stint(outgoing, now);
            }
            if let Err(err) = self.lineup.place(slot, incoming) {
                error!("{}", internal_error_message!("{}", err));
                continue;
            }
            if running {
                self.clock.begin_stint(incoming, now);
            }
            match outgoing {
                Some(outgoing) => info!(
                    "Sub at {}: {} → {}",
                    slot,
                    self.player_name(outgoing),
                    self.player_name(incoming)
                ),
                None => info!("Sub at {}: {} comes on", slot, self.player_name(incoming)),
            }
        }
    }

    // Convenience entry point for clicking a position: occupied positions take part in swaps,
    // empty ones wait for a bench player.
    pub fn click_slot(&mut self, slot: Slot) -> Result<(), ActionError> {
        if !self.lineup.has_slot(slot) {
            return Err(ActionError::UnknownSlot);
        }
        match self.lineup.occupant(slot) {
            Some(_) => self.begin_swap(slot),
            None => self.select_slot_for_assignment(slot),
        }
    }

    // First call marks the position; the second call with another occupied position swaps the
    // two players. Calling again with the marked position cancels.
    pub fn begin_swap(&mut self, slot: Slot) -> Result<(), ActionError> {
        if !self.lineup.has_slot(slot) {
            return Err(ActionError::UnknownSlot);
        }
        let Some(player_b) = self.lineup.occupant(slot) else {
            return Err(ActionError::SlotEmpty);
        };
        let pending = match self.gesture {
            Gesture::Swapping(pending) => pending,
            Gesture::None | Gesture::Assigning(_) => {
                self.gesture = Gesture::Swapping(slot);
                return Ok(());
            }
        };
        if pending == slot {
            self.gesture = Gesture::None;
            return Ok(());
        }
        let Some(player_a) = self.lineup.occupant(pending) else {
            // The marked position was emptied in the meantime. Start over from here.
            self.gesture = Gesture::Swapping(slot);
            return Ok(());
        };
        self.lineup.swap(pending, slot)?;
        self.undo_stack.push(UndoEntry::RevertSwap {
            slot_a: pending,
            slot_b: slot,
            player_a,
            player_b,
        });
        self.gesture = Gesture::None;
        info!(
            "Swapped {} ({}) and {} ({})",
            self.player_name(player_a),
            slot,
            self.player_name(player_b),
            pending
        );
        Ok(())
    }

    pub fn cancel_gesture(&mut self) { self.gesture = Gesture::None; }

    pub fn increment_stat(
        &mut self, player: PlayerId, category: StatCategory,
    ) -> Result<(), ActionError> {
        self.check_player(player)?;
        if self.lineup.slot_of(player).is_none() {
            return Err(ActionError::PlayerNotOnField);
        }
        self.roster[player].stats[category] += 1;
        self.undo_stack.push(UndoEntry::RevertStat { player, category });
        if category == StatCategory::Goals {
            self.score.add_goal(Team::Us);
            self.log_goal(Team::Us, Some(player));
        } else {
            debug!("{} +1 {}", self.player_name(player), category);
        }
        Ok(())
    }

    // Opponent goals are recorded immediately. Our goals need a scorer: see `confirm_goal`.
    pub fn add_goal(&mut self, team: Team) {
        match team {
            Team::Them => {
                self.score.add_goal(Team::Them);
                self.log_goal(Team::Them, None);
            }
            Team::Us => self.goal_pending = true,
        }
    }

    pub fn confirm_goal(&mut self, scorer: PlayerId) -> Result<(), ActionError> {
        if !self.goal_pending {
            debug!("No goal waiting for a scorer");
            return Ok(());
        }
        self.check_player(scorer)?;
        if self.lineup.slot_of(scorer).is_none() {
            return Err(ActionError::PlayerNotOnField);
        }
        self.score.add_goal(Team::Us);
        self.roster[scorer].stats[StatCategory::Goals] += 1;
        self.log_goal(Team::Us, Some(scorer));
        self.goal_pending = false;
        Ok(())
    }

    pub fn cancel_goal(&mut self) { self.goal_pending = false; }

    pub fn record_highlight(&mut self, kind: HighlightKind, note: impl Into<String>) {
        let highlight = Highlight {
            quarter: self.quarter(),
            kind,
            note: note.into(),
            time: UtcDateTime::now(),
        };
        info!("Highlight Q{}: {}: {}", highlight.quarter, highlight.kind, highlight.note);
        self.highlights.push(highlight);
    }

    // Reverts the latest stat increment or swap.
    pub fn undo(&mut self) {
        let Some(entry) = self.undo_stack.pop() else {
            debug!("Nothing to undo");
            return;
        };
        match entry {
            UndoEntry::RevertStat { player, category } => {
                let stat = &mut self.roster[player].stats[category];
                *stat = stat.saturating_sub(1);
                info!("Undo: {} -1 {}", self.player_name(player), category);
            }
            UndoEntry::RevertSwap { slot_a, slot_b, player_a, player_b } => {
                let still_swapped = self.lineup.occupant(slot_a) == Some(player_b)
                    && self.lineup.occupant(slot_b) == Some(player_a);
                if still_swapped {
                    // Both slots are known to exist at this point.
                    let _ = self.lineup.swap(slot_a, slot_b);
                    info!("Undo: swap {} and {}", slot_a, slot_b);
                } else {
                    debug!("Undo: {} and {} changed since the swap, skipping", slot_a, slot_b);
                }
            }
        }
    }

    // Back to the state right after `new`, with the same rules.
    pub fn reset(&mut self) {
        let rules = self.rules.clone();
        match MatchState::new(rules) {
            Ok(fresh) => {
                *self = fresh;
                info!("Match reset");
            }
            Err(err) => error!("{}", internal_error_message!("rules became invalid: {}", err)),
        }
    }

    fn check_player(&self, player: PlayerId) -> Result<(), ActionError> {
        if self.roster.contains(player) { Ok(()) } else { Err(ActionError::UnknownPlayer) }
    }

    fn flush_stint(&mut self, player: PlayerId, now: Instant) {
        if let Some(played) = self.clock.end_stint(player, now) {
            self.roster[player].time_played += played;
        }
    }

    fn flush_stints(&mut self, now: Instant) {
        for (player, played) in self.clock.end_all_stints(now) {
            self.roster[player].time_played += played;
        }
    }

    fn log_goal(&mut self, team: Team, scorer: Option<PlayerId>) {
        let record = GoalRecord {
            team,
            scorer,
            quarter: self.quarter(),
            time: UtcDateTime::now(),
        };
        match scorer {
            Some(scorer) => info!(
                "Goal ({}) by {}, Q{}, score {}",
                team,
                self.player_name(scorer),
                record.quarter,
                self.score
            ),
            None => info!("Goal ({}), Q{}, score {}", team, record.quarter, self.score),
        }
        self.goal_log.push(record);
    }
}
