// Test utilities shared by unit tests and by integration tests in the "tests" folder.

use std::time::Duration;

use instant::Instant;

use crate::error::ActionError;
use crate::formation::Slot;
use crate::game::MatchState;
use crate::rules::MatchRules;


pub fn sample_match() -> MatchState {
    MatchState::new(MatchRules::eight_u()).unwrap()
}

// Puts a named bench player into a position, as a pair of clicks would. The clock must be
// stopped, otherwise this only queues the substitution.
pub fn assign(state: &mut MatchState, slot: &str, name: &str) -> Result<(), ActionError> {
    let slot = slot.parse::<Slot>().map_err(|_| ActionError::UnknownSlot)?;
    let player = state.find_player(name)?;
    state.select_slot_for_assignment(slot)?;
    state.assign_from_bench(player)
}

// Fills the default 3-1-2 lineup with the first seven roster players, in roster order.
pub fn fill_default_lineup(state: &mut MatchState) {
    let slots = state.lineup().slots().map(|(slot, _)| slot).collect::<Vec<_>>();
    let players = state.roster().ids().collect::<Vec<_>>();
    for (slot, player) in slots.into_iter().zip(players) {
        state.select_slot_for_assignment(slot).unwrap();
        state.assign_from_bench(player).unwrap();
    }
}

// Deterministic time source: tests advance it explicitly.
#[derive(Clone, Copy, Debug)]
pub struct FakeClock {
    t0: Instant,
    offset: Duration,
}

impl FakeClock {
    pub fn new() -> Self {
        FakeClock {
            t0: Instant::now(),
            offset: Duration::ZERO,
        }
    }
    pub fn now(&self) -> Instant { self.t0 + self.offset }
    pub fn advance_secs(&mut self, secs: u64) -> Instant {
        self.offset += Duration::from_secs(secs);
        self.now()
    }
    pub fn advance_mins(&mut self, mins: u64) -> Instant { self.advance_secs(mins * 60) }
}
