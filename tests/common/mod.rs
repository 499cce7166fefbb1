// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use matchday::{MatchState, PlayerId, StatCategory};


#[macro_export]
macro_rules! slot {
    (Goalie) => {
        matchday::Slot::GOALIE
    };
    ($role:ident) => {
        matchday::Slot::single(matchday::Role::$role)
    };
    ($role:ident $number:literal) => {
        matchday::Slot::numbered(matchday::Role::$role, $number)
    };
}

#[allow(dead_code)]
pub fn id(state: &MatchState, name: &str) -> PlayerId { state.find_player(name).unwrap() }

#[allow(dead_code)]
pub fn stat(state: &MatchState, player: PlayerId, category: StatCategory) -> u32 {
    state.player(player).unwrap().stats[category]
}

#[allow(dead_code)]
pub fn occupant_name(state: &MatchState, slot: matchday::Slot) -> Option<String> {
    state.lineup().occupant(slot).map(|p| state.player_name(p).to_owned())
}

#[allow(dead_code)]
pub fn bench_names(state: &MatchState) -> Vec<String> {
    state.lineup().bench().iter().map(|&p| state.player_name(p).to_owned()).collect()
}

// Checks the invariants that must hold between any two actions.
#[allow(dead_code)]
pub fn assert_consistent(state: &MatchState) {
    assert!(state.is_consistent(), "inconsistent state: {:#?}", state.lineup());
}
