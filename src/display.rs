// Plain-text renderings of the match state. Shared by every front-end; styling is up to them.

use instant::Instant;
use itertools::Itertools;

use crate::clock::{MillisDuration, duration_to_mss};
use crate::game::MatchState;
use crate::player::Team;
use crate::stats::{GoalRecord, Highlight};


pub const ALL_PLAYERS_OK: &str = "All players OK";
pub const EMPTY_SLOT: &str = "(empty)";

pub fn format_mss(d: MillisDuration) -> String { duration_to_mss(d) }

pub fn goal_line(state: &MatchState, record: &GoalRecord) -> String {
    let scorer = record.scorer.map_or("N/A", |id| state.player_name(id));
    let team = match record.team {
        Team::Us => "Us",
        Team::Them => "Them",
    };
    format!("{} - Q{} - {} Goal by {}", record.time, record.quarter, team, scorer)
}

pub fn highlight_line(highlight: &Highlight) -> String {
    format!(
        "Q{} - {} - {}: {}",
        highlight.quarter, highlight.time, highlight.kind, highlight.note
    )
}

// Newest first.
pub fn goal_log_lines(state: &MatchState) -> Vec<String> {
    state.goal_log().iter().rev().map(|record| goal_line(state, record)).collect()
}

// Newest first.
pub fn highlight_lines(state: &MatchState) -> Vec<String> {
    state.highlights().iter().rev().map(highlight_line).collect()
}

// "Leo → Sam" for each queued substitution, in slot order.
pub fn sub_queue_lines(state: &MatchState) -> Vec<String> {
    state
        .sub_queue()
        .iter()
        .map(|(slot, incoming)| {
            let outgoing = state.lineup().occupant(slot);
            let outgoing = outgoing.map_or(EMPTY_SLOT, |id| state.player_name(id));
            format!("{} → {}", outgoing, state.player_name(incoming))
        })
        .collect()
}

pub fn fatigue_banner(state: &MatchState, now: Instant) -> String {
    let fatigued = state.fatigued_on_field(now);
    if fatigued.is_empty() {
        ALL_PLAYERS_OK.to_owned()
    } else {
        fatigued.into_iter().map(|id| state.player_name(id)).join(", ")
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::stats::HighlightKind;
    use crate::test_util::{FakeClock, assign, fill_default_lineup, sample_match};

    #[test]
    fn goal_log_is_newest_first() {
        let mut state = sample_match();
        assign(&mut state, "Goalie", "Thomas").unwrap();
        state.add_goal(Team::Them);
        state.add_goal(Team::Us);
        state.confirm_goal(state.find_player("Thomas").unwrap()).unwrap();

        let log = state.goal_log();
        assert_eq!(goal_log_lines(&state), vec![
            format!("{} - Q1 - Us Goal by Thomas", log[1].time),
            format!("{} - Q1 - Them Goal by N/A", log[0].time),
        ]);
    }

    #[test]
    fn highlight_format() {
        let mut state = sample_match();
        state.record_highlight(HighlightKind::BigPlay, "Nutmeg");
        let time = state.highlights()[0].time;
        assert_eq!(highlight_lines(&state), vec![format!("Q1 - {time} - Big Play: Nutmeg")]);
    }

    #[test]
    fn queue_lines() {
        let mut clock = FakeClock::new();
        let mut state = sample_match();
        assign(&mut state, "Striker 1", "Leo").unwrap();
        state.start_or_resume(clock.now());
        clock.advance_secs(30);
        assign(&mut state, "Striker 1", "Sam").unwrap();
        assign(&mut state, "Goalie", "Mia").unwrap();
        assert_eq!(sub_queue_lines(&state), vec!["(empty) → Mia", "Leo → Sam"]);
    }

    #[test]
    fn fatigue() {
        let mut clock = FakeClock::new();
        let mut state = sample_match();
        fill_default_lineup(&mut state);
        state.set_fatigue_threshold(5).unwrap();
        state.start_or_resume(clock.now());
        assert_eq!(fatigue_banner(&state, clock.advance_mins(4)), ALL_PLAYERS_OK);
        assert_eq!(
            fatigue_banner(&state, clock.advance_mins(1)),
            "Mia, Cameron, Charlotte, Sophia, Joel, Leo, Elijah"
        );
    }

    #[test]
    fn mss() {
        assert_eq!(format_mss(MillisDuration::from_secs(754)), "12:34");
    }
}
