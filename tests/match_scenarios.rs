mod common;

use indoc::indoc;
use matchday::export::{stats_table, to_csv};
use matchday::test_util::{FakeClock, assign, fill_default_lineup, sample_match};
use matchday::{ActionError, MatchRules, MatchState, RulesError, StatCategory, Team};
use pretty_assertions::assert_eq;

use common::{assert_consistent, id};


#[test]
fn scoring_sequence() {
    let mut state = sample_match();
    fill_default_lineup(&mut state);
    assign(&mut state, "Striker 2", "Thomas").unwrap();
    let thomas = id(&state, "Thomas");

    state.add_goal(Team::Them);
    state.add_goal(Team::Them);
    state.add_goal(Team::Us);
    assert!(state.is_goal_pending());
    assert_eq!(state.score().get(Team::Us), 0);
    state.confirm_goal(thomas).unwrap();

    assert_eq!(state.score().to_string(), "1 - 2");
    assert_eq!(state.goal_log().len(), 3);
    assert_eq!(
        state.goal_log().iter().map(|g| (g.team, g.scorer)).collect::<Vec<_>>(),
        vec![(Team::Them, None), (Team::Them, None), (Team::Us, Some(thomas))]
    );
    assert_eq!(state.player(thomas).unwrap().stats[StatCategory::Goals], 1);
    assert!(!state.is_goal_pending());
    // Goals entered this way are not undoable.
    assert!(state.undo_stack().is_empty());
}

#[test]
fn scorer_must_be_on_field() {
    let mut state = sample_match();
    fill_default_lineup(&mut state);
    state.add_goal(Team::Us);
    assert_eq!(state.confirm_goal(id(&state, "Sam")), Err(ActionError::PlayerNotOnField));
    assert!(state.is_goal_pending());
    assert_eq!(state.score().get(Team::Us), 0);

    state.cancel_goal();
    assert!(!state.is_goal_pending());
    // No pending goal: ignored.
    state.confirm_goal(id(&state, "Mia")).unwrap();
    assert_eq!(state.score().get(Team::Us), 0);
    assert!(state.goal_log().is_empty());
}

#[test]
fn full_match_export() {
    let mut clock = FakeClock::new();
    let mut state = sample_match();
    fill_default_lineup(&mut state);
    state.start_or_resume(clock.now());
    clock.advance_mins(6);
    assign(&mut state, "Striker 1", "Sam").unwrap();
    state.apply_queued_substitutions(clock.now());
    state.increment_stat(id(&state, "Sam"), StatCategory::Goals).unwrap();
    state.end_quarter(clock.advance_mins(4));
    assert_consistent(&state);

    let table = stats_table(&state, clock.now());
    let minutes = |name: &str| table.iter().find(|row| row.player == name).unwrap().minutes;
    assert_eq!(minutes("Mia"), 10.0);
    assert_eq!(minutes("Leo"), 6.0);
    assert_eq!(minutes("Sam"), 4.0);
    assert_eq!(minutes("Royal"), 0.0);
    assert_eq!(table.iter().map(|row| row.goals).sum::<u32>(), 1);

    let csv = to_csv(&state, clock.now()).unwrap();
    assert!(csv.starts_with("Player,Minutes,Goals,Assists,Blocks,Saves\n"));
    assert!(csv.contains("\nSam,4.0,1,0,0,0\n"));
    assert_eq!(csv.lines().count(), 14);
}

#[test]
fn reset_starts_over() {
    let mut clock = FakeClock::new();
    let mut state = sample_match();
    fill_default_lineup(&mut state);
    state.set_fatigue_threshold(20).unwrap();
    state.start_or_resume(clock.now());
    state.add_goal(Team::Them);
    state.end_quarter(clock.advance_mins(10));

    state.reset();
    assert!(!state.is_started());
    assert_eq!(state.quarter(), 1);
    assert_eq!(state.score().to_string(), "0 - 0");
    assert!(state.goal_log().is_empty());
    assert_eq!(state.fatigue_threshold_minutes(), 12);
    assert_eq!(state.total_minutes(id(&state, "Mia"), clock.now()), 0.0);
    assert_eq!(state.lineup().bench().len(), 13);
}

#[test]
fn rules_from_yaml() {
    let yaml = indoc! {"
        roster: [Ana, Ben, Cleo, Dev]
        formations:
          - { name: mini, defenders: 1, midfielders: 0, strikers: 1 }
        default_formation: mini
    "};
    let rules = MatchRules::from_yaml(yaml).unwrap();
    assert_eq!(rules.fatigue_threshold_minutes, 12);
    let state = MatchState::new(rules).unwrap();
    assert_eq!(state.formation().num_slots(), 3);
    assert_eq!(state.roster().len(), 4);
}

#[test]
fn invalid_rules_are_rejected() {
    let mut rules = MatchRules::eight_u();
    rules.roster.push("Mia".to_owned());
    assert_eq!(
        MatchState::new(rules).err(),
        Some(RulesError::DuplicatePlayer("Mia".to_owned()))
    );
}
