use console::Style;
use instant::Instant;
use itertools::Itertools;
use matchday::display::{self, ALL_PLAYERS_OK, EMPTY_SLOT};
use matchday::{Gesture, MatchState, StatCategory, Team};
use strum::IntoEnumIterator;


fn render_header(state: &MatchState, now: Instant) -> String {
    let clock_style = if state.is_running() { Style::new().green() } else { Style::new().dim() };
    let clock = clock_style.apply_to(display::format_mss(state.elapsed_game(now)));
    let quarter_clock = display::format_mss(state.elapsed_quarter(now));
    let banner = display::fatigue_banner(state, now);
    let banner = if banner == ALL_PLAYERS_OK {
        Style::new().green().apply_to(format!("✅ {banner}"))
    } else {
        Style::new().red().bold().apply_to(format!("⚠️ {banner}"))
    };
    format!(
        "⏱ {}  Q{} {}   Us {} Them   {}\n",
        clock,
        state.quarter(),
        quarter_clock,
        Style::new().bold().apply_to(state.score().to_string()),
        banner
    )
}

fn render_field(state: &MatchState, now: Instant) -> String {
    let mut out = format!("Formation {}\n", state.formation().name);
    let marked = match state.gesture() {
        Gesture::None => None,
        Gesture::Assigning(slot) | Gesture::Swapping(slot) => Some(slot),
    };
    for (slot, occupant) in state.lineup().slots() {
        let label = format!("{:<13}", slot.to_string());
        let label = if marked == Some(slot) {
            Style::new().reverse().apply_to(label).to_string()
        } else {
            label
        };
        let occupant = match occupant {
            None => Style::new().dim().apply_to(EMPTY_SLOT).to_string(),
            Some(id) => {
                let minutes = format!("{:.1} min", state.total_minutes(id, now));
                let name = if state.is_fatigued(id, now) {
                    Style::new().red().apply_to(state.player_name(id)).to_string()
                } else {
                    state.player_name(id).to_owned()
                };
                format!("{name} ({minutes})")
            }
        };
        out.push_str(&format!("  {label} {occupant}\n"));
    }
    out
}

fn render_bench(state: &MatchState, now: Instant) -> String {
    let bench = state
        .lineup()
        .bench()
        .iter()
        .map(|&id| format!("{} {:.1}", state.player_name(id), state.total_minutes(id, now)))
        .join(", ");
    format!("Bench: {bench}\n")
}

fn render_stats(state: &MatchState) -> String {
    let header = StatCategory::iter().map(|c| c.pictogram()).join(" ");
    let rows = state
        .roster()
        .iter()
        .filter(|(_, player)| player.stats.values().any(|&n| n > 0))
        .map(|(_, player)| {
            let counts = StatCategory::iter().map(|c| player.stats[c]).join(" ");
            format!("  {:<12} {counts}\n", player.name)
        })
        .collect::<String>();
    if rows.is_empty() { String::new() } else { format!("Stats {header}\n{rows}") }
}

fn render_list(title: &str, lines: Vec<String>) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let items = lines.into_iter().map(|line| format!("  {line}\n")).collect::<String>();
    format!("{}\n{}", Style::new().underlined().apply_to(title), items)
}

pub fn render_match(state: &MatchState, now: Instant) -> String {
    let mut out = render_header(state, now);
    out.push('\n');
    out.push_str(&render_field(state, now));
    out.push_str(&render_bench(state, now));
    out.push_str(&render_list("Substitution queue", display::sub_queue_lines(state)));
    if state.is_goal_pending() {
        let on_field = state.lineup().on_field().map(|id| state.player_name(id)).join(", ");
        let prompt = format!("Goal for {}! Who scored? ({on_field})", Team::Us);
        out.push_str(&format!("{}\n", Style::new().yellow().apply_to(prompt)));
    }
    out.push_str(&render_stats(state));
    out.push_str(&render_list("Goal log", display::goal_log_lines(state)));
    out.push_str(&render_list("Highlights", display::highlight_lines(state)));
    out
}

pub fn render_error(message: &str) -> String { Style::new().red().apply_to(message).to_string() }


#[cfg(test)]
mod tests {
    use matchday::{MatchRules, Slot};

    use super::*;

    fn plain(s: String) -> String { console::strip_ansi_codes(&s).into_owned() }

    #[test]
    fn fresh_match() {
        let state = MatchState::new(MatchRules::eight_u()).unwrap();
        let screen = plain(render_match(&state, Instant::now()));
        assert!(screen.contains("Q1 00:00   Us 0 - 0 Them"), "{screen}");
        assert!(screen.contains(ALL_PLAYERS_OK), "{screen}");
        assert!(screen.contains(&format!("  {:<13} {EMPTY_SLOT}\n", "Goalie")), "{screen}");
        assert!(screen.contains("Bench: Mia 0.0, Cameron 0.0"), "{screen}");
        assert!(!screen.contains("Substitution queue"), "{screen}");
        assert!(!screen.contains("Who scored?"), "{screen}");
    }

    #[test]
    fn pending_goal_prompts_for_scorer() {
        let mut state = MatchState::new(MatchRules::eight_u()).unwrap();
        state.select_slot_for_assignment(Slot::GOALIE).unwrap();
        state.assign_from_bench(state.find_player("Mia").unwrap()).unwrap();
        state.add_goal(Team::Us);
        let screen = plain(render_match(&state, Instant::now()));
        assert!(screen.contains("Goal for Us! Who scored? (Mia)"), "{screen}");
        assert!(screen.contains("  Goalie        Mia (0.0 min)\n"), "{screen}");
    }
}
