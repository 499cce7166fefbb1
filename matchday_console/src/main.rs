#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod command;
mod tui;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Command as ClapCommand, arg, value_parser};
use command::Command;
use instant::Instant;
use log::info;
use matchday::export;
use matchday::{MatchRules, MatchState};


const DEFAULT_EXPORT_PATH: &str = "match_stats.csv";

struct ConsoleConfig {
    rules: MatchRules,
    export_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = ClapCommand::new("Matchday")
        .version(clap::crate_version!())
        .about("Youth soccer sideline tracker: minutes, subs, stats and goals")
        .arg(
            arg!(-c --"config" <rules_file> "Path to match rules: yaml-serialized MatchRules.")
                .required(false)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            arg!(-e --"export" <csv_file> "Where the \"export\" command writes the stats table.")
                .required(false)
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_EXPORT_PATH),
        )
        .get_matches();

    let rules = match matches.get_one::<PathBuf>("config") {
        Some(path) => read_rules_file(path)?,
        None => MatchRules::eight_u(),
    };
    let export_path = matches
        .get_one::<PathBuf>("export")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_PATH));
    run(ConsoleConfig { rules, export_path })
}

fn read_rules_file(path: &Path) -> anyhow::Result<MatchRules> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rules file '{}'.", path.display()))?;
    let rules = MatchRules::from_yaml(&contents)
        .with_context(|| format!("Failed to parse rules file '{}'.", path.display()))?;
    rules.validate().with_context(|| format!("Invalid rules in '{}'.", path.display()))?;
    Ok(rules)
}

fn write_export(state: &MatchState, path: &Path) -> anyhow::Result<()> {
    let csv = export::to_csv(state, Instant::now()).context("Failed to build stats table.")?;
    std::fs::write(path, csv)
        .with_context(|| format!("Failed to write '{}'.", path.display()))?;
    info!("Stats exported to {}", path.display());
    Ok(())
}

#[derive(Debug)]
enum Flow {
    Continue,
    Quit,
}

fn execute(
    state: &mut MatchState, cmd: Command, config: &ConsoleConfig,
) -> anyhow::Result<Flow> {
    let now = Instant::now();
    match cmd {
        Command::Start => state.start_or_resume(now),
        Command::Pause => state.pause(now),
        Command::EndQuarter => state.end_quarter(now),
        Command::Undo => state.undo(),
        Command::SelectSlot(slot) => state.select_slot_for_assignment(slot)?,
        Command::Bench(name) => state.assign_from_bench(state.find_player(&name)?)?,
        Command::Swap(slot) => state.begin_swap(slot)?,
        Command::Click(slot) => state.click_slot(slot)?,
        Command::ApplySubs => state.apply_queued_substitutions(now),
        Command::Stat { player, category } => {
            state.increment_stat(state.find_player(&player)?, category)?
        }
        Command::Goal(team) => state.add_goal(team),
        Command::Scorer(name) => state.confirm_goal(state.find_player(&name)?)?,
        Command::CancelGoal => {
            state.cancel_goal();
            state.cancel_gesture();
        }
        Command::Highlight { kind, note } => state.record_highlight(kind, note),
        Command::Formation(name) => state.set_formation(&name, now)?,
        Command::Fatigue(minutes) => state.set_fatigue_threshold(minutes)?,
        Command::Export(path) => {
            let path = path.map_or_else(|| config.export_path.clone(), PathBuf::from);
            write_export(state, &path)?;
        }
        Command::Json => {
            let json = state.snapshot(now).to_json().context("Failed to serialize snapshot.")?;
            println!("{json}");
        }
        Command::Reset => state.reset(),
        Command::Help => println!("{}", command::HELP),
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn run(config: ConsoleConfig) -> anyhow::Result<()> {
    let mut state = MatchState::new(config.rules.clone()).context("Invalid match rules.")?;
    println!("{}", tui::render_match(&state, Instant::now()));
    let mut stdout = io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()?;
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read from stdin.")?;
        if line.trim().is_empty() {
            // Empty input just refreshes the clocks.
            println!("{}", tui::render_match(&state, Instant::now()));
        } else {
            let result = line
                .parse::<Command>()
                .map_err(anyhow::Error::from)
                .and_then(|cmd| execute(&mut state, cmd, &config));
            match result {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => println!("{}", tui::render_match(&state, Instant::now())),
                Err(err) => println!("{}", tui::render_error(&format!("{err:#}"))),
            }
        }
        write!(stdout, "> ")?;
        stdout.flush()?;
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn test_config(export_name: &str) -> ConsoleConfig {
        ConsoleConfig {
            rules: MatchRules::eight_u(),
            export_path: std::env::temp_dir()
                .join(format!("matchday_{}_{export_name}", std::process::id())),
        }
    }

    fn execute_line(
        state: &mut MatchState, line: &str, config: &ConsoleConfig,
    ) -> anyhow::Result<Flow> {
        execute(state, line.parse::<Command>()?, config)
    }

    fn execute_all(state: &mut MatchState, lines: &[&str], config: &ConsoleConfig) {
        for line in lines {
            let flow = execute_line(state, line, config).unwrap();
            assert!(matches!(flow, Flow::Continue), "{line}");
        }
    }

    fn dashboard(state: &MatchState) -> String {
        console::strip_ansi_codes(&tui::render_match(state, Instant::now())).into_owned()
    }

    #[test]
    fn commands_drive_the_dashboard() {
        let config = test_config("dashboard.csv");
        let mut state = MatchState::new(config.rules.clone()).unwrap();
        execute_all(
            &mut state,
            &[
                "slot striker 1",
                "bench Leo",
                "start",
                "slot striker 1",
                "bench Sam",
                "goal them",
                "stat Leo goals",
            ],
            &config,
        );
        assert_eq!(state.score().to_string(), "1 - 1");

        let screen = dashboard(&state);
        assert!(screen.contains("Us 1 - 1 Them"), "{screen}");
        assert!(screen.contains("Substitution queue\n  Leo → Sam\n"), "{screen}");
        assert!(screen.contains("Goal log"), "{screen}");

        execute_all(&mut state, &["apply"], &config);
        let screen = dashboard(&state);
        assert!(!screen.contains("Substitution queue"), "{screen}");
        assert!(screen.contains("Striker 1"), "{screen}");
    }

    #[test]
    fn rejected_commands_leave_state_untouched() {
        let config = test_config("rejected.csv");
        let mut state = MatchState::new(config.rules.clone()).unwrap();
        let err = execute_line(&mut state, "stat Sam goals", &config).unwrap_err();
        assert_eq!(format!("{err:#}"), "Player is not on the field");
        let err = execute_line(&mut state, "scorer Nobody", &config).unwrap_err();
        assert_eq!(format!("{err:#}"), "No such player in the roster");
        assert_eq!(state.score().to_string(), "0 - 0");
        assert!(state.undo_stack().is_empty());
    }

    #[test]
    fn export_writes_configured_path() {
        let config = test_config("export.csv");
        let mut state = MatchState::new(config.rules.clone()).unwrap();
        execute_all(&mut state, &["slot Goalie", "bench Mia", "export"], &config);
        let csv = std::fs::read_to_string(&config.export_path).unwrap();
        std::fs::remove_file(&config.export_path).unwrap();
        assert_eq!(csv.lines().next(), Some("Player,Minutes,Goals,Assists,Blocks,Saves"));
        assert!(csv.lines().any(|row| row.starts_with("Mia,")), "{csv}");
    }

    #[test]
    fn quit_stops_the_loop() {
        let config = test_config("quit.csv");
        let mut state = MatchState::new(config.rules.clone()).unwrap();
        let flow = execute_line(&mut state, "exit", &config).unwrap();
        assert!(matches!(flow, Flow::Quit));
    }
}
