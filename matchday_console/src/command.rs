// Sideline console commands. One command per line; names and notes may contain spaces.

use std::fmt;
use std::str::FromStr;

use matchday::{HighlightKind, Slot, StatCategory, Team};


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Command {
    Start,
    Pause,
    EndQuarter,
    Undo,
    SelectSlot(Slot),
    Bench(String),
    Swap(Slot),
    Click(Slot),
    ApplySubs,
    Stat { player: String, category: StatCategory },
    Goal(Team),
    Scorer(String),
    CancelGoal,
    Highlight { kind: HighlightKind, note: String },
    Formation(String),
    Fatigue(u32),
    Export(Option<String>),
    Json,
    Reset,
    Help,
    Quit,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CommandError(String);

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl std::error::Error for CommandError {}

fn error(message: impl Into<String>) -> CommandError { CommandError(message.into()) }

pub const HELP: &str = "\
start | pause | end | undo | apply | cancel | json | reset | quit
slot <position> | bench <name> | swap <position> | click <position>
stat <name> <goals|assists|blocks|saves> | goal us | goal them | scorer <name>
highlight <goal|save|foul|big-play|injury> <note...> | formation <name> | fatigue <minutes>
export [path]";

fn parse_slot(arg: &str) -> Result<Slot, CommandError> {
    arg.parse::<Slot>().map_err(|err| error(err.to_string()))
}

fn non_empty(arg: &str, what: &str) -> Result<String, CommandError> {
    if arg.is_empty() { Err(error(format!("Missing {what}"))) } else { Ok(arg.to_owned()) }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let no_args = |cmd: Command| {
            if rest.is_empty() {
                Ok(cmd)
            } else {
                Err(error(format!("\"{keyword}\" takes no arguments")))
            }
        };
        match keyword.to_ascii_lowercase().as_str() {
            "start" | "resume" => no_args(Command::Start),
            "pause" => no_args(Command::Pause),
            "end" => no_args(Command::EndQuarter),
            "undo" => no_args(Command::Undo),
            "apply" => no_args(Command::ApplySubs),
            "cancel" => no_args(Command::CancelGoal),
            "json" => no_args(Command::Json),
            "reset" => no_args(Command::Reset),
            "help" | "?" => no_args(Command::Help),
            "quit" | "exit" => no_args(Command::Quit),
            "slot" => Ok(Command::SelectSlot(parse_slot(rest)?)),
            "swap" => Ok(Command::Swap(parse_slot(rest)?)),
            "click" => Ok(Command::Click(parse_slot(rest)?)),
            "bench" => Ok(Command::Bench(non_empty(rest, "player name")?)),
            "scorer" => Ok(Command::Scorer(non_empty(rest, "player name")?)),
            "formation" => Ok(Command::Formation(non_empty(rest, "formation name")?)),
            "stat" => {
                let (player, category) = rest
                    .rsplit_once(char::is_whitespace)
                    .ok_or_else(|| error("Expected: stat <name> <category>"))?;
                let category = StatCategory::from_str(category)
                    .map_err(|_| error(format!("Unknown stat \"{category}\"")))?;
                Ok(Command::Stat {
                    player: non_empty(player.trim(), "player name")?,
                    category,
                })
            }
            "goal" => match Team::from_str(rest) {
                Ok(team) => Ok(Command::Goal(team)),
                Err(_) => Err(error("Expected: goal us | goal them")),
            },
            "highlight" => {
                let (kind, note) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let kind = HighlightKind::from_str(kind)
                    .map_err(|_| error(format!("Unknown highlight \"{kind}\"")))?;
                Ok(Command::Highlight { kind, note: note.trim().to_owned() })
            }
            "fatigue" => {
                let minutes =
                    rest.parse::<u32>().map_err(|_| error("Expected: fatigue <minutes>"))?;
                Ok(Command::Fatigue(minutes))
            }
            "export" => Ok(Command::Export((!rest.is_empty()).then(|| rest.to_owned()))),
            "" => Err(error("Empty command")),
            _ => Err(error(format!("Unknown command \"{keyword}\". Type \"help\"."))),
        }
    }
}


#[cfg(test)]
mod tests {
    use matchday::Role;
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(line: &str) -> Result<Command, CommandError> { line.parse::<Command>() }

    #[test]
    fn simple_commands() {
        assert_eq!(parse("start"), Ok(Command::Start));
        assert_eq!(parse("  PAUSE "), Ok(Command::Pause));
        assert_eq!(parse("end"), Ok(Command::EndQuarter));
        assert!(parse("undo now").is_err());
        assert!(parse("").is_err());
        assert!(parse("kickoff").is_err());
    }

    #[test]
    fn positions() {
        assert_eq!(parse("slot Goalie"), Ok(Command::SelectSlot(Slot::GOALIE)));
        assert_eq!(
            parse("swap defender 2"),
            Ok(Command::Swap(Slot::numbered(Role::Defender, 2)))
        );
        assert_eq!(parse("click Midfielder"), Ok(Command::Click(Slot::single(Role::Midfielder))));
        assert!(parse("slot").is_err());
    }

    #[test]
    fn players_and_stats() {
        assert_eq!(parse("bench Mia"), Ok(Command::Bench("Mia".to_owned())));
        assert_eq!(
            parse("stat Mary Ann saves"),
            Ok(Command::Stat { player: "Mary Ann".to_owned(), category: StatCategory::Saves })
        );
        assert!(parse("stat Leo").is_err());
        assert!(parse("stat Leo tackles").is_err());
        assert_eq!(parse("goal them"), Ok(Command::Goal(Team::Them)));
        assert_eq!(parse("scorer Thomas"), Ok(Command::Scorer("Thomas".to_owned())));
    }

    #[test]
    fn misc() {
        assert_eq!(
            parse("highlight big-play Through ball from midfield"),
            Ok(Command::Highlight {
                kind: HighlightKind::BigPlay,
                note: "Through ball from midfield".to_owned(),
            })
        );
        assert_eq!(
            parse("highlight foul"),
            Ok(Command::Highlight { kind: HighlightKind::Foul, note: String::new() })
        );
        assert_eq!(parse("fatigue 15"), Ok(Command::Fatigue(15)));
        assert!(parse("fatigue lots").is_err());
        assert_eq!(parse("export"), Ok(Command::Export(None)));
        assert_eq!(parse("export out.csv"), Ok(Command::Export(Some("out.csv".to_owned()))));
        assert_eq!(parse("formation 2-2-2"), Ok(Command::Formation("2-2-2".to_owned())));
    }
}
