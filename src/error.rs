use std::fmt;


#[macro_export]
macro_rules! internal_error_message {
    () => {
        format!("Internal error at {}:{}.", file!(), line!())
    };
    ($($arg:tt)+) => {
        format!("Internal error at {}:{}: {}.", file!(), line!(), format!($($arg)*))
    };
}

// An action the engine cannot honor. Rejected actions never modify match state.
//
// Note that harmless misclicks (undo with nothing to undo, choosing a bench player without
// picking a position first, etc.) are not errors: they are silently ignored.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ActionError {
    UnknownPlayer,
    UnknownSlot,
    UnknownFormation,
    PlayerNotOnBench,
    PlayerNotOnField,
    SlotEmpty,
    AlreadyQueued,
    FatigueThresholdOutOfRange,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ActionError::UnknownPlayer => "No such player in the roster",
            ActionError::UnknownSlot => "No such position in the current formation",
            ActionError::UnknownFormation => "No such formation",
            ActionError::PlayerNotOnBench => "Player is not on the bench",
            ActionError::PlayerNotOnField => "Player is not on the field",
            ActionError::SlotEmpty => "Position is empty",
            ActionError::AlreadyQueued => "Player is already queued to sub in at another position",
            ActionError::FatigueThresholdOutOfRange => "Fatigue threshold is out of range",
        };
        f.write_str(message)
    }
}

impl std::error::Error for ActionError {}


// Problems with match configuration. Reported once, when a match is created.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RulesError {
    EmptyRoster,
    EmptyPlayerName,
    DuplicatePlayer(String),
    NoFormations,
    DuplicateFormation(String),
    UnknownDefaultFormation(String),
    FatigueThresholdOutOfRange(u32),
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulesError::EmptyRoster => write!(f, "Roster is empty"),
            RulesError::EmptyPlayerName => write!(f, "Player name cannot be empty"),
            RulesError::DuplicatePlayer(name) => write!(f, "Player \"{name}\" is listed twice"),
            RulesError::NoFormations => write!(f, "No formations defined"),
            RulesError::DuplicateFormation(name) => {
                write!(f, "Formation \"{name}\" is defined twice")
            }
            RulesError::UnknownDefaultFormation(name) => {
                write!(f, "Default formation \"{name}\" is not defined")
            }
            RulesError::FatigueThresholdOutOfRange(minutes) => {
                write!(f, "Fatigue threshold {minutes} min is out of range")
            }
        }
    }
}

impl std::error::Error for RulesError {}
