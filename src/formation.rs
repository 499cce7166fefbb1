use std::fmt;
use std::str::FromStr;

use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};


#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Enum, EnumIter, Display, EnumString,
    Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Role {
    Goalie,
    Defender,
    Midfielder,
    Striker,
}

// Field position. Numbered only when the formation has more than one slot for the role, so that
// a 3-1-2 gives "Defender 1".."Defender 3" but a plain "Midfielder".
//
// Ordering follows the field from the goal outwards, which is also the order slots are shown in.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Slot {
    pub role: Role,
    pub number: Option<u8>,
}

impl Slot {
    pub const GOALIE: Slot = Slot { role: Role::Goalie, number: None };

    pub fn single(role: Role) -> Self { Slot { role, number: None } }
    pub fn numbered(role: Role, number: u8) -> Self { Slot { role, number: Some(number) } }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number {
            None => write!(f, "{}", self.role),
            Some(n) => write!(f, "{} {}", self.role, n),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ParseSlotError;

impl fmt::Display for ParseSlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected a position such as \"Goalie\" or \"Defender 2\"")
    }
}

// Accepts "Defender 2", "defender2" and "Midfielder". Does not check that the slot exists in
// any particular formation.
impl FromStr for Slot {
    type Err = ParseSlotError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s.find(|c: char| c.is_ascii_digit()).unwrap_or(s.len());
        let (role, number) = s.split_at(split);
        let role = Role::from_str(role.trim()).map_err(|_| ParseSlotError)?;
        if number.is_empty() {
            Ok(Slot::single(role))
        } else {
            let number = number.parse::<u8>().map_err(|_| ParseSlotError)?;
            if number == 0 {
                return Err(ParseSlotError);
            }
            Ok(Slot::numbered(role, number))
        }
    }
}


#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Formation {
    pub name: String,
    pub defenders: u8,
    pub midfielders: u8,
    pub strikers: u8,
}

impl Formation {
    pub fn new(name: impl Into<String>, defenders: u8, midfielders: u8, strikers: u8) -> Self {
        Formation {
            name: name.into(),
            defenders,
            midfielders,
            strikers,
        }
    }

    // Named "D-M-S", e.g. "3-1-2".
    pub fn from_counts(defenders: u8, midfielders: u8, strikers: u8) -> Self {
        let name = format!("{defenders}-{midfielders}-{strikers}");
        Formation::new(name, defenders, midfielders, strikers)
    }

    pub fn count(&self, role: Role) -> u8 {
        match role {
            Role::Goalie => 1,
            Role::Defender => self.defenders,
            Role::Midfielder => self.midfielders,
            Role::Striker => self.strikers,
        }
    }

    pub fn num_slots(&self) -> usize { Role::iter().map(|role| self.count(role) as usize).sum() }

    pub fn build_slots(&self) -> Vec<Slot> {
        let mut slots = Vec::with_capacity(self.num_slots());
        for role in Role::iter() {
            let count = self.count(role);
            if count == 1 {
                slots.push(Slot::single(role));
            } else {
                slots.extend((1..=count).map(|n| Slot::numbered(role, n)));
            }
        }
        slots
    }
}


#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    fn labels(formation: &Formation) -> Vec<String> {
        formation.build_slots().iter().map(|s| s.to_string()).collect_vec()
    }

    #[test]
    fn slots_three_one_two() {
        let formation = Formation::from_counts(3, 1, 2);
        assert_eq!(formation.name, "3-1-2");
        assert_eq!(formation.num_slots(), 7);
        assert_eq!(labels(&formation), [
            "Goalie",
            "Defender 1",
            "Defender 2",
            "Defender 3",
            "Midfielder",
            "Striker 1",
            "Striker 2",
        ]);
    }

    #[test]
    fn slots_with_empty_role() {
        let formation = Formation::new("Keeper drill", 0, 0, 1);
        assert_eq!(labels(&formation), ["Goalie", "Striker"]);
        assert_eq!(formation.num_slots(), 2);
    }

    #[test]
    fn slots_are_sorted() {
        let slots = Formation::from_counts(2, 2, 2).build_slots();
        assert!(slots.iter().tuple_windows().all(|(a, b)| a < b));
    }

    #[test]
    fn parse_slot() {
        assert_eq!("Goalie".parse::<Slot>(), Ok(Slot::GOALIE));
        assert_eq!("defender 2".parse::<Slot>(), Ok(Slot::numbered(Role::Defender, 2)));
        assert_eq!("Striker1".parse::<Slot>(), Ok(Slot::numbered(Role::Striker, 1)));
        assert_eq!(" Midfielder ".parse::<Slot>(), Ok(Slot::single(Role::Midfielder)));
        assert_eq!("Defender 0".parse::<Slot>(), Err(ParseSlotError));
        assert_eq!("Sweeper".parse::<Slot>(), Err(ParseSlotError));
        assert_eq!("".parse::<Slot>(), Err(ParseSlotError));
    }

    #[test]
    fn slot_label_roundtrip() {
        for slot in Formation::from_counts(3, 2, 1).build_slots() {
            assert_eq!(slot.to_string().parse::<Slot>(), Ok(slot));
        }
    }
}
