use std::ops;

use enum_map::{Enum, EnumMap};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::clock::MillisDuration;
use crate::stats::StatCategory;


#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Enum, EnumIter, Display, EnumString,
    Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Team {
    Us,
    Them,
}


// Position in the roster. Stable for the whole session, unlike anything derived from the lineup.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct PlayerId(pub usize);

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    // Time from finished stints only. See `MatchState::total_time` for the live value.
    pub time_played: MillisDuration,
    pub stats: EnumMap<StatCategory, u32>,
}

impl Player {
    pub fn new(name: String) -> Self {
        Player {
            name,
            time_played: MillisDuration::ZERO,
            stats: EnumMap::default(),
        }
    }
}


#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        Roster {
            players: names.into_iter().map(Player::new).collect(),
        }
    }

    pub fn len(&self) -> usize { self.players.len() }
    pub fn is_empty(&self) -> bool { self.players.is_empty() }
    pub fn contains(&self, id: PlayerId) -> bool { id.0 < self.players.len() }
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + use<> {
        (0..self.players.len()).map(PlayerId)
    }
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players.iter().enumerate().map(|(idx, p)| (PlayerId(idx), p))
    }
    pub fn find(&self, name: &str) -> Option<PlayerId> {
        self.players.iter().position(|p| p.name == name).map(PlayerId)
    }
    pub fn get(&self, id: PlayerId) -> Option<&Player> { self.players.get(id.0) }
}

impl ops::Index<PlayerId> for Roster {
    type Output = Player;
    fn index(&self, id: PlayerId) -> &Self::Output { &self.players[id.0] }
}
impl ops::IndexMut<PlayerId> for Roster {
    fn index_mut(&mut self, id: PlayerId) -> &mut Self::Output { &mut self.players[id.0] }
}
