use std::collections::BTreeMap;
use std::time::Duration;
use std::{fmt, ops};

use instant::Instant;
use serde::{Deserialize, Serialize};

use crate::player::PlayerId;


const MILLIS_PER_SEC: u64 = 1000;
const MILLIS_PER_MINUTE: u64 = MILLIS_PER_SEC * 60;

// Class similar to `std::time::Duration`, but with milliseconds precision. All time played is
// stored this way, so that minutes shown on the sideline and minutes exported to CSV agree.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MillisDuration {
    ms: u64,
}

impl MillisDuration {
    pub const ZERO: Self = MillisDuration { ms: 0 };

    pub fn from_millis(ms: u64) -> Self { MillisDuration { ms } }
    pub fn from_secs(s: u64) -> Self { MillisDuration::from_millis(s * MILLIS_PER_SEC) }
    pub fn from_mins(m: u64) -> Self { MillisDuration::from_millis(m * MILLIS_PER_MINUTE) }

    pub fn as_millis(self) -> u64 { self.ms }
    pub fn as_secs(self) -> u64 { self.ms / MILLIS_PER_SEC }
    pub fn as_minutes_f64(self) -> f64 { self.ms as f64 / MILLIS_PER_MINUTE as f64 }
    pub fn saturating_sub(self, other: Self) -> Self {
        MillisDuration { ms: self.ms.saturating_sub(other.ms) }
    }
}

impl ops::Add for MillisDuration {
    type Output = Self;
    fn add(self, other: Self) -> Self { MillisDuration { ms: self.ms + other.ms } }
}
impl ops::AddAssign for MillisDuration {
    fn add_assign(&mut self, other: Self) { self.ms += other.ms; }
}

impl From<Duration> for MillisDuration {
    fn from(d: Duration) -> Self { MillisDuration::from_millis(d.as_millis() as u64) }
}

impl fmt::Display for MillisDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { format_duration_to_mss(*self, f) }
}

// Rounds down: a clock showing "00:59" has not yet reached a minute.
pub fn duration_to_mss(d: MillisDuration) -> String { d.to_string() }

fn format_duration_to_mss(d: MillisDuration, f: &mut impl fmt::Write) -> fmt::Result {
    let s = d.as_secs();
    let minutes = s / 60;
    let seconds = s % 60;
    write!(f, "{minutes:02}:{seconds:02}")
}


// Measures running time over a series of start/pause intervals. Time spent paused is collected
// in `pause_offset`, so that elapsed time is `now - start - pause_offset` while running.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Stopwatch {
    start: Instant,
    pause_offset: Duration,
    paused_at: Option<Instant>,
}

impl Stopwatch {
    fn started(now: Instant) -> Self {
        Stopwatch {
            start: now,
            pause_offset: Duration::ZERO,
            paused_at: None,
        }
    }

    fn is_running(&self) -> bool { self.paused_at.is_none() }

    fn elapsed(&self, now: Instant) -> MillisDuration {
        // Frozen while paused.
        let end = self.paused_at.unwrap_or(now);
        end.saturating_duration_since(self.start).saturating_sub(self.pause_offset).into()
    }

    fn pause(&mut self, now: Instant) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    fn resume(&mut self, now: Instant) {
        if let Some(paused_at) = self.paused_at.take() {
            self.pause_offset += now.saturating_duration_since(paused_at);
        }
    }
}


// Game clock, quarter clock and on-field stints.
//
// Invariant: a player has a stint iff they are on the field and the clock is running. The clock
// itself does not know the lineup, so keeping this invariant is up to `MatchState`.
#[derive(Clone, Debug)]
pub struct MatchClock {
    game: Option<Stopwatch>,
    // `None` between quarters: the next start begins a fresh quarter.
    quarter: Option<Stopwatch>,
    quarter_number: u32,
    stints: BTreeMap<PlayerId, Instant>,
}

impl MatchClock {
    pub fn new() -> Self {
        MatchClock {
            game: None,
            quarter: None,
            quarter_number: 1,
            stints: BTreeMap::new(),
        }
    }

    pub fn is_started(&self) -> bool { self.game.is_some() }
    pub fn is_running(&self) -> bool { self.game.is_some_and(|g| g.is_running()) }
    pub fn quarter(&self) -> u32 { self.quarter_number }

    pub fn elapsed_game(&self, now: Instant) -> MillisDuration {
        self.game.map_or(MillisDuration::ZERO, |g| g.elapsed(now))
    }
    pub fn elapsed_quarter(&self, now: Instant) -> MillisDuration {
        self.quarter.map_or(MillisDuration::ZERO, |q| q.elapsed(now))
    }

    // Returns true if this was the very first start of the game.
    pub fn start_or_resume(&mut self, now: Instant) -> bool {
        let first_start = self.game.is_none();
        match &mut self.game {
            None => self.game = Some(Stopwatch::started(now)),
            Some(game) => game.resume(now),
        }
        match &mut self.quarter {
            None => self.quarter = Some(Stopwatch::started(now)),
            Some(quarter) => quarter.resume(now),
        }
        first_start
    }

    // Stints must be ended by the caller first, so that the time can be credited.
    pub fn pause(&mut self, now: Instant) {
        debug_assert!(self.stints.is_empty());
        self.game.as_mut().map(|g| g.pause(now));
        self.quarter.as_mut().map(|q| q.pause(now));
    }

    pub fn end_quarter(&mut self, now: Instant) {
        self.pause(now);
        self.quarter = None;
        self.quarter_number += 1;
    }

    pub fn has_stint(&self, player: PlayerId) -> bool { self.stints.contains_key(&player) }
    pub fn stint_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.stints.keys().copied()
    }

    pub fn begin_stint(&mut self, player: PlayerId, now: Instant) {
        debug_assert!(self.is_running());
        self.stints.insert(player, now);
    }

    pub fn live_stint(&self, player: PlayerId, now: Instant) -> Option<MillisDuration> {
        self.stints.get(&player).map(|&start| now.saturating_duration_since(start).into())
    }

    pub fn end_stint(&mut self, player: PlayerId, now: Instant) -> Option<MillisDuration> {
        let start = self.stints.remove(&player)?;
        Some(now.saturating_duration_since(start).into())
    }

    pub fn end_all_stints(&mut self, now: Instant) -> Vec<(PlayerId, MillisDuration)> {
        let stints = std::mem::take(&mut self.stints);
        stints
            .into_iter()
            .map(|(player, start)| (player, now.saturating_duration_since(start).into()))
            .collect()
    }
}
