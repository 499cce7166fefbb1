// Per-player summary table: the one artifact a match leaves behind.

use std::io;

use instant::Instant;
use serde::{Deserialize, Serialize};

use crate::game::MatchState;
use crate::stats::StatCategory;


#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct StatsRow {
    #[serde(rename = "Player")]
    pub player: String,
    // Rounded to one decimal.
    #[serde(rename = "Minutes")]
    pub minutes: f64,
    #[serde(rename = "Goals")]
    pub goals: u32,
    #[serde(rename = "Assists")]
    pub assists: u32,
    #[serde(rename = "Blocks")]
    pub blocks: u32,
    #[serde(rename = "Saves")]
    pub saves: u32,
}

fn round_to_tenths(minutes: f64) -> f64 { (minutes * 10.0).round() / 10.0 }

// One row per roster player, in roster order. Live stints count.
pub fn stats_table(state: &MatchState, now: Instant) -> Vec<StatsRow> {
    state
        .roster()
        .iter()
        .map(|(id, player)| StatsRow {
            player: player.name.clone(),
            minutes: round_to_tenths(state.total_minutes(id, now)),
            goals: player.stats[StatCategory::Goals],
            assists: player.stats[StatCategory::Assists],
            blocks: player.stats[StatCategory::Blocks],
            saves: player.stats[StatCategory::Saves],
        })
        .collect()
}

pub fn write_csv<W: io::Write>(rows: &[StatsRow], writer: W) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_csv(state: &MatchState, now: Instant) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in stats_table(state, now) {
        writer.serialize(row)?;
    }
    let bytes = writer.into_inner().map_err(|err| csv::Error::from(err.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|err| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, err)))
}
