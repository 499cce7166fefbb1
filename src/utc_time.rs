use std::fmt;

use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::{datetime, format_description};
use time::{OffsetDateTime, PrimitiveDateTime};


const HMS_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]:[second]");

// Wall-clock time of a logged event. Only used for display: all match timing goes through the
// monotonic `MatchClock`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UtcDateTime(PrimitiveDateTime);

impl UtcDateTime {
    pub const UNIX_EPOCH: Self = Self(datetime!(1970-01-01 0:00));
    pub fn now() -> Self {
        let now_odt = OffsetDateTime::now_utc();
        Self(PrimitiveDateTime::new(now_odt.date(), now_odt.time()))
    }

    // "HH:MM:SS"
    pub fn format_hms(&self) -> String {
        self.0.format(HMS_FORMAT).unwrap_or_else(|_| "--:--:--".to_owned())
    }
}

impl From<PrimitiveDateTime> for UtcDateTime {
    fn from(pdt: PrimitiveDateTime) -> Self { Self(pdt) }
}
impl fmt::Display for UtcDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.format_hms()) }
}
