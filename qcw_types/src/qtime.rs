//! Timestamps as stored by chart lines.
//!
//! A [`QTime`] counts 2-second ticks since 1801-01-01 00:00 in the zone of
//! the machine that wrote the file. The writer also shifts instants that fall
//! in daylight saving time by one hour, which [`QTimeCodec`] undoes.

use crate::error::FormatError;
use anyhow::Result;
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, Offset, TimeZone};
use derive_more::{From, Into};
use std::fmt;

const SECONDS_PER_TICK: i64 = 2;
const DST_SHIFT_SECONDS: i64 = 3600;

#[derive(From, Into, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default, Debug)]
pub struct QTime(pub u32);

impl QTime {
    /// The wall-clock time of the writer, before any zone or DST correction.
    pub fn wall_clock(self) -> Option<NaiveDateTime> {
        let epoch = NaiveDate::from_ymd_opt(1801, 1, 1)?.and_hms_opt(0, 0, 0)?;
        epoch.checked_add_signed(Duration::seconds(i64::from(self.0) * SECONDS_PER_TICK))
    }
}

impl fmt::Display for QTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.wall_clock() {
            Some(ndt) => write!(f, "{ndt}"),
            None => write!(f, "qtime {}", self.0),
        }
    }
}

/// Converts between [`QTime`] and instants in the zone `Tz`.
#[derive(Clone, Debug)]
pub struct QTimeCodec<Tz: TimeZone> {
    tz: Tz,
    /// Seconds between the Unix epoch and 1801-01-01 00:00 in `tz`.
    epoch_distance: i64,
}

impl QTimeCodec<Local> {
    pub fn local() -> Result<Self> {
        Self::new(Local)
    }
}

impl<Tz: TimeZone> QTimeCodec<Tz> {
    pub fn new(tz: Tz) -> Result<Self> {
        let epoch = tz
            .with_ymd_and_hms(1801, 1, 1, 0, 0, 0)
            .earliest()
            .ok_or_else(|| FormatError::TimeOutOfRange("1801-01-01 in this zone".into()))?;
        Ok(Self {
            epoch_distance: epoch.timestamp().abs(),
            tz,
        })
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    pub fn decode(&self, qtime: QTime) -> Result<DateTime<Tz>> {
        let mut unix = i64::from(qtime.0) * SECONDS_PER_TICK - self.epoch_distance;
        let dt = self.at(unix)?;
        if self.is_dst(&dt) {
            unix -= DST_SHIFT_SECONDS;
        }
        self.at(unix)
    }

    pub fn encode(&self, dt: &DateTime<Tz>) -> Result<QTime> {
        let mut unix = dt.timestamp();
        if self.is_dst(dt) {
            unix += DST_SHIFT_SECONDS;
        }
        let ticks = (unix + self.epoch_distance) / SECONDS_PER_TICK;
        let int = u32::try_from(ticks).map_err(|_| {
            FormatError::TimeOutOfRange(format!("{} is not a 32-bit qtime", dt.naive_utc()))
        })?;
        Ok(QTime(int))
    }

    fn at(&self, unix: i64) -> Result<DateTime<Tz>> {
        self.tz
            .timestamp_opt(unix, 0)
            .single()
            .ok_or_else(|| FormatError::TimeOutOfRange(format!("unix time {unix}")).into())
    }

    /// Whether `dt` is ahead of the standard offset of its year.
    /// The standard offset is the smaller of the January and July offsets.
    pub fn is_dst(&self, dt: &DateTime<Tz>) -> bool {
        let year = dt.naive_utc().year();
        let offset_on = |month: u32| {
            NaiveDate::from_ymd_opt(year, month, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|ndt| self.tz.offset_from_utc_datetime(&ndt).fix().local_minus_utc())
        };
        let standard = match (offset_on(1), offset_on(7)) {
            (Some(jan), Some(jul)) => jan.min(jul),
            _ => return false,
        };
        dt.offset().fix().local_minus_utc() > standard
    }
}
