use crate::error::FormatError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

const ALL_SESSIONS_SUFFIX: &str = "255";

#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum PeriodKind {
    Tick,
    Minutely(u32),
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl PeriodKind {
    /// Length of the period in minutes, as used for ordering.
    pub fn minutes(self) -> u32 {
        match self {
            Self::Tick => 0,
            Self::Minutely(n) => n,
            Self::Daily => 1440,
            Self::Weekly => 10080,
            Self::Monthly => 302400,
            Self::Quarterly => 907200,
            Self::Yearly => 3628800,
        }
    }

    fn rank(self) -> u8 {
        match self {
            Self::Tick => 0,
            Self::Minutely(_) => 1,
            Self::Daily => 2,
            Self::Weekly => 3,
            Self::Monthly => 4,
            Self::Quarterly => 5,
            Self::Yearly => 6,
        }
    }
}

/// The period half of a chart title, e.g. `15`, `D` or `5:255`.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct TimePeriod {
    pub kind: PeriodKind,
    /// Include all trading sessions.
    pub all_sessions: bool,
}

impl TimePeriod {
    pub fn new(kind: PeriodKind) -> Self {
        Self {
            kind,
            all_sessions: false,
        }
    }

    pub fn minutes(&self) -> u32 {
        self.kind.minutes()
    }
}

impl FromStr for TimePeriod {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, FormatError> {
        let unknown = || FormatError::UnknownTimePeriod(s.to_string());

        let lower = s.trim().to_ascii_lowercase();
        let (code, all_sessions) = match lower.split_once(':') {
            None => (lower.as_str(), false),
            Some((code, ALL_SESSIONS_SUFFIX)) => (code, true),
            Some(_) => return Err(unknown()),
        };

        let kind = match code {
            "y" => PeriodKind::Yearly,
            "q" => PeriodKind::Quarterly,
            "m" => PeriodKind::Monthly,
            "w" => PeriodKind::Weekly,
            "d" => PeriodKind::Daily,
            "t" | "0" => PeriodKind::Tick,
            digits => PeriodKind::Minutely(digits.parse::<u32>().map_err(|_| unknown())?),
        };

        Ok(Self { kind, all_sessions })
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PeriodKind::Tick => write!(f, "0")?,
            PeriodKind::Minutely(n) => write!(f, "{n}")?,
            PeriodKind::Daily => write!(f, "D")?,
            PeriodKind::Weekly => write!(f, "W")?,
            PeriodKind::Monthly => write!(f, "M")?,
            PeriodKind::Quarterly => write!(f, "Q")?,
            PeriodKind::Yearly => write!(f, "Y")?,
        }
        if self.all_sessions {
            write!(f, ":{ALL_SESSIONS_SUFFIX}")?;
        }
        Ok(())
    }
}

impl Ord for TimePeriod {
    fn cmp(&self, other: &Self) -> Ordering {
        self.minutes()
            .cmp(&other.minutes())
            .then_with(|| self.kind.rank().cmp(&other.kind.rank()))
            .then_with(|| self.all_sessions.cmp(&other.all_sessions))
    }
}

impl PartialOrd for TimePeriod {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
