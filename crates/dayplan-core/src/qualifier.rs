//! Time-of-day qualifiers that disambiguate a bare hour-minute pair.

use std::fmt;
use std::str::FromStr;

/// The word or suffix attached to a clock value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeQualifier {
    /// 凌晨
    EarlyMorning,
    /// 早上, 上午
    Morning,
    /// 中午
    Noon,
    /// 下午
    Afternoon,
    /// 晚上
    Evening,
    /// 夜间
    Night,
    /// `AM` / `am`
    Am,
    /// `PM` / `pm`
    Pm,
    /// No qualifier: 24-hour notation.
    Bare,
}

impl TimeQualifier {
    /// Whether this qualifier moves hours 1-11 into the afternoon half of the day.
    pub const fn is_post_meridiem(self) -> bool {
        matches!(
            self,
            Self::Noon | Self::Afternoon | Self::Evening | Self::Night | Self::Pm
        )
    }

    /// Converts a literal clock hour into a 24-hour value.
    ///
    /// Post-meridiem qualifiers add 12 unless the literal hour is already 12.
    /// Nothing is range-checked: `晚上 13:00` yields 25.
    pub const fn adjust_hour(self, hour: u32) -> u32 {
        if self.is_post_meridiem() && hour != 12 {
            hour + 12
        } else {
            hour
        }
    }
}

impl fmt::Display for TimeQualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::EarlyMorning => "early_morning",
            Self::Morning => "morning",
            Self::Noon => "noon",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
            Self::Am => "am",
            Self::Pm => "pm",
            Self::Bare => "24h",
        };
        write!(f, "{s}")
    }
}

impl FromStr for TimeQualifier {
    type Err = UnknownQualifier;

    /// Parses a qualifier token exactly as it appears in plan text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "凌晨" => Ok(Self::EarlyMorning),
            "早上" | "上午" => Ok(Self::Morning),
            "中午" => Ok(Self::Noon),
            "下午" => Ok(Self::Afternoon),
            "晚上" => Ok(Self::Evening),
            "夜间" => Ok(Self::Night),
            "AM" | "am" => Ok(Self::Am),
            "PM" | "pm" => Ok(Self::Pm),
            "" => Ok(Self::Bare),
            _ => Err(UnknownQualifier(s.to_string())),
        }
    }
}

/// Error type for unrecognised qualifier tokens.
#[derive(Debug, Clone)]
pub struct UnknownQualifier(String);

impl fmt::Display for UnknownQualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown time qualifier: {}", self.0)
    }
}

impl std::error::Error for UnknownQualifier {}
