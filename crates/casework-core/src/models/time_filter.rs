use serde::{Deserialize, Serialize};

use crate::constants::{TODAY_HOURS, WEEK_HOURS, YESTERDAY_HOURS};

/// Activity feed timeframe, bucketed by whole hours elapsed before `now`.
/// Timestamps after `now` count as elapsed < 0 and land in Today and Week.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    #[default]
    All,
    Today,
    Yesterday,
    Week,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::Week => "week",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All Time",
            Self::Today => "Today",
            Self::Yesterday => "Yesterday",
            Self::Week => "This Week",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "today" => Some(Self::Today),
            "yesterday" => Some(Self::Yesterday),
            "week" => Some(Self::Week),
            _ => None,
        }
    }

    pub fn cycle_next(self) -> Self {
        match self {
            Self::All => Self::Today,
            Self::Today => Self::Yesterday,
            Self::Yesterday => Self::Week,
            Self::Week => Self::All,
        }
    }

    pub fn matches(&self, timestamp: u64, now: u64) -> bool {
        let hours = elapsed_hours(timestamp, now);
        match self {
            Self::All => true,
            Self::Today => hours < TODAY_HOURS,
            Self::Yesterday => (TODAY_HOURS..YESTERDAY_HOURS).contains(&hours),
            Self::Week => hours < WEEK_HOURS,
        }
    }
}

/// Floor of the hours between `timestamp` and `now`
pub fn elapsed_hours(timestamp: u64, now: u64) -> i64 {
    let diff = i128::from(now) - i128::from(timestamp);
    // |diff| / 3600 always fits in i64
    diff.div_euclid(3600) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: u64 = 1_743_864_350;

    #[test]
    fn test_two_hours_ago_is_today() {
        let ts = T0 - 2 * 3600;
        assert!(Timeframe::Today.matches(ts, T0));
        assert!(!Timeframe::Yesterday.matches(ts, T0));
        assert!(Timeframe::Week.matches(ts, T0));
    }

    #[test]
    fn test_thirty_hours_ago_is_yesterday() {
        let ts = T0 - 30 * 3600;
        assert!(Timeframe::Yesterday.matches(ts, T0));
        assert!(!Timeframe::Today.matches(ts, T0));
    }

    #[test]
    fn test_boundaries_use_whole_hours() {
        // 23h59m59s is still today
        assert!(Timeframe::Today.matches(T0 - (24 * 3600 - 1), T0));
        assert!(Timeframe::Yesterday.matches(T0 - 24 * 3600, T0));
        assert!(!Timeframe::Yesterday.matches(T0 - 48 * 3600, T0));
        assert!(!Timeframe::Week.matches(T0 - 168 * 3600, T0));
    }

    #[test]
    fn test_future_timestamps() {
        assert_eq!(elapsed_hours(T0 + 1, T0), -1);
        assert!(Timeframe::Today.matches(T0 + 7200, T0));
        assert!(!Timeframe::Yesterday.matches(T0 + 7200, T0));
    }

    #[test]
    fn test_extreme_timestamps_do_not_wrap() {
        let max_hours = (u64::MAX / 3600) as i64;
        assert_eq!(elapsed_hours(0, u64::MAX), max_hours);
        assert_eq!(elapsed_hours(u64::MAX, 0), -max_hours - 1);
        assert!(!Timeframe::Today.matches(0, u64::MAX));
        assert!(Timeframe::Week.matches(u64::MAX, T0));
        assert!(!Timeframe::Yesterday.matches(u64::MAX, T0));
    }

    #[test]
    fn test_cycle_and_parse() {
        assert_eq!(Timeframe::All.cycle_next(), Timeframe::Today);
        assert_eq!(Timeframe::Week.cycle_next(), Timeframe::All);
        assert_eq!(Timeframe::parse("Week"), Some(Timeframe::Week));
        assert_eq!(Timeframe::parse("month"), None);
    }
}
