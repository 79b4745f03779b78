use chrono::{Duration, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::weekdays::WeekdayMask;

/// A configured regional trading session
///
/// Sessions are configuration: created at process start, validated by the
/// registry, and never mutated at runtime. A session binds a named intraday
/// time window to a set of exchanges and a risk envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (e.g. "EU_MORNING")
    pub id: String,
    /// Statically disabled sessions are skipped by the scheduler entirely
    #[serde(default = "default_active")]
    pub active: bool,
    /// Days of the week this session can run
    #[serde(default)]
    pub weekdays: WeekdayMask,
    /// Window start, local time-of-day in the master time zone
    pub window_start: NaiveTime,
    /// Window end, local time-of-day in the master time zone.
    /// Must be after `window_start`; windows do not span midnight.
    pub window_end: NaiveTime,
    /// Exchanges whose open/closed/auction status gates the window
    pub exchanges: Vec<String>,
    /// Logical symbol-group identifier, resolved externally
    pub universe: String,
    /// Fraction of total capital this session may deploy while open
    pub max_gross_exposure_pct: Decimal,
    /// Hard per-order ceiling in base currency
    pub max_order_notional: Decimal,
    /// Minimum spacing between order submissions attributable to this
    /// session. Enforced by order-initiating callers, not the scheduler.
    #[serde(default)]
    pub cooldown_seconds: u64,
    /// Treat the session as closed during exchange auction phases
    #[serde(default)]
    pub skip_auctions: bool,
}

fn default_active() -> bool {
    true
}

impl Session {
    /// Is the given local time-of-day inside the session window?
    ///
    /// Start-inclusive, end-exclusive.
    pub fn in_window(&self, local_time: NaiveTime) -> bool {
        self.window_start <= local_time && local_time < self.window_end
    }

    /// Minimum order spacing as a duration
    pub fn cooldown(&self) -> Duration {
        Duration::seconds(self.cooldown_seconds as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn eu_morning() -> Session {
        Session {
            id: "EU_MORNING".to_string(),
            active: true,
            weekdays: WeekdayMask::default(),
            window_start: NaiveTime::from_hms_opt(8, 5, 0).unwrap(),
            window_end: NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
            exchanges: vec!["XETR".to_string(), "XPAR".to_string()],
            universe: "eu_large_caps".to_string(),
            max_gross_exposure_pct: dec!(0.25),
            max_order_notional: dec!(50_000),
            cooldown_seconds: 30,
            skip_auctions: true,
        }
    }

    #[test]
    fn test_in_window_bounds() {
        let session = eu_morning();

        // Start is inclusive
        assert!(session.in_window(NaiveTime::from_hms_opt(8, 5, 0).unwrap()));
        // End is exclusive
        assert!(!session.in_window(NaiveTime::from_hms_opt(11, 30, 0).unwrap()));
        // Inside
        assert!(session.in_window(NaiveTime::from_hms_opt(9, 0, 0).unwrap()));
        // Before
        assert!(!session.in_window(NaiveTime::from_hms_opt(7, 0, 0).unwrap()));
    }

    #[test]
    fn test_cooldown_duration() {
        let session = eu_morning();
        assert_eq!(session.cooldown(), Duration::seconds(30));
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{
            "id": "US_CORE",
            "window_start": "15:30:00",
            "window_end": "22:00:00",
            "exchanges": ["XNYS"],
            "universe": "us_large_caps",
            "max_gross_exposure_pct": "0.40",
            "max_order_notional": "100000"
        }"#;

        let session: Session = serde_json::from_str(json).unwrap();
        assert!(session.active);
        assert!(!session.skip_auctions);
        assert_eq!(session.cooldown_seconds, 0);
        assert!(session.weekdays.contains(chrono::Weekday::Mon));
        assert!(!session.weekdays.contains(chrono::Weekday::Sat));
    }
}
