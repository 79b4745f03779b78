use rust_decimal::Decimal;

use crate::error::ConfigError;
use crate::session::Session;

/// Immutable registry of configured trading sessions
///
/// The registry is built once at startup and injected where needed; there
/// is no runtime mutation path. Construction validates every session, so a
/// registry that exists is a registry the scheduler can trust.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    sessions: Vec<Session>,
}

impl SessionRegistry {
    /// Build a registry, validating every session
    pub fn new(sessions: Vec<Session>) -> Result<Self, ConfigError> {
        let mut seen = std::collections::HashSet::new();

        for session in &sessions {
            if session.id.is_empty() {
                return Err(ConfigError::EmptySessionId);
            }
            if !seen.insert(session.id.clone()) {
                return Err(ConfigError::DuplicateSessionId(session.id.clone()));
            }
            if session.window_start >= session.window_end {
                return Err(ConfigError::InvalidWindow {
                    id: session.id.clone(),
                    start: session.window_start,
                    end: session.window_end,
                });
            }
            if session.exchanges.is_empty() {
                return Err(ConfigError::EmptyExchangeSet(session.id.clone()));
            }
            if session.max_gross_exposure_pct <= Decimal::ZERO
                || session.max_gross_exposure_pct > Decimal::ONE
            {
                return Err(ConfigError::InvalidExposure {
                    id: session.id.clone(),
                    value: session.max_gross_exposure_pct,
                });
            }
            if session.max_order_notional <= Decimal::ZERO {
                return Err(ConfigError::InvalidNotional {
                    id: session.id.clone(),
                    value: session.max_order_notional,
                });
            }
            if session.weekdays.is_empty() {
                return Err(ConfigError::EmptyWeekdayMask(session.id.clone()));
            }
        }

        Ok(Self { sessions })
    }

    /// Load a registry from a JSON array of sessions
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let sessions: Vec<Session> = serde_json::from_str(json)?;
        Self::new(sessions)
    }

    /// All sessions, in registry order
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Look up a session by id
    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weekdays::WeekdayMask;
    use chrono::NaiveTime;
    use rust_decimal_macros::dec;

    fn session(id: &str) -> Session {
        Session {
            id: id.to_string(),
            active: true,
            weekdays: WeekdayMask::default(),
            window_start: NaiveTime::from_hms_opt(8, 5, 0).unwrap(),
            window_end: NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
            exchanges: vec!["XETR".to_string()],
            universe: "eu_large_caps".to_string(),
            max_gross_exposure_pct: dec!(0.25),
            max_order_notional: dec!(50_000),
            cooldown_seconds: 0,
            skip_auctions: false,
        }
    }

    #[test]
    fn test_valid_registry() {
        let registry =
            SessionRegistry::new(vec![session("EU_MORNING"), session("EU_AFTERNOON")]).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.get("EU_MORNING").is_some());
        assert!(registry.get("ASIA_CORE").is_none());
    }

    #[test]
    fn test_registry_preserves_order() {
        let registry =
            SessionRegistry::new(vec![session("B"), session("A"), session("C")]).unwrap();
        let ids: Vec<&str> = registry.sessions().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = SessionRegistry::new(vec![session("EU_MORNING"), session("EU_MORNING")]);
        assert!(matches!(result, Err(ConfigError::DuplicateSessionId(_))));
    }

    #[test]
    fn test_inverted_window_rejected() {
        let mut bad = session("EU_MORNING");
        bad.window_start = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        bad.window_end = NaiveTime::from_hms_opt(9, 0, 0).unwrap();

        let result = SessionRegistry::new(vec![bad]);
        assert!(matches!(result, Err(ConfigError::InvalidWindow { .. })));
    }

    #[test]
    fn test_empty_exchanges_rejected() {
        let mut bad = session("EU_MORNING");
        bad.exchanges.clear();

        let result = SessionRegistry::new(vec![bad]);
        assert!(matches!(result, Err(ConfigError::EmptyExchangeSet(_))));
    }

    #[test]
    fn test_exposure_out_of_range_rejected() {
        let mut bad = session("EU_MORNING");
        bad.max_gross_exposure_pct = dec!(1.5);

        let result = SessionRegistry::new(vec![bad]);
        assert!(matches!(result, Err(ConfigError::InvalidExposure { .. })));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[{
            "id": "EU_MORNING",
            "weekdays": ["Mon", "Tue", "Wed", "Thu", "Fri"],
            "window_start": "08:05:00",
            "window_end": "11:30:00",
            "exchanges": ["XETR", "XPAR"],
            "universe": "eu_large_caps",
            "max_gross_exposure_pct": "0.25",
            "max_order_notional": "50000",
            "cooldown_seconds": 30,
            "skip_auctions": true
        }]"#;

        let registry = SessionRegistry::from_json_str(json).unwrap();
        let session = registry.get("EU_MORNING").unwrap();
        assert_eq!(session.exchanges.len(), 2);
        assert!(session.skip_auctions);
    }

    #[test]
    fn test_overlapping_windows_allowed() {
        // Region handoff overlap is expected across different sessions
        let mut late = session("EU_LATE");
        late.window_start = NaiveTime::from_hms_opt(11, 0, 0).unwrap();
        late.window_end = NaiveTime::from_hms_opt(14, 0, 0).unwrap();

        let registry = SessionRegistry::new(vec![session("EU_MORNING"), late]);
        assert!(registry.is_ok());
    }
}
