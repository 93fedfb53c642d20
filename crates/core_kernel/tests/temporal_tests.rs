//! Tests for console time handling

use chrono::{NaiveDate, TimeZone, Timelike, Utc};

use core_kernel::{
    format_console_date, format_console_timestamp, parse_console_date, parse_console_timestamp, BreachWindow,
    PolicyPeriod, TemporalError, CONSOLE_TIMEZONE,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod timestamps {
    use super::*;

    #[test]
    fn test_console_timestamp_is_ist() {
        let at = Utc.with_ymd_and_hms(2025, 12, 5, 6, 34, 0).unwrap();
        assert_eq!(format_console_timestamp(at), "12:04 PM | Dec 05, 2025");
    }

    #[test]
    fn test_midnight_rolls_the_date() {
        // 19:00 UTC is 00:30 the next day in IST
        let at = Utc.with_ymd_and_hms(2025, 12, 5, 19, 0, 0).unwrap();
        assert_eq!(format_console_timestamp(at), "12:30 AM | Dec 06, 2025");
    }

    #[test]
    fn test_parse_console_timestamp() {
        let parsed = parse_console_timestamp("10:30 AM | Nov 28, 2025").unwrap();
        let local = parsed.with_timezone(&CONSOLE_TIMEZONE);
        assert_eq!((local.hour(), local.minute()), (10, 30));
        assert_eq!(local.date_naive(), date(2025, 11, 28));
    }

    #[test]
    fn test_parse_rejects_other_formats() {
        assert_eq!(
            parse_console_timestamp("2025-12-05T12:04:00"),
            Err(TemporalError::InvalidTimestamp("2025-12-05T12:04:00".to_string()))
        );
    }
}

mod dates {
    use super::*;

    #[test]
    fn test_console_date_round_trip() {
        let parsed = parse_console_date("Dec 05, 2025").unwrap();
        assert_eq!(parsed, date(2025, 12, 5));
        assert_eq!(format_console_date(parsed), "Dec 05, 2025");
    }

    #[test]
    fn test_console_date_rejects_garbage() {
        assert!(parse_console_date("05/12/2025").is_err());
    }

    #[test]
    fn test_policy_period() {
        let period = PolicyPeriod::new(date(2025, 1, 1), date(2025, 12, 31)).unwrap();
        assert!(period.contains(date(2025, 1, 1)));
        assert!(period.contains(date(2025, 12, 31)));
        assert!(!period.contains(date(2026, 1, 1)));
        assert_eq!(period.to_string(), "1 January, 2025 - 31 December, 2025");
    }

    #[test]
    fn test_policy_period_rejects_inverted_range() {
        let err = PolicyPeriod::new(date(2025, 2, 1), date(2025, 1, 1)).unwrap_err();
        assert!(matches!(err, TemporalError::InvalidPeriod { .. }));
    }
}

mod breach_window {
    use super::*;

    #[test]
    fn test_display_pluralizes() {
        assert_eq!(BreachWindow::Remaining { days: 2, hours: 5 }.to_string(), "2 days 5 hours");
        assert_eq!(BreachWindow::Remaining { days: 1, hours: 1 }.to_string(), "1 day 1 hour");
        assert_eq!(BreachWindow::Overdue.to_string(), "Overdue");
        assert_eq!(BreachWindow::NotApplicable.to_string(), "-");
    }

    #[test]
    fn test_parse_dashboard_values() {
        assert_eq!(
            "12 days 8 hours".parse::<BreachWindow>().unwrap(),
            BreachWindow::Remaining { days: 12, hours: 8 }
        );
        let overdue: BreachWindow = "Overdue".parse().unwrap();
        assert!(overdue.is_overdue());
        assert!("2 weeks".parse::<BreachWindow>().is_err());
    }

    #[test]
    fn test_serde_is_tagged() {
        let json = serde_json::to_value(BreachWindow::Remaining { days: 3, hours: 12 }).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "remaining", "days": 3, "hours": 12 }));
    }
}
