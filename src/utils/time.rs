//! Humanized durations.

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

fn plural(n: u64, unit: &str) -> String {
    format!("{} {}s", n, unit)
}

fn count(n: u64, unit: &str) -> String {
    match n {
        1 => format!("1 {}", unit),
        n => plural(n, unit),
    }
}

// Months are 30.5 days on average.
fn whole_months(days: u64) -> u64 {
    days * 2 / 61
}

/// Describe an elapsed duration in words, e.g. "3 minutes" or "an hour".
pub fn natural_delta(secs: u64) -> String {
    let days = secs / DAY;

    if days == 0 {
        return match secs {
            0 => "a moment".to_string(),
            1 => "a second".to_string(),
            s if s < MINUTE => plural(s, "second"),
            s if s < 2 * MINUTE => "a minute".to_string(),
            s if s < HOUR => plural(s / MINUTE, "minute"),
            s if s < 2 * HOUR => "an hour".to_string(),
            s => plural(s / HOUR, "hour"),
        };
    }

    if days == 1 {
        return "a day".to_string();
    }

    if days < 365 {
        return match whole_months(days) {
            0 => plural(days, "day"),
            1 => "a month".to_string(),
            months => plural(months, "month"),
        };
    }

    let (years, rest) = (days / 365, days % 365);
    if years > 1 {
        return plural(years, "year");
    }

    match (whole_months(rest), rest) {
        (0, 0) => "a year".to_string(),
        (0, rest) => format!("1 year, {}", count(rest, "day")),
        (months, _) => format!("1 year, {}", count(months, "month")),
    }
}

/// Relative time in the past, e.g. "3 minutes ago" or "now".
pub fn natural_time(secs: u64) -> String {
    match secs {
        0 => "now".to_string(),
        s => format!("{} ago", natural_delta(s)),
    }
}

/// How long someone has been away, without the trailing "ago".
pub fn away_for(secs: u64) -> String {
    match secs {
        0 => "now".to_string(),
        s => natural_delta(s),
    }
}

/// Whole seconds between `since` and now, never negative.
pub fn elapsed_secs(since: chrono::DateTime<chrono::Utc>) -> u64 {
    (chrono::Utc::now() - since).num_seconds().max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_delta_small() {
        assert_eq!(natural_delta(0), "a moment");
        assert_eq!(natural_delta(1), "a second");
        assert_eq!(natural_delta(42), "42 seconds");
        assert_eq!(natural_delta(60), "a minute");
        assert_eq!(natural_delta(119), "a minute");
        assert_eq!(natural_delta(180), "3 minutes");
        assert_eq!(natural_delta(3600), "an hour");
        assert_eq!(natural_delta(5 * 3600 + 59), "5 hours");
    }

    #[test]
    fn test_natural_delta_large() {
        assert_eq!(natural_delta(DAY), "a day");
        assert_eq!(natural_delta(DAY + 5 * HOUR), "a day");
        assert_eq!(natural_delta(12 * DAY), "12 days");
        assert_eq!(natural_delta(30 * DAY), "30 days");
        assert_eq!(natural_delta(31 * DAY), "a month");
        assert_eq!(natural_delta(100 * DAY), "3 months");
        assert_eq!(natural_delta(800 * DAY), "2 years");
    }

    #[test]
    fn test_natural_delta_one_year_keeps_remainder() {
        assert_eq!(natural_delta(365 * DAY), "a year");
        assert_eq!(natural_delta(366 * DAY), "1 year, 1 day");
        assert_eq!(natural_delta(370 * DAY), "1 year, 5 days");
        assert_eq!(natural_delta(400 * DAY), "1 year, 1 month");
        assert_eq!(natural_delta(500 * DAY), "1 year, 4 months");
    }

    #[test]
    fn test_natural_time() {
        assert_eq!(natural_time(0), "now");
        assert_eq!(natural_time(180), "3 minutes ago");
        assert_eq!(away_for(0), "now");
        assert_eq!(away_for(180), "3 minutes");
    }

    #[test]
    fn test_elapsed_secs_never_negative() {
        let future = chrono::Utc::now() + chrono::Duration::hours(1);
        assert_eq!(elapsed_secs(future), 0);

        let past = chrono::Utc::now() - chrono::Duration::seconds(90);
        assert!(elapsed_secs(past) >= 90);
    }
}
