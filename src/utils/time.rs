use chrono::{NaiveDateTime, Utc};

/// Format the server uses for post timestamps, e.g. `3/14/21 9:05 PM`.
const SERVER_TIMESTAMP_FORMAT: &str = "%m/%d/%y %I:%M %p";

pub fn parse_server_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), SERVER_TIMESTAMP_FORMAT).ok()
}

/// Server timestamps are written in UTC without a zone marker.
pub fn relative_time(dt: &NaiveDateTime) -> String {
    relative_time_from(dt, &Utc::now().naive_utc())
}

pub fn relative_time_from(dt: &NaiveDateTime, now: &NaiveDateTime) -> String {
    let duration = now.signed_duration_since(*dt);

    let minutes = duration.num_minutes();
    if minutes < 1 {
        return "now".to_string();
    }
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = duration.num_hours();
    if hours < 24 {
        return format!("{}h", hours);
    }

    let days = duration.num_days();
    if days < 30 {
        return format!("{}d", days);
    }

    if days < 365 {
        return format!("{}mo", days / 30);
    }

    format!("{}y", days / 365)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn parses_unpadded_server_format() {
        let dt = parse_server_timestamp("3/4/21 9:05 PM").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2021-03-04 21:05");
        assert!(parse_server_timestamp("t").is_none());
    }

    #[test]
    fn buckets_relative_durations() {
        let now = parse_server_timestamp("12/31/24 11:00 AM").unwrap();
        assert_eq!(relative_time_from(&now, &now), "now");
        assert_eq!(relative_time_from(&(now - Duration::minutes(5)), &now), "5m");
        assert_eq!(relative_time_from(&(now - Duration::hours(3)), &now), "3h");
        assert_eq!(relative_time_from(&(now - Duration::days(2)), &now), "2d");
        assert_eq!(relative_time_from(&(now - Duration::days(65)), &now), "2mo");
        assert_eq!(relative_time_from(&(now - Duration::days(800)), &now), "2y");
        assert_eq!(relative_time_from(&(now + Duration::hours(1)), &now), "now");
    }

    #[test]
    fn ages_are_measured_against_utc() {
        let written = (Utc::now() - Duration::hours(2))
            .format(SERVER_TIMESTAMP_FORMAT)
            .to_string();
        let dt = parse_server_timestamp(&written).unwrap();
        assert_eq!(relative_time(&dt), "2h");
    }
}
