use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

// Future timestamps count as zero.
pub fn days_since(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = now.signed_duration_since(timestamp).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).max(0.0)
}

pub fn time_decay(timestamp: DateTime<Utc>, now: DateTime<Utc>, factor: f64) -> f64 {
    (-factor * days_since(timestamp, now)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_fresh_interaction_keeps_full_weight() {
        let now = Utc::now();
        assert!((time_decay(now, now, 0.1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_week_old_interaction_keeps_about_half() {
        let now = Utc::now();
        let decay = time_decay(now - Duration::days(7), now, 0.1);
        assert!((decay - 0.4966).abs() < 1e-3);
    }

    #[test]
    fn test_month_old_interaction_keeps_about_five_percent() {
        let now = Utc::now();
        let decay = time_decay(now - Duration::days(30), now, 0.1);
        assert!((decay - 0.0498).abs() < 1e-3);
    }

    #[test]
    fn test_future_timestamp_is_capped() {
        let now = Utc::now();
        assert_eq!(days_since(now + Duration::hours(5), now), 0.0);
        assert!((time_decay(now + Duration::days(3), now, 0.1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_days() {
        let now = Utc::now();
        let days = days_since(now - Duration::hours(36), now);
        assert!((days - 1.5).abs() < 1e-9);
    }
}
