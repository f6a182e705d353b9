use chrono::{DateTime, Duration, Utc};
use chrono_humanize::HumanTime;

/// Format a listing's posted date relative to `now`.
/// - <1 minute: "Just now"
/// - <30 days: humanized ("3 days ago")
/// - Older: "12 Mar 2024"
pub fn format_posted_at(posted_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let age = now.signed_duration_since(posted_at);
    if age < Duration::minutes(1) {
        "Just now".to_string()
    } else if age < Duration::days(30) {
        HumanTime::from(posted_at - now).to_string()
    } else {
        posted_at.format("%-d %b %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn recent_listing_is_humanized() {
        assert_eq!(format_posted_at(now() - Duration::days(3), now()), "3 days ago");
        assert_eq!(format_posted_at(now() - Duration::hours(2), now()), "2 hours ago");
    }

    #[test]
    fn brand_new_listing() {
        assert_eq!(format_posted_at(now(), now()), "Just now");
    }

    #[test]
    fn old_listing_shows_date() {
        assert_eq!(format_posted_at(now() - Duration::days(90), now()), "3 Mar 2024");
    }
}
