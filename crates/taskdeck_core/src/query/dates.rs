//! Due-date helpers shared by the projection engine and presentation code.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};

/// Instant a date-only due date is compared against: its start of day (UTC).
pub fn due_instant(due: NaiveDate) -> DateTime<Utc> {
    due.and_time(NaiveTime::MIN).and_utc()
}

/// Whether a due date lies strictly before the current instant.
///
/// With date-only granularity this means a task due today reads as overdue
/// once the day has begun; tasks without a due date are never overdue.
pub fn is_overdue(due: Option<NaiveDate>, now: DateTime<Utc>) -> bool {
    due.is_some_and(|date| due_instant(date) < now)
}

/// Short human label for a due date: "Today", "Tomorrow", "Yesterday" or a
/// month-day form like "Jul 18".
pub fn due_label(due: NaiveDate, today: NaiveDate) -> String {
    if due == today {
        return "Today".to_string();
    }
    if Some(due) == today.checked_add_days(Days::new(1)) {
        return "Tomorrow".to_string();
    }
    if Some(due) == today.checked_sub_days(Days::new(1)) {
        return "Yesterday".to_string();
    }
    format!("{} {}", due.format("%b"), due.day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn overdue_is_strict_and_ignores_missing_dates() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        assert!(is_overdue(NaiveDate::from_ymd_opt(2024, 1, 9), now));
        assert!(is_overdue(NaiveDate::from_ymd_opt(2024, 1, 10), now));
        assert!(!is_overdue(NaiveDate::from_ymd_opt(2024, 1, 11), now));
        assert!(!is_overdue(None, now));
    }

    #[test]
    fn labels_cover_the_adjacent_days() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let label = |d: u32| due_label(NaiveDate::from_ymd_opt(2024, 1, d).unwrap(), today);
        assert_eq!(label(10), "Today");
        assert_eq!(label(11), "Tomorrow");
        assert_eq!(label(9), "Yesterday");
        assert_eq!(label(25), "Jan 25");
    }
}
