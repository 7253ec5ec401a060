use jiff::Timestamp;

pub fn get_timestamp() -> Timestamp {
    Timestamp::now()
}

pub fn display_time_now(created_at: Timestamp) -> String {
    display_time(created_at, get_timestamp())
}

/// Relative label for `created_at` as seen from `now`.
///
/// Every step divides the previous unit and floors at the end, so months are
/// 30 days and years are 365 days. Timestamps in the future read as "just now".
pub fn display_time(created_at: Timestamp, now: Timestamp) -> String {
    let millis = now.as_millisecond() - created_at.as_millisecond();
    let seconds = millis as f64 / 1000.0;
    if seconds < 60.0 {
        return "just now".to_string();
    }
    let minutes = seconds / 60.0;
    if minutes < 60.0 {
        return format!("{} minutes ago", minutes.floor() as u64);
    }
    let hours = minutes / 60.0;
    if hours < 24.0 {
        return format!("{} hours ago", hours.floor() as u64);
    }
    let days = hours / 24.0;
    if days < 7.0 {
        return format!("{} days ago", days.floor() as u64);
    }
    let weeks = days / 7.0;
    if weeks < 5.0 {
        return format!("{} weeks ago", weeks.floor() as u64);
    }
    let months = days / 30.0;
    if months < 12.0 {
        return format!("{} months ago", months.floor() as u64);
    }
    let years = days / 365.0;

    format!("{} years ago", years.floor() as u64)
}
