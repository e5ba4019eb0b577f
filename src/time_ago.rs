use chrono::{DateTime, Utc};

const INTERVALS: [(i64, &str); 6] = [
    (31_536_000, "year"),
    (2_592_000, "month"),
    (604_800, "week"),
    (86_400, "day"),
    (3_600, "hour"),
    (60, "minute"),
];

pub const JUST_NOW: &str = "just now";

/// Relative age of `then` as seen from `now`, e.g. "3 days ago".
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    time_ago_from_secs((now - then).num_seconds())
}

/// Formats an elapsed number of seconds using the largest whole unit.
/// Anything under a minute, including negative values from clock skew,
/// is "just now".
pub fn time_ago_from_secs(elapsed: i64) -> String {
    for (seconds, unit) in INTERVALS {
        let count = elapsed / seconds;
        if count >= 1 {
            let plural = if count == 1 { "" } else { "s" };
            return format!("{} {}{} ago", count, unit, plural);
        }
    }
    JUST_NOW.to_string()
}

