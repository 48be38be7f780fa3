pub mod context;
pub mod groups;
pub mod listing;
pub mod selection;
pub mod users;
pub mod validate;

use chrono::{DateTime, Utc};

/// Timestamp cell for list tables; absent values render as a dash.
pub(crate) fn format_timestamp(value: &Option<DateTime<Utc>>) -> String {
    match value {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_render_as_local_free_wall_clock() {
        let t = Utc.with_ymd_and_hms(2026, 1, 4, 9, 30, 0).unwrap();
        assert_eq!(format_timestamp(&Some(t)), "2026-01-04 09:30:00");
    }

    #[test]
    fn missing_timestamp_renders_dash() {
        assert_eq!(format_timestamp(&None), "-");
    }
}
