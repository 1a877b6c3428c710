//! Clock formatting

/// Split seconds into zero-padded minute and second fields
pub fn clock_parts(total_seconds: u64) -> (String, String) {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    (format!("{:02}", minutes), format!("{:02}", seconds))
}

/// Render seconds as `mm:ss`
pub fn format_clock(total_seconds: u64) -> String {
    let (minutes, seconds) = clock_parts(total_seconds);
    format!("{}:{}", minutes, seconds)
}

/// Format a duration as a compact `1h 2m 3s` string
pub fn format_uptime(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
