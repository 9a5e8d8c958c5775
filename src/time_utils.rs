/// Format an epoch-millisecond timestamp as a UTC `HH:MM` axis label.
pub fn format_time_label(timestamp_ms: u64) -> String {
    let secs = timestamp_ms / 1000;
    format!("{:02}:{:02}", (secs / 3600) % 24, (secs / 60) % 60)
}
