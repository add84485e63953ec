/// Format milliseconds as "MM:SS:cc" (centiseconds).
///
/// Every component is truncated. Minutes are not wrapped at the hour, so a
/// long session reads "75:02:10" rather than losing the hour.
pub fn format_clock(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms / 1000) % 60;
    let centis = (ms % 1000) / 10;
    format!("{:02}:{:02}:{:02}", minutes, seconds, centis)
}

pub fn format_lap_label(number: usize) -> String {
    format!("Lap {}", number)
}
