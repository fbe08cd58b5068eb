use std::time::Duration;

/// `std::time::Instant` panics on wasm32; web-time works on both.
pub type AppInstant = web_time::Instant;

/// Short human label for a request duration, e.g. `850ms` or `12.4s`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let ms = elapsed.as_millis();
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.1}s", elapsed.as_secs_f64())
    } else {
        format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}
