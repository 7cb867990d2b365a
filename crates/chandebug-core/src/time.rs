//! Human-readable elapsed time.

const SEC: u64 = 1_000;
const MIN: u64 = SEC * 60;
const HOUR: u64 = MIN * 60;

/// Format an elapsed duration in milliseconds as `ms`, `s`, `m` or `h`.
///
/// Sub-second values are printed raw. Larger values are divided by the unit
/// and rounded half up by truncating `value + 0.5`, so `59_999` renders as
/// `"60s"` rather than being promoted to `"1m"`.
pub fn format_elapsed(ms: u64) -> String {
    if ms < SEC {
        return format!("{}ms", ms);
    }
    if ms < MIN {
        return format!("{}s", round_half_up(ms, SEC));
    }
    if ms < HOUR {
        return format!("{}m", round_half_up(ms, MIN));
    }
    format!("{}h", round_half_up(ms, HOUR))
}

fn round_half_up(ms: u64, unit: u64) -> u64 {
    (ms as f64 / unit as f64 + 0.5) as u64
}
