//! Human-readable status report

use std::fmt::Write;

use crate::config::OtlpConfig;
use crate::telemetry::{DurationStats, TelemetryStatus};

/// Render the status block shown to the user
pub fn format_status(status: &TelemetryStatus, config: &OtlpConfig) -> String {
    let mut out = String::from("OTLP Telemetry Status:\n");

    // Writing into a String cannot fail
    let _ = writeln!(out, "  Sessions: {}", status.sessions);
    let _ = writeln!(out, "  Turns: {}", status.turns);
    let _ = writeln!(out, "  Tool calls: {}", status.tools);
    let _ = writeln!(out, "  Prompts: {}", status.prompts);
    let _ = writeln!(
        out,
        "  Tokens: {} (in: {}, out: {}, cache: {}/{})",
        status.tokens.total,
        status.tokens.input,
        status.tokens.output,
        status.tokens.cache_read,
        status.tokens.cache_write
    );
    let _ = writeln!(
        out,
        "  Cost: {} (in: {}, out: {})",
        format_cost(status.cost.total),
        format_cost(status.cost.input),
        format_cost(status.cost.output)
    );
    out.push_str("  Durations:\n");
    for (label, stats) in [
        ("Session", &status.durations.session),
        ("Turn", &status.durations.turn),
        ("Tool", &status.durations.tool),
    ] {
        let _ = writeln!(out, "    {}: {}", label, format_stats(stats));
    }
    let _ = writeln!(out, "  Exporters: {}", config.exporter_names());
    let _ = write!(out, "  Endpoint: {}", config.otlp_endpoint);

    out
}

/// Dollar amount with four decimals
pub fn format_cost(cost: f64) -> String {
    format!("${:.4}", cost)
}

/// Milliseconds below one second, otherwise seconds with one decimal.
///
/// Exact halves round up (1250ms is `1.3s`). Any other value rounds to the
/// nearest tenth of its `f64` seconds value, so 1150ms, stored just below
/// 1.15, is `1.1s`.
pub fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        return format!("{}ms", ms);
    }

    // Only odd multiples of 250ms sit exactly halfway between two tenths
    if ms % 500 == 250 {
        let tenths = ms / 100 + 1;
        return format!("{}.{}s", tenths / 10, tenths % 10);
    }

    format!("{:.1}s", ms as f64 / 1000.0)
}

fn format_stats(stats: &DurationStats) -> String {
    format!(
        "{} last, {} avg",
        format_duration(stats.last_ms),
        format_duration(stats.average_ms())
    )
}
