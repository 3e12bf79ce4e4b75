use colored::*;
use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg} {elapsed:.dim}")
        .unwrap()
        .tick_strings(TICK_STRINGS)
}

/// Span that shows a spinner for as long as it is entered.
pub fn scan_span(first: &str, last: &str) -> Span {
    let span = info_span!("scan");
    span.pb_set_style(&spinner_style());
    span.pb_set_message(&format!(
        "Scanning {} - {}...",
        first.green().bold(),
        last.green().bold()
    ));
    span
}
