//! Pure formatting helpers for metric records.
//!
//! All exposition rendering lives here: no I/O, no collector types, just
//! records in and text out. `supplystatd` writes the result to stdout.

use crate::model::{MetricKind, MetricRecord, SupplyLabels};

/// Renders a record batch in the Prometheus text exposition format.
///
/// Samples are grouped per metric kind under one `# HELP`/`# TYPE` pair,
/// in table order; within a kind, samples keep collection order. Kinds
/// with no samples in the batch are omitted.
pub fn render_text(records: &[MetricRecord]) -> String {
    let mut out = String::new();
    for kind in MetricKind::ALL {
        let mut wrote_header = false;
        for record in records.iter().filter(|r| r.kind == kind) {
            if !wrote_header {
                out.push_str(&format!("# HELP {} {}\n", kind.name(), kind.help()));
                out.push_str(&format!("# TYPE {} gauge\n", kind.name()));
                wrote_header = true;
            }
            out.push_str(&format!(
                "{}{{{}}} {}\n",
                kind.name(),
                format_labels(&record.labels),
                format_value(record.value)
            ));
        }
    }
    out
}

/// Format a label set as `name="value",...` in exposition order.
pub fn format_labels(labels: &SupplyLabels) -> String {
    labels
        .pairs()
        .iter()
        .map(|(name, value)| format!("{}=\"{}\"", name, escape_label_value(value)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Format a gauge value: integral values without a trailing `.0`.
pub fn format_value(value: f64) -> String {
    format!("{}", value)
}

/// Escape a label value for the text exposition format.
///
/// Backslash, double quote, and line feed are the only characters the
/// format requires escaping.
fn escape_label_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}
