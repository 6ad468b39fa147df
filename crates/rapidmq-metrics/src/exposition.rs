//! Exposition format parsing.
//!
//! The `/metrics` payload is line-oriented: lines starting with `#` are
//! comments, every other non-empty line is `<name> <value>` separated by
//! whitespace. Extra tokens (timestamps) are ignored.
//!
//! A value that fails to parse becomes `NaN`. No line can fail the whole
//! payload.

use rapidmq_core::MetricSample;
use tracing::debug;

/// Parse the payload into values, positionally.
///
/// The i-th value comes from the i-th data line; metric names are not
/// checked. The result may be shorter or longer than `expected_count`
/// when upstream adds, drops, or reorders metrics, so prefer
/// [`parse_samples`] plus name-based binding.
pub fn parse_values(payload: &str, expected_count: usize) -> Vec<f64> {
    let mut values = Vec::with_capacity(expected_count);
    values.extend(data_lines(payload).map(|(_, value)| value));

    if values.len() != expected_count {
        debug!(
            expected = expected_count,
            got = values.len(),
            "metrics payload length differs from expected count"
        );
    }
    values
}

/// Parse the payload into name-tagged samples, in payload order.
pub fn parse_samples(payload: &str) -> Vec<MetricSample> {
    data_lines(payload)
        .map(|(name, value)| MetricSample::new(name, value))
        .collect()
}

fn data_lines(payload: &str) -> impl Iterator<Item = (&str, f64)> {
    payload
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(split_line)
}

/// Split a data line into its name token and parsed value.
///
/// A `{...}` label set directly after the name may contain spaces and
/// stays part of the name.
fn split_line(line: &str) -> (&str, f64) {
    let name_end = match (line.find('{'), line.find(char::is_whitespace)) {
        (Some(brace), ws) if ws.is_none_or(|ws| brace < ws) => label_set_end(line, brace),
        (_, Some(ws)) => ws,
        (_, None) => line.len(),
    };

    let (name, rest) = line.split_at(name_end);
    let value = rest
        .split_whitespace()
        .next()
        .map(parse_value)
        .unwrap_or(f64::NAN);
    (name, value)
}

/// Byte offset just past the `}` closing the label set opened at `open`.
/// Braces inside quoted label values, and `\"` escapes, are skipped.
fn label_set_end(line: &str, open: usize) -> usize {
    let mut in_quotes = false;
    let mut escaped = false;
    for (i, c) in line[open..].char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            '}' if !in_quotes => return open + i + 1,
            _ => {}
        }
    }
    line.len()
}

fn parse_value(token: &str) -> f64 {
    token.parse::<f64>().unwrap_or(f64::NAN)
}
