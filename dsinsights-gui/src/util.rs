//! Numeric conversion and formatting utilities for dsinsights-gui.

/// Convert usize to f64 with allowed precision loss.
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// Groups the digits of `n` in threes: `12345678` becomes `12,345,678`.
#[must_use]
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let head = match digits.len() % 3 {
        0 => 3,
        rem => rem,
    };
    let (first, rest) = digits.split_at(head.min(digits.len()));
    rest.as_bytes()
        .chunks(3)
        .fold(first.to_string(), |mut out, group| {
            out.push(',');
            out.extend(group.iter().map(|&b| char::from(b)));
            out
        })
}

const SI_UNITS: [(usize, &str, usize); 3] =
    [(1_000_000_000, "G", 2), (1_000_000, "M", 2), (1_000, "K", 1)];

/// Abbreviates large counts with an SI suffix: `45000` becomes `45.0K`.
#[must_use]
pub fn format_number_si(n: usize) -> String {
    SI_UNITS
        .iter()
        .find(|(scale, _, _)| n >= *scale)
        .map_or_else(
            || n.to_string(),
            |&(scale, suffix, precision)| {
                format!("{:.precision$}{suffix}", usize_to_f64(n) / usize_to_f64(scale))
            },
        )
}
