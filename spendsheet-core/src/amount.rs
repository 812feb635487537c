//! Amount normalization for free-form ledger values.
//!
//! Statement exports write the same number many ways: `1,234.50`, `₹500`,
//! `(500)` for a debit, padded with spaces. Everything collapses to a finite
//! `f64`; anything unparseable becomes `0.0` so a bad cell never drops a row.

/// Currency glyphs stripped before parsing.
const CURRENCY_GLYPHS: &[char] = &['₹', '$', '€', '£', '¥'];

/// Parse raw amount text into a signed value.
///
/// A value wrapped in parentheses is negative (accounting convention).
/// Returns `0.0` for empty, malformed or non-finite input.
pub fn normalize_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != ',' && !CURRENCY_GLYPHS.contains(c) && !c.is_whitespace())
        .collect();

    let signed = match cleaned
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(inner) => format!("-{inner}"),
        None => cleaned,
    };

    match signed.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}
