//! Phone-number canonicalization for ownership checks.
//!
//! Shoppers type numbers in every format imaginable (`+91 98765 43210`,
//! `(987) 654-3210`, `0098765...`). Stores record them with or without the
//! country code. Comparing the trailing 10 digits sidesteps both problems
//! without needing to know which country a store sells into.

/// Number of trailing digits kept in the canonical form.
pub const CANONICAL_PHONE_DIGITS: usize = 10;

/// Strips every non-digit and keeps the trailing 10 digits.
///
/// Inputs with fewer than 10 digits stay short. They are never padded, so a
/// short number can only ever equal another number of the same short length.
#[must_use]
pub fn canonical_phone(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(char::is_ascii_digit).collect();
    let start = digits.len().saturating_sub(CANONICAL_PHONE_DIGITS);
    digits.into_iter().skip(start).collect()
}

/// Returns `true` when both numbers share the same non-empty canonical form.
#[must_use]
pub fn phones_match(a: &str, b: &str) -> bool {
    let a = canonical_phone(a);
    !a.is_empty() && a == canonical_phone(b)
}

/// Masks a phone number down to its last four digits, e.g. `"•••••• 3210"`.
///
/// Returns `None` when the number has fewer than four digits; there is
/// nothing useful to hint at in that case.
#[must_use]
pub fn mask_phone(raw: &str) -> Option<String> {
    let canonical = canonical_phone(raw);
    let tail = canonical.get(canonical.len().checked_sub(4)?..)?;
    Some(format!("•••••• {tail}"))
}
