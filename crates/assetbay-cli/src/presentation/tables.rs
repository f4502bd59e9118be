//! Table formatting utilities for CLI output.

/// Truncates a string to a maximum length in bytes, adding "..." if needed.
///
/// Plan names and feature lists come from the remote catalog and may hold
/// multibyte characters; the cut backs up to the nearest char boundary so
/// slicing can never panic.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut cut = max_len.saturating_sub(3);
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &s[..cut])
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Format an optional value for table display, returning a default if None.
pub fn format_optional<T: std::fmt::Display>(value: &Option<T>, default: &str) -> String {
    match value {
        Some(v) => v.to_string(),
        None => default.to_string(),
    }
}

/// Format a price in the store currency with two decimals.
pub fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_strings_unchanged() {
        assert_eq!(truncate_string("short", 10), "short");
    }

    #[test]
    fn truncate_long_strings_with_ellipsis() {
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
    }

    #[test]
    fn truncate_multibyte_names_on_char_boundaries() {
        // Cut index 5 lands inside the two-byte 'é'; back up instead of panic
        assert_eq!(truncate_string("aaaaérances du plan", 8), "aaaa...");
        // Multibyte content short enough to keep is untouched
        assert_eq!(truncate_string("Forêt", 10), "Forêt");
        // All-multibyte input never slices mid-character at any width
        for width in 0..12 {
            let _ = truncate_string("ééééé", width);
        }
    }

    #[test]
    fn format_optional_with_default() {
        assert_eq!(format_optional(&Some(42), "--"), "42");
        assert_eq!(format_optional(&None::<i32>, "--"), "--");
    }

    #[test]
    fn prices_have_two_decimals() {
        assert_eq!(format_price(9.9), "$9.90");
        assert_eq!(format_price(96.0), "$96.00");
        assert_eq!(format_price(0.0), "$0.00");
    }
}
