//! Text helpers for Arabic-language input.

/// Normalize Arabic-Indic (٠-٩) and Extended Arabic-Indic (۰-۹) digits to
/// their ASCII equivalents, leaving everything else untouched.
///
/// Applicants routinely type amounts and phone numbers with an Arabic
/// keyboard layout; numeric and pattern checks run on the normalized form.
pub fn normalize_digits(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '\u{0660}'..='\u{0669}' => {
                char::from(b'0' + (c as u32 - 0x0660) as u8)
            }
            '\u{06F0}'..='\u{06F9}' => {
                char::from(b'0' + (c as u32 - 0x06F0) as u8)
            }
            _ => c,
        })
        .collect()
}

/// True when the string is empty or whitespace-only after trimming.
pub fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}
