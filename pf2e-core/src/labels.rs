//! Display formatting for identifiers and numbers.

/// Placeholder shown wherever a value is missing.
pub const PLACEHOLDER: &str = "—";

/// Human label for a dotted catalog identifier.
///
/// `ancestry.half-orc` becomes `Half Orc`. Missing or empty identifiers
/// render as [`PLACEHOLDER`].
pub fn label_for(identifier: Option<&str>) -> String {
    let segment = identifier
        .and_then(|id| id.rsplit('.').next())
        .unwrap_or_default();
    let label = title_case(&segment.replace('-', " "));
    if label.trim().is_empty() {
        PLACEHOLDER.to_string()
    } else {
        label
    }
}

/// Uppercase the first letter of every word and lowercase the rest.
///
/// A "word" starts at any letter that follows a non-letter, so `o'brien`
/// becomes `O'Brien`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_was_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_was_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_was_letter = true;
        } else {
            out.push(c);
            previous_was_letter = false;
        }
    }
    out
}

/// Signed modifier text: `+3`, `+0`, `-2`.
pub fn signed(value: i64) -> String {
    if value >= 0 {
        format!("+{value}")
    } else {
        format!("{value}")
    }
}

/// Optional free text, or the placeholder when absent or blank.
pub fn text_or_placeholder(text: Option<&str>) -> String {
    match text {
        Some(t) if !t.trim().is_empty() => t.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}
