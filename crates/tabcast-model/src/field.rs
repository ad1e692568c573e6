//! Header field name cleaning.

/// Placeholder for headers that clean down to nothing.
pub const UNNAMED_COLUMN: &str = "Unnamed_Column";

/// Cleans a raw header into its canonical field form.
///
/// Alphanumerics and `-` are kept; every other character (whitespace,
/// underscores, punctuation) acts as a separator, and runs of separators
/// collapse to a single `_`. Leading and trailing separators are dropped.
/// A name that cleans down to nothing becomes [`UNNAMED_COLUMN`].
///
/// Uniqueness is not enforced: two headers may clean to the same name, and
/// the resulting collision is accepted behavior.
pub fn clean_field_name(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    let mut pending_separator = false;

    for c in raw.trim().chars() {
        if c.is_alphanumeric() || c == '-' {
            if pending_separator && !cleaned.is_empty() {
                cleaned.push('_');
            }
            pending_separator = false;
            cleaned.push(c);
        } else {
            pending_separator = true;
        }
    }

    if cleaned.is_empty() {
        UNNAMED_COLUMN.to_string()
    } else {
        cleaned
    }
}
