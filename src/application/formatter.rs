//! First-name normalisation applied at login

/// Something that normalises a display name
pub trait NameFormatter: Send + Sync {
    fn format(&self, name: &str) -> String;
}

/// Default formatter, see [`format_first_name`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstNameFormatter;

impl NameFormatter for FirstNameFormatter {
    fn format(&self, name: &str) -> String {
        format_first_name(name)
    }
}

/// Turn `_` into spaces, collapse doubled spaces once, then trim.
///
/// The collapse is a single non-overlapping pass: three underscores in a row
/// still leave two spaces behind (`"a___b"` gives `"a  b"`).
pub fn format_first_name(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    let formatted = name.replace('_', " ").replace("  ", " ");
    formatted.trim().to_string()
}
