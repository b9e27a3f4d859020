//! Culture settings for numeric output.
//!
//! Only output statements consult the culture. Conversions inside
//! expressions (`to_number`, `to_string_value`, comparisons) always use the
//! invariant form so template logic does not change with the locale.

use crate::value::format_number;

/// Numeric formatting conventions for one culture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Culture {
    name: String,
    decimal_separator: char,
}

impl Culture {
    /// The culture-neutral format: `.` as decimal separator.
    pub fn invariant() -> Self {
        Culture {
            name: String::new(),
            decimal_separator: '.',
        }
    }

    pub fn new(name: impl Into<String>, decimal_separator: char) -> Self {
        Culture {
            name: name.into(),
            decimal_separator,
        }
    }

    /// Look up a well-known culture by its IETF tag.
    ///
    /// Unknown tags fall back to the invariant culture, keeping the tag as
    /// the name.
    pub fn from_name(name: &str) -> Self {
        let language = name.split(['-', '_']).next().unwrap_or_default();
        let separator = match language.to_ascii_lowercase().as_str() {
            "de" | "fr" | "es" | "it" | "pt" | "nl" | "ru" | "pl" | "sv" | "da" | "fi"
            | "nb" | "cs" | "tr" => ',',
            _ => '.',
        };
        Culture::new(name, separator)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    pub fn is_invariant(&self) -> bool {
        self.name.is_empty() && self.decimal_separator == '.'
    }

    /// Format a number for output in this culture.
    pub fn format_number(&self, n: f64) -> String {
        let text = format_number(n);
        if self.decimal_separator == '.' {
            text
        } else {
            text.replacen('.', &self.decimal_separator.to_string(), 1)
        }
    }
}

impl Default for Culture {
    fn default() -> Self {
        Self::invariant()
    }
}
