use std::{fmt, str::FromStr};

use serde::Serialize;

/// A user-interface language offered by the collection form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    /// ISO 639-1 code.
    pub code: &'static str,
    /// English name.
    pub name: &'static str,
    /// Name in the language itself.
    pub native: &'static str,
}

/// Every supported language, English first.
pub const LANGUAGES: [Language; 10] = [
    Language::new("en", "English", "English"),
    Language::new("hi", "Hindi", "हिन्दी"),
    Language::new("te", "Telugu", "తెలుగు"),
    Language::new("ta", "Tamil", "தமிழ்"),
    Language::new("mr", "Marathi", "मराठी"),
    Language::new("bn", "Bengali", "বাংলা"),
    Language::new("gu", "Gujarati", "ગુજરાતી"),
    Language::new("kn", "Kannada", "ಕನ್ನಡ"),
    Language::new("ml", "Malayalam", "മലയാളം"),
    Language::new("pa", "Punjabi", "ਪੰਜਾਬੀ"),
];

/// Error returned when a code is not in [`LANGUAGES`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown language code '{0}'")]
pub struct UnknownLanguage(String);

impl Language {
    const fn new(code: &'static str, name: &'static str, native: &'static str) -> Self {
        Self { code, name, native }
    }

    /// Looks a language up by its code, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownLanguage`] if the code is not supported.
    pub fn from_code(code: &str) -> Result<Self, UnknownLanguage> {
        LANGUAGES
            .iter()
            .find(|language| language.code.eq_ignore_ascii_case(code.trim()))
            .copied()
            .ok_or_else(|| UnknownLanguage(code.to_string()))
    }
}

impl Default for Language {
    fn default() -> Self {
        LANGUAGES[0]
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.native, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(Language::from_code("TA").unwrap().name, "Tamil");
    }

    #[test]
    fn unknown_code_is_an_error() {
        assert_eq!(
            "fr".parse::<Language>().unwrap_err(),
            UnknownLanguage("fr".to_string())
        );
    }

    #[test]
    fn codes_are_unique() {
        for (i, a) in LANGUAGES.iter().enumerate() {
            for b in &LANGUAGES[i + 1..] {
                assert_ne!(a.code, b.code);
            }
        }
    }

    #[test]
    fn default_is_english() {
        assert_eq!(Language::default().to_string(), "English (English)");
    }
}
