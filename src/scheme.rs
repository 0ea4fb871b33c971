//! Color schemes for the two discs
//!
//! A scheme is a named pair of colors. The library is an ordered,
//! never-empty list: either the built-in trio or the contents of an
//! external definitions file.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Rgb;

/// A named top/bottom color pair, 0-255 channels as in the scheme file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub id: String,
    /// Display string for the colors menu
    pub title: String,
    pub top: [u8; 3],
    pub bottom: [u8; 3],
}

impl ColorScheme {
    pub fn top_color(&self) -> Rgb {
        Rgb::from_bytes(self.top)
    }

    pub fn bottom_color(&self) -> Rgb {
        Rgb::from_bytes(self.bottom)
    }
}

/// Scheme-file load failures
#[derive(Debug, Error)]
pub enum SchemeError {
    #[error("scheme file is not a JSON array: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("scheme entry {index} is malformed: {message}")]
    Entry { index: usize, message: String },
    #[error("scheme file contains no usable entries")]
    Empty,
}

/// How [`SchemeLibrary::from_json`] treats malformed entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Any malformed entry fails the whole file
    #[default]
    Strict,
    /// Malformed entries are dropped with a warning; fails only when
    /// nothing usable remains
    SkipMalformed,
}

/// Ordered scheme list; guaranteed non-empty by construction
#[derive(Debug, Clone, PartialEq)]
pub struct SchemeLibrary {
    schemes: Vec<ColorScheme>,
}

impl Default for SchemeLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SchemeLibrary {
    /// The fixed fallback trio used when no definitions file exists
    pub fn builtin() -> Self {
        let scheme = |id: &str, title: &str, top, bottom| ColorScheme {
            id: id.to_string(),
            title: title.to_string(),
            top,
            bottom,
        };
        Self {
            schemes: vec![
                scheme("yb", "Yellow / Blue", [255, 255, 0], [0, 0, 255]),
                scheme("rg", "Red / Green", [255, 0, 0], [0, 255, 0]),
                scheme("rc", "Red / Cyan", [255, 0, 0], [0, 255, 255]),
            ],
        }
    }

    /// Parse a definitions file (a JSON array of scheme records)
    pub fn from_json(text: &str, policy: LoadPolicy) -> Result<Self, SchemeError> {
        let raw: Vec<serde_json::Value> = serde_json::from_str(text)?;

        let mut schemes = Vec::with_capacity(raw.len());
        for (index, value) in raw.into_iter().enumerate() {
            match serde_json::from_value::<ColorScheme>(value) {
                Ok(scheme) => schemes.push(scheme),
                Err(err) => match policy {
                    LoadPolicy::Strict => {
                        return Err(SchemeError::Entry {
                            index,
                            message: err.to_string(),
                        });
                    }
                    LoadPolicy::SkipMalformed => {
                        log::warn!("skipping malformed scheme entry {index}: {err}");
                    }
                },
            }
        }

        if schemes.is_empty() {
            return Err(SchemeError::Empty);
        }
        Ok(Self { schemes })
    }

    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColorScheme> {
        self.schemes.iter()
    }

    pub fn get(&self, id: &str) -> Option<&ColorScheme> {
        self.schemes.iter().find(|s| s.id == id)
    }

    /// Look up a scheme; unknown ids silently resolve to the first entry
    pub fn resolve(&self, id: &str) -> &ColorScheme {
        self.get(id).unwrap_or(&self.schemes[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_trio() {
        let library = SchemeLibrary::builtin();
        assert_eq!(library.len(), 3);
        assert_eq!(library.iter().next().unwrap().id, "yb");
        assert!(library.get("rc").is_some());
    }

    #[test]
    fn test_unknown_id_resolves_to_first() {
        let library = SchemeLibrary::builtin();
        assert_eq!(library.resolve("does-not-exist").id, "yb");
        assert_eq!(library.resolve("rg").id, "rg");
    }

    #[test]
    fn test_from_json_preserves_order() {
        let text = r#"[
            {"id": "a", "title": "A", "top": [1, 2, 3], "bottom": [4, 5, 6]},
            {"id": "b", "title": "B", "top": [7, 8, 9], "bottom": [10, 11, 12]}
        ]"#;
        let library = SchemeLibrary::from_json(text, LoadPolicy::Strict).unwrap();
        let ids: Vec<_> = library.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_strict_fails_on_missing_field() {
        let text = r#"[
            {"id": "a", "title": "A", "top": [1, 2, 3], "bottom": [4, 5, 6]},
            {"id": "broken", "top": [0, 0, 0]}
        ]"#;
        let err = SchemeLibrary::from_json(text, LoadPolicy::Strict).unwrap_err();
        assert!(matches!(err, SchemeError::Entry { index: 1, .. }));
    }

    #[test]
    fn test_skip_policy_drops_bad_entries() {
        let text = r#"[
            {"id": "broken", "top": [0, 0, 0]},
            {"id": "a", "title": "A", "top": [1, 2, 3], "bottom": [4, 5, 6]}
        ]"#;
        let library = SchemeLibrary::from_json(text, LoadPolicy::SkipMalformed).unwrap();
        assert_eq!(library.len(), 1);
        assert_eq!(library.resolve("anything").id, "a");
    }

    #[test]
    fn test_all_bad_entries_is_still_an_error() {
        let text = r#"[{"id": "broken"}]"#;
        let err = SchemeLibrary::from_json(text, LoadPolicy::SkipMalformed).unwrap_err();
        assert!(matches!(err, SchemeError::Empty));
    }

    #[test]
    fn test_not_an_array_is_a_parse_error() {
        let err = SchemeLibrary::from_json("{}", LoadPolicy::SkipMalformed).unwrap_err();
        assert!(matches!(err, SchemeError::Parse(_)));
    }

    #[test]
    fn test_scheme_colors_convert_to_float() {
        let library = SchemeLibrary::builtin();
        let yb = library.resolve("yb");
        assert_eq!(yb.top_color(), Rgb::new(1.0, 1.0, 0.0));
        assert_eq!(yb.bottom_color(), Rgb::new(0.0, 0.0, 1.0));
    }
}
