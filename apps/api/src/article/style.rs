//! Style selection — maps the requested newspaper style to the persona label
//! that steers the generation prompt.

use serde::{Deserialize, Serialize};

/// Newspaper style requested by the front end. Unknown values fall back to
/// `Default`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleSelection {
    #[default]
    Default,
    Classic,
    Modern,
    Tabloid,
}

impl StyleSelection {
    pub const ALL: [StyleSelection; 4] = [
        StyleSelection::Default,
        StyleSelection::Classic,
        StyleSelection::Modern,
        StyleSelection::Tabloid,
    ];

    /// Human-readable persona label embedded in the system instruction.
    pub fn persona_label(self) -> &'static str {
        match self {
            StyleSelection::Default => "New York Times",
            StyleSelection::Classic => "Classic Newspaper",
            StyleSelection::Modern => "Modern Magazine",
            StyleSelection::Tabloid => "Tabloid",
        }
    }

    /// Resolves a form value to a style.
    ///
    /// Accepts the style keys (`default`, `nytimes`, `classic`, `modern`,
    /// `tabloid`) as well as the persona labels, case-insensitively.
    pub fn from_form_value(value: Option<&str>) -> Self {
        let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return StyleSelection::Default;
        };

        match raw.to_ascii_lowercase().as_str() {
            "default" | "nytimes" => StyleSelection::Default,
            "classic" => StyleSelection::Classic,
            "modern" => StyleSelection::Modern,
            "tabloid" => StyleSelection::Tabloid,
            _ => Self::ALL
                .into_iter()
                .find(|style| style.persona_label().eq_ignore_ascii_case(raw))
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_value_is_default() {
        assert_eq!(StyleSelection::from_form_value(None), StyleSelection::Default);
        assert_eq!(
            StyleSelection::from_form_value(Some("   ")),
            StyleSelection::Default
        );
    }

    #[test]
    fn test_style_keys_resolve() {
        assert_eq!(
            StyleSelection::from_form_value(Some("classic")),
            StyleSelection::Classic
        );
        assert_eq!(
            StyleSelection::from_form_value(Some("MODERN")),
            StyleSelection::Modern
        );
        assert_eq!(
            StyleSelection::from_form_value(Some("nytimes")),
            StyleSelection::Default
        );
    }

    #[test]
    fn test_persona_labels_resolve() {
        for style in StyleSelection::ALL {
            assert_eq!(
                StyleSelection::from_form_value(Some(style.persona_label())),
                style
            );
        }
        assert_eq!(
            StyleSelection::from_form_value(Some(" classic newspaper ")),
            StyleSelection::Classic
        );
    }

    #[test]
    fn test_unknown_value_is_default() {
        assert_eq!(
            StyleSelection::from_form_value(Some("Gossip Weekly")),
            StyleSelection::Default
        );
    }

    #[test]
    fn test_serde_uses_lowercase_keys() {
        let style: StyleSelection = serde_json::from_str(r#""tabloid""#).unwrap();
        assert_eq!(style, StyleSelection::Tabloid);
        assert_eq!(
            serde_json::to_string(&StyleSelection::Default).unwrap(),
            r#""default""#
        );
    }
}
