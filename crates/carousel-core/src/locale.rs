//! Localized labels for the carousel's accessible names and status text.

/// Source of every user-facing string the carousel emits.
///
/// Positions are 1-based.
pub trait Labels {
    /// Accessible name of the carousel region.
    fn region_label(&self) -> String;

    /// Name of one slide, also used as live-region status text.
    fn slide_label(&self, position: usize, total: usize) -> String;

    /// Name of a pagination dot.
    fn dot_label(&self, position: usize) -> String;

    /// Name of the previous control.
    fn previous_label(&self) -> String;

    /// Name of the next control.
    fn next_label(&self) -> String;
}

/// Built-in label languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// English
    #[default]
    En,
    /// German
    De,
}

impl Locale {
    /// Pick a locale from a language tag. Any `de*` tag is German;
    /// everything else falls back to English.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().to_ascii_lowercase().starts_with("de") {
            Self::De
        } else {
            Self::En
        }
    }

    /// Resolve the configured language. `"auto"` or an empty value defers
    /// to the host document's language, then to English.
    #[must_use]
    pub fn resolve(configured: &str, document_lang: Option<&str>) -> Self {
        let configured = configured.trim();
        if configured.is_empty() || configured.eq_ignore_ascii_case("auto") {
            document_lang.map_or(Self::En, Self::from_tag)
        } else {
            Self::from_tag(configured)
        }
    }

    /// BCP 47 primary tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
        }
    }
}

impl Labels for Locale {
    fn region_label(&self) -> String {
        match self {
            Self::En => "Image carousel".to_string(),
            Self::De => "Bildkarussell".to_string(),
        }
    }

    fn slide_label(&self, position: usize, total: usize) -> String {
        match self {
            Self::En => format!("Slide {position} of {total}"),
            Self::De => format!("Folie {position} von {total}"),
        }
    }

    fn dot_label(&self, position: usize) -> String {
        match self {
            Self::En => format!("Go to slide {position}"),
            Self::De => format!("Gehe zu Folie {position}"),
        }
    }

    fn previous_label(&self) -> String {
        match self {
            Self::En => "Previous slide".to_string(),
            Self::De => "Vorherige Folie".to_string(),
        }
    }

    fn next_label(&self) -> String {
        match self {
            Self::En => "Next slide".to_string(),
            Self::De => "Nächste Folie".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(Locale::from_tag("de"), Locale::De);
        assert_eq!(Locale::from_tag("DE-ch"), Locale::De);
        assert_eq!(Locale::from_tag("en-US"), Locale::En);
        assert_eq!(Locale::from_tag("fr"), Locale::En);
        assert_eq!(Locale::from_tag(""), Locale::En);
    }

    #[test]
    fn test_resolve_auto_uses_document() {
        assert_eq!(Locale::resolve("auto", Some("de-DE")), Locale::De);
        assert_eq!(Locale::resolve("AUTO", Some("en")), Locale::En);
        assert_eq!(Locale::resolve("", Some("de")), Locale::De);
        assert_eq!(Locale::resolve("auto", None), Locale::En);
    }

    #[test]
    fn test_resolve_explicit_overrides_document() {
        assert_eq!(Locale::resolve("en", Some("de")), Locale::En);
        assert_eq!(Locale::resolve("de-AT", Some("en")), Locale::De);
    }

    #[test]
    fn test_english_labels() {
        let l = Locale::En;
        assert_eq!(l.region_label(), "Image carousel");
        assert_eq!(l.slide_label(2, 5), "Slide 2 of 5");
        assert_eq!(l.dot_label(3), "Go to slide 3");
        assert_eq!(l.tag(), "en");
    }

    #[test]
    fn test_german_labels() {
        let l = Locale::De;
        assert_eq!(l.region_label(), "Bildkarussell");
        assert_eq!(l.slide_label(1, 4), "Folie 1 von 4");
        assert_eq!(l.dot_label(4), "Gehe zu Folie 4");
        assert_eq!(l.previous_label(), "Vorherige Folie");
        assert_eq!(l.tag(), "de");
    }
}
