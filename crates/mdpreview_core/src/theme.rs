//! Theme variants the preview is rendered against.

use std::fmt;

const LIGHT_SCROLLBAR_CSS: &str = r#"<style type="text/css">
	::-webkit-scrollbar {
		width: 14px;
		height: 14px;
	}

	::-webkit-scrollbar-thumb {
		background-color: rgba(100, 100, 100, 0.4);
	}

	::-webkit-scrollbar-thumb:hover {
		background-color: rgba(100, 100, 100, 0.7);
	}

	::-webkit-scrollbar-thumb:active {
		background-color: rgba(0, 0, 0, 0.6);
	}
</style>"#;

const DARK_SCROLLBAR_CSS: &str = r#"<style type="text/css">
	::-webkit-scrollbar {
		width: 14px;
		height: 14px;
	}

	::-webkit-scrollbar-thumb {
		background-color: rgba(121, 121, 121, 0.4);
	}

	::-webkit-scrollbar-thumb:hover {
		background-color: rgba(100, 100, 100, 0.7);
	}

	::-webkit-scrollbar-thumb:active {
		background-color: rgba(85, 85, 85, 0.8);
	}
</style>"#;

const HC_BLACK_SCROLLBAR_CSS: &str = r#"<style type="text/css">
	::-webkit-scrollbar {
		width: 14px;
		height: 14px;
	}

	::-webkit-scrollbar-thumb {
		background-color: rgba(111, 195, 223, 0.3);
	}

	::-webkit-scrollbar-thumb:hover {
		background-color: rgba(111, 195, 223, 0.4);
	}

	::-webkit-scrollbar-thumb:active {
		background-color: rgba(111, 195, 223, 0.4);
	}
</style>"#;

/// Canonical visual mode of a rendered preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeVariant {
    Light,
    Dark,
    /// Also covers every unrecognized theme token.
    HighContrastBlack,
}

impl ThemeVariant {
    pub const ALL: &'static [ThemeVariant] = &[Self::Light, Self::Dark, Self::HighContrastBlack];

    /// Maps the base theme token reported by the host to a variant.
    ///
    /// ```
    /// use mdpreview_core::ThemeVariant;
    ///
    /// assert_eq!(ThemeVariant::classify("vs"), ThemeVariant::Light);
    /// assert_eq!(ThemeVariant::classify("vs-dark"), ThemeVariant::Dark);
    /// assert_eq!(ThemeVariant::classify("solarized"), ThemeVariant::HighContrastBlack);
    /// ```
    pub fn classify(token: &str) -> Self {
        match token {
            "vs" => Self::Light,
            "vs-dark" => Self::Dark,
            _ => Self::HighContrastBlack,
        }
    }

    /// Class name the bundled stylesheets scope their selectors with.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Light => "vs",
            Self::Dark => "vs-dark",
            Self::HighContrastBlack => "hc-black",
        }
    }

    /// The `<style>` block customizing the scrollbar for this variant.
    pub fn scrollbar_css(&self) -> &'static str {
        match self {
            Self::Light => LIGHT_SCROLLBAR_CSS,
            Self::Dark => DARK_SCROLLBAR_CSS,
            Self::HighContrastBlack => HC_BLACK_SCROLLBAR_CSS,
        }
    }
}

impl fmt::Display for ThemeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}
