use std::{fmt, str::FromStr};

pub const THEME_KEY: &str = "folio-theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown theme {0:?}")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(UnknownTheme(other.to_owned())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
        })
    }
}

impl Theme {
    pub fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn toggle_label(self) -> String {
        format!("Switch to {} theme", self.opposite())
    }

    /// Glyph for the toggle button: the theme a click switches to.
    pub fn icon(self) -> &'static str {
        if self.is_dark() {
            "☀"
        } else {
            "☾"
        }
    }

    /// A valid stored preference wins; otherwise follow the system setting.
    pub fn resolve(stored: Option<&str>, system_prefers_dark: bool) -> Self {
        match stored.map(str::parse::<Self>) {
            Some(Ok(theme)) => theme,
            _ if system_prefers_dark => Self::Dark,
            _ => Self::Light,
        }
    }
}
