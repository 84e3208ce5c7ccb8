use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoGameId(pub i64);

impl fmt::Display for VideoGameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Catalog category of a video game. Travels over the wire as its numeric code.
///
/// Decoding is lenient: a code outside the table becomes [`Genre::Other`] so one
/// unexpected record cannot fail a whole page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", from = "WireGenreCode")]
pub enum Genre {
    Action,
    Adventure,
    Rpg,
    Strategy,
    Sports,
    Racing,
    Simulation,
    Puzzle,
    Fighting,
    Shooter,
    Horror,
    Platformer,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Primary,
    Secondary,
    Success,
    Danger,
    Warning,
    Info,
    Light,
    Dark,
}

impl BadgeColor {
    pub fn name(self) -> &'static str {
        match self {
            BadgeColor::Primary => "primary",
            BadgeColor::Secondary => "secondary",
            BadgeColor::Success => "success",
            BadgeColor::Danger => "danger",
            BadgeColor::Warning => "warning",
            BadgeColor::Info => "info",
            BadgeColor::Light => "light",
            BadgeColor::Dark => "dark",
        }
    }

    /// SGR foreground code used by terminal renderers.
    pub fn ansi_code(self) -> &'static str {
        match self {
            BadgeColor::Primary => "34",
            BadgeColor::Secondary => "37",
            BadgeColor::Success => "32",
            BadgeColor::Danger => "31",
            BadgeColor::Warning => "33",
            BadgeColor::Info => "36",
            BadgeColor::Light => "97",
            BadgeColor::Dark => "90",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub color: BadgeColor,
    pub dark_text: bool,
}

impl Badge {
    const fn new(color: BadgeColor) -> Self {
        Self {
            color,
            dark_text: false,
        }
    }

    const fn with_dark_text(color: BadgeColor) -> Self {
        Self {
            color,
            dark_text: true,
        }
    }

    pub fn css_class(&self) -> String {
        if self.dark_text {
            format!("bg-{} text-dark", self.color.name())
        } else {
            format!("bg-{}", self.color.name())
        }
    }
}

struct GenreInfo {
    genre: Genre,
    code: u8,
    label: &'static str,
    badge: Badge,
}

// Indexed by `Genre as usize`; keep in declaration order.
static GENRE_TABLE: [GenreInfo; 13] = [
    GenreInfo {
        genre: Genre::Action,
        code: 1,
        label: "Action",
        badge: Badge::new(BadgeColor::Danger),
    },
    GenreInfo {
        genre: Genre::Adventure,
        code: 2,
        label: "Adventure",
        badge: Badge::new(BadgeColor::Success),
    },
    GenreInfo {
        genre: Genre::Rpg,
        code: 3,
        label: "RPG",
        badge: Badge::new(BadgeColor::Primary),
    },
    GenreInfo {
        genre: Genre::Strategy,
        code: 4,
        label: "Strategy",
        badge: Badge::new(BadgeColor::Info),
    },
    GenreInfo {
        genre: Genre::Sports,
        code: 5,
        label: "Sports",
        badge: Badge::with_dark_text(BadgeColor::Warning),
    },
    GenreInfo {
        genre: Genre::Racing,
        code: 6,
        label: "Racing",
        badge: Badge::new(BadgeColor::Secondary),
    },
    GenreInfo {
        genre: Genre::Simulation,
        code: 7,
        label: "Simulation",
        badge: Badge::new(BadgeColor::Dark),
    },
    GenreInfo {
        genre: Genre::Puzzle,
        code: 8,
        label: "Puzzle",
        badge: Badge::with_dark_text(BadgeColor::Light),
    },
    GenreInfo {
        genre: Genre::Fighting,
        code: 9,
        label: "Fighting",
        badge: Badge::new(BadgeColor::Danger),
    },
    GenreInfo {
        genre: Genre::Shooter,
        code: 10,
        label: "Shooter",
        badge: Badge::new(BadgeColor::Dark),
    },
    GenreInfo {
        genre: Genre::Horror,
        code: 11,
        label: "Horror",
        badge: Badge::new(BadgeColor::Secondary),
    },
    GenreInfo {
        genre: Genre::Platformer,
        code: 12,
        label: "Platformer",
        badge: Badge::new(BadgeColor::Success),
    },
    GenreInfo {
        genre: Genre::Other,
        code: 99,
        label: "Other",
        badge: Badge::new(BadgeColor::Secondary),
    },
];

impl Genre {
    /// Display order for pickers.
    pub const ALL: [Genre; 13] = [
        Genre::Action,
        Genre::Adventure,
        Genre::Rpg,
        Genre::Strategy,
        Genre::Sports,
        Genre::Racing,
        Genre::Simulation,
        Genre::Puzzle,
        Genre::Fighting,
        Genre::Shooter,
        Genre::Horror,
        Genre::Platformer,
        Genre::Other,
    ];

    fn info(self) -> &'static GenreInfo {
        &GENRE_TABLE[self as usize]
    }

    pub fn code(self) -> u8 {
        self.info().code
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn badge(self) -> Badge {
        self.info().badge
    }

    pub fn from_code(code: u8) -> Option<Genre> {
        GENRE_TABLE
            .iter()
            .find(|info| info.code == code)
            .map(|info| info.genre)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Genre> for u8 {
    fn from(value: Genre) -> Self {
        value.code()
    }
}

#[derive(Deserialize)]
#[serde(transparent)]
struct WireGenreCode(i64);

impl From<WireGenreCode> for Genre {
    fn from(value: WireGenreCode) -> Self {
        u8::try_from(value.0)
            .ok()
            .and_then(Genre::from_code)
            .unwrap_or(Genre::Other)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown genre code {0}")]
pub struct UnknownGenreCode(pub u8);

impl TryFrom<u8> for Genre {
    type Error = UnknownGenreCode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Genre::from_code(value).ok_or(UnknownGenreCode(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown genre '{0}'")]
pub struct GenreParseError(pub String);

impl FromStr for Genre {
    type Err = GenreParseError;

    /// Accepts a label (any case) or a numeric code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u8>() {
            return Genre::from_code(code).ok_or_else(|| GenreParseError(s.to_string()));
        }
        GENRE_TABLE
            .iter()
            .find(|info| info.label.eq_ignore_ascii_case(trimmed))
            .map(|info| info.genre)
            .ok_or_else(|| GenreParseError(s.to_string()))
    }
}
