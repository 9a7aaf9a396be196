//! Category labels and the fixed priority used to pick a line's label.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A classification bucket for a sub-task or a whole line.
///
/// The known categories carry a fixed rank. Any other label string is kept
/// verbatim as [`Category::Custom`] so the surrounding product can configure
/// its own buckets without touching the priority law.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Unknown,
    SchoolAndWork,
    PersonalDevelopment,
    PersonalWellBeing,
    Misc,
    PersonalEnjoyment,
    Custom(String),
    /// Excluded from analysis; displayed as [`Category::Misc`].
    Ignore,
}

impl Category {
    /// Priority rank, lower wins.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::SchoolAndWork => 1,
            Self::PersonalDevelopment => 2,
            Self::PersonalWellBeing => 3,
            Self::Misc => 4,
            Self::PersonalEnjoyment => 5,
            Self::Custom(_) => 6,
            Self::Ignore => 7,
        }
    }

    /// Canonical label string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unknown => "Unknown",
            Self::SchoolAndWork => "School and Work",
            Self::PersonalDevelopment => "Personal Development",
            Self::PersonalWellBeing => "Personal Well-being",
            Self::Misc => "Misc",
            Self::PersonalEnjoyment => "Personal Enjoyment",
            Self::Custom(label) => label.as_str(),
            Self::Ignore => "Ignore",
        }
    }

    /// Parses a label string. Never fails: unrecognised labels become custom.
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "Unknown" => Self::Unknown,
            "School and Work" => Self::SchoolAndWork,
            "Personal Development" => Self::PersonalDevelopment,
            "Personal Well-being" | "Personal Well-being/Social Life" | "Social Life" => {
                Self::PersonalWellBeing
            }
            "Misc" => Self::Misc,
            "Personal Enjoyment" => Self::PersonalEnjoyment,
            "Ignore" => Self::Ignore,
            other => Self::Custom(other.to_string()),
        }
    }

    /// The label shown for a line whose winning category is `self`.
    ///
    /// `Ignore` only means "leave out of review"; a line still needs a visible
    /// bucket, so it renders as `Misc`.
    #[must_use]
    pub fn display_label(self) -> Self {
        match self {
            Self::Ignore => Self::Misc,
            other => other,
        }
    }

    /// Returns the highest-priority category, or `None` for an empty input.
    ///
    /// Equal ranks (two custom categories) resolve to the first one seen.
    pub fn highest_priority<'a, I>(labels: I) -> Option<&'a Self>
    where
        I: IntoIterator<Item = &'a Self>,
    {
        labels.into_iter().min_by_key(|label| label.rank())
    }

    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self::parse(label)
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}
