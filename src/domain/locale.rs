//! Supported content locales.
//!
//! Locale fallback is centralized here: any unknown or absent locale code
//! resolves to the default locale instead of being passed through.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "locale_code", rename_all = "lowercase")]
pub enum Locale {
    Tr,
    En,
    Ar,
}

impl Locale {
    pub const SUPPORTED: [Locale; 3] = [Locale::Tr, Locale::En, Locale::Ar];

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Tr => "tr",
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }

    /// Resolve an optional raw locale code, falling back to the default.
    pub fn normalize(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.parse().ok()).unwrap_or_default()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::Tr
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "tr" => Ok(Locale::Tr),
            "en" => Ok(Locale::En),
            "ar" => Ok(Locale::Ar),
            _ => Err(()),
        }
    }
}
