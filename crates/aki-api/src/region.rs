//! Region codes accepted by the guessing service
//!
//! Each region selects the language (and server pool) the service asks its
//! questions in.

use crate::error::AkiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language/region code forwarded to the guessing service
///
/// # Examples
///
/// ```
/// use aki_api::Region;
///
/// let region: Region = "tr".parse().unwrap();
/// assert_eq!(region, Region::Tr);
/// assert_eq!(region.code(), "tr");
/// assert_eq!(Region::default(), Region::En);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// English
    #[default]
    En,
    /// Arabic
    Ar,
    /// Chinese
    Cn,
    /// German
    De,
    /// Spanish
    Es,
    /// French
    Fr,
    /// Hebrew
    Il,
    /// Italian
    It,
    /// Japanese
    Jp,
    /// Korean
    Kr,
    /// Dutch
    Nl,
    /// Polish
    Pl,
    /// Portuguese
    Pt,
    /// Russian
    Ru,
    /// Turkish
    Tr,
    /// Indonesian
    Id,
}

impl Region {
    /// All supported regions
    pub const ALL: [Region; 16] = [
        Region::En,
        Region::Ar,
        Region::Cn,
        Region::De,
        Region::Es,
        Region::Fr,
        Region::Il,
        Region::It,
        Region::Jp,
        Region::Kr,
        Region::Nl,
        Region::Pl,
        Region::Pt,
        Region::Ru,
        Region::Tr,
        Region::Id,
    ];

    /// Get the two-letter code used in service URLs
    pub fn code(&self) -> &'static str {
        match self {
            Region::En => "en",
            Region::Ar => "ar",
            Region::Cn => "cn",
            Region::De => "de",
            Region::Es => "es",
            Region::Fr => "fr",
            Region::Il => "il",
            Region::It => "it",
            Region::Jp => "jp",
            Region::Kr => "kr",
            Region::Nl => "nl",
            Region::Pl => "pl",
            Region::Pt => "pt",
            Region::Ru => "ru",
            Region::Tr => "tr",
            Region::Id => "id",
        }
    }

    /// Base URL of the regional service endpoint
    pub fn server_url(&self) -> String {
        format!("https://{}.akinator.com", self.code())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Region {
    type Err = AkiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Region::En),
            "ar" => Ok(Region::Ar),
            "cn" | "zh" => Ok(Region::Cn),
            "de" => Ok(Region::De),
            "es" => Ok(Region::Es),
            "fr" => Ok(Region::Fr),
            "il" | "he" => Ok(Region::Il),
            "it" => Ok(Region::It),
            "jp" | "ja" => Ok(Region::Jp),
            "kr" | "ko" => Ok(Region::Kr),
            "nl" => Ok(Region::Nl),
            "pl" => Ok(Region::Pl),
            "pt" => Ok(Region::Pt),
            "ru" => Ok(Region::Ru),
            "tr" => Ok(Region::Tr),
            "id" => Ok(Region::Id),
            other => Err(AkiError::ConfigurationError(format!(
                "Unknown region code: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_code_roundtrip() {
        for region in Region::ALL {
            let parsed: Region = region.code().parse().expect("code must parse");
            assert_eq!(parsed, region);
        }
    }

    #[test]
    fn test_region_aliases() {
        assert_eq!("JA".parse::<Region>().ok(), Some(Region::Jp));
        assert_eq!("english".parse::<Region>().ok(), Some(Region::En));
        assert!("xx".parse::<Region>().is_err());
    }

    #[test]
    fn test_server_url() {
        assert_eq!(Region::Tr.server_url(), "https://tr.akinator.com");
    }

    #[test]
    fn test_default() {
        assert_eq!(Region::default(), Region::En);
    }
}
