use regex::Regex;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt;
use super::{PatternMatcher, PhoneType, Provider};

/// Ethio telecom fixed-line numbering regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Region {
    AddisAbaba,
    SouthEast,
    East,
    NorthEast,
    North,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Region {
    pub fn name(&self) -> &'static str {
        match self {
            Region::AddisAbaba => "Addis Ababa",
            Region::SouthEast => "South East",
            Region::East => "East",
            Region::NorthEast => "North East",
            Region::North => "North",
            Region::South => "South",
            Region::SouthWest => "South West",
            Region::West => "West",
            Region::NorthWest => "North West",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Area code of each region. Every area code is followed by a seven digit
/// subscriber number.
pub const AREA_CODES: &[(&str, Region)] = &[
    ("11", Region::AddisAbaba),
    ("22", Region::SouthEast),  // Adama, Asella
    ("25", Region::East),       // Dire Dawa, Harar
    ("33", Region::NorthEast),  // Dessie, Kombolcha
    ("34", Region::North),      // Mekelle
    ("46", Region::South),      // Hawassa, Arba Minch
    ("47", Region::SouthWest),  // Jimma
    ("57", Region::West),       // Nekemte
    ("58", Region::NorthWest),  // Bahir Dar, Gondar
];

pub const SUBSCRIBER_DIGITS: usize = 7;

lazy_static! {
    pub static ref FIXED_LINE_PATTERN: Regex = Regex::new(&fixed_line_pattern()).unwrap();
}

fn fixed_line_pattern() -> String {
    let area_codes = AREA_CODES
        .iter()
        .map(|(code, _)| *code)
        .collect::<Vec<_>>()
        .join("|");

    format!(r"^\+?(251)?({})\d{{{}}}$", area_codes, SUBSCRIBER_DIGITS)
}

/// Matches an already normalized, country-coded number against a fixed-line
/// pattern.
pub fn is_fixed_line(country_coded: &str, pattern: &Regex) -> bool {
    pattern.is_match(country_coded)
}

pub fn is_match(value: &str) -> bool {
    is_fixed_line(value, &FIXED_LINE_PATTERN)
}

/// Region of a fixed-line number, `None` when the number is not fixed-line.
pub fn region(country_coded: &str) -> Option<Region> {
    let caps = FIXED_LINE_PATTERN.captures(country_coded)?;
    let area_code = caps.get(2)?.as_str();

    AREA_CODES
        .iter()
        .find(|(code, _)| *code == area_code)
        .map(|(_, region)| *region)
}

pub struct FixedLineMatcher {}

impl PatternMatcher for FixedLineMatcher {
    fn matches(&self, value: &str) -> bool {
        is_match(value)
    }

    fn provider(&self) -> Provider {
        Provider::EthioTelecom
    }

    fn phone_type(&self) -> PhoneType {
        PhoneType::FixedLine
    }

    fn requires_country_code(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_fixed_lines() {
        let valid = vec![
            "+251111234567",
            "251221112233",
            "+251251111111",
            "+251582201234",
            "461234567",
        ];

        for phone in valid {
            assert!(is_match(phone), "Should match: {}", phone);
        }
    }

    #[test]
    fn test_invalid_fixed_lines() {
        let invalid = vec![
            "+251131234567",  // no region 13
            "+251911234567",  // mobile
            "+25111123456",   // subscriber too short
            "+2511112345678", // subscriber too long
            "",
        ];

        for phone in invalid {
            assert!(!is_match(phone), "Should not match: {}", phone);
        }
    }

    #[test]
    fn test_custom_pattern_is_used() {
        let addis_only = Regex::new(r"^\+251 ?11\d{7}$").unwrap();
        assert!(is_fixed_line("+251111234567", &addis_only));
        assert!(!is_fixed_line("+251471234567", &addis_only));
    }

    #[test]
    fn test_region_lookup() {
        assert_eq!(region("+251111234567"), Some(Region::AddisAbaba));
        assert_eq!(region("+251251112233"), Some(Region::East));
        assert_eq!(region("+251582201234"), Some(Region::NorthWest));
        assert_eq!(region("+251911234567"), None);
        assert_eq!(Region::SouthWest.to_string(), "South West");
    }
}
