use regex::Regex;
use lazy_static::lazy_static;
use super::{PatternMatcher, PhoneType, Provider};

lazy_static! {
    // Four-digit service numbers, e.g. 8994 or 9444
    pub static ref SPECIAL_PATTERN: Regex = Regex::new(r"^\d{4}$").unwrap();
}

pub fn is_match(value: &str) -> bool {
    SPECIAL_PATTERN.is_match(value)
}

pub struct SpecialMatcher {}

impl PatternMatcher for SpecialMatcher {
    fn matches(&self, value: &str) -> bool {
        is_match(value)
    }

    fn provider(&self) -> Provider {
        Provider::EthioTelecom
    }

    fn phone_type(&self) -> PhoneType {
        PhoneType::Special
    }

    fn requires_country_code(&self) -> bool {
        false
    }
}
