use regex::Regex;
use lazy_static::lazy_static;
use super::{PatternMatcher, PhoneType, Provider};

lazy_static! {
    // Ethio telecom mobile: 9 followed by 8 digits, country code optional
    pub static ref ETHIO_MOBILE_PATTERN: Regex = Regex::new(
        r"^\+?(251)?9\d{8}$"
    ).unwrap();
}

pub fn is_match(value: &str) -> bool {
    ETHIO_MOBILE_PATTERN.is_match(value)
}

pub struct EthioMobileMatcher {}

impl PatternMatcher for EthioMobileMatcher {
    fn matches(&self, value: &str) -> bool {
        is_match(value)
    }

    fn provider(&self) -> Provider {
        Provider::EthioTelecom
    }

    fn phone_type(&self) -> PhoneType {
        PhoneType::Mobile
    }

    fn requires_country_code(&self) -> bool {
        true
    }
}
