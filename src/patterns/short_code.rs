use regex::Regex;
use lazy_static::lazy_static;
use super::{PatternMatcher, PhoneType, Provider};

lazy_static! {
    // Three-digit codes such as 991 (police) or 907 (ambulance)
    pub static ref SHORT_CODE_PATTERN: Regex = Regex::new(r"^\d{3}$").unwrap();
}

pub fn is_match(value: &str) -> bool {
    SHORT_CODE_PATTERN.is_match(value)
}

pub struct ShortCodeMatcher {}

impl PatternMatcher for ShortCodeMatcher {
    fn matches(&self, value: &str) -> bool {
        is_match(value)
    }

    fn provider(&self) -> Provider {
        Provider::EthioTelecom
    }

    fn phone_type(&self) -> PhoneType {
        PhoneType::ShortCode
    }

    fn requires_country_code(&self) -> bool {
        false
    }
}
