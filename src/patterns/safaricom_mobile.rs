use regex::Regex;
use lazy_static::lazy_static;
use super::{PatternMatcher, PhoneType, Provider};

lazy_static! {
    // Safaricom Ethiopia mobile: 7 followed by 8 digits
    pub static ref SAFARICOM_MOBILE_PATTERN: Regex = Regex::new(
        r"^\+?(251)?7\d{8}$"
    ).unwrap();
}

pub fn is_match(value: &str) -> bool {
    SAFARICOM_MOBILE_PATTERN.is_match(value)
}

pub struct SafaricomMobileMatcher {}

impl PatternMatcher for SafaricomMobileMatcher {
    fn matches(&self, value: &str) -> bool {
        is_match(value)
    }

    fn provider(&self) -> Provider {
        Provider::Safaricom
    }

    fn phone_type(&self) -> PhoneType {
        PhoneType::Mobile
    }

    fn requires_country_code(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safaricom_mobiles() {
        assert!(is_match("+251711234567"));
        assert!(is_match("251700000000"));
        assert!(is_match("712345678"));

        assert!(!is_match("+251911234567"));
        assert!(!is_match("+25171123456"));
        assert!(!is_match("+254711234567")); // Kenyan Safaricom
    }
}
