pub mod ethio_mobile;
pub mod fixed_line;
pub mod safaricom_mobile;
pub mod short_code;
pub mod special;

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "Ethio telecom")]
    EthioTelecom,
    #[serde(rename = "Safaricom")]
    Safaricom,
}

impl Provider {
    pub fn label(&self) -> &'static str {
        match self {
            Provider::EthioTelecom => "Ethio telecom",
            Provider::Safaricom => "Safaricom",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhoneType {
    #[serde(rename = "Mobile")]
    Mobile,
    #[serde(rename = "Fixed-line")]
    FixedLine,
    #[serde(rename = "Special")]
    Special,
    #[serde(rename = "Short Code")]
    ShortCode,
}

impl PhoneType {
    pub fn label(&self) -> &'static str {
        match self {
            PhoneType::Mobile => "Mobile",
            PhoneType::FixedLine => "Fixed-line",
            PhoneType::Special => "Special",
            PhoneType::ShortCode => "Short Code",
        }
    }
}

impl fmt::Display for PhoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A rule recognizing one (provider, phone type) shape of digits.
pub trait PatternMatcher: Send + Sync {
    fn matches(&self, value: &str) -> bool;

    fn provider(&self) -> Provider;

    fn phone_type(&self) -> PhoneType;

    /// Whether the rule is evaluated against the `+251` form rather than the
    /// plain digits.
    fn requires_country_code(&self) -> bool;
}

/// All category rules in classification priority order.
pub fn get_all_matchers() -> Vec<Box<dyn PatternMatcher>> {
    vec![
        Box::new(ethio_mobile::EthioMobileMatcher {}),
        Box::new(safaricom_mobile::SafaricomMobileMatcher {}),
        Box::new(special::SpecialMatcher {}),
        Box::new(short_code::ShortCodeMatcher {}),
        Box::new(fixed_line::FixedLineMatcher {}),
    ]
}
