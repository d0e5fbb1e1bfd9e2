pub mod extraction;
pub mod filter;
pub mod logging;
pub mod mcp_server;
pub mod number;
pub mod patterns;

pub use filter::{FilterError, Filters, ProviderFilter, TypeFilter};
pub use number::{add_country_code, extract_number, PhoneInput};
pub use patterns::{get_all_matchers, PatternMatcher, PhoneType, Provider};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref MATCHERS: Vec<Box<dyn PatternMatcher>> = get_all_matchers();
}

/// Outcome of classifying one phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_type: Option<PhoneType>,
}

impl Classification {
    pub fn invalid() -> Self {
        Self {
            is_valid: false,
            phone_number: None,
            provider: None,
            phone_type: None,
        }
    }

    fn matched(phone_number: String, provider: Provider, phone_type: PhoneType) -> Self {
        Self {
            is_valid: true,
            phone_number: Some(phone_number),
            provider: Some(provider),
            phone_type: Some(phone_type),
        }
    }
}

/// Classifies a phone number against the Ethio telecom and Safaricom
/// numbering rules.
///
/// The input is reduced to its digits, and the `+251` form is derived from
/// them. Rules are tried in priority order (Ethio telecom mobile, Safaricom
/// mobile, special, short code, fixed-line) and the first rule that both
/// matches and is allowed by `filters` wins. Rules flagged with
/// `requires_country_code` see the `+251` form, the others see the plain
/// digits, and the matched form is what ends up in `phone_number`.
///
/// Nothing matching is not an error: the result is simply
/// `Classification::invalid()`.
pub fn classify<P: Into<PhoneInput>>(phone: P, filters: &Filters) -> Classification {
    let phone_num = extract_number(&phone.into().to_string());
    let phone_with_country_code = add_country_code(&phone_num);

    for matcher in MATCHERS.iter() {
        if !filters.allows(matcher.phone_type(), matcher.provider()) {
            continue;
        }

        let candidate = if matcher.requires_country_code() {
            &phone_with_country_code
        } else {
            &phone_num
        };

        if matcher.matches(candidate) {
            return Classification::matched(candidate.clone(), matcher.provider(), matcher.phone_type());
        }
    }

    Classification::invalid()
}

/// [`classify`] with the default filters: mobile and fixed-line numbers from
/// any provider.
pub fn classify_default<P: Into<PhoneInput>>(phone: P) -> Classification {
    classify(phone, &Filters::default())
}

pub fn is_valid<P: Into<PhoneInput>>(phone: P, filters: &Filters) -> bool {
    classify(phone, filters).is_valid
}
