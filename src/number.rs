use serde::{Deserialize, Serialize};
use std::fmt;

/// Ethiopia's country calling code, without the leading `+`.
pub const COUNTRY_CODE: &str = "251";

/// Length of a national significant number (area or operator code plus
/// subscriber digits).
pub const NATIONAL_DIGITS: usize = 9;

/// A phone number as handed in by a caller: free text or an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PhoneInput {
    Number(u64),
    Text(String),
}

impl fmt::Display for PhoneInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhoneInput::Number(n) => write!(f, "{}", n),
            PhoneInput::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for PhoneInput {
    fn from(value: &str) -> Self {
        PhoneInput::Text(value.to_string())
    }
}

impl From<String> for PhoneInput {
    fn from(value: String) -> Self {
        PhoneInput::Text(value)
    }
}

impl From<&String> for PhoneInput {
    fn from(value: &String) -> Self {
        PhoneInput::Text(value.clone())
    }
}

impl From<u64> for PhoneInput {
    fn from(value: u64) -> Self {
        PhoneInput::Number(value)
    }
}

impl From<u32> for PhoneInput {
    fn from(value: u32) -> Self {
        PhoneInput::Number(u64::from(value))
    }
}

// Signed values go through the text form so a sign is stripped like any
// other formatting character.
impl From<i64> for PhoneInput {
    fn from(value: i64) -> Self {
        PhoneInput::Text(value.to_string())
    }
}

impl From<i32> for PhoneInput {
    fn from(value: i32) -> Self {
        PhoneInput::Text(value.to_string())
    }
}

/// Strips every character that is not an ASCII digit.
///
/// Spaces, hyphens, dots, parentheses and a leading `+` all disappear, so
/// `"+251 (91) 123-4567"` becomes `"251911234567"`. Never fails; input with
/// no digits at all yields an empty string.
pub fn extract_number(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Returns the `+251`-prefixed form of a national number.
///
/// A leading `251` counts as the country code only when the `+` is present
/// or the digits are longer than a national number, so the Dire Dawa number
/// `251112233` is national. Coded numbers only gain the `+`. Otherwise a
/// single national trunk `0` is dropped before the code is prepended. The
/// output always starts with `+251`, which makes the function idempotent.
pub fn add_country_code(digits: &str) -> String {
    let (has_plus, digits) = match digits.strip_prefix('+') {
        Some(rest) => (true, rest),
        None => (false, digits),
    };

    if digits.starts_with(COUNTRY_CODE) && (has_plus || digits.len() > NATIONAL_DIGITS) {
        return format!("+{}", digits);
    }

    let national = digits.strip_prefix('0').unwrap_or(digits);
    format!("+{}{}", COUNTRY_CODE, national)
}
