use crate::patterns::{PhoneType, Provider};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("unknown phone type '{0}' (expected one of: all, mobile, fixedLine, special, shortCode)")]
    UnknownType(String),
    #[error("unknown provider '{0}' (expected one of: all, ethioTelecom, safaricom)")]
    UnknownProvider(String),
}

/// Requested phone categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeFilter {
    All,
    Mobile,
    FixedLine,
    Special,
    ShortCode,
}

impl TypeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Mobile => "mobile",
            TypeFilter::FixedLine => "fixedLine",
            TypeFilter::Special => "special",
            TypeFilter::ShortCode => "shortCode",
        }
    }

    fn selects(&self, phone_type: PhoneType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Mobile => phone_type == PhoneType::Mobile,
            TypeFilter::FixedLine => phone_type == PhoneType::FixedLine,
            TypeFilter::Special => phone_type == PhoneType::Special,
            TypeFilter::ShortCode => phone_type == PhoneType::ShortCode,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = FilterError;

    // Case-insensitive, and tolerant of the kebab/snake spellings people type
    // on a command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        match key.as_str() {
            "all" => Ok(TypeFilter::All),
            "mobile" => Ok(TypeFilter::Mobile),
            "fixedline" => Ok(TypeFilter::FixedLine),
            "special" => Ok(TypeFilter::Special),
            "shortcode" => Ok(TypeFilter::ShortCode),
            _ => Err(FilterError::UnknownType(s.trim().to_string())),
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProviderFilter {
    All,
    #[serde(alias = "ethioTelecomProvider")]
    EthioTelecom,
    #[serde(alias = "safaricomProvider")]
    Safaricom,
}

impl ProviderFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderFilter::All => "all",
            ProviderFilter::EthioTelecom => "ethioTelecom",
            ProviderFilter::Safaricom => "safaricom",
        }
    }

    fn selects(&self, provider: Provider) -> bool {
        match self {
            ProviderFilter::All => true,
            ProviderFilter::EthioTelecom => provider == Provider::EthioTelecom,
            ProviderFilter::Safaricom => provider == Provider::Safaricom,
        }
    }
}

impl FromStr for ProviderFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_' && *c != ' ')
            .collect::<String>()
            .to_ascii_lowercase();

        match key.as_str() {
            "all" => Ok(ProviderFilter::All),
            "ethiotelecom" | "ethiotelecomprovider" | "ethio" => Ok(ProviderFilter::EthioTelecom),
            "safaricom" | "safaricomprovider" => Ok(ProviderFilter::Safaricom),
            _ => Err(FilterError::UnknownProvider(s.trim().to_string())),
        }
    }
}

impl fmt::Display for ProviderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which categories and providers a classification call may report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub types: Vec<TypeFilter>,
    pub providers: Vec<ProviderFilter>,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            types: vec![TypeFilter::Mobile, TypeFilter::FixedLine],
            providers: vec![ProviderFilter::All],
        }
    }
}

impl Filters {
    pub fn new(types: Vec<TypeFilter>, providers: Vec<ProviderFilter>) -> Self {
        Self { types, providers }
    }

    /// Every category from every provider.
    pub fn all() -> Self {
        Self::new(vec![TypeFilter::All], vec![ProviderFilter::All])
    }

    pub fn with_types(mut self, types: Vec<TypeFilter>) -> Self {
        self.types = types;
        self
    }

    pub fn with_providers(mut self, providers: Vec<ProviderFilter>) -> Self {
        self.providers = providers;
        self
    }

    /// Builds filters from comma-separated lists. `None` keeps the default
    /// for that side.
    pub fn parse(types: Option<&str>, providers: Option<&str>) -> Result<Self, FilterError> {
        let mut filters = Self::default();
        if let Some(types) = types {
            filters.types = parse_list(types)?;
        }
        if let Some(providers) = providers {
            filters.providers = parse_list(providers)?;
        }
        Ok(filters)
    }

    pub fn allows_type(&self, phone_type: PhoneType) -> bool {
        self.types.iter().any(|t| t.selects(phone_type))
    }

    pub fn allows_provider(&self, provider: Provider) -> bool {
        self.providers.iter().any(|p| p.selects(provider))
    }

    pub fn allows(&self, phone_type: PhoneType, provider: Provider) -> bool {
        self.allows_type(phone_type) && self.allows_provider(provider)
    }
}

/// Parses a comma-separated list, skipping empty items.
pub fn parse_list<T: FromStr>(list: &str) -> Result<Vec<T>, T::Err> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}
