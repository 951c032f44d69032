//! Currency conversion response models

use serde::{Deserialize, Serialize};

/// A currency the caller can convert into
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CurrencyOption {
    /// ISO 4217 code, unique within a response
    pub code: String,
    /// Display name
    pub name: String,
}

impl CurrencyOption {
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Result of converting an amount of the domestic currency
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub amount: f64,
    pub source_currency: String,
    pub target_currency: String,
    /// `amount * rate`, rounded to 2 decimals
    pub converted_amount: f64,
    /// Rate formatted with 4 decimals
    pub rate: String,
    /// Every selectable currency, in upstream order
    pub available_currencies: Vec<CurrencyOption>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_result_uses_camel_case() {
        let result = ConversionResult {
            amount: 100.0,
            source_currency: "INR".to_string(),
            target_currency: "USD".to_string(),
            converted_amount: 1.2,
            rate: "0.0120".to_string(),
            available_currencies: vec![CurrencyOption::new("USD", "US Dollar")],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["sourceCurrency"], "INR");
        assert_eq!(json["convertedAmount"], 1.2);
        assert_eq!(json["rate"], "0.0120");
        assert_eq!(json["availableCurrencies"][0]["code"], "USD");
        assert_eq!(json["availableCurrencies"][0]["name"], "US Dollar");
    }
}
