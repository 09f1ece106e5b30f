use std::fmt;

use serde::{Deserialize, Serialize};

/// Envelope wrapping every backend payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub message: String,
    pub data: T,
}

/// Authenticated backoffice user as returned by the auth endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Super-admins carry `["*"]`.
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl AuthUser {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .iter()
            .any(|granted| granted == WILDCARD_PERMISSION || granted == permission)
    }
}

pub const WILDCARD_PERMISSION: &str = "*";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AuthUser,
}

/// Model year as typed by the user or stored by the backend: `2019` or `"2019"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelYear {
    Number(u32),
    Text(String),
}

impl fmt::Display for ModelYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelYear::Number(year) => write!(f, "{year}"),
            ModelYear::Text(year) => f.write_str(year),
        }
    }
}

impl From<u32> for ModelYear {
    fn from(value: u32) -> Self {
        ModelYear::Number(value)
    }
}

impl From<&str> for ModelYear {
    fn from(value: &str) -> Self {
        match value.trim().parse::<u32>() {
            Ok(year) => ModelYear::Number(year),
            Err(_) => ModelYear::Text(value.to_string()),
        }
    }
}

/// Input for the tax computation. Validation happens server-side.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TaxCalculatorPayload {
    pub cif: Option<f64>,
    pub year: ModelYear,
    #[serde(rename = "isLuxury")]
    pub is_luxury: bool,
    #[serde(rename = "isEV")]
    pub is_ev: bool,
    pub make: String,
}

/// Tax breakdown, all amounts in UGX except `usd_rate`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCalculatorResponse {
    pub total_tax: f64,
    pub form_fees: f64,
    pub stamp_duty: f64,
    pub registration_fees: f64,
    pub excise_duty: f64,
    pub import_commission: f64,
    pub infrastructure_tax: f64,
    pub env_levy: f64,
    pub withholding: f64,
    pub vat: f64,
    pub import_duty: f64,
    #[serde(rename = "cifUGX")]
    pub cif_ugx: f64,
    pub usd_rate: f64,
    pub total_car_value: f64,
}

impl TaxCalculatorResponse {
    /// Individual levies in the order they appear on the assessment.
    pub fn line_items(&self) -> [(&'static str, f64); 10] {
        [
            ("Import duty", self.import_duty),
            ("Excise duty", self.excise_duty),
            ("VAT", self.vat),
            ("Withholding tax", self.withholding),
            ("Infrastructure tax", self.infrastructure_tax),
            ("Environmental levy", self.env_levy),
            ("Import commission", self.import_commission),
            ("Registration fees", self.registration_fees),
            ("Stamp duty", self.stamp_duty),
            ("Form fees", self.form_fees),
        ]
    }
}

/// Snapshot of valuation reference data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchInfo {
    pub id: u64,
    pub title: String,
    pub review_date: String,
}

/// Catalogue entry from the valuation reference tables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleValuation {
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub hsc: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub model: Option<String>,
    #[serde(default)]
    pub year: Option<ModelYear>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub origin: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub cc: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub unit: Option<String>,
    /// Customs value in USD.
    #[serde(deserialize_with = "lenient::number")]
    pub cif: f64,
    pub batch: BatchInfo,
}

/// The backend serialises decimal and code columns either as JSON numbers or strings.
mod lenient {
    use std::fmt;

    use serde::de::{self, Deserializer, Visitor};

    pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NumberOrString;

        impl<'de> Visitor<'de> for NumberOrString {
            type Value = f64;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number or numeric string")
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<f64, E> {
                Ok(value)
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<f64, E> {
                Ok(value as f64)
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<f64, E> {
                Ok(value as f64)
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<f64, E> {
                value
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
            }
        }

        deserializer.deserialize_any(NumberOrString)
    }

    pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StringOrNumber;

        impl<'de> Visitor<'de> for StringOrNumber {
            type Value = Option<String>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string, number or null")
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(None)
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(None)
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Some(value.to_string()))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
                Ok(Some(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Some(value.to_string()))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Some(value.to_string()))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Some(value.to_string()))
            }
        }

        deserializer.deserialize_any(StringOrNumber)
    }
}
