//! Lenient deserializers for numeric fields
//!
//! The upstream form submits some numeric fields as JSON strings (the same
//! payloads the original schema accepted via coercion). These helpers accept
//! either a JSON number or a numeric string; anything else fails
//! deserialization with a message naming the expected type, which the intake
//! path surfaces as a validation error rather than a panic.

use serde::{Deserialize, Deserializer, de::Error as _};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberLike {
    Number(f64),
    Text(String),
}

impl NumberLike {
    fn as_f64<E: serde::de::Error>(&self) -> Result<f64, E> {
        match self {
            NumberLike::Number(n) => Ok(*n),
            NumberLike::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("expected a number, got \"{s}\""))),
        }
    }

    fn as_integer<E: serde::de::Error>(&self) -> Result<i64, E> {
        let value = self.as_f64::<E>()?;
        if value.fract() != 0.0 || !value.is_finite() {
            return Err(E::custom(format!("expected an integer, got {value}")));
        }
        Ok(value as i64)
    }
}

/// Deserialize a required number, coercing numeric strings
pub fn num<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    NumberLike::deserialize(deserializer)?.as_f64()
}

/// Deserialize an optional number, coercing numeric strings
pub fn opt_num<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberLike>::deserialize(deserializer)?
        .map(|raw| raw.as_f64())
        .transpose()
}

/// Deserialize an optional non-negative count, coercing numeric strings
pub fn opt_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberLike>::deserialize(deserializer)?
        .map(|raw| {
            let value = raw.as_integer()?;
            u64::try_from(value)
                .map_err(|_| D::Error::custom(format!("expected a non-negative count, got {value}")))
        })
        .transpose()
}

/// Deserialize an optional calendar year, coercing numeric strings
pub fn opt_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberLike>::deserialize(deserializer)?
        .map(|raw| {
            let value = raw.as_integer()?;
            i32::try_from(value)
                .map_err(|_| D::Error::custom(format!("year {value} out of range")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "super::num")]
        required: f64,
        #[serde(default, deserialize_with = "super::opt_num")]
        rate: Option<f64>,
        #[serde(default, deserialize_with = "super::opt_count")]
        customers: Option<u64>,
        #[serde(default, deserialize_with = "super::opt_year")]
        year: Option<i32>,
    }

    #[test]
    fn test_accepts_numbers_and_numeric_strings() {
        let probe: Probe = serde_json::from_value(json!({
            "required": "1000000",
            "rate": 0.25,
            "customers": "42",
            "year": 2023,
        }))
        .unwrap();
        assert_eq!(probe.required, 1_000_000.0);
        assert_eq!(probe.rate, Some(0.25));
        assert_eq!(probe.customers, Some(42));
        assert_eq!(probe.year, Some(2023));
    }

    #[test]
    fn test_absent_and_null_are_none() {
        let probe: Probe = serde_json::from_value(json!({
            "required": 1.0,
            "rate": null,
        }))
        .unwrap();
        assert_eq!(probe.rate, None);
        assert_eq!(probe.customers, None);
    }

    #[test]
    fn test_non_numeric_string_fails() {
        let result: Result<Probe, _> = serde_json::from_value(json!({
            "required": "lots",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_fractional_count_fails() {
        let result: Result<Probe, _> = serde_json::from_value(json!({
            "required": 1.0,
            "customers": 1.5,
        }));
        assert!(result.is_err());
    }
}
