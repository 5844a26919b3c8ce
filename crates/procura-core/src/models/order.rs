//! The extracted order record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the six fields pulled from an order document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Manufacturer,
    Product,
    #[serde(rename = "type")]
    Subtype,
    Quantity,
    #[serde(rename = "from")]
    FromLocation,
    #[serde(rename = "to")]
    ToLocation,
}

impl Field {
    /// All fields in record order.
    pub const ALL: [Field; 6] = [
        Field::Manufacturer,
        Field::Product,
        Field::Subtype,
        Field::Quantity,
        Field::FromLocation,
        Field::ToLocation,
    ];

    /// Key used for this field in serialized records.
    pub fn key(self) -> &'static str {
        match self {
            Field::Manufacturer => "manufacturer",
            Field::Product => "product",
            Field::Subtype => "type",
            Field::Quantity => "quantity",
            Field::FromLocation => "from",
            Field::ToLocation => "to",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Fields extracted from a single document.
///
/// Every field is always present; a field that could not be found is an
/// empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub manufacturer: String,
    pub product: String,
    #[serde(rename = "type")]
    pub subtype: String,
    pub quantity: String,
    #[serde(rename = "from")]
    pub from_location: String,
    #[serde(rename = "to")]
    pub to_location: String,
}

impl ExtractionResult {
    /// Get the value of a field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Manufacturer => &self.manufacturer,
            Field::Product => &self.product,
            Field::Subtype => &self.subtype,
            Field::Quantity => &self.quantity,
            Field::FromLocation => &self.from_location,
            Field::ToLocation => &self.to_location,
        }
    }

    /// Set the value of a field; `None` stores an empty string.
    pub fn set(&mut self, field: Field, value: Option<String>) {
        let value = value.unwrap_or_default();
        match field {
            Field::Manufacturer => self.manufacturer = value,
            Field::Product => self.product = value,
            Field::Subtype => self.subtype = value,
            Field::Quantity => self.quantity = value,
            Field::FromLocation => self.from_location = value,
            Field::ToLocation => self.to_location = value,
        }
    }

    /// Fields that came back empty.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_empty())
            .collect()
    }

    /// True when no field was extracted at all.
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_serializes_exactly_six_keys() {
        let result = ExtractionResult::default();
        let json = serde_json::to_value(&result).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 6);
        for field in Field::ALL {
            assert_eq!(object.get(field.key()), Some(&serde_json::json!("")));
        }
    }

    #[test]
    fn test_set_and_missing_fields() {
        let mut result = ExtractionResult::default();
        assert!(result.is_empty());

        result.set(Field::Quantity, Some("150".to_string()));
        result.set(Field::ToLocation, None);

        assert_eq!(result.get(Field::Quantity), "150");
        assert!(!result.is_empty());
        assert_eq!(
            result.missing_fields(),
            vec![
                Field::Manufacturer,
                Field::Product,
                Field::Subtype,
                Field::FromLocation,
                Field::ToLocation,
            ]
        );
    }

    #[test]
    fn test_field_serde_names_match_keys() {
        for field in Field::ALL {
            let json = serde_json::to_value(field).unwrap();
            assert_eq!(json, serde_json::json!(field.key()));
        }
    }
}
