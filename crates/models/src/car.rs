use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Identifier assigned by the store; always >= 1.
pub type CarId = u64;

/// Stored vehicle record.
///
/// Wire keys keep the names used by existing `cars.json` files.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Car {
    #[serde(rename = "Идентификатор")]
    pub id: CarId,
    #[serde(rename = "Марка")]
    pub brand: String,
    #[serde(rename = "Модель")]
    pub model: String,
    #[serde(rename = "Пробег")]
    pub mileage: f64,
    #[serde(rename = "Владельцы")]
    pub owners_count: i64,
}

/// Create/update payload: no id, every field falls back to its zero value.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CarInput {
    #[serde(rename = "Марка", default)]
    pub brand: String,
    #[serde(rename = "Модель", default)]
    pub model: String,
    #[serde(rename = "Пробег", default)]
    pub mileage: f64,
    #[serde(rename = "Владельцы", default)]
    pub owners_count: i64,
}

impl CarInput {
    /// Decode the first JSON value of a request body; anything after it is
    /// left unread. `null` is a payload with every field at its zero value,
    /// an empty body is an `EOF` error.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ModelError> {
        let mut values = serde_json::Deserializer::from_slice(bytes).into_iter::<Option<CarInput>>();
        match values.next() {
            Some(value) => Ok(value?.unwrap_or_default()),
            None => Err(ModelError::Decode("EOF".into())),
        }
    }

    /// Whether the payload carries everything a full replacement needs.
    pub fn is_complete(&self) -> bool {
        !self.brand.is_empty() && !self.model.is_empty() && self.mileage > 0.0 && self.owners_count >= 0
    }

    pub fn into_car(self, id: CarId) -> Car {
        Car {
            id,
            brand: self.brand,
            model: self.model,
            mileage: self.mileage,
            owners_count: self.owners_count,
        }
    }
}
