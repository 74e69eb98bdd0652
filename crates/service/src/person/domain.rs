use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::ServiceError;

/// A stored person record. `id` is assigned by the store and never changes.
///
/// Every other field may be `null`: callers are free to send `null` for any
/// of them, including `name`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub id: u64,
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub personnummer: Option<String>,
    pub account_balance: Option<f64>,
}

impl Person {
    /// Records the directory starts with on every process start.
    pub fn seed() -> Vec<Person> {
        vec![
            Person {
                id: 1,
                name: Some("John Doe".into()),
                address: Some("123 Main St".into()),
                phone_number: Some("34567890".into()),
                personnummer: Some("12345678901".into()),
                account_balance: Some(1000.00),
            },
            Person {
                id: 2,
                name: Some("Jane Smith".into()),
                address: Some("456 Elm St".into()),
                phone_number: Some("87654321".into()),
                personnummer: Some("10987654321".into()),
                account_balance: Some(1500.00),
            },
        ]
    }
}

/// Marks a field as present in the body: an absent key stays `None` (via
/// `#[serde(default)]`), a present key, even `null`, becomes `Some(..)`.
fn supplied<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body of a create request. Only the `name` key is required (its value may
/// be `null`); the remaining fields are stored as `null` when left out.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CreatePersonInput {
    #[serde(default, deserialize_with = "supplied", skip_serializing_if = "Option::is_none")]
    pub name: Option<Option<String>>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub personnummer: Option<String>,
    #[serde(default)]
    pub account_balance: Option<f64>,
}

impl CreatePersonInput {
    /// Decode a raw JSON request body.
    pub fn from_json(body: Value) -> Result<Self, ServiceError> {
        decode_object(body)
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.name.is_none() {
            return Err(ServiceError::validation("name is required"));
        }
        Ok(())
    }

    /// Build the stored record under the given id.
    pub fn into_person(self, id: u64) -> Result<Person, ServiceError> {
        let name = self
            .name
            .ok_or_else(|| ServiceError::validation("name is required"))?;
        Ok(Person {
            id,
            name,
            address: self.address,
            phone_number: self.phone_number,
            personnummer: self.personnummer,
            account_balance: self.account_balance,
        })
    }
}

/// Body of an update request. Every key is optional. An absent key keeps the
/// stored value; a present key overwrites it, `null` included.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdatePersonInput {
    #[serde(default, deserialize_with = "supplied", skip_serializing_if = "Option::is_none")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "supplied", skip_serializing_if = "Option::is_none")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "supplied", skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "supplied", skip_serializing_if = "Option::is_none")]
    pub personnummer: Option<Option<String>>,
    #[serde(default, deserialize_with = "supplied", skip_serializing_if = "Option::is_none")]
    pub account_balance: Option<Option<f64>>,
}

impl UpdatePersonInput {
    /// Decode a raw JSON request body.
    pub fn from_json(body: Value) -> Result<Self, ServiceError> {
        decode_object(body)
    }

    pub fn apply(self, person: &mut Person) {
        if let Some(name) = self.name {
            person.name = name;
        }
        if let Some(address) = self.address {
            person.address = address;
        }
        if let Some(phone_number) = self.phone_number {
            person.phone_number = phone_number;
        }
        if let Some(personnummer) = self.personnummer {
            person.personnummer = personnummer;
        }
        if let Some(account_balance) = self.account_balance {
            person.account_balance = account_balance;
        }
    }
}

// An empty object carries nothing to act on and is rejected like a missing body.
fn decode_object<T: DeserializeOwned>(body: Value) -> Result<T, ServiceError> {
    match body.as_object() {
        Some(map) if !map.is_empty() => {}
        _ => return Err(ServiceError::validation("request body must be a non-empty JSON object")),
    }
    serde_json::from_value(body).map_err(|e| ServiceError::validation(e.to_string()))
}
