//! Record types for the country dataset.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A continent, identified by a uid generated at dataset build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Continent {
    pub uid: Uuid,
    pub name: String,
}

impl Continent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { uid: Uuid::new_v4(), name: name.into() }
    }
}

/// A country, linked to its continent by uid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub uid: Uuid,
    pub continent_uid: Uuid,
    pub name: String,
}

impl Country {
    pub fn new(name: impl Into<String>, continent_uid: Uuid) -> Self {
        Self { uid: Uuid::new_v4(), continent_uid, name: name.into() }
    }
}

/// One element of the source dataset: a country name paired with its
/// continent name.
///
/// Matches the shape of the country-by-continent JSON array, e.g.
/// `[{"country": "France", "continent": "Europe"}, ...]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub country: String,
    pub continent: String,
}

impl CountryRecord {
    pub fn new(country: impl Into<String>, continent: impl Into<String>) -> Self {
        Self { country: country.into(), continent: continent.into() }
    }
}
