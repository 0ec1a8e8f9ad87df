//! In-memory country store.
//!
//! Builds the continent/country dataset from raw records - either straight
//! from memory or from a country-by-continent JSON file - and serves the
//! [`CountryBroker`] contract with linear scans over the (small, static)
//! lists.

use std::path::Path;

use tracing::{debug, info};
use uuid::Uuid;

use crate::Result;
use crate::TypeAheadError;
use crate::broker::CountryBroker;
use crate::types::{Continent, Country, CountryRecord};

/// Country data source backed by an in-memory dataset.
///
/// Construction does the whole load: once a store exists, every lookup is
/// served from memory. Both lists are held sorted by name, so the filtering
/// scans preserve order for free.
pub struct CountryStore {
    continents: Vec<Continent>,
    countries: Vec<Country>,
}

impl CountryStore {
    /// Build a store from raw records.
    ///
    /// Distinct continent names become [`Continent`]s; every record becomes
    /// a [`Country`] linked to its continent's uid.
    pub fn from_records(records: &[CountryRecord]) -> Self {
        let mut continents: Vec<Continent> = Vec::new();
        for record in records {
            if !continents.iter().any(|c| c.name == record.continent) {
                continents.push(Continent::new(record.continent.clone()));
            }
        }

        let mut countries: Vec<Country> = records
            .iter()
            .filter_map(|record| {
                continents
                    .iter()
                    .find(|c| c.name == record.continent)
                    .map(|c| Country::new(record.country.clone(), c.uid))
            })
            .collect();

        continents.sort_by_key(|c| name_key(&c.name));
        countries.sort_by_key(|c| name_key(&c.name));

        debug!(
            "built country dataset: {} countries across {} continents",
            countries.len(),
            continents.len()
        );

        Self { continents, countries }
    }

    /// Build a store from a country-by-continent JSON array, e.g.
    /// `[{"country": "France", "continent": "Europe"}, ...]`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<CountryRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(&records))
    }

    /// Load a store from a country-by-continent JSON file.
    ///
    /// Completes only once the dataset is fully built, so a store obtained
    /// from this call is always ready to query.
    pub async fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("loading country dataset: {}", path.display());

        let json = std::fs::read_to_string(path)
            .map_err(|source| TypeAheadError::file_error(path.to_path_buf(), source))?;
        let store = Self::from_json_str(&json)?;

        info!("country dataset loaded ({} countries)", store.countries.len());
        Ok(store)
    }

    fn filter(&self, search: Option<&str>, continent: Option<Uuid>) -> Vec<Country> {
        // A nil uid is what a UI select hands over before anything is
        // chosen; treat it as "no continent filter".
        let continent = continent.filter(|uid| !uid.is_nil());
        let search = search.map(str::trim).filter(|s| !s.is_empty()).map(str::to_lowercase);

        self.countries
            .iter()
            .filter(|country| continent.is_none_or(|uid| country.continent_uid == uid))
            .filter(|country| {
                search.as_deref().is_none_or(|needle| country.name.to_lowercase().contains(needle))
            })
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl CountryBroker for CountryStore {
    async fn continents(&self) -> Result<Vec<Continent>> {
        Ok(self.continents.clone())
    }

    async fn countries(&self) -> Result<Vec<Country>> {
        Ok(self.countries.clone())
    }

    async fn filtered_countries(
        &self,
        search: Option<&str>,
        continent: Option<Uuid>,
    ) -> Result<Vec<Country>> {
        Ok(self.filter(search, continent))
    }

    async fn countries_in(&self, continent: Uuid) -> Result<Vec<Country>> {
        // Exact match, no nil-uid leniency: asking for "the countries of no
        // continent" is a real question with an empty answer.
        Ok(self.countries.iter().filter(|c| c.continent_uid == continent).cloned().collect())
    }
}

/// Sort/compare key for names. Case-insensitive, matching the filter.
fn name_key(name: &str) -> String {
    name.to_lowercase()
}
