//! Cascading-select presenter

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::Result;
use crate::broker::CountryBroker;
use crate::types::{Continent, Country};

/// Presenter for a continent → country cascading select.
///
/// The continent list is loaded once at construction. Selecting a continent
/// resets the country selection and refreshes the country list; the country
/// select stays disabled until a continent is chosen.
pub struct CascadingSelectPresenter {
    broker: Arc<dyn CountryBroker>,
    continents: Vec<Continent>,
    countries: Vec<Country>,
    selected_continent: Option<Uuid>,
    selected_country: Option<Uuid>,
}

impl CascadingSelectPresenter {
    /// Create a presenter over `broker`. Completes only once the continent
    /// list has been loaded.
    pub async fn new(broker: Arc<dyn CountryBroker>) -> Result<Self> {
        let continents = broker.continents().await?;
        Ok(Self {
            broker,
            continents,
            countries: Vec::new(),
            selected_continent: None,
            selected_country: None,
        })
    }

    /// Apply a continent selection from a raw select-element value.
    ///
    /// Returns `Ok(false)` without touching any state when `raw` is not a
    /// uuid (the placeholder option, for instance). On a real selection the
    /// country selection is cleared, the country list is refreshed, and
    /// `Ok(true)` is returned.
    pub async fn select_continent(&mut self, raw: &str) -> Result<bool> {
        let Ok(uid) = Uuid::parse_str(raw.trim()) else {
            debug!("ignoring continent selection with non-uuid value {raw:?}");
            return Ok(false);
        };

        self.selected_continent = Some(uid);
        // A country picked under the previous continent is meaningless now.
        self.selected_country = None;
        self.countries = self.broker.countries_in(uid).await?;

        debug!("continent {uid} selected: {} countries", self.countries.len());
        Ok(true)
    }

    /// Apply a country selection.
    pub fn select_country(&mut self, uid: Uuid) {
        self.selected_country = Some(uid);
    }

    /// The loaded continent list, ordered by name.
    pub fn continents(&self) -> &[Continent] {
        &self.continents
    }

    /// Countries of the selected continent, ordered by name. Empty until a
    /// continent is selected.
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn selected_continent(&self) -> Option<Uuid> {
        self.selected_continent
    }

    pub fn selected_country(&self) -> Option<Uuid> {
        self.selected_country
    }

    /// Whether the country select should be disabled (no continent chosen
    /// yet).
    pub fn is_country_disabled(&self) -> bool {
        self.selected_continent.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CountryStore;
    use crate::types::CountryRecord;

    fn sample_broker() -> Arc<dyn CountryBroker> {
        Arc::new(CountryStore::from_records(&[
            CountryRecord::new("France", "Europe"),
            CountryRecord::new("Spain", "Europe"),
            CountryRecord::new("Japan", "Asia"),
        ]))
    }

    #[tokio::test]
    async fn construction_loads_the_continent_list() {
        let presenter = CascadingSelectPresenter::new(sample_broker()).await.expect("load");

        let names: Vec<&str> = presenter.continents().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Asia", "Europe"]);
        assert!(presenter.is_country_disabled());
        assert!(presenter.countries().is_empty());
    }

    #[tokio::test]
    async fn selecting_a_continent_refreshes_and_resets() {
        let mut presenter = CascadingSelectPresenter::new(sample_broker()).await.expect("load");
        let europe = presenter
            .continents()
            .iter()
            .find(|c| c.name == "Europe")
            .expect("loaded above")
            .uid;

        presenter.select_country(Uuid::new_v4());
        assert!(presenter.select_continent(&europe.to_string()).await.expect("lookup"));

        assert_eq!(presenter.selected_continent(), Some(europe));
        assert_eq!(presenter.selected_country(), None, "continent change must reset the country");
        let names: Vec<&str> = presenter.countries().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["France", "Spain"]);
        assert!(!presenter.is_country_disabled());
    }

    #[tokio::test]
    async fn non_uuid_selection_is_a_no_op() {
        let mut presenter = CascadingSelectPresenter::new(sample_broker()).await.expect("load");

        assert!(!presenter.select_continent("-- pick a continent --").await.expect("no lookup"));
        assert!(presenter.is_country_disabled());
        assert!(presenter.countries().is_empty());
    }
}
