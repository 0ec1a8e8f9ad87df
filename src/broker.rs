//! Broker trait for country lookups.

use uuid::Uuid;

use crate::Result;
use crate::types::{Continent, Country};

/// Trait for country data sources.
///
/// Brokers abstract over where the dataset lives (in-memory store, test
/// stub) and are consumed by the presenters. All listing methods return
/// collections ordered by name; implementations are expected to be fully
/// loaded by the time they are handed out, so lookups never block on an
/// upstream fetch.
#[async_trait::async_trait]
pub trait CountryBroker: Send + Sync + 'static {
    /// All continents, ordered by name.
    async fn continents(&self) -> Result<Vec<Continent>>;

    /// All countries, ordered by name.
    async fn countries(&self) -> Result<Vec<Country>>;

    /// Countries filtered by an optional case-insensitive substring match on
    /// the name and an optional continent, ordered by name.
    ///
    /// Blank or whitespace-only `search` means "no text filter". A nil
    /// continent uid is treated the same as `None` - it is what a UI select
    /// hands over before anything is chosen.
    async fn filtered_countries(
        &self,
        search: Option<&str>,
        continent: Option<Uuid>,
    ) -> Result<Vec<Country>>;

    /// All countries in one continent, ordered by name.
    ///
    /// An unknown continent yields an empty list, not an error.
    async fn countries_in(&self, continent: Uuid) -> Result<Vec<Country>>;
}
