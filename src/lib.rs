//! Throttled, latest-wins type-ahead lookups over in-memory country data.
//!
//! The heart of the crate is [`InputThrottler`]: it coalesces rapid
//! successive "run this async work" requests - one per keystroke - into a
//! bounded-rate execution stream with no overlapping runs and a minimum
//! spacing between run starts, always executing the most recently requested
//! work. Around it sits a small lookup stack: country/continent records, a
//! [`CountryBroker`] trait served by an in-memory [`CountryStore`], and the
//! presenters that wire UI input events through the throttler.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use typeahead::{CountryStore, TypeAheadPresenter};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> typeahead::Result<()> {
//!     let store = CountryStore::from_json_file("data/countries.json").await?;
//!     let presenter = TypeAheadPresenter::new(Arc::new(store), Duration::from_millis(300));
//!
//!     // One call per keystroke; the throttler coalesces the burst.
//!     let _ = presenter.set_search("f").await;
//!     let _ = presenter.set_search("fr").await;
//!     let ran = presenter.set_search("fra").await.await?;
//!
//!     assert!(ran);
//!     println!("{:?}", presenter.suggestions());
//!     Ok(())
//! }
//! ```

// Core throttling
pub mod throttle;

// Lookup stack
pub mod broker;
pub mod presenter;
pub mod store;
pub mod types;

mod error;

// Core exports
pub use error::*;
pub use throttle::{InputThrottler, RunHandle};

// Lookup exports
pub use broker::CountryBroker;
pub use presenter::{CascadingSelectPresenter, TypeAheadPresenter};
pub use store::CountryStore;
pub use types::{Continent, Country, CountryRecord};
