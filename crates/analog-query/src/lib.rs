//! Analog key queries: predicates, blocking waits and buffer snapshots.
//!
//! [`KeyQuery`] wraps an [`AnalogClient`](analog_sdk::AnalogClient) and
//! accepts either raw native codes or [`GeneralizedKey`]s; generalized keys
//! are translated with the client's current keycode mode before the SDK is
//! touched.
//!
//! ```rust,no_run
//! use analog_keycodes::GeneralizedKey;
//! use analog_query::KeyQuery;
//! use analog_sdk::{AnalogClient, SdkConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AnalogClient::open(&SdkConfig::from_env())?;
//!     client.initialise()?;
//!     let query = KeyQuery::new(&client);
//!     query.wait_press(GeneralizedKey::Space)?;
//!     println!("W at {}%", query.key_value_as_percent(GeneralizedKey::W)?);
//!     Ok(())
//! }
//! ```

#![deny(unsafe_code, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod query;
pub mod value;

pub use analog_keycodes::GeneralizedKey;
pub use config::QueryConfig;
pub use error::{QueryError, QueryResult};
pub use query::{KeyQuery, WaitOutcome};
pub use value::value_to_percent;
