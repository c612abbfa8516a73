//! Test support for the analog crates.
//!
//! [`mock::MockAnalogBackend`] stands in for the SDK library so sessions,
//! queries and waits can be driven from scripted readings. [`must_err`] and
//! [`must_status`] unwrap expected failures; [`assertions`] compares
//! computed readings.
//!
//! ```rust,ignore
//! use analog_test_helpers::prelude::*;
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod assertions;
pub mod must;
pub mod prelude;

#[cfg(feature = "mock")]
#[cfg_attr(docsrs, doc(cfg(feature = "mock")))]
pub mod mock;

pub use must::*;
