//! Run configuration
//!
//! The configuration is assembled from the command line and fully
//! validated before any navigation occurs; see `validation` for the rules.

mod types;
mod validation;

pub use types::{Credentials, DateBound, HarvestConfig, Mode};
pub use validation::{resolve_credentials, resolve_date_bound, validate};
