//! Pre-navigation validation
//!
//! Every rule here fires before the first request goes out: incompatible
//! date-bound/starting-mode combinations, unsatisfiable sort orders, and
//! missing credentials all abort the run up front.

use crate::config::types::{Credentials, DateBound, HarvestConfig, Mode};
use crate::{ConfigError, ConfigResult};
use chrono::NaiveDate;
use std::path::Path;
use url::Url;

/// Resolves the optional min/max date flags into a single bound
///
/// Rules, in order:
/// - both flags at once is a configuration error;
/// - a bound without an explicit listing start is a configuration error
///   (the bound's sort-order requirement cannot be met from a landing page);
/// - a min bound requires the listing sorted descending, a max bound
///   ascending, read from the listing URL's `sort.ascending` parameter.
pub fn resolve_date_bound(
    min_date: Option<NaiveDate>,
    max_date: Option<NaiveDate>,
    start_from_listing: bool,
    listing_url: &Url,
) -> ConfigResult<Option<DateBound>> {
    match (min_date, max_date) {
        (Some(_), Some(_)) => Err(ConfigError::ConflictingDateBounds),
        (None, None) => Ok(None),
        (min, max) => {
            if !start_from_listing {
                return Err(ConfigError::DateBoundWithoutListing);
            }
            let ascending = listing_sorted_ascending(listing_url);
            if min.is_some() && ascending {
                return Err(ConfigError::MinDateRequiresDescending);
            }
            if max.is_some() && !ascending {
                return Err(ConfigError::MaxDateRequiresAscending);
            }
            Ok(min.map(DateBound::Min).or(max.map(DateBound::Max)))
        }
    }
}

/// Reads the sort direction from the listing URL
///
/// The source defaults to newest-first; only an explicit
/// `sort.ascending=true` flips it.
fn listing_sorted_ascending(url: &Url) -> bool {
    url.query_pairs()
        .any(|(key, value)| key == "sort.ascending" && value == "true")
}

/// Resolves sign-in credentials
///
/// Precedence: explicit flags, then the structured credentials file, then
/// a `secret.json` in the working directory. Nothing found is a
/// configuration error with a user-facing message.
pub fn resolve_credentials(
    username: Option<String>,
    password: Option<String>,
    credentials_file: Option<&Path>,
) -> ConfigResult<Credentials> {
    if let (Some(username), Some(password)) = (username, password) {
        return Ok(Credentials { username, password });
    }

    if let Some(path) = credentials_file {
        return load_credentials_file(path);
    }

    match load_credentials_file(Path::new("secret.json")) {
        Ok(credentials) => Ok(credentials),
        Err(ConfigError::Io(_)) => Err(ConfigError::MissingCredentials),
        Err(other) => Err(other),
    }
}

fn load_credentials_file(path: &Path) -> ConfigResult<Credentials> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Validates a fully built configuration
pub fn validate(config: &HarvestConfig) -> ConfigResult<()> {
    if config.mode == Mode::Companies && config.search_names.is_empty() {
        return Err(ConfigError::NoSearchNames);
    }
    if config.limit == 0 {
        return Err(ConfigError::Validation(
            "limit must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn listing_url(ascending: bool) -> Url {
        let mut url = Url::parse("https://reviews.example.com/Reviews/Acme-E1_P2.htm").unwrap();
        url.query_pairs_mut()
            .append_pair("sort.ascending", if ascending { "true" } else { "false" });
        url
    }

    #[test]
    fn test_both_bounds_is_an_error() {
        let result = resolve_date_bound(
            Some(day("2019-01-01")),
            Some(day("2020-01-01")),
            true,
            &listing_url(false),
        );
        assert!(matches!(result, Err(ConfigError::ConflictingDateBounds)));
    }

    #[test]
    fn test_bound_without_listing_start_is_an_error() {
        let result =
            resolve_date_bound(Some(day("2019-01-01")), None, false, &listing_url(false));
        assert!(matches!(result, Err(ConfigError::DateBoundWithoutListing)));
    }

    #[test]
    fn test_min_bound_requires_descending() {
        let result = resolve_date_bound(Some(day("2019-01-01")), None, true, &listing_url(true));
        assert!(matches!(result, Err(ConfigError::MinDateRequiresDescending)));

        let bound = resolve_date_bound(Some(day("2019-01-01")), None, true, &listing_url(false))
            .unwrap();
        assert_eq!(bound, Some(DateBound::Min(day("2019-01-01"))));
    }

    #[test]
    fn test_max_bound_requires_ascending() {
        let result = resolve_date_bound(None, Some(day("2020-06-01")), true, &listing_url(false));
        assert!(matches!(result, Err(ConfigError::MaxDateRequiresAscending)));

        let bound =
            resolve_date_bound(None, Some(day("2020-06-01")), true, &listing_url(true)).unwrap();
        assert_eq!(bound, Some(DateBound::Max(day("2020-06-01"))));
    }

    #[test]
    fn test_no_bounds_is_fine_anywhere() {
        let bound = resolve_date_bound(None, None, false, &listing_url(false)).unwrap();
        assert_eq!(bound, None);
    }

    #[test]
    fn test_explicit_flags_win() {
        let credentials = resolve_credentials(
            Some("user@example.com".to_string()),
            Some("hunter2".to_string()),
            None,
        )
        .unwrap();
        assert_eq!(credentials.username, "user@example.com");
    }

    #[test]
    fn test_credentials_file_payload() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"username": "file@example.com", "password": "pw"}"#)
            .unwrap();
        file.flush().unwrap();

        let credentials = resolve_credentials(None, None, Some(file.path())).unwrap();
        assert_eq!(credentials.username, "file@example.com");
        assert_eq!(credentials.password, "pw");
    }

    #[test]
    fn test_malformed_credentials_file_is_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();
        file.flush().unwrap();

        let result = resolve_credentials(None, None, Some(file.path()));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_username_alone_is_not_enough() {
        // Falls through to the secret.json lookup; in a scratch directory
        // that resolves to MissingCredentials.
        let dir = tempfile::tempdir().unwrap();
        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();
        let result = resolve_credentials(Some("user@example.com".to_string()), None, None);
        std::env::set_current_dir(previous).unwrap();
        assert!(matches!(result, Err(ConfigError::MissingCredentials)));
    }
}
