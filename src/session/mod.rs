//! Browsing session management
//!
//! Builds the cookie-backed HTTP client, performs credential sign-in, and
//! fetches pages as parsed documents. Fetching is the only suspending
//! operation in the system; its readiness wait is bounded by the client's
//! request and connect timeouts.

use crate::config::Credentials;
use crate::{GleanError, Result};
use reqwest::Client;
use scraper::Html;
use std::time::Duration;
use url::Url;

/// Sign-in form endpoint, relative to the source's origin
const LOGIN_PATH: &str = "/profile/login_input.htm";

/// A fetched, parsed page
///
/// `url` is the final URL after redirects; pagination and relative links
/// resolve against it.
pub struct FetchedPage {
    pub url: Url,
    pub doc: Html,
}

/// Builds the HTTP client for a harvest run
///
/// The cookie store carries the signed-in session across requests.
pub fn build_client() -> Result<Client> {
    let client = Client::builder()
        .user_agent(concat!("gleaner/", env!("CARGO_PKG_VERSION")))
        .cookie_store(true)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()?;
    Ok(client)
}

/// Signs in against the source's login endpoint
///
/// Posts the credential form and relies on the cookie store to retain the
/// session. A non-success response is fatal: nothing can be harvested
/// without a session.
pub async fn sign_in(client: &Client, origin: &Url, credentials: &Credentials) -> Result<()> {
    let login_url = origin.join(LOGIN_PATH)?;
    tracing::info!("Signing in as {}", credentials.username);

    let response = client
        .post(login_url)
        .form(&[
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ])
        .send()
        .await
        .map_err(|e| GleanError::SignIn {
            username: credentials.username.clone(),
            message: e.to_string(),
        })?;

    if !response.status().is_success() {
        return Err(GleanError::SignIn {
            username: credentials.username.clone(),
            message: format!("HTTP {}", response.status()),
        });
    }
    Ok(())
}

/// Fetches a URL and parses the body as a document
///
/// Any failure here is a navigation failure: fatal to the caller's run,
/// never retried at this layer.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| navigation_error(url, &e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(navigation_error(url, &format!("HTTP {}", status)));
    }

    let final_url = response.url().clone();
    let body = response
        .text()
        .await
        .map_err(|e| navigation_error(url, &e.to_string()))?;

    Ok(FetchedPage {
        url: final_url,
        doc: Html::parse_document(&body),
    })
}

fn navigation_error(url: &Url, message: &str) -> GleanError {
    GleanError::Navigation {
        url: url.to_string(),
        message: message.to_string(),
    }
}
