// src/checker/http.rs
// =============================================================================
// This module checks if external URLs are alive by making HTTP requests.
//
// Key functionality:
// - Makes one HTTP HEAD request per link (lightweight, no body download)
// - Bounded per-request timeout (5 seconds by default)
// - Detects the various failure modes (404, timeout, DNS, SSL errors, etc.)
// - No retries: a single failed attempt is reported as a failure
//
// Rust concepts:
// - async/await: For network I/O
// - Enums: To represent the different request outcomes
// - Error chains: std::error::Error::source() to find the root cause
// =============================================================================

use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;
use url::Url;

use crate::error::Result;

// The result category of one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlOutcome {
    /// 2xx response
    Ok,
    /// 3xx response the redirect policy did not follow
    Redirect { location: String },
    /// Any other status (404, 410, 500, ...)
    HttpError,
    /// Request timed out
    Timeout,
    /// Could not resolve hostname
    DnsError,
    /// SSL/TLS certificate error
    SslError,
    /// Too many redirects (redirect loop)
    TooManyRedirects,
    /// Connection refused, reset, unreachable
    ConnectError,
    /// Target is not a parseable URL; no request was made
    InvalidUrl,
    /// Other error
    Error,
}

// Everything we learned from requesting one URL
#[derive(Debug, Clone)]
pub struct UrlCheck {
    /// The URL that was checked
    pub url: String,
    pub outcome: UrlOutcome,
    /// HTTP status, when the server answered at all
    pub status_code: Option<u16>,
    /// Human-readable detail: "HTTP 404", or the transport error
    pub message: String,
}

impl UrlCheck {
    /// Returns true for Ok and unfollowed Redirect outcomes
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, UrlOutcome::Ok | UrlOutcome::Redirect { .. })
    }
}

/// Issues HEAD requests against external links.
#[derive(Debug, Clone)]
pub struct UrlChecker {
    client: Client,
}

impl UrlChecker {
    // Builds a checker with its own client
    //
    // The client is reused for every request in the run, so connections to the
    // same host are kept alive between links.
    pub fn new(timeout: Duration, max_redirects: usize) -> Result<Self> {
        Self::from_builder(Self::client_builder(timeout, max_redirects))
    }

    // Client settings every UrlChecker shares: per-request timeout, redirect
    // limit and our user agent. Tests add .no_proxy() on top.
    pub fn client_builder(timeout: Duration, max_redirects: usize) -> ClientBuilder {
        Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(max_redirects))
            .user_agent(concat!("docs-linkcheck/", env!("CARGO_PKG_VERSION")))
    }

    pub fn from_builder(builder: ClientBuilder) -> Result<Self> {
        Ok(Self {
            client: builder.build()?,
        })
    }

    // Checks a single external URL
    //
    // Never fails: every problem becomes a UrlCheck that is !is_ok().
    pub async fn check(&self, url: &str) -> UrlCheck {
        // Catch junk like "http://" or "https://exa mple.com" before spending
        // a request (and a timeout) on it.
        if let Err(e) = Url::parse(url) {
            return UrlCheck {
                url: url.to_string(),
                outcome: UrlOutcome::InvalidUrl,
                status_code: None,
                message: format!("Invalid URL: {}", e),
            };
        }

        tracing::debug!(url, "sending HEAD request");

        let result = match self.client.head(url).send().await {
            Ok(response) => analyze_response(url, &response),
            Err(e) => categorize_error(url, &e),
        };

        tracing::debug!(
            url,
            outcome = ?result.outcome,
            status = ?result.status_code,
            message = %result.message,
            "url checked"
        );
        result
    }
}

// Turns an HTTP response into a UrlCheck
//
// HTTP status codes:
// - 200-299: Success
// - 300-399: Redirect (only seen when the redirect policy stops following)
// - 400-599: Client and server errors, all reported as broken
fn analyze_response(url: &str, response: &reqwest::Response) -> UrlCheck {
    let status_code = response.status();

    let outcome = if status_code.is_success() {
        UrlOutcome::Ok
    } else if status_code.is_redirection() {
        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();
        UrlOutcome::Redirect { location }
    } else {
        UrlOutcome::HttpError
    };

    let message = match &outcome {
        UrlOutcome::Redirect { location } => {
            format!("HTTP {} -> {}", status_code.as_u16(), location)
        }
        _ => format_status(status_code),
    };

    UrlCheck {
        url: url.to_string(),
        outcome,
        status_code: Some(status_code.as_u16()),
        message,
    }
}

fn format_status(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("HTTP {} {}", status.as_u16(), reason),
        None => format!("HTTP {}", status.as_u16()),
    }
}

// Categorizes the different error types from reqwest
//
// The top-level reqwest error is generic ("error sending request for url"),
// the interesting part (DNS failure, refused connection) sits further down
// the source chain, so we flatten the whole chain into the message.
fn categorize_error(url: &str, error: &reqwest::Error) -> UrlCheck {
    let detail = error_chain(error);
    let lowered = detail.to_lowercase();

    let (outcome, summary) = if error.is_timeout() {
        (UrlOutcome::Timeout, "Request timed out")
    } else if error.is_redirect() {
        (UrlOutcome::TooManyRedirects, "Too many redirects")
    } else if lowered.contains("dns") || lowered.contains("lookup address") {
        (UrlOutcome::DnsError, "Could not resolve hostname")
    } else if ["certificate", "ssl", "tls"]
        .iter()
        .any(|needle| lowered.contains(needle))
    {
        (UrlOutcome::SslError, "SSL certificate error")
    } else if error.is_connect() {
        (UrlOutcome::ConnectError, "Connection failed")
    } else {
        (UrlOutcome::Error, "Request failed")
    };

    UrlCheck {
        url: url.to_string(),
        outcome,
        status_code: error.status().map(|s| s.as_u16()),
        message: format!("{}: {}", summary, detail),
    }
}

// "outer: middle: root cause", skipping links that repeat their child's text
fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !parts.iter().any(|p| p.contains(&text)) {
            parts.push(text);
        }
        source = cause.source();
    }
    parts.join(": ")
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why HEAD instead of GET?
//    - HEAD asks for the headers only, so no page body is downloaded
//    - That's all we need to know whether the page exists
//
// 2. Why does check() return UrlCheck and not Result<...>?
//    - A dead link is an expected answer, not a program error
//    - The report wants to show it next to the working links
//
// 3. What is `dyn std::error::Error + 'static`?
//    - A trait object: "some error type, we don't care which"
//    - source() walks from a wrapper error to the error that caused it
// -----------------------------------------------------------------------------
