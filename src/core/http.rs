use std::time::Duration;

use reqwest::Client;

/// Agent string sent with every registry call. Modrinth's usage policy
/// requires callers to identify themselves.
const APP_USER_AGENT: &str = "modsort/0.1.0";

/// Build the shared HTTP client used for all registry lookups.
///
/// The timeout applies per request; a stalled registry call fails on
/// its own without holding up the rest of the run.
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(APP_USER_AGENT)
        .timeout(timeout)
        .build()
}
