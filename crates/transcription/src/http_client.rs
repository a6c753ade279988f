use std::time::Duration;

use reqwest::Client;

/// HTTP client shared by every upstream call
///
/// `timeout` bounds a whole request, including the upload.
pub(crate) fn http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .pool_idle_timeout(Some(Duration::from_secs(5)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .build()
}
