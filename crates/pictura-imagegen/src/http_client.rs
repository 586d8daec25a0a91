use std::time::Duration;

use reqwest::Client;

/// Build the HTTP client used for inference requests
///
/// `timeout` bounds the whole request. It is `None` by default because
/// `wait_for_model` can hold a request open while the model loads.
pub fn http_client(timeout: Option<Duration>) -> reqwest::Result<Client> {
    let mut headers = http::HeaderMap::new();
    headers.insert(http::header::CONNECTION, http::HeaderValue::from_static("keep-alive"));

    let mut builder = Client::builder()
        .connect_timeout(Duration::from_secs(30))
        .pool_idle_timeout(Some(Duration::from_secs(5)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .default_headers(headers);

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build()
}
