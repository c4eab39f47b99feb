use reqwest::{Client, ClientBuilder};
use std::time::Duration;

use crate::error::Result;

/// Create an HTTP client with the given timeout and user agent.
///
/// The timeout bounds the whole request; an expired request surfaces as a
/// transport error.
pub fn create_custom_client(timeout_secs: u64, user_agent: &str) -> Result<Client> {
    let client = ClientBuilder::new()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(timeout_secs))
        .tcp_keepalive(Duration::from_secs(60))
        .tcp_nodelay(true)
        .use_rustls_tls()
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_client_creation() {
        let client = create_custom_client(10, "test-agent/1.0");
        assert!(client.is_ok());
    }
}
