use reqwest::ClientBuilder;
use std::time::Duration;

/// Build a `reqwest::ClientBuilder` for RPC traffic.
///
/// Certificate verification is enabled by default. To opt out (for example,
/// against a local node with a self-signed certificate), set
/// `NEARSWAP_ACCEPT_INVALID_CERTS` to a truthy value (`1`, `true`, `yes`).
pub fn builder() -> ClientBuilder {
    let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(10));
    if accept_invalid_certs(std::env::var("NEARSWAP_ACCEPT_INVALID_CERTS").ok().as_deref()) {
        builder = builder.danger_accept_invalid_certs(true);
    }
    builder
}

fn accept_invalid_certs(value: Option<&str>) -> bool {
    matches!(value, Some("1" | "true" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::accept_invalid_certs;

    #[test]
    fn only_truthy_values_disable_verification() {
        assert!(accept_invalid_certs(Some("yes")));
        assert!(accept_invalid_certs(Some("1")));
        assert!(!accept_invalid_certs(Some("0")));
        assert!(!accept_invalid_certs(None));
    }
}
