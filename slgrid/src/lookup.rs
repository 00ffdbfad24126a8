use crate::config::Config;
use crate::error::{GridError, Result};
use crate::types::AreaOrigin;
use regex::Regex;
use reqwest::Client;
use std::future::Future;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

static X_THEN_Y: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\s*['"]x['"]\s*:\s*(-?\d+)\s*,\s*['"]y['"]\s*:\s*(-?\d+)\s*\}"#)
        .expect("Invalid coords regex")
});

static Y_THEN_X: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\s*['"]y['"]\s*:\s*(-?\d+)\s*,\s*['"]x['"]\s*:\s*(-?\d+)\s*\}"#)
        .expect("Invalid coords regex")
});

/// Resolves a decoded region name to its grid origin.
pub trait AreaLookup {
    fn lookup(&self, area_name: &str) -> impl Future<Output = Result<AreaOrigin>>;
}

impl<T: AreaLookup + ?Sized> AreaLookup for &T {
    fn lookup(&self, area_name: &str) -> impl Future<Output = Result<AreaOrigin>> {
        (**self).lookup(area_name)
    }
}

/// Client for the region-coordinate CAP endpoint.
pub struct CapClient {
    client: Client,
    cap_url: String,
    timeout: Duration,
}

impl CapClient {
    pub fn new(cap_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GridError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            cap_url,
            timeout,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.cap_url.clone(), config.lookup_timeout)
    }

    pub fn cap_url(&self) -> &str {
        &self.cap_url
    }

    async fn fetch_body(&self, area_name: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.cap_url)
            .query(&[("var", "coords"), ("sim_name", area_name)])
            .send()
            .await
            .map_err(|e| self.request_error(area_name, &e))?;

        if !response.status().is_success() {
            return Err(GridError::resolution(
                area_name,
                format!("HTTP {} from {}", response.status(), self.cap_url),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.request_error(area_name, &e))?;
        debug!("CAP response for '{}': {}", area_name, body);

        Ok(body)
    }

    fn request_error(&self, area_name: &str, e: &reqwest::Error) -> GridError {
        if e.is_timeout() {
            GridError::resolution(
                area_name,
                format!("request timed out after {}s", self.timeout.as_secs_f64()),
            )
        } else {
            GridError::resolution(area_name, format!("request failed: {e}"))
        }
    }
}

impl AreaLookup for CapClient {
    async fn lookup(&self, area_name: &str) -> Result<AreaOrigin> {
        let body = self.fetch_body(area_name).await?;
        parse_coords(&body).ok_or_else(|| {
            GridError::resolution(area_name, "unexpected CAP response, no coordinates found")
        })
    }
}

/// Pulls `{'x': <int>, 'y': <int>}` out of a response body. Either quote style
/// and either key order are accepted.
pub fn parse_coords(body: &str) -> Option<AreaOrigin> {
    if let Some(caps) = X_THEN_Y.captures(body) {
        return Some(AreaOrigin::new(caps[1].parse().ok()?, caps[2].parse().ok()?));
    }

    Y_THEN_X
        .captures(body)
        .and_then(|caps| Some(AreaOrigin::new(caps[2].parse().ok()?, caps[1].parse().ok()?)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coords_cap_response() {
        let body = "var coords = {'x' : 1018, 'y' : 912 };";
        assert_eq!(parse_coords(body), Some(AreaOrigin::new(1018, 912)));
    }

    #[test]
    fn test_parse_coords_compact_and_multiline() {
        assert_eq!(parse_coords("{'x':1,'y':2}"), Some(AreaOrigin::new(1, 2)));
        assert_eq!(
            parse_coords("prefix {\n  'x' :\t 997,\n  'y' : 1003\n} suffix"),
            Some(AreaOrigin::new(997, 1003))
        );
    }

    #[test]
    fn test_parse_coords_double_quotes() {
        let body = r#"var coords = {"x": 1000, "y": 1001};"#;
        assert_eq!(parse_coords(body), Some(AreaOrigin::new(1000, 1001)));
    }

    #[test]
    fn test_parse_coords_reversed_order() {
        let body = "var coords = {'y' : 912, 'x' : 1018};";
        assert_eq!(parse_coords(body), Some(AreaOrigin::new(1018, 912)));
    }

    #[test]
    fn test_parse_coords_missing_pattern() {
        for body in [
            "",
            "var coords = null;",
            "var coords = {'error' : true};",
            "{'x' : 1018}",
            "{'x' : abc, 'y' : 2}",
            "{'x' : 1.5, 'y' : 2}",
        ] {
            assert_eq!(parse_coords(body), None, "accepted {body:?}");
        }
    }

    #[test]
    fn test_cap_client_new_success() {
        let client = CapClient::new("https://example.com/cap".to_string(), Duration::from_secs(1));
        assert!(client.is_ok());
        assert_eq!(client.unwrap().cap_url(), "https://example.com/cap");
    }

    #[test]
    fn test_cap_client_from_config() {
        let config = Config::default();
        let client = CapClient::from_config(&config).unwrap();
        assert_eq!(client.cap_url(), crate::config::DEFAULT_CAP_URL);
    }
}
