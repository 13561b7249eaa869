/// HTTP implementation of `PageFetcher` on top of a blocking reqwest client.
use super::{FetchError, PageFetcher};
use crate::config::ScraperConfig;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};

/// Fetches documents over HTTP with the configured header set.
///
/// Requests are sent one at a time; there are no retries and nothing is
/// cached between calls.
pub struct HttpPageFetcher {
    client: reqwest::blocking::Client,
}

impl HttpPageFetcher {
    /// Creates a fetcher sending the user agent and language preference
    /// from `config` with every request.
    pub fn new(config: &ScraperConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value(USER_AGENT, &config.user_agent)?);
        headers.insert(ACCEPT_LANGUAGE, header_value(ACCEPT_LANGUAGE, &config.accept_language)?);

        let client = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::RequestFailed {
                url: config.base_url.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self { client })
    }
}

fn header_value(name: HeaderName, value: &str) -> Result<HeaderValue, FetchError> {
    HeaderValue::from_str(value).map_err(|e| FetchError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

impl PageFetcher for HttpPageFetcher {
    fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        tracing::debug!(url, "fetching page");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::RequestFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        // Ensure request was successful
        if !response.status().is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
                reason: response
                    .status()
                    .canonical_reason()
                    .unwrap_or("Unknown")
                    .to_string(),
            });
        }

        response.text().map_err(|e| FetchError::RequestFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_default_config() {
        assert!(HttpPageFetcher::new(&ScraperConfig::default()).is_ok());
    }

    #[test]
    fn test_new_rejects_invalid_header() {
        let config = ScraperConfig {
            user_agent: "line\nbreak".to_string(),
            ..ScraperConfig::default()
        };
        let err = HttpPageFetcher::new(&config).err().unwrap();
        assert!(matches!(err, FetchError::InvalidHeader { ref name, .. } if name == "user-agent"));
        assert!(err.to_string().starts_with("Invalid value for header user-agent"));
    }

    #[test]
    fn test_new_rejects_invalid_language_header() {
        let config = ScraperConfig {
            accept_language: "en\r\nX-Injected: 1".to_string(),
            ..ScraperConfig::default()
        };
        let err = HttpPageFetcher::new(&config).err().unwrap();
        assert!(
            matches!(err, FetchError::InvalidHeader { ref name, .. } if name == "accept-language")
        );
    }
}
