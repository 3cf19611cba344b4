use super::extract::extract;
use super::rules::LookupRules;
use super::{normalize_word, Dictionary, FetchError, LookupError, LookupResult};
use crate::config::LookupConfig;
use crate::error::{Result, WordchainError};
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{redirect, Client};
use std::time::Duration;

pub const DEFAULT_URL_TEMPLATE: &str = "https://www.dictionary.com/browse/{word}";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_MAX_REDIRECTS: usize = 5;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Scrapes one dictionary page per lookup.
pub struct DictionaryClient {
    http: Client,
    url_template: String,
    timeout: Duration,
    rules: LookupRules,
}

impl DictionaryClient {
    pub fn new(
        url_template: impl Into<String>,
        rules: LookupRules,
        timeout: Duration,
        max_redirects: usize,
        user_agent: &str,
    ) -> Result<Self> {
        let url_template = url_template.into();
        if !url_template.contains("{word}") {
            return Err(WordchainError::Config(format!(
                "lookup url template must contain {{word}}: {}",
                url_template
            )));
        }

        let http = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::limited(max_redirects))
            .user_agent(user_agent)
            .default_headers(browser_headers())
            .build()
            .map_err(|e| WordchainError::Config(format!("failed to build http client: {}", e)))?;

        Ok(Self {
            http,
            url_template,
            timeout,
            rules,
        })
    }

    pub fn from_config(config: &LookupConfig) -> Result<Self> {
        let rules = match &config.rules_file {
            Some(path) => LookupRules::from_json_file(path)?,
            None => LookupRules::dictionary_com(),
        };
        Self::new(
            config.url_template.clone(),
            rules,
            Duration::from_secs(config.timeout_secs),
            config.max_redirects,
            &config.user_agent,
        )
    }

    pub fn url_for(&self, word: &str) -> String {
        self.url_template
            .replace("{word}", &urlencoding::encode(word))
    }

    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        response.text().await.map_err(|e| self.classify(e))
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else if err.is_builder() {
            FetchError::InvalidUrl(err.to_string())
        } else {
            FetchError::Network(err)
        }
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.5"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers
}

#[async_trait]
impl Dictionary for DictionaryClient {
    async fn lookup(&self, word: &str) -> std::result::Result<LookupResult, LookupError> {
        let word = normalize_word(word)?;
        let url = self.url_for(word);
        tracing::info!(word, url = %url, "looking up word");

        let html = self.fetch(&url).await.map_err(|e| {
            tracing::warn!(word, error = %e, "dictionary lookup failed");
            LookupError::LookupFailed(e)
        })?;

        let result = extract(&html, &self.rules);
        tracing::debug!(
            word,
            missing = ?result.missing_fields(),
            "extracted dictionary fields"
        );
        Ok(result)
    }

    fn source(&self) -> &str {
        &self.rules.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> DictionaryClient {
        DictionaryClient::new(
            DEFAULT_URL_TEMPLATE,
            LookupRules::dictionary_com(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            DEFAULT_MAX_REDIRECTS,
            DEFAULT_USER_AGENT,
        )
        .unwrap()
    }

    #[test]
    fn url_encodes_the_word() {
        let client = client();
        assert_eq!(
            client.url_for("ice cream"),
            "https://www.dictionary.com/browse/ice%20cream"
        );
        assert_eq!(
            client.url_for("café"),
            "https://www.dictionary.com/browse/caf%C3%A9"
        );
        assert_eq!(
            client.url_for("a/b?c"),
            "https://www.dictionary.com/browse/a%2Fb%3Fc"
        );
    }

    #[test]
    fn template_without_placeholder_is_rejected() {
        let result = DictionaryClient::new(
            "https://example.com/",
            LookupRules::default(),
            Duration::from_secs(1),
            0,
            DEFAULT_USER_AGENT,
        );
        assert!(matches!(result, Err(WordchainError::Config(_))));
    }

    #[tokio::test]
    async fn blank_word_fails_before_any_request() {
        let result = client().lookup("   ").await;
        assert!(matches!(result, Err(LookupError::MissingWord)));
    }

    #[test]
    fn source_comes_from_rules() {
        assert_eq!(client().source(), "Dictionary.com");
    }
}
