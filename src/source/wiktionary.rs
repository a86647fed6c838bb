// src/source/wiktionary.rs
//! MediaWiki `action=parse` client for en.wiktionary.org.
use super::{DictionarySource, Lookup, Section};
use crate::config::EngineConfig;
use crate::error::{ConfigError, SourceError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct ApiResponse {
    parse: Option<ParsePayload>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ParsePayload {
    sections: Option<Vec<Section>>,
    text: Option<TextPayload>,
}

#[derive(Debug, Deserialize)]
struct TextPayload {
    #[serde(rename = "*")]
    html: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    #[serde(default)]
    info: String,
}

pub struct WiktionaryClient {
    http: Client,
    api_base: String,
    min_interval: Duration,
    next_slot: Mutex<Instant>,
}

impl WiktionaryClient {
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base.clone(),
            min_interval: config.min_request_interval,
            next_slot: Mutex::new(Instant::now()),
        })
    }

    /// Spaces requests at least `min_interval` apart, even when issued concurrently.
    async fn rate_limit(&self) {
        if self.min_interval.is_zero() {
            return;
        }
        let wait = {
            let mut next = self.next_slot.lock().unwrap_or_else(PoisonError::into_inner);
            let now = Instant::now();
            let slot = (*next).max(now);
            *next = slot + self.min_interval;
            slot - now
        };
        if !wait.is_zero() {
            sleep(wait).await;
        }
    }

    async fn parse(
        &self,
        title: &str,
        extra: &[(&str, &str)],
    ) -> Result<Lookup<ParsePayload>, SourceError> {
        self.rate_limit().await;

        let page = title.to_lowercase();
        let mut query: Vec<(&str, &str)> = vec![
            ("action", "parse"),
            ("page", page.as_str()),
            ("format", "json"),
            ("origin", "*"),
        ];
        query.extend_from_slice(extra);

        let response = self.http.get(&self.api_base).query(&query).send().await?;

        let status = response.status();
        if status.is_client_error() {
            debug!(%title, %status, "page rejected by dictionary");
            return Ok(Lookup::Missing);
        }
        if !status.is_success() {
            return Err(SourceError::Server { status: status.as_u16() });
        }

        let body = response.text().await?;
        let payload: ApiResponse = serde_json::from_str(&body)?;
        interpret(payload)
    }
}

fn interpret(payload: ApiResponse) -> Result<Lookup<ParsePayload>, SourceError> {
    if let Some(error) = payload.error {
        return match error.code.as_str() {
            "missingtitle" | "invalidtitle" => Ok(Lookup::Missing),
            _ => Err(SourceError::Api { code: error.code, info: error.info }),
        };
    }
    Ok(payload.parse.map_or(Lookup::Missing, Lookup::Found))
}

#[async_trait]
impl DictionarySource for WiktionaryClient {
    async fn sections(&self, title: &str) -> Result<Lookup<Vec<Section>>, SourceError> {
        let lookup = self.parse(title, &[("prop", "sections")]).await?;
        Ok(match lookup {
            Lookup::Found(ParsePayload { sections: Some(sections), .. }) => Lookup::Found(sections),
            _ => Lookup::Missing,
        })
    }

    async fn page_html(&self, title: &str) -> Result<Lookup<String>, SourceError> {
        let lookup = self.parse(title, &[("prop", "text")]).await?;
        Ok(text_of(lookup))
    }

    async fn section_html(&self, title: &str, index: &str) -> Result<Lookup<String>, SourceError> {
        let lookup = self
            .parse(title, &[("prop", "text"), ("section", index)])
            .await?;
        Ok(text_of(lookup))
    }
}

fn text_of(lookup: Lookup<ParsePayload>) -> Lookup<String> {
    match lookup {
        Lookup::Found(ParsePayload { text: Some(text), .. }) => Lookup::Found(text.html),
        _ => Lookup::Missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Result<Lookup<ParsePayload>, SourceError> {
        interpret(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn sections_payload_decodes() {
        let json = r#"{"parse":{"title":"cat","pageid":1,"sections":[
            {"toclevel":1,"level":"2","line":"English","number":"1","index":"1"},
            {"toclevel":2,"level":"3","line":"Etymology 1","number":"1.1","index":"2"}]}}"#;
        let payload = decode(json).unwrap().found().unwrap();
        let sections = payload.sections.unwrap();
        assert_eq!(sections.len(), 2);
        assert!(sections[1].is_etymology());
        assert_eq!(sections[1].index, "2");
    }

    #[test]
    fn text_payload_decodes() {
        let json = r#"{"parse":{"title":"cat","text":{"*":"<p>From Old English</p>"}}}"#;
        assert_eq!(
            text_of(decode(json).unwrap()),
            Lookup::Found("<p>From Old English</p>".to_string())
        );
    }

    #[test]
    fn missing_and_invalid_titles_are_not_errors() {
        let missing = r#"{"error":{"code":"missingtitle","info":"The page you specified doesn't exist."}}"#;
        let invalid = r#"{"error":{"code":"invalidtitle","info":"Bad title"}}"#;
        assert_eq!(text_of(decode(missing).unwrap()), Lookup::Missing);
        assert_eq!(text_of(decode(invalid).unwrap()), Lookup::Missing);
    }

    #[test]
    fn other_api_errors_are_transient() {
        let json = r#"{"error":{"code":"ratelimited","info":"slow down"}}"#;
        assert!(matches!(decode(json), Err(SourceError::Api { code, .. }) if code == "ratelimited"));
    }

    #[test]
    fn empty_parse_is_missing() {
        assert_eq!(text_of(decode("{}").unwrap()), Lookup::Missing);
    }

    #[tokio::test]
    async fn rate_limit_spaces_consecutive_requests() {
        let config = EngineConfig {
            min_request_interval: Duration::from_millis(20),
            ..EngineConfig::default()
        };
        let client = WiktionaryClient::new(&config).unwrap();
        let start = Instant::now();
        client.rate_limit().await;
        client.rate_limit().await;
        client.rate_limit().await;
        assert!(start.elapsed() >= Duration::from_millis(40));
    }
}
