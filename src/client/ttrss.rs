//! Tiny Tiny RSS JSON API client.
//!
//! The API is a single `POST {hostname}/api/` endpoint taking a JSON body
//! with an `op` field. Responses use the envelope
//! `{"seq": n, "status": n, "content": ...}` where a non-zero status
//! signals an error and `content` then carries `{"error": "..."}`.
//! Every operation except `login` must include the session id obtained
//! from `login`.

use super::{HeadlinesRequest, NewsBackend};
use crate::config::ConnectionConfig;
use crate::models::Headline;
use crate::{Error, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;

/// Request timeout for API calls. Generous because a cold backend can be
/// slow to assemble large headline pages.
const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// Response envelope common to all API operations.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: i32,
    content: Value,
}

/// `login` response payload.
#[derive(Debug, Deserialize)]
struct LoginContent {
    session_id: String,
}

/// Authenticated client for one Tiny Tiny RSS instance.
pub struct TtRssClient {
    /// Full API endpoint URL.
    endpoint: String,
    /// Session id from `login`, sent with every subsequent call.
    session_id: String,
    /// Optional HTTP basic-auth pair in front of the API.
    basic_auth: Option<(String, String)>,
    /// HTTP client.
    client: reqwest::blocking::Client,
}

impl TtRssClient {
    /// Connects and logs in with the configured account.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is unreachable or the login is
    /// rejected.
    pub fn connect(config: &ConnectionConfig) -> Result<Self> {
        let endpoint = format!("{}/api/", config.hostname.trim_end_matches('/'));
        let client = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()?;

        let body = json!({
            "op": "login",
            "user": config.username,
            "password": config.password,
        });
        let content = post_api(&client, &endpoint, config.http_auth.as_ref(), "login", &body)?;
        let login: LoginContent = decode("login", content)?;

        tracing::debug!(endpoint = %endpoint, "logged in to backend");

        Ok(Self {
            endpoint,
            session_id: login.session_id,
            basic_auth: config.http_auth.clone(),
            client,
        })
    }

    /// Issues one API call with the session id attached.
    fn call(&self, op: &str, mut body: Value) -> Result<Value> {
        if let Some(map) = body.as_object_mut() {
            map.insert("op".to_string(), Value::String(op.to_string()));
            map.insert("sid".to_string(), Value::String(self.session_id.clone()));
        }
        post_api(&self.client, &self.endpoint, self.basic_auth.as_ref(), op, &body)
    }

    /// Sets an article field via `updateArticle`.
    fn update_article(&self, article_id: u64, field: u8, mode: u8) -> Result<()> {
        self.call(
            "updateArticle",
            json!({
                "article_ids": article_id.to_string(),
                "field": field,
                "mode": mode,
            }),
        )?;
        Ok(())
    }
}

impl NewsBackend for TtRssClient {
    fn headlines(&self, request: &HeadlinesRequest) -> Result<Vec<Headline>> {
        let content = self.call(
            "getHeadlines",
            json!({
                "feed_id": request.feed_id,
                "view_mode": request.view_mode.as_str(),
                "since_id": request.since_id,
                "limit": request.limit,
                "skip": request.skip,
                "show_excerpt": false,
            }),
        )?;
        decode("getHeadlines", content)
    }

    fn mark_read(&self, article_id: u64) -> Result<()> {
        // field 2 = unread flag, mode 0 = clear
        self.update_article(article_id, 2, 0)
    }

    fn clear_star(&self, article_id: u64) -> Result<()> {
        // field 0 = starred flag, mode 0 = clear
        self.update_article(article_id, 0, 0)
    }
}

/// Posts one API request and unwraps the response envelope.
fn post_api(
    client: &reqwest::blocking::Client,
    endpoint: &str,
    basic_auth: Option<&(String, String)>,
    op: &str,
    body: &Value,
) -> Result<Value> {
    let mut request = client.post(endpoint).json(body);
    if let Some((user, pass)) = basic_auth {
        request = request.basic_auth(user, Some(pass));
    }
    let response: ApiResponse = request.send()?.error_for_status()?.json()?;
    check_envelope(op, response)
}

/// Rejects envelopes with a non-zero status, extracting the backend's
/// error string when present.
fn check_envelope(op: &str, response: ApiResponse) -> Result<Value> {
    if response.status == 0 {
        return Ok(response.content);
    }
    let cause = response
        .content
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("unspecified backend error")
        .to_string();
    Err(Error::Api {
        operation: op.to_string(),
        cause,
    })
}

/// Decodes an envelope `content` payload into the expected shape.
fn decode<T: DeserializeOwned>(op: &str, content: Value) -> Result<T> {
    serde_json::from_value(content).map_err(|e| Error::Api {
        operation: op.to_string(),
        cause: format!("unexpected response shape: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_envelope_yields_content() {
        let response: ApiResponse =
            serde_json::from_str(r#"{"seq": 0, "status": 0, "content": [{"id": 1}]}"#)
                .expect("valid envelope");
        let content = check_envelope("getHeadlines", response).expect("status ok");
        assert!(content.is_array());
    }

    #[test]
    fn error_envelope_maps_to_api_error() {
        let response: ApiResponse = serde_json::from_str(
            r#"{"seq": 0, "status": 1, "content": {"error": "NOT_LOGGED_IN"}}"#,
        )
        .expect("valid envelope");
        let err = check_envelope("getHeadlines", response).unwrap_err();
        assert!(matches!(err, Error::Api { .. }));
        assert!(format!("{err}").contains("NOT_LOGGED_IN"));
    }

    #[test]
    fn headline_page_decodes() {
        let content: Value = serde_json::from_str(
            r#"[
                {"id": 5, "title": "a", "unread": true, "feed_id": 1, "feed_title": "F"},
                {"id": 6, "title": "b", "unread": false, "feed_id": "2", "feed_title": "G"}
            ]"#,
        )
        .expect("valid json");
        let page: Vec<Headline> = decode("getHeadlines", content).expect("decodes");
        assert_eq!(page.len(), 2);
        assert_eq!(page[1].feed_id, "2");
    }

    #[test]
    fn malformed_page_is_api_error() {
        let content: Value = serde_json::from_str(r#"{"unexpected": true}"#).expect("valid json");
        let err = decode::<Vec<Headline>>("getHeadlines", content).unwrap_err();
        assert!(matches!(err, Error::Api { .. }));
    }
}
