//! Remote expense backend over a PostgREST endpoint (Supabase REST dialect)
//!
//! Ordering, id assignment and creation timestamps all happen server-side.
//! Errors from the store are passed through with the store's own message.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::config::RemoteSettings;
use crate::domain::result::{Error, Result};
use crate::domain::{Expense, NewExpense};
use crate::ports::ExpenseStore;

/// Accept header that makes PostgREST return one object instead of an array
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Error body returned by PostgREST
#[derive(Debug, Deserialize)]
struct PostgrestError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

pub struct RemoteExpenseStore {
    client: Client,
    table_url: String,
    api_key: String,
    schema: String,
}

impl RemoteExpenseStore {
    pub fn new(settings: &RemoteSettings) -> Result<Self> {
        let base = Url::parse(settings.url.trim())
            .map_err(|e| Error::config(format!("Invalid remote URL '{}': {}", settings.url, e)))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "Remote URL must use http or https, got '{}'",
                base.scheme()
            )));
        }
        if settings.anon_key.trim().is_empty() {
            return Err(Error::config("Remote access key is empty"));
        }

        let table_url = format!(
            "{}/rest/v1/{}",
            base.as_str().trim_end_matches('/'),
            settings.table
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::remote(e.to_string()))?;

        Ok(Self {
            client,
            table_url,
            api_key: settings.anon_key.trim().to_string(),
            schema: settings.schema.clone(),
        })
    }

    fn auth_headers(&self, method: &Method) -> Result<HeaderMap> {
        let invalid = |e: reqwest::header::InvalidHeaderValue| Error::config(e.to_string());

        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(&self.api_key).map_err(invalid)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key)).map_err(invalid)?,
        );

        // Reads select the schema with Accept-Profile, writes with Content-Profile
        let profile_header = if *method == Method::GET || *method == Method::HEAD {
            "Accept-Profile"
        } else {
            "Content-Profile"
        };
        headers.insert(profile_header, HeaderValue::from_str(&self.schema).map_err(invalid)?);
        Ok(headers)
    }

    fn request(&self, method: Method) -> Result<RequestBuilder> {
        let headers = self.auth_headers(&method)?;
        Ok(self.client.request(method, &self.table_url).headers(headers))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::remote(e.to_string()))?;
        check_status(response).await
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<PostgrestError>(&body) {
        Ok(PostgrestError {
            message: Some(message),
            details,
            hint,
        }) => {
            let mut message = message;
            if let Some(details) = details.filter(|d| !d.is_empty()) {
                message.push_str(&format!(" ({})", details));
            }
            if let Some(hint) = hint.filter(|h| !h.is_empty()) {
                message.push_str(&format!(" Hint: {}", hint));
            }
            message
        }
        _ if !body.trim().is_empty() => format!("HTTP {}: {}", status.as_u16(), body.trim()),
        _ => format!("HTTP {}", status.as_u16()),
    };

    Err(Error::remote(message))
}

#[async_trait]
impl ExpenseStore for RemoteExpenseStore {
    fn name(&self) -> &str {
        "remote"
    }

    async fn list(&self) -> Result<Vec<Expense>> {
        let request = self
            .request(Method::GET)?
            .query(&[("select", "*"), ("order", "date.desc")]);
        let response = self.send(request).await?;

        let expenses: Vec<Expense> = response
            .json()
            .await
            .map_err(|e| Error::remote(format!("Failed to parse expenses: {}", e)))?;
        debug!(count = expenses.len(), "Fetched remote expenses");
        Ok(expenses)
    }

    async fn add(&self, expense: NewExpense) -> Result<Expense> {
        let request = self
            .request(Method::POST)?
            .header("Prefer", "return=representation")
            .header(ACCEPT, SINGLE_OBJECT)
            .json(&[expense]);
        let response = self.send(request).await?;

        let created: Expense = response
            .json()
            .await
            .map_err(|e| Error::remote(format!("Failed to parse inserted expense: {}", e)))?;
        debug!(id = ?created.id, "Inserted remote expense");
        Ok(created)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let filter = format!("eq.{}", id);
        let request = self
            .request(Method::DELETE)?
            .query(&[("id", filter.as_str())]);
        self.send(request).await?;
        debug!(id, "Deleted remote expense");
        Ok(())
    }
}
