//! HTTP client for the warehouse REST API

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::response::ApiResponse;

use crate::{ClientConfig, ClientError, ClientResult, SessionCredential};

/// HTTP client bound to one base URL and session
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: ClientConfig,
    credential: Option<SessionCredential>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    ///
    /// A token in the configuration becomes a non-expiring credential.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout_duration()).build()?;
        Ok(Self {
            client,
            config: config.clone(),
            credential: config.token.as_ref().map(|t| SessionCredential::new(t.clone(), None)),
        })
    }

    /// Replace the session credential
    pub fn with_credential(mut self, credential: SessionCredential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn credential(&self) -> Option<&SessionCredential> {
        self.credential.as_ref()
    }

    /// Drop the session credential
    pub fn clear_credential(&mut self) {
        self.credential = None;
    }

    /// Attach the bearer token, rejecting an expired credential before
    /// anything is sent
    fn authorize(&self, request: RequestBuilder) -> ClientResult<RequestBuilder> {
        match &self.credential {
            Some(credential) if credential.is_expired() => Err(ClientError::CredentialExpired),
            Some(credential) => Ok(request.header(reqwest::header::AUTHORIZATION, credential.bearer())),
            None => Ok(request),
        }
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorize(self.client.get(self.config.url(path)))?;
        tracing::debug!(path, "GET");
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a GET request with query parameters
    pub async fn get_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let request = self.authorize(self.client.get(self.config.url(path)).query(query))?;
        tracing::debug!(path, "GET");
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        let request = self.authorize(self.client.post(self.config.url(path)).json(body))?;
        tracing::debug!(path, "POST");
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request without body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorize(self.client.post(self.config.url(path)))?;
        tracing::debug!(path, "POST");
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        let request = self.authorize(self.client.put(self.config.url(path)).json(body))?;
        tracing::debug!(path, "PUT");
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response, unwrapping the `ApiResponse` envelope
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = %status, "Request failed");
            return Err(status_error(status, text));
        }

        let envelope: ApiResponse<T> = serde_json::from_str(&text)?;
        envelope
            .into_result()
            .map_err(ClientError::Api)?
            .ok_or_else(|| ClientError::InvalidResponse("Missing response data".to_string()))
    }
}

/// Error for a non-2xx response
///
/// A body carrying an error envelope wins over the bare status.
fn status_error(status: StatusCode, text: String) -> ClientError {
    if let Ok(envelope) = serde_json::from_str::<ApiResponse<serde_json::Value>>(&text)
        && let Err(err) = envelope.into_result()
    {
        return ClientError::Api(err);
    }
    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::FORBIDDEN => ClientError::Forbidden(text),
        StatusCode::NOT_FOUND => ClientError::NotFound(text),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ClientError::Validation(text),
        _ => ClientError::Internal(format!("{}: {}", status, text)),
    }
}
