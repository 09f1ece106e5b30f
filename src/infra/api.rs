//! Shared asynchronous client for the EzzyDrive backend.
//!
//! - One instance per application, built from configuration at start-up.
//! - Sends and accepts JSON; every request passes through the installed interceptors.
//! - Unwraps the `{ message, data }` envelope the backend puts around every payload.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Request, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::ApiResponse;
use crate::infra::interceptor::RequestInterceptor;

const USER_AGENT: &str = concat!("ezzydrive/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error ({status}): {message}")]
    Status { status: StatusCode, message: String },
}

impl ApiClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiClientError::Status { status, .. } => Some(*status),
            ApiClientError::Http(err) => err.status(),
            ApiClientError::InvalidUrl(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    interceptors: Arc<Vec<Arc<dyn RequestInterceptor>>>,
}

pub struct ApiClientBuilder {
    base_url: String,
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl ApiClientBuilder {
    pub fn with_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn build(self) -> Result<ApiClient, ApiClientError> {
        Url::parse(&self.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(ApiClient {
            http,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            interceptors: Arc::new(self.interceptors),
        })
    }
}

impl ApiClient {
    pub fn builder(base_url: &str) -> ApiClientBuilder {
        ApiClientBuilder {
            base_url: base_url.to_string(),
            interceptors: Vec::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Names of the installed interceptors, in execution order.
    pub fn interceptor_names(&self) -> Vec<&'static str> {
        self.interceptors.iter().map(|i| i.name()).collect()
    }

    /// Resolves `path` against the base URL the way the path is written: `/web/x` on
    /// `http://host/api` is `http://host/api/web/x`.
    pub fn url(&self, path: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!(
            "{}/{}",
            self.base_url,
            path.trim_start_matches('/')
        ))
    }

    /// Builds a request for `path` and runs the interceptor chain over it.
    pub fn prepare<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Request, ApiClientError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        let mut builder = self.http.request(method, url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let mut request = builder.build()?;
        for interceptor in self.interceptors.iter() {
            interceptor.intercept(&mut request);
        }
        Ok(request)
    }

    pub async fn get<T>(&self, path: &str) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
    {
        let request = self.prepare::<()>(Method::GET, path, None)?;
        self.fetch(request).await
    }

    pub async fn post<B, T>(&self, path: &str, body: Option<&B>) -> Result<T, ApiClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.prepare(Method::POST, path, body)?;
        self.fetch(request).await
    }

    /// Sends a request and returns the envelope's `data`.
    pub async fn get_data<T>(&self, path: &str) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
    {
        let envelope: ApiResponse<T> = self.get(path).await?;
        Ok(envelope.data)
    }

    pub async fn post_data<B, T>(&self, path: &str, body: Option<&B>) -> Result<T, ApiClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let envelope: ApiResponse<T> = self.post(path, body).await?;
        Ok(envelope.data)
    }

    /// Sends a request and drops whatever the backend answers.
    pub async fn post_discard(&self, path: &str) -> Result<(), ApiClientError> {
        let request = self.prepare::<()>(Method::POST, path, None)?;
        self.send(request).await?;
        Ok(())
    }

    async fn fetch<T>(&self, request: Request) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(request).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send(&self, request: Request) -> Result<reqwest::Response, ApiClientError> {
        let method = request.method().clone();
        let path = request.url().path().to_string();
        debug!(%method, %path, "sending api request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|parsed| parsed.message)
            .unwrap_or(body);
        debug!(%method, %path, %status, "api request failed");
        Err(ApiClientError::Status { status, message })
    }
}
