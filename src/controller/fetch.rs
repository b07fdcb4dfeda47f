//! Page fetching: the fetcher seam, cancellable dispatch and the HTTP fetcher.

use std::marker::PhantomData;
use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::controller::cancel::{CancelToken, RequestId};
use crate::dto::envelope::{ErrorEnvelope, ResultEnvelope};
use crate::dto::list::ListQueryParams;
use crate::paging::{PageResult, PagingSpec};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Why a page could not be fetched.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Superseded by a newer request or the view went away.
    #[error("request cancelled")]
    Cancelled,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("server responded with HTTP {status}: {message}")]
    Server { status: u16, message: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

/// Source of pages for a [`PagedListController`](crate::controller::PagedListController).
pub trait PageFetcher<T> {
    fn fetch(
        &self,
        spec: &PagingSpec,
    ) -> impl Future<Output = Result<PageResult<T>, FetchError>> + Send;
}

/// A fetch the controller wants performed.
#[derive(Clone, Debug)]
pub struct FetchRequest {
    pub id: RequestId,
    pub spec: PagingSpec,
    pub cancel: CancelToken,
}

/// Outcome of a [`FetchRequest`], handed back to the controller.
#[derive(Debug)]
pub struct Completion<T> {
    pub id: RequestId,
    pub outcome: Result<PageResult<T>, FetchError>,
}

/// Runs `request` until it finishes or its token is cancelled. A cancelled
/// fetch future is dropped, aborting the underlying I/O.
pub async fn dispatch<T, F>(fetcher: &F, request: FetchRequest) -> Completion<T>
where
    F: PageFetcher<T>,
{
    let FetchRequest { id, spec, cancel } = request;
    if cancel.is_cancelled() {
        return Completion {
            id,
            outcome: Err(FetchError::Cancelled),
        };
    }

    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            log::debug!("Fetch {id} aborted");
            Err(FetchError::Cancelled)
        }
        result = fetcher.fetch(&spec) => result,
    };
    Completion { id, outcome }
}

/// Fetches pages from a list endpoint of the JSON API.
pub struct HttpPageFetcher<T> {
    client: reqwest::Client,
    url: String,
    bearer_token: Option<String>,
    params: Vec<(String, String)>,
    _rows: PhantomData<fn() -> T>,
}

impl<T> HttpPageFetcher<T> {
    /// Fetcher for `{base_url}{path}`, e.g. `("http://localhost:8080", "/api/v1/customers")`.
    pub fn new(base_url: &str, path: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            url: format!("{}{}", base_url.trim_end_matches('/'), path),
            bearer_token: None,
            params: Vec::new(),
            _rows: PhantomData,
        })
    }

    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Fixed query parameter sent with every page request (e.g. `customerId`).
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }
}

impl<T> PageFetcher<T> for HttpPageFetcher<T>
where
    T: DeserializeOwned + Send,
{
    async fn fetch(&self, spec: &PagingSpec) -> Result<PageResult<T>, FetchError> {
        let mut request = self
            .client
            .get(&self.url)
            .query(&self.params)
            .query(&ListQueryParams::from_spec(spec).to_pairs());
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            return Err(FetchError::Server {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str::<ResultEnvelope<PageResult<T>>>(&body)
            .map(|envelope| envelope.result)
            .map_err(|err| FetchError::Decode(err.to_string()))
    }
}
