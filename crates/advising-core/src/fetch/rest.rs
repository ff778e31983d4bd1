use std::sync::Arc;

use serde::Serialize;

use super::endpoint::Endpoint;
use super::envelope::{ApiPayload, Reply, decode_response};
use super::error::FetchError;
use super::transport::{ApiRequest, Transport};

/// Issues typed requests against the backend.
///
/// Each call performs exactly one [`Transport::send`]; there is no retry and
/// no pagination.
#[derive(Clone)]
pub struct RestFetcher {
    transport: Arc<dyn Transport>,
}

impl RestFetcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn get<T: ApiPayload>(
        &self,
        endpoint: &Endpoint,
        bearer: Option<&str>,
    ) -> Result<Reply<T>, FetchError> {
        let request = ApiRequest::get(endpoint.path()).with_bearer(bearer);
        self.execute(request).await
    }

    pub async fn post<B, T>(
        &self,
        endpoint: &Endpoint,
        bearer: Option<&str>,
        body: &B,
    ) -> Result<Reply<T>, FetchError>
    where
        B: Serialize + ?Sized,
        T: ApiPayload,
    {
        let body = serde_json::to_value(body)
            .map_err(|e| FetchError::Decode(format!("could not encode request body: {e}")))?;
        let request = ApiRequest::post(endpoint.path(), body).with_bearer(bearer);
        self.execute(request).await
    }

    async fn execute<T: ApiPayload>(&self, request: ApiRequest) -> Result<Reply<T>, FetchError> {
        let method = request.method.as_str();
        let path = request.path.clone();
        tracing::debug!(method, path = %path, "sending request");

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(method, path = %path, error = %e, "transport failure");
            FetchError::Transport(e.0)
        })?;

        tracing::debug!(method, path = %path, status = response.status, "response received");
        decode_response(&response)
    }
}
