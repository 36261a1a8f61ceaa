//! HTTP client for the remote tariff store
//!
//! [`HttpTariffStore`] is the production [`TariffStore`] implementation. It
//! speaks the store's JSON API: successful responses arrive wrapped in an
//! envelope (`{"data": ...}`), failures carry a message body whose HTTP
//! status decides which [`AppError`] the caller sees.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument, warn};
use url::Url;

use tariff_core::config::StoreConfig;
use tariff_core::error::AppError;
use tariff_core::models::{ServerInfo, TariffRecord};
use tariff_core::payload::TariffPayload;
use tariff_core::traits::TariffStore;
use tariff_core::AppResult;

/// Client for the tariff store HTTP API.
pub struct HttpTariffStore {
    http_client: Client,
    base_url: Url,
    api_token: Option<String>,
}

/// Success envelope used by every store endpoint.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Error body the store sends on non-2xx responses. Both fields are
/// optional; older store versions send only `error`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}

/// Maps a non-2xx store response to the error the editing layer branches on.
/// 400 and 422 are server-side validation, 404 and 409 keep their usual
/// meaning, anything else is a store fault.
fn error_from_status(status: StatusCode, message: String) -> AppError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            AppError::Validation(message)
        }
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::CONFLICT => AppError::Conflict(message),
        _ => AppError::StoreRejected {
            status: status.as_u16(),
            message,
        },
    }
}

impl HttpTariffStore {
    /// Builds a client from store configuration.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let config = AppConfig::load()?;
    /// let store = HttpTariffStore::from_config(&config.store)?;
    /// ```
    pub fn from_config(config: &StoreConfig) -> AppResult<Self> {
        let http_client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(20)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .build()
            .map_err(|e| AppError::Transport(e.to_string()))?;

        // Url::join drops the last path segment unless the base ends in '/'.
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| AppError::Config(format!("invalid store base URL: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
            api_token: config.api_token.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::Config(format!("invalid endpoint {}: {}", path, e)))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends a prepared request and unwraps the success envelope. Network
    /// failures become `Transport`; non-2xx responses go through
    /// [`error_from_status`] with whatever message the body carried.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(ErrorBody::into_message)
                .unwrap_or_else(|| status.to_string());
            warn!(status = status.as_u16(), %message, "store request failed");
            return Err(error_from_status(status, message));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| AppError::Serialization(e.to_string()))?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl TariffStore for HttpTariffStore {
    #[instrument(skip(self))]
    async fn available_servers(&self) -> Result<Vec<ServerInfo>, AppError> {
        let url = self.endpoint("api/v1/servers")?;
        debug!(%url, "fetching server catalog");
        self.execute(self.http_client.get(url)).await
    }

    #[instrument(skip(self))]
    async fn fetch_tariff(&self, id: i64) -> Result<TariffRecord, AppError> {
        let url = self.endpoint(&format!("api/v1/tariffs/{}", id))?;
        debug!(%url, "fetching tariff");
        self.execute(self.http_client.get(url)).await
    }

    #[instrument(skip(self))]
    async fn list_tariffs(&self) -> Result<Vec<TariffRecord>, AppError> {
        let url = self.endpoint("api/v1/tariffs")?;
        debug!(%url, "listing tariffs");
        self.execute(self.http_client.get(url)).await
    }

    #[instrument(skip(self, payload), fields(name = %payload.name))]
    async fn create_tariff(&self, payload: &TariffPayload) -> Result<TariffRecord, AppError> {
        let url = self.endpoint("api/v1/tariffs")?;
        debug!(%url, "creating tariff");
        self.execute(self.http_client.post(url).json(payload)).await
    }

    #[instrument(skip(self, payload), fields(name = %payload.name))]
    async fn update_tariff(
        &self,
        id: i64,
        payload: &TariffPayload,
    ) -> Result<TariffRecord, AppError> {
        let url = self.endpoint(&format!("api/v1/tariffs/{}", id))?;
        debug!(%url, "updating tariff");
        self.execute(self.http_client.put(url).json(payload)).await
    }
}
