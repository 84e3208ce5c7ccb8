use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::VideoGameId,
    error::ProblemDetails,
    protocol::{
        CreateVideoGameRequest, PageRequest, PagedResult, UpdateVideoGameRequest, VideoGame,
    },
};
use tracing::debug;
use url::Url;

pub mod config;
pub mod draft;
pub mod error;
pub mod form_view;
pub mod list_view;
pub mod navigation;
pub mod routes;
pub mod validation;

pub use error::CatalogError;

const VIDEO_GAMES_PATH: &str = "api/videogames";

/// The backend operations the views depend on. Each call is a single round trip;
/// implementations must not retry or cache.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list(&self, page: PageRequest) -> Result<PagedResult<VideoGame>, CatalogError>;
    async fn get(&self, id: VideoGameId) -> Result<VideoGame, CatalogError>;
    async fn create(&self, request: &CreateVideoGameRequest) -> Result<VideoGame, CatalogError>;
    async fn update(
        &self,
        id: VideoGameId,
        request: &UpdateVideoGameRequest,
    ) -> Result<VideoGame, CatalogError>;
    async fn delete(&self, id: VideoGameId) -> Result<(), CatalogError>;
}

#[derive(Clone)]
pub struct HttpCatalogClient {
    http: Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(api_url: &str) -> Result<Self, CatalogError> {
        Self::with_http_client(api_url, Client::new())
    }

    pub fn with_http_client(api_url: &str, http: Client) -> Result<Self, CatalogError> {
        let parsed = Url::parse(api_url.trim())?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CatalogError::UnsupportedScheme(parsed.scheme().to_string()));
        }
        let root = parsed.as_str().trim_end_matches('/');
        Ok(Self {
            http,
            base_url: format!("{root}/{VIDEO_GAMES_PATH}"),
        })
    }

    /// Collection endpoint, `{apiUrl}/api/videogames`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: VideoGameId) -> String {
        format!("{}/{}", self.base_url, id.0)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn list(&self, page: PageRequest) -> Result<PagedResult<VideoGame>, CatalogError> {
        debug!(
            page_number = page.page_number,
            page_size = page.page_size,
            "catalog: GET list"
        );
        let response = self.http.get(&self.base_url).query(&page).send().await?;
        decode_json(response).await
    }

    async fn get(&self, id: VideoGameId) -> Result<VideoGame, CatalogError> {
        debug!(id = id.0, "catalog: GET item");
        let response = self.http.get(self.item_url(id)).send().await?;
        decode_json(response).await
    }

    async fn create(&self, request: &CreateVideoGameRequest) -> Result<VideoGame, CatalogError> {
        debug!(title = %request.title, "catalog: POST item");
        let response = self.http.post(&self.base_url).json(request).send().await?;
        decode_json(response).await
    }

    async fn update(
        &self,
        id: VideoGameId,
        request: &UpdateVideoGameRequest,
    ) -> Result<VideoGame, CatalogError> {
        debug!(id = id.0, "catalog: PUT item");
        let response = self.http.put(self.item_url(id)).json(request).send().await?;
        decode_json(response).await
    }

    async fn delete(&self, id: VideoGameId) -> Result<(), CatalogError> {
        debug!(id = id.0, "catalog: DELETE item");
        let response = self.http.delete(self.item_url(id)).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

async fn ensure_success(response: Response) -> Result<Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(CatalogError::NotFound);
    }
    let body = response.text().await.unwrap_or_default();
    let detail = match serde_json::from_str::<ProblemDetails>(&body) {
        Ok(problem) => problem.summary(),
        Err(_) => body,
    };
    Err(CatalogError::Status {
        status: status.as_u16(),
        detail,
    })
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, CatalogError> {
    let response = ensure_success(response).await?;
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|err| CatalogError::InvalidResponse(err.to_string()))
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
