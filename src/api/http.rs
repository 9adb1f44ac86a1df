//! `WorkbenchApi` over the browser's fetch, via `gloo-net`.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use web_sys::{FormData, RequestCache};

use super::types::{
    CatalogResponse, ImageListResponse, ResetResponse, SettingsResponse, UploadResponse,
};
use super::{
    ApiInfo, AppState, SettingsSchema, UploadResult, UploadedImage, VisualizationResult,
    VisualizeRequest, VisualizerDescriptor, WorkbenchApi,
};
use crate::error::{Result, WorkbenchError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpApi {
    api_root: String,
}

impl HttpApi {
    /// `api_base` is the server origin, or empty for same-origin requests.
    pub fn new(api_base: &str) -> Self {
        Self {
            api_root: format!("{}/api", api_base.trim_end_matches('/')),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_root, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        log::debug!("GET {}", url);
        let response = Request::get(&url).send().await.map_err(network)?;
        decode(response).await
    }
}

fn network(err: gloo_net::Error) -> WorkbenchError {
    WorkbenchError::Network(err.to_string())
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    if !response.ok() {
        return Err(WorkbenchError::http(
            response.status(),
            response.status_text(),
        ));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| WorkbenchError::Decode(e.to_string()))
}

impl WorkbenchApi for HttpApi {
    type UploadBody = FormData;

    async fn fetch_catalog(&self) -> Result<Vec<VisualizerDescriptor>> {
        let body: CatalogResponse = self.get_json("/visualizers").await?;
        Ok(body.visualizers)
    }

    async fn fetch_settings(&self, visualizer: &str) -> Result<SettingsSchema> {
        let path = format!("/visualizers/{}", urlencoding::encode(visualizer));
        let body: SettingsResponse = self.get_json(&path).await?;
        SettingsSchema::from_wire(visualizer, body.settings)
    }

    async fn upload_image(&self, body: FormData) -> Result<UploadResult> {
        let url = self.url("/images");
        log::debug!("POST {}", url);
        // No content type: the browser writes the multipart boundary itself.
        let request = Request::post(&url)
            .cache(RequestCache::NoStore)
            .body(body)
            .map_err(network)?;
        let response = request.send().await.map_err(network)?;
        let body: UploadResponse = decode(response).await?;
        body.into_result()
    }

    async fn visualize(&self, request: &VisualizeRequest) -> Result<VisualizationResult> {
        self.get_json(&format!("/visualize?{}", request.query_string()))
            .await
    }

    async fn fetch_app_state(&self) -> Result<AppState> {
        self.get_json("/app_state").await
    }

    async fn fetch_api_info(&self) -> Result<ApiInfo> {
        self.get_json("/").await
    }

    async fn list_images(&self) -> Result<Vec<UploadedImage>> {
        let body: ImageListResponse = self.get_json("/images").await?;
        Ok(body.images)
    }

    async fn reset_session(&self) -> Result<()> {
        let body: ResetResponse = self.get_json("/reset").await?;
        match body.ok.as_deref() {
            Some("false") => Err(WorkbenchError::Decode("session reset refused".into())),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_are_rooted_under_api() {
        let api = HttpApi::new("");
        assert_eq!(api.url("/visualizers"), "/api/visualizers");

        let remote = HttpApi::new("http://localhost:5000/");
        assert_eq!(remote.url("/images"), "http://localhost:5000/api/images");
    }
}
