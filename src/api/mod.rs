//! Client side of the visualization server's REST API.

pub mod http;
pub mod types;

pub use types::{
    ApiInfo, AppState, SettingSpec, SettingsSchema, UploadResult, UploadedImage,
    VisualizationResult, VisualizerDescriptor,
};

use crate::error::Result;
use crate::state::SettingsSelection;

/// Query parameters the server reserves for the image and visualizer.
pub const RESERVED_PARAMS: [&str; 2] = ["image", "visualizer"];

/// One async method per endpoint the workbench consumes.
///
/// The upload body is an associated type so the browser implementation can
/// pass a `FormData` straight through while tests use something plain.
#[allow(async_fn_in_trait)]
pub trait WorkbenchApi {
    type UploadBody;

    async fn fetch_catalog(&self) -> Result<Vec<VisualizerDescriptor>>;

    async fn fetch_settings(&self, visualizer: &str) -> Result<SettingsSchema>;

    async fn upload_image(&self, body: Self::UploadBody) -> Result<UploadResult>;

    async fn visualize(&self, request: &VisualizeRequest) -> Result<VisualizationResult>;

    async fn fetch_app_state(&self) -> Result<AppState>;

    async fn fetch_api_info(&self) -> Result<ApiInfo>;

    async fn list_images(&self) -> Result<Vec<UploadedImage>>;

    async fn reset_session(&self) -> Result<()>;
}

/// Parameters of a single `GET /api/visualize` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualizeRequest {
    pub image_uid: String,
    pub visualizer: String,
    pub selection: SettingsSelection,
}

impl VisualizeRequest {
    /// `image` and `visualizer` first, then every selected setting in form
    /// order. A setting can never shadow one of the reserved parameters.
    pub fn query_string(&self) -> String {
        let mut pairs = vec![
            format!("image={}", urlencoding::encode(&self.image_uid)),
            format!("visualizer={}", urlencoding::encode(&self.visualizer)),
        ];
        for (name, value) in self.selection.iter() {
            if RESERVED_PARAMS.contains(&name) {
                log::warn!("Setting '{}' collides with a reserved parameter, skipped", name);
                continue;
            }
            pairs.push(format!(
                "{}={}",
                urlencoding::encode(name),
                urlencoding::encode(value)
            ));
        }
        pairs.join("&")
    }
}

/// Builds the URLs rendered images are served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrls {
    api_root: String,
}

impl ImageUrls {
    pub fn new(api_base: &str) -> Self {
        Self {
            api_root: format!("{}/api", api_base.trim_end_matches('/')),
        }
    }

    pub fn input(&self, file_name: &str) -> String {
        format!("{}/inputs/{}", self.api_root, urlencoding::encode(file_name))
    }

    pub fn output(&self, file_name: &str) -> String {
        format!("{}/outputs/{}", self.api_root, urlencoding::encode(file_name))
    }
}
