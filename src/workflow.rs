//! Async request sequencing for the workbench.
//!
//! Each function here is one user- or startup-triggered operation. They only
//! suspend on network calls and touch state through a [`StateHandle`], so
//! they run unchanged against the reactive signal in the browser and against
//! a plain `RefCell` in tests.

use leptos::prelude::{RwSignal, Update, WithUntracked};

use crate::api::{ImageUrls, UploadedImage, VisualizeRequest, WorkbenchApi};
use crate::error::{Result, WorkbenchError};
use crate::render::render_result;
use crate::state::{read_selection, NoticeLevel, Phase, WorkbenchState};

/// Access to the single `WorkbenchState`.
///
/// Both methods return `None` once the state has been disposed, e.g. the
/// owning component unmounted while a request was in flight.
pub trait StateHandle {
    fn mutate<R>(&self, f: impl FnOnce(&mut WorkbenchState) -> R) -> Option<R>;
    fn inspect<R>(&self, f: impl FnOnce(&WorkbenchState) -> R) -> Option<R>;
}

impl StateHandle for RwSignal<WorkbenchState> {
    fn mutate<R>(&self, f: impl FnOnce(&mut WorkbenchState) -> R) -> Option<R> {
        self.try_update(f)
    }

    fn inspect<R>(&self, f: impl FnOnce(&WorkbenchState) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }
}

/// Fetch the visualizer catalog, then load settings for its first entry.
pub async fn load_catalog<A: WorkbenchApi, S: StateHandle>(api: &A, state: &S) {
    let visualizers = match api.fetch_catalog().await {
        Ok(v) => v,
        Err(e) => {
            log::error!("Failed to load visualizers: {}", e);
            state.mutate(|s| {
                s.notify(NoticeLevel::Error, format!("Could not load visualizers: {}", e))
            });
            return;
        }
    };
    log::info!("Catalog lists {} visualizer(s)", visualizers.len());

    let first = state
        .mutate(|s| {
            s.set_catalog(visualizers);
            let first = s.catalog.first().map(|v| v.name.clone());
            if first.is_none() {
                s.notify(NoticeLevel::Info, "The server offers no visualizers.");
            }
            first
        })
        .flatten();

    if let Some(name) = first {
        select_visualizer(api, state, name).await;
    }
}

/// Handle a selector change: drop the current form and load the new schema.
///
/// The form is cleared before the fetch is issued. If another change
/// happens before this response arrives, the response is discarded.
pub async fn select_visualizer<A: WorkbenchApi, S: StateHandle>(
    api: &A,
    state: &S,
    name: String,
) {
    let Some(token) = state.mutate(|s| s.begin_settings_load(&name)) else {
        return;
    };
    log::debug!("Loading settings for '{}' ({:?})", name, token);

    let result = api.fetch_settings(&name).await;

    state.mutate(|s| match result {
        Ok(schema) => {
            if s.finish_settings_load(token, &schema) {
                log::debug!("'{}' exposes {} setting(s)", name, schema.len());
            } else {
                log::debug!("Discarding stale settings for '{}'", name);
            }
        }
        Err(e) => {
            if s.fail_settings_load(token) {
                log::error!("Failed to load settings for '{}': {}", name, e);
                s.notify(
                    NoticeLevel::Error,
                    format!("Could not load settings for {}: {}", name, e),
                );
            } else {
                log::debug!("Ignoring stale settings failure for '{}': {}", name, e);
            }
        }
    });
}

/// Upload the image form, then visualize the uploaded image.
///
/// A failed upload raises one alert and never reaches the visualize call.
pub async fn upload_and_visualize<A: WorkbenchApi, S: StateHandle>(
    api: &A,
    state: &S,
    urls: &ImageUrls,
    body: A::UploadBody,
) {
    match state.inspect(|s| s.ready_visualizer()) {
        Some(Ok(_)) => {}
        Some(Err(e)) => {
            log::warn!("Upload refused: {}", e);
            fail_action(state, e);
            return;
        }
        None => return,
    }

    state.mutate(|s| s.phase = Phase::Uploading);
    let upload = match api.upload_image(body).await {
        Ok(u) => u,
        Err(e) => {
            log::error!("Upload failed: {}", e);
            fail_action(state, e);
            return;
        }
    };
    log::info!("Uploaded image as uid {}", upload.uid);

    if let Some(filename) = upload.file.clone() {
        state.mutate(|s| {
            if !s.images.iter().any(|i| i.uid == upload.uid) {
                s.images.push(UploadedImage {
                    filename,
                    uid: upload.uid.clone(),
                });
            }
        });
    }

    visualize_image(api, state, urls, upload.uid).await;
}

/// Request a visualization of an already uploaded image with the current
/// visualizer and the settings read from the form at call time.
pub async fn visualize_image<A: WorkbenchApi, S: StateHandle>(
    api: &A,
    state: &S,
    urls: &ImageUrls,
    image_uid: String,
) {
    let prepared = state.mutate(|s| -> Result<_> {
        let visualizer = s.ready_visualizer()?;
        let token = s.begin_visualization();
        let request = VisualizeRequest {
            image_uid,
            visualizer,
            selection: read_selection(&s.form),
        };
        Ok((token, request))
    });

    let (token, request) = match prepared {
        Some(Ok(prepared)) => prepared,
        Some(Err(e)) => {
            log::warn!("Visualize refused: {}", e);
            fail_action(state, e);
            return;
        }
        None => return,
    };
    log::debug!("Visualize {}", request.query_string());

    match api.visualize(&request).await {
        Ok(result) => {
            let view = render_result(&result, urls);
            state.mutate(|s| {
                if !s.show_result(token, view) {
                    log::debug!("Discarding stale result for image {}", request.image_uid);
                }
            });
        }
        Err(e) => {
            log::error!("Visualization with '{}' failed: {}", request.visualizer, e);
            let current = state
                .mutate(|s| s.fail_visualization(token))
                .unwrap_or(false);
            if current {
                fail_action(state, e);
            }
        }
    }
}

/// Load the backend banner. Only the first call per state does anything.
pub async fn load_app_state<A: WorkbenchApi, S: StateHandle>(api: &A, state: &S) {
    let first = state
        .mutate(|s| !std::mem::replace(&mut s.banner_requested, true))
        .unwrap_or(false);
    if !first {
        return;
    }

    match api.fetch_app_state().await {
        Ok(app_state) => {
            log::info!(
                "Serving {} ({}), checkpoint {}",
                app_state.app_title,
                app_state.model_name,
                app_state.latest_ckpt_name
            );
            state.mutate(|s| s.app_state = Some(app_state));
        }
        Err(e) => {
            log::error!("Failed to load app state: {}", e);
            state.mutate(|s| {
                s.notify(NoticeLevel::Error, format!("Could not load model details: {}", e))
            });
        }
    }
}

pub async fn load_api_info<A: WorkbenchApi, S: StateHandle>(api: &A, state: &S) {
    match api.fetch_api_info().await {
        Ok(info) => {
            state.mutate(|s| s.api_info = Some(info));
        }
        // Only used for the footer, so a console line is enough.
        Err(e) => log::warn!("Failed to load API info: {}", e),
    }
}

pub async fn refresh_images<A: WorkbenchApi, S: StateHandle>(api: &A, state: &S) {
    match api.list_images().await {
        Ok(images) => {
            state.mutate(|s| s.images = images);
        }
        Err(e) => {
            log::error!("Failed to list images: {}", e);
            state.mutate(|s| {
                s.notify(NoticeLevel::Error, format!("Could not list images: {}", e))
            });
        }
    }
}

pub async fn reset_session<A: WorkbenchApi, S: StateHandle>(api: &A, state: &S) {
    match api.reset_session().await {
        Ok(()) => {
            log::info!("Session reset");
            state.mutate(|s| {
                s.clear_session();
                s.notify(NoticeLevel::Info, "Session cleared.");
            });
        }
        Err(e) => {
            log::error!("Session reset failed: {}", e);
            state.mutate(|s| s.alert(e.alert_message()));
        }
    }
}

fn fail_action<S: StateHandle>(state: &S, err: WorkbenchError) {
    state.mutate(|s| {
        s.alert(err.alert_message());
        s.settle_after_failure();
    });
}
