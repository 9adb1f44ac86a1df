use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;
use wasm_bindgen_futures::spawn_local;

use crate::api::http::HttpApi;
use crate::api::ImageUrls;
use crate::components::notice_list::NoticeList;
use crate::components::sidebar::Sidebar;
use crate::config::ClientConfig;
use crate::pages::session::SessionPage;
use crate::pages::workbench::WorkbenchPage;
use crate::state::WorkbenchState;
use crate::workflow;

/// Handles every component needs: the shared state and the server client.
#[derive(Clone, Copy)]
pub struct WorkbenchContext {
    pub state: RwSignal<WorkbenchState>,
    api: StoredValue<HttpApi>,
    urls: StoredValue<ImageUrls>,
}

impl WorkbenchContext {
    fn new(config: &ClientConfig) -> Self {
        Self {
            state: RwSignal::new(WorkbenchState::new()),
            api: StoredValue::new(HttpApi::new(&config.api_base)),
            urls: StoredValue::new(ImageUrls::new(&config.api_base)),
        }
    }

    pub fn api(&self) -> HttpApi {
        self.api.get_value()
    }

    pub fn urls(&self) -> ImageUrls {
        self.urls.get_value()
    }
}

pub fn use_workbench() -> WorkbenchContext {
    expect_context::<WorkbenchContext>()
}

#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    let ctx = WorkbenchContext::new(&config);
    provide_context(ctx);

    // Startup loads run side by side; the catalog one also loads the
    // settings of the first visualizer.
    Effect::new(move |_| {
        spawn_local(async move {
            workflow::load_catalog(&ctx.api(), &ctx.state).await;
        });
        spawn_local(async move {
            workflow::load_app_state(&ctx.api(), &ctx.state).await;
        });
        spawn_local(async move {
            workflow::load_api_info(&ctx.api(), &ctx.state).await;
        });
    });

    // Show queued alerts. Taking them does not notify, so this does not rerun.
    Effect::new(move |_| {
        let pending = ctx.state.with(|s| !s.pending_alerts.is_empty());
        if !pending {
            return;
        }
        let alerts = ctx
            .state
            .try_update_untracked(|s| s.take_alerts())
            .unwrap_or_default();
        if let Some(window) = web_sys::window() {
            for message in alerts {
                let _ = window.alert_with_message(&message);
            }
        }
    });

    view! {
        <Router>
            <div class="app-layout">
                <Sidebar />
                <main class="content">
                    <NoticeList />
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route path=path!("/") view=WorkbenchPage />
                        <Route path=path!("/session") view=SessionPage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
