use leptos::prelude::*;

use crate::app::use_workbench;

/// Title, model and checkpoint the server reported at startup.
#[component]
pub fn AppBanner() -> impl IntoView {
    let state = use_workbench().state;
    let banner = Memo::new(move |_| state.with(|s| s.app_state.clone()));

    view! {
        <div class="app-banner">
            {move || match banner.get() {
                Some(app) => view! {
                    <h1 class="sidebar-title">{app.app_title}</h1>
                    <dl class="banner-fields">
                        <dt>"Model"</dt>
                        <dd class="banner-model">{app.model_name}</dd>
                        <dt>"Checkpoint"</dt>
                        <dd class="banner-ckpt">{app.latest_ckpt_name}</dd>
                        <dt>"Updated"</dt>
                        <dd class="banner-ckpt-time">{app.latest_ckpt_time}</dd>
                    </dl>
                }.into_any(),
                None => view! {
                    <h1 class="sidebar-title">"Visualizer Workbench"</h1>
                }.into_any(),
            }}
        </div>
    }
}
