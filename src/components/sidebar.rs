use leptos::prelude::*;

use crate::app::use_workbench;
use crate::components::app_banner::AppBanner;

#[component]
pub fn Sidebar() -> impl IntoView {
    let state = use_workbench().state;
    let version = Memo::new(move |_| {
        state.with(|s| s.api_info.as_ref().map(|info| info.version.clone()))
    });

    view! {
        <nav class="sidebar">
            <div class="sidebar-header">
                <AppBanner />
            </div>
            <ul class="nav-list">
                <li class="nav-item">
                    <a href="/" class="nav-link">"Workbench"</a>
                </li>
                <li class="nav-item">
                    <a href="/session" class="nav-link">"Session"</a>
                </li>
            </ul>
            <div class="sidebar-footer">
                {move || version.get().map(|v| view! {
                    <span class="api-version">{format!("API {}", v)}</span>
                })}
            </div>
        </nav>
    }
}
