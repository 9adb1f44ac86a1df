use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::use_workbench;
use crate::components::image_list::ImageList;
use crate::components::result_panel::ResultPanel;
use crate::workflow;

/// Server-side session: uploaded images and a reset that discards them.
#[component]
pub fn SessionPage() -> impl IntoView {
    let ctx = use_workbench();
    let state = ctx.state;
    let (resetting, set_resetting) = signal(false);

    // Refresh the image list on mount
    Effect::new(move |_| {
        spawn_local(async move {
            workflow::refresh_images(&ctx.api(), &state).await;
        });
    });

    let on_reset = move |_| {
        set_resetting.set(true);
        spawn_local(async move {
            workflow::reset_session(&ctx.api(), &state).await;
            set_resetting.set(false);
        });
    };

    view! {
        <div class="page session-page">
            <h2>"Session"</h2>
            <p class="page-description">
                "Images uploaded to the server in this session. Resetting deletes them."
            </p>

            <button
                class="btn btn-secondary"
                on:click=on_reset
                disabled=move || resetting.get()
            >
                {move || if resetting.get() { "Resetting..." } else { "Reset Session" }}
            </button>

            <ImageList />
            <ResultPanel />
        </div>
    }
}
