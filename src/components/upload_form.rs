use leptos::html::Form;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::FormData;

use crate::app::use_workbench;
use crate::state::Phase;
use crate::workflow;

/// Image upload form. Submitting sends the whole form as one multipart body
/// and, once the server has the image, requests its visualization.
#[component]
pub fn UploadForm() -> impl IntoView {
    let ctx = use_workbench();
    let state = ctx.state;
    let form_ref = NodeRef::<Form>::new();
    let (has_file, set_has_file) = signal(false);

    let on_file_change = move |ev: leptos::ev::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let chosen = input.files().map(|files| files.length() > 0).unwrap_or(false);
        set_has_file.set(chosen);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(form) = form_ref.get() else {
            return;
        };
        let body = match FormData::new_with_form(&form) {
            Ok(body) => body,
            Err(e) => {
                log::error!("Could not read the upload form: {:?}", e);
                return;
            }
        };
        spawn_local(async move {
            workflow::upload_and_visualize(&ctx.api(), &state, &ctx.urls(), body).await;
        });
    };

    let phase = Memo::new(move |_| state.with(|s| s.phase));
    let blocked = move || {
        phase.get().is_busy() || state.with(|s| s.ready_visualizer().is_err()) || !has_file.get()
    };

    view! {
        <form class="upload-form" node_ref=form_ref on:submit=on_submit>
            <div class="field">
                <label for="input-file-upload">"Image"</label>
                <input
                    type="file"
                    id="input-file-upload"
                    name="file"
                    accept="image/*"
                    class="input"
                    on:change=on_file_change
                />
            </div>
            <button type="submit" class="btn btn-primary" disabled=blocked>
                {move || match phase.get() {
                    Phase::Uploading => "Uploading...",
                    Phase::Visualizing => "Visualizing...",
                    _ => "Visualize",
                }}
            </button>
        </form>
    }
}
