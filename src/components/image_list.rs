//! Images uploaded during the current server session.
//!
//! Any of them can be visualized again with the current visualizer and
//! settings, without uploading it a second time.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::use_workbench;
use crate::workflow;

#[component]
pub fn ImageList() -> impl IntoView {
    let ctx = use_workbench();
    let state = ctx.state;
    let images = Memo::new(move |_| state.with(|s| s.images.clone()));
    let not_ready = Memo::new(move |_| state.with(|s| s.ready_visualizer().is_err()));

    let on_visualize = move |uid: String| {
        spawn_local(async move {
            workflow::visualize_image(&ctx.api(), &state, &ctx.urls(), uid).await;
        });
    };

    view! {
        <div class="image-list">
            <h4 class="image-list-title">"Uploaded Images"</h4>
            {move || {
                let images = images.get();
                if images.is_empty() {
                    view! { <p class="image-list-empty">"No images uploaded in this session."</p> }.into_any()
                } else {
                    view! {
                        <div class="image-list-items">
                            {images.into_iter().map(|image| {
                                let uid = image.uid.clone();
                                view! {
                                    <div class="image-list-item">
                                        <span class="image-name">{image.filename}</span>
                                        <span class="image-uid">{format!("#{}", image.uid)}</span>
                                        <button
                                            class="btn btn-small btn-secondary"
                                            disabled=move || not_ready.get()
                                            on:click=move |_| on_visualize(uid.clone())
                                        >
                                            "Visualize"
                                        </button>
                                    </div>
                                }
                            }).collect::<Vec<_>>()}
                        </div>
                    }.into_any()
                }
            }}
        </div>
    }
}
