use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::use_workbench;
use crate::workflow;

/// Drop-down of the server's visualizers, in catalog order.
///
/// Every change tears down the settings panel and loads the schema of the
/// newly selected visualizer.
#[component]
pub fn VisualizerSelect() -> impl IntoView {
    let ctx = use_workbench();
    let state = ctx.state;

    let catalog = Memo::new(move |_| state.with(|s| s.catalog.clone()));

    let on_change = move |ev: leptos::ev::Event| {
        let name = event_target_value(&ev);
        if name.is_empty() {
            return;
        }
        spawn_local(async move {
            workflow::select_visualizer(&ctx.api(), &state, name).await;
        });
    };

    view! {
        <div class="field visualizer-select">
            <label for="select-vis">"Visualizer"</label>
            <select
                id="select-vis"
                class="input"
                on:change=on_change
                prop:value=move || state.with(|s| s.selected.clone().unwrap_or_default())
            >
                {move || {
                    catalog.get().into_iter().map(|vis| {
                        let name = vis.name;
                        view! { <option value=name.clone()>{name.clone()}</option> }
                    }).collect::<Vec<_>>()
                }}
            </select>
        </div>
    }
}
