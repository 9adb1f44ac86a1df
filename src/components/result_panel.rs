use leptos::prelude::*;

use crate::app::use_workbench;
use crate::render::ImageKind;

/// Results area. Each new result replaces the previous one entirely.
#[component]
pub fn ResultPanel() -> impl IntoView {
    let state = use_workbench().state;
    let result = Memo::new(move |_| state.with(|s| s.result.clone()));

    view! {
        <section class="result-panel">
            <style>{include_str!("result_panel.css")}</style>
            <h3>"Result"</h3>
            {move || match result.get() {
                None => view! {
                    <p class="result-empty">"Upload an image to see its visualization."</p>
                }.into_any(),
                Some(rendered) => {
                    let images = rendered.images.into_iter().map(|img| {
                        let class = match img.kind {
                            ImageKind::Input => "result-image result-input",
                            ImageKind::Processed => "result-image result-processed",
                            ImageKind::Output => "result-image result-output",
                        };
                        view! {
                            <figure class=class>
                                <img src=img.src alt=img.file_name.clone() />
                                <figcaption>{img.kind.caption()}</figcaption>
                            </figure>
                        }
                    }).collect::<Vec<_>>();

                    let labels = rendered.labels.iter().map(|label| {
                        view! { <li class="label-row">{label.text()}</li> }
                    }).collect::<Vec<_>>();

                    view! {
                        <div class="result-images">{images}</div>
                        <ul class="result-labels">{labels}</ul>
                    }.into_any()
                }
            }}
        </section>
    }
}
