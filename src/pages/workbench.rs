use leptos::prelude::*;

use crate::components::result_panel::ResultPanel;
use crate::components::settings_panel::SettingsPanel;
use crate::components::upload_form::UploadForm;
use crate::components::visualizer_select::VisualizerSelect;

#[component]
pub fn WorkbenchPage() -> impl IntoView {
    view! {
        <div class="page workbench-page">
            <h2>"Visualize"</h2>
            <p class="page-description">
                "Pick a visualizer, adjust its settings and upload an image."
            </p>

            <div class="workbench-controls">
                <VisualizerSelect />
                <SettingsPanel />
                <UploadForm />
            </div>

            <ResultPanel />
        </div>
    }
}
