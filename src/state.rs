//! Workbench state shared by every component.
//!
//! All UI state lives in one `WorkbenchState` value owned by a single
//! reactive signal. Components read it and the workflow functions mutate it;
//! nothing is kept in module-level globals.

use crate::api::{ApiInfo, AppState, SettingsSchema, UploadedImage, VisualizerDescriptor};
use crate::error::{Result, WorkbenchError};
use crate::render::ResultView;

/// Where the workbench is in its load / upload / visualize cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    CatalogLoaded,
    SettingsLoaded,
    Uploading,
    Visualizing,
    ResultDisplayed,
}

impl Phase {
    pub fn is_busy(self) -> bool {
        matches!(self, Phase::Uploading | Phase::Visualizing)
    }
}

/// How a control picks its initial value when the server sends no default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultSelection {
    #[default]
    FirstOption,
}

/// One rendered choice control, tagged with its setting name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingControl {
    pub name: String,
    pub options: Vec<String>,
    pub selected: String,
}

/// The rendered settings panel for the currently selected visualizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsForm {
    pub visualizer: String,
    pub controls: Vec<SettingControl>,
}

impl SettingsForm {
    pub fn from_schema(visualizer: &str, schema: &SettingsSchema) -> Self {
        Self::with_policy(visualizer, schema, DefaultSelection::FirstOption)
    }

    pub fn with_policy(
        visualizer: &str,
        schema: &SettingsSchema,
        policy: DefaultSelection,
    ) -> Self {
        let controls = schema
            .settings
            .iter()
            .map(|spec| {
                let selected = match policy {
                    DefaultSelection::FirstOption => {
                        spec.options.first().cloned().unwrap_or_default()
                    }
                };
                SettingControl {
                    name: spec.name.clone(),
                    options: spec.options.clone(),
                    selected,
                }
            })
            .collect();
        Self {
            visualizer: visualizer.to_string(),
            controls,
        }
    }

    /// Change one control's value. Values outside its option list are ignored.
    pub fn choose(&mut self, setting: &str, value: &str) -> bool {
        let Some(control) = self.controls.iter_mut().find(|c| c.name == setting) else {
            return false;
        };
        if !control.options.iter().any(|o| o == value) {
            log::warn!("'{}' is not an option of setting '{}'", value, setting);
            return false;
        }
        control.selected = value.to_string();
        true
    }

    pub fn clear(&mut self) {
        self.visualizer.clear();
        self.controls.clear();
    }
}

/// Setting name to chosen option, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsSelection {
    pairs: Vec<(String, String)>,
}

impl SettingsSelection {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn get(&self, setting: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == setting).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(k, _)| k)
    }
}

/// The only way selections are read back out of the settings panel.
pub fn read_selection(form: &SettingsForm) -> SettingsSelection {
    SettingsSelection::from_pairs(
        form.controls
            .iter()
            .map(|c| (c.name.clone(), c.selected.clone()))
            .collect(),
    )
}

/// Identifies one in-flight request; only the newest of its kind is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct RequestToken(u64);

impl RequestToken {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Inline, dismissible message for background loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkbenchState {
    pub phase: Phase,
    pub catalog: Vec<VisualizerDescriptor>,
    pub selected: Option<String>,
    pub form: SettingsForm,
    pub settings_loading: bool,
    pub result: Option<ResultView>,
    pub app_state: Option<AppState>,
    pub banner_requested: bool,
    pub api_info: Option<ApiInfo>,
    pub images: Vec<UploadedImage>,
    pub notices: Vec<Notice>,
    /// Blocking alerts waiting to be shown, oldest first.
    pub pending_alerts: Vec<String>,
    settings_token: RequestToken,
    visualize_token: RequestToken,
    visualize_pending: Option<RequestToken>,
}

impl WorkbenchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the catalog, keeping server order and the first of any
    /// duplicate names.
    pub fn set_catalog(&mut self, visualizers: Vec<VisualizerDescriptor>) {
        let mut catalog: Vec<VisualizerDescriptor> = Vec::with_capacity(visualizers.len());
        for vis in visualizers {
            if catalog.iter().any(|v| v.name == vis.name) {
                log::warn!("Duplicate visualizer '{}' in catalog, ignored", vis.name);
                continue;
            }
            catalog.push(vis);
        }
        self.catalog = catalog;
        self.phase = Phase::CatalogLoaded;
    }

    /// Tear down the current form and issue a token for the next settings fetch.
    pub fn begin_settings_load(&mut self, visualizer: &str) -> RequestToken {
        self.selected = Some(visualizer.to_string());
        self.form.clear();
        self.settings_loading = true;
        self.settings_token = self.settings_token.next();
        if !self.phase.is_busy() && self.phase != Phase::ResultDisplayed {
            self.phase = Phase::CatalogLoaded;
        }
        self.settings_token
    }

    pub fn is_current_settings(&self, token: RequestToken) -> bool {
        token == self.settings_token
    }

    /// Install a freshly fetched schema. Returns `false` if the token is stale.
    pub fn finish_settings_load(&mut self, token: RequestToken, schema: &SettingsSchema) -> bool {
        if !self.is_current_settings(token) {
            return false;
        }
        let visualizer = self.selected.clone().unwrap_or_default();
        self.form = SettingsForm::from_schema(&visualizer, schema);
        self.settings_loading = false;
        if self.phase == Phase::CatalogLoaded {
            self.phase = Phase::SettingsLoaded;
        }
        true
    }

    /// Mark a settings fetch as failed. Returns `false` if the token is stale.
    pub fn fail_settings_load(&mut self, token: RequestToken) -> bool {
        if !self.is_current_settings(token) {
            return false;
        }
        self.settings_loading = false;
        true
    }

    /// The selected visualizer, provided its settings form has finished loading.
    pub fn ready_visualizer(&self) -> Result<String> {
        let visualizer = self
            .selected
            .clone()
            .ok_or(WorkbenchError::MissingSelection)?;
        if self.settings_loading || self.form.visualizer != visualizer {
            return Err(WorkbenchError::SettingsNotLoaded(visualizer));
        }
        Ok(visualizer)
    }

    pub fn begin_visualization(&mut self) -> RequestToken {
        self.visualize_token = self.visualize_token.next();
        self.visualize_pending = Some(self.visualize_token);
        self.phase = Phase::Visualizing;
        self.visualize_token
    }

    pub fn is_current_visualization(&self, token: RequestToken) -> bool {
        token == self.visualize_token
    }

    pub fn show_result(&mut self, token: RequestToken, view: ResultView) -> bool {
        if !self.is_current_visualization(token) {
            return false;
        }
        self.visualize_pending = None;
        self.result = Some(view);
        self.phase = Phase::ResultDisplayed;
        true
    }

    /// Mark a visualization as failed. Returns `false` if the token is stale.
    pub fn fail_visualization(&mut self, token: RequestToken) -> bool {
        if !self.is_current_visualization(token) {
            return false;
        }
        self.visualize_pending = None;
        true
    }

    /// Return to the phase before an upload or visualization was attempted.
    /// A visualization still in flight keeps the workbench busy.
    pub fn settle_after_failure(&mut self) {
        self.phase = if self.visualize_pending.is_some() {
            Phase::Visualizing
        } else if self.result.is_some() {
            Phase::ResultDisplayed
        } else if !self.form.visualizer.is_empty() {
            Phase::SettingsLoaded
        } else if !self.catalog.is_empty() {
            Phase::CatalogLoaded
        } else {
            Phase::Idle
        };
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.pending_alerts.push(message.into());
    }

    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_alerts)
    }

    pub fn notify(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notices.push(Notice {
            level,
            text: text.into(),
        });
    }

    pub fn dismiss_notice(&mut self, index: usize) {
        if index < self.notices.len() {
            self.notices.remove(index);
        }
    }

    pub fn clear_session(&mut self) {
        self.result = None;
        self.images.clear();
        if self.phase == Phase::ResultDisplayed {
            self.phase = Phase::SettingsLoaded;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SettingSpec;

    fn schema(specs: &[(&str, &[&str])]) -> SettingsSchema {
        SettingsSchema {
            settings: specs
                .iter()
                .map(|(name, opts)| SettingSpec {
                    name: name.to_string(),
                    options: opts.iter().map(|o| o.to_string()).collect(),
                })
                .collect(),
        }
    }

    fn vis(name: &str) -> VisualizerDescriptor {
        VisualizerDescriptor {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_form_preselects_first_option() {
        let form = SettingsForm::from_schema("heatmap", &schema(&[("layer", &["1", "2", "3"])]));
        assert_eq!(form.controls.len(), 1);
        assert_eq!(form.controls[0].name, "layer");
        assert_eq!(form.controls[0].options, vec!["1", "2", "3"]);
        assert_eq!(form.controls[0].selected, "1");
    }

    #[test]
    fn test_selection_keys_match_schema_keys() {
        let s = schema(&[("Window", &["0.50"]), ("Strides", &["2", "5"]), ("Occlusion", &["grey"])]);
        let form = SettingsForm::from_schema("PartialOcclusion", &s);
        let selection = read_selection(&form);
        let keys: Vec<&str> = selection.keys().collect();
        assert_eq!(keys, vec!["Window", "Strides", "Occlusion"]);
        assert_eq!(selection.get("Strides"), Some("2"));
    }

    #[test]
    fn test_choose_rejects_unknown_option() {
        let mut form = SettingsForm::from_schema("heatmap", &schema(&[("layer", &["1", "2"])]));
        assert!(form.choose("layer", "2"));
        assert!(!form.choose("layer", "9"));
        assert!(!form.choose("missing", "1"));
        assert_eq!(read_selection(&form).get("layer"), Some("2"));
    }

    #[test]
    fn test_catalog_drops_duplicate_names() {
        let mut state = WorkbenchState::new();
        state.set_catalog(vec![vis("heatmap"), vis("saliency"), vis("heatmap")]);
        let names: Vec<&str> = state.catalog.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["heatmap", "saliency"]);
        assert_eq!(state.phase, Phase::CatalogLoaded);
    }

    #[test]
    fn test_begin_settings_load_clears_previous_controls() {
        let mut state = WorkbenchState::new();
        let first = state.begin_settings_load("heatmap");
        assert!(state.finish_settings_load(first, &schema(&[("layer", &["1"])])));
        assert_eq!(state.form.controls.len(), 1);

        state.begin_settings_load("saliency");
        assert!(state.form.controls.is_empty());
        assert!(state.settings_loading);
    }

    #[test]
    fn test_stale_settings_response_is_discarded() {
        let mut state = WorkbenchState::new();
        let stale = state.begin_settings_load("heatmap");
        let fresh = state.begin_settings_load("saliency");

        assert!(state.finish_settings_load(fresh, &schema(&[("mode", &["a", "b"])])));
        assert!(!state.finish_settings_load(stale, &schema(&[("layer", &["1"])])));

        assert_eq!(state.form.visualizer, "saliency");
        assert_eq!(state.form.controls[0].name, "mode");
    }

    #[test]
    fn test_stale_visualization_is_not_shown() {
        let mut state = WorkbenchState::new();
        let old = state.begin_visualization();
        let new = state.begin_visualization();
        assert!(!state.show_result(old, ResultView::default()));
        assert!(state.result.is_none());
        assert!(state.show_result(new, ResultView::default()));
        assert_eq!(state.phase, Phase::ResultDisplayed);
    }

    #[test]
    fn test_ready_visualizer_requires_loaded_form() {
        let mut state = WorkbenchState::new();
        assert_eq!(state.ready_visualizer(), Err(WorkbenchError::MissingSelection));

        let token = state.begin_settings_load("heatmap");
        assert_eq!(
            state.ready_visualizer(),
            Err(WorkbenchError::SettingsNotLoaded("heatmap".into()))
        );

        assert!(state.fail_settings_load(token));
        assert!(state.ready_visualizer().is_err());

        let token = state.begin_settings_load("heatmap");
        assert!(state.finish_settings_load(token, &schema(&[("layer", &["1"])])));
        assert_eq!(state.ready_visualizer(), Ok("heatmap".to_string()));
    }

    #[test]
    fn test_failure_keeps_busy_while_visualization_pending() {
        let mut state = WorkbenchState::new();
        let token = state.begin_visualization();
        state.phase = Phase::Uploading;
        state.settle_after_failure();
        assert_eq!(state.phase, Phase::Visualizing);

        assert!(state.fail_visualization(token));
        state.settle_after_failure();
        assert_eq!(state.phase, Phase::Idle);
    }

    #[test]
    fn test_alerts_drain_once() {
        let mut state = WorkbenchState::new();
        state.alert("error: (500) Internal Server Error");
        assert_eq!(state.take_alerts().len(), 1);
        assert!(state.take_alerts().is_empty());
    }
}
