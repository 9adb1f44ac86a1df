use leptos::prelude::*;

use crate::app::use_workbench;

/// One choice control per setting of the selected visualizer.
///
/// Rebuilt only when the set of settings changes; the chosen values are read
/// back from state, so picking an option does not recreate the controls.
#[component]
pub fn SettingsPanel() -> impl IntoView {
    let state = use_workbench().state;

    let layout = Memo::new(move |_| {
        state.with(|s| {
            let fields: Vec<(String, Vec<String>)> = s
                .form
                .controls
                .iter()
                .map(|c| (c.name.clone(), c.options.clone()))
                .collect();
            (s.form.visualizer.clone(), fields)
        })
    });
    let loading = Memo::new(move |_| state.with(|s| s.settings_loading));

    view! {
        <div class="settings-panel" id="div-settings-list">
            {move || {
                if loading.get() {
                    return view! { <p class="settings-loading">"Loading settings..."</p> }.into_any();
                }
                let (visualizer, fields) = layout.get();
                if visualizer.is_empty() {
                    return view! { <p class="settings-empty">"No visualizer selected."</p> }.into_any();
                }
                if fields.is_empty() {
                    return view! { <p class="settings-empty">{format!("{} has no settings.", visualizer)}</p> }.into_any();
                }
                fields.into_iter().map(|(name, options)| {
                    view! { <SettingField name=name options=options /> }
                }).collect::<Vec<_>>().into_any()
            }}
        </div>
    }
}

#[component]
fn SettingField(name: String, options: Vec<String>) -> impl IntoView {
    let state = use_workbench().state;
    let id = format!("{}-setting", name);

    let current = {
        let name = name.clone();
        move || {
            state.with(|s| {
                s.form
                    .controls
                    .iter()
                    .find(|c| c.name == name)
                    .map(|c| c.selected.clone())
                    .unwrap_or_default()
            })
        }
    };

    let on_change = {
        let name = name.clone();
        move |ev: leptos::ev::Event| {
            let value = event_target_value(&ev);
            state.update(|s| {
                s.form.choose(&name, &value);
            });
        }
    };

    view! {
        <div class="field setting-field">
            <label for=id.clone()>{name.clone()}</label>
            <select id=id class="input" name=name prop:value=current on:change=on_change>
                {options.into_iter().map(|opt| {
                    view! { <option value=opt.clone()>{opt.clone()}</option> }
                }).collect::<Vec<_>>()}
            </select>
        </div>
    }
}
