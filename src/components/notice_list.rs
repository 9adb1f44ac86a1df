use leptos::prelude::*;

use crate::app::use_workbench;
use crate::state::NoticeLevel;

#[component]
pub fn NoticeList() -> impl IntoView {
    let state = use_workbench().state;
    let notices = Memo::new(move |_| state.with(|s| s.notices.clone()));

    view! {
        <div class="notices">
            {move || {
                notices.get().into_iter().enumerate().map(|(index, notice)| {
                    let class = match notice.level {
                        NoticeLevel::Info => "notice notice-info",
                        NoticeLevel::Error => "notice notice-error",
                    };
                    view! {
                        <div class=class>
                            <span class="notice-text">{notice.text}</span>
                            <button
                                class="notice-dismiss"
                                title="Dismiss"
                                on:click=move |_| state.update(|s| s.dismiss_notice(index))
                            >
                                "\u{2715}"
                            </button>
                        </div>
                    }
                }).collect::<Vec<_>>()
            }}
        </div>
    }
}
