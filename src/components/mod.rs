pub mod app_banner;
pub mod image_list;
pub mod notice_list;
pub mod result_panel;
pub mod settings_panel;
pub mod sidebar;
pub mod upload_form;
pub mod visualizer_select;
