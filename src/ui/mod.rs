mod actions;
mod files;
mod peptide_table;
mod styles;
mod ui_config;
mod ui_panels;
mod ui_render;
mod ui_text;

pub(crate) use actions::UiAction;
pub(crate) use files::{read_dropped_file, save_csv};
pub(crate) use ui_config::{UI_CONFIG, UI_TEXT};
pub(crate) use ui_render::render_fullscreen_message;
