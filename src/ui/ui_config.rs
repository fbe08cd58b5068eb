use eframe::egui::{Color32, Frame, Margin, Stroke};

pub use crate::ui::ui_text::UI_TEXT;

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub error: Color32,
    pub warning: Color32,
    pub success: Color32,
    pub info: Color32,
    /// Bioactivity score bands.
    pub score_high: Color32,
    pub score_mid: Color32,
    pub score_low: Color32,
    pub brain: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub score_high_threshold: f64,
    pub score_mid_threshold: f64,
    pub table_row_height: f32,
    /// Poll interval for worker results while a job is outstanding.
    pub busy_repaint_ms: u64,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,
        heading: Color32::from_rgb(96, 165, 250),
        subsection_heading: Color32::from_rgb(148, 163, 184),
        central_panel: Color32::from_rgb(15, 23, 42),
        side_panel: Color32::from_rgb(30, 41, 59),
        error: Color32::from_rgb(252, 165, 165),
        warning: Color32::from_rgb(253, 224, 71),
        success: Color32::from_rgb(134, 239, 172),
        info: Color32::from_rgb(147, 197, 253),
        score_high: Color32::from_rgb(74, 222, 128),
        score_mid: Color32::from_rgb(250, 204, 21),
        score_low: Color32::from_rgb(148, 163, 184),
        brain: Color32::from_rgb(244, 114, 182),
    },
    score_high_threshold: 70.0,
    score_mid_threshold: 50.0,
    table_row_height: 20.0,
    busy_repaint_ms: 100,
};

impl UiConfig {
    /// Frame for Left/Right panels (Standard padding)
    pub fn side_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.side_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::same(8),
            ..Default::default()
        }
    }

    pub fn top_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.side_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::same(8),
            ..Default::default()
        }
    }

    /// Frame for Bottom Status bar (Tighter vertical padding)
    pub fn bottom_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.side_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::symmetric(8, 4),
            ..Default::default()
        }
    }

    pub fn central_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.central_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::same(12),
            ..Default::default()
        }
    }

    pub fn bioactivity_color(&self, score: f64) -> Color32 {
        if score >= self.score_high_threshold {
            self.colors.score_high
        } else if score >= self.score_mid_threshold {
            self.colors.score_mid
        } else {
            self.colors.score_low
        }
    }
}
