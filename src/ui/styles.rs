use {
    crate::{
        models::{DetectionConfidence, SizeCategory},
        ui::UI_CONFIG,
    },
    eframe::egui::{
        Color32, CornerRadius, FontId, Response, RichText, Sense, Stroke, StrokeKind, Ui, Vec2,
        WidgetInfo, WidgetType,
    },
};

pub(crate) fn colored_subsection_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into()).color(UI_CONFIG.colors.subsection_heading)
}

pub trait BadgeColor {
    fn color(&self) -> Color32;
}

impl BadgeColor for SizeCategory {
    fn color(&self) -> Color32 {
        match self {
            Self::Tiny => Color32::from_rgb(148, 163, 184),
            Self::Small => Color32::from_rgb(125, 211, 252),
            Self::Medium => Color32::from_rgb(134, 239, 172),
            Self::Large => Color32::from_rgb(253, 186, 116),
            Self::XLarge => Color32::from_rgb(252, 165, 165),
        }
    }
}

impl BadgeColor for DetectionConfidence {
    fn color(&self) -> Color32 {
        match self {
            Self::VeryHigh => UI_CONFIG.colors.score_high,
            Self::High => Color32::from_rgb(163, 230, 53),
            Self::Medium => UI_CONFIG.colors.score_mid,
            Self::Low => UI_CONFIG.colors.score_low,
        }
    }
}

pub(crate) trait UiStyleExt {
    /// Interactive label acting as button: transparent when idle, gray bg on hover, blue bg when selected.
    fn interactive_label(
        &mut self,
        text: &str,
        is_selected: bool,
        idle_color: Color32,
        font_id: FontId,
    ) -> Response;

    fn label_subdued(&mut self, text: impl Into<String>);
    fn metric(&mut self, label: &str, value: &str, color: Color32);
    fn label_subheader(&mut self, text: impl Into<String>);
    fn badge(&mut self, text: impl Into<String>, color: Color32) -> Response;
    fn button_text_primary(&self, text: impl Into<String>) -> RichText;
    fn button_text_secondary(&self, text: impl Into<String>) -> RichText;
}

impl UiStyleExt for Ui {
    fn interactive_label(
        &mut self,
        text: &str,
        is_selected: bool,
        idle_color: Color32,
        font_id: FontId,
    ) -> Response {
        let padding = Vec2::new(6.0, 4.0);
        let galley = self
            .painter()
            .layout_no_wrap(text.to_string(), font_id, idle_color);
        let desired_size = galley.size() + padding * 2.0;
        let (rect, response) = self.allocate_exact_size(desired_size, Sense::click());
        response.widget_info(|| WidgetInfo::selected(WidgetType::Button, true, is_selected, text));

        if self.is_rect_visible(rect) {
            let visuals = self.style().visuals.clone();
            let (bg_fill, text_color) = if is_selected {
                (visuals.selection.bg_fill, Color32::WHITE)
            } else if response.hovered() || response.has_focus() {
                (visuals.widgets.hovered.bg_fill, Color32::YELLOW)
            } else {
                (Color32::TRANSPARENT, idle_color)
            };

            if is_selected || response.hovered() {
                self.painter().rect(
                    rect,
                    CornerRadius::same(4),
                    bg_fill,
                    Stroke::NONE,
                    StrokeKind::Inside,
                );
            }
            let text_pos = rect.left_top() + padding;
            self.painter().galley(text_pos, galley, text_color);
        }
        response
    }

    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(Color32::GRAY));
    }

    fn metric(&mut self, label: &str, value: &str, color: Color32) {
        self.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.label_subdued(format!("{}:", label));
            ui.label(RichText::new(value).small().color(color));
        });
    }

    fn label_subheader(&mut self, text: impl Into<String>) {
        self.label(colored_subsection_heading(text));
    }

    fn badge(&mut self, text: impl Into<String>, color: Color32) -> Response {
        self.label(RichText::new(text).small().strong().color(color))
    }

    fn button_text_primary(&self, text: impl Into<String>) -> RichText {
        RichText::new(text).strong().color(Color32::GREEN)
    }

    fn button_text_secondary(&self, text: impl Into<String>) -> RichText {
        RichText::new(text).strong().color(Color32::WHITE).small()
    }
}
