use eframe::egui::{
    self,
    Color32,
    RichText,
};

use crate::predict::RiskTier;

#[derive(Clone)]
pub struct Theme {
    pub red: Color32,
    pub orange: Color32,
    pub yellow: Color32,
    pub green: Color32,
    pub purple: Color32,
    pub cyan: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dracula()
    }
}

impl Theme {
    pub fn dracula() -> Self {
        Self {
            red: Color32::from_rgb(255, 85, 85),
            orange: Color32::from_rgb(255, 184, 108),
            yellow: Color32::from_rgb(241, 250, 140),
            green: Color32::from_rgb(80, 250, 123),
            purple: Color32::from_rgb(189, 147, 249),
            cyan: Color32::from_rgb(139, 233, 253),
        }
    }

    pub fn heading(&self, content: &str) -> RichText {
        RichText::new(content).color(self.purple).strong()
    }

    pub fn bold(&self, content: &str) -> RichText {
        RichText::new(content).color(self.orange).strong()
    }

    pub fn tier_color(&self, tier: RiskTier) -> Color32 {
        match tier {
            RiskTier::Low => self.green,
            RiskTier::Medium => self.orange,
            RiskTier::High => self.red,
        }
    }
}

pub fn set_theme(ctx: &egui::Context, theme: &Theme) {
    let theme = theme.clone();
    ctx.all_styles_mut(move |style| {
        style.visuals.hyperlink_color = theme.cyan;
        style.visuals.selection.bg_fill = theme.purple.linear_multiply(0.4);
        style.visuals.warn_fg_color = theme.yellow;
        style.visuals.error_fg_color = theme.red;
    });
}
