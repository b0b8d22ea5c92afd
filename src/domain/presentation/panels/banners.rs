use bevy_egui::egui::{self, Align2, Color32, FontId, RichText};

use crate::domain::round::{StatusLine, Tone};

pub fn tone_color(tone: Tone) -> Color32 {
    match tone {
        Tone::None => Color32::WHITE,
        Tone::Win => Color32::from_rgb(0x4c, 0xe0, 0x7a),
        Tone::Lose => Color32::from_rgb(0xf5, 0x4c, 0x5a),
        Tone::Draw => Color32::from_rgb(0xf5, 0xc8, 0x42),
    }
}

pub fn show_status_banner(ctx: &egui::Context, status: &StatusLine) {
    egui::Area::new("status_banner".into())
        .anchor(Align2::CENTER_BOTTOM, egui::vec2(0.0, -120.0))
        .show(ctx, |ui| {
            let text = RichText::new(status.message)
                .font(FontId::proportional(40.0))
                .color(tone_color(status.tone));
            ui.label(text);
        });
}

/// Full-screen gold wash after a win. `alpha` in [0, 1].
pub fn show_win_tint(ctx: &egui::Context, alpha: f32) {
    if alpha <= 0.0 {
        return;
    }
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Background,
        egui::Id::new("win_tint"),
    ));
    let a = (alpha.clamp(0.0, 1.0) * 70.0) as u8;
    painter.rect_filled(
        ctx.screen_rect(),
        0.0,
        Color32::from_rgba_unmultiplied(255, 215, 0, a),
    );
}
