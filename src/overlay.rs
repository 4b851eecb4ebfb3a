//! Full-screen, always-on-top blink overlay.

use eframe::egui::{self, Color32, RichText};

/// Text shown by the overlay.
#[derive(Debug, Clone, Copy)]
pub struct OverlayText<'a> {
    pub message: &'a str,
    pub dismiss_label: &'a str,
}

fn overlay_id() -> egui::ViewportId {
    egui::ViewportId::from_hash_of("blinkly_overlay")
}

fn overlay_builder() -> egui::ViewportBuilder {
    egui::ViewportBuilder::default()
        .with_title("Blinkly")
        .with_fullscreen(true)
        .with_decorations(false)
        .with_window_level(egui::WindowLevel::AlwaysOnTop)
        .with_active(true)
}

/// Render the overlay for this frame. Returns true when the user dismissed it.
///
/// Pass `focus` on the frame the overlay opens so Escape reaches it without a
/// click. The viewport exists only while this is called each frame; stop
/// calling it and egui closes the window.
pub fn show(ctx: &egui::Context, text: OverlayText<'_>, focus: bool) -> bool {
    ctx.show_viewport_immediate(overlay_id(), overlay_builder(), |ctx, class| {
        if focus && class != egui::ViewportClass::Embedded {
            ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
        }
        let mut dismissed = if class == egui::ViewportClass::Embedded {
            // Backend without multiple windows: draw on top of the main window instead.
            egui::Window::new("Blinkly")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .frame(egui::Frame::window(&ctx.style()).fill(Color32::BLACK))
                .show(ctx, |ui| contents(ui, text))
                .and_then(|response| response.inner)
                .unwrap_or(false)
        } else {
            egui::CentralPanel::default()
                .frame(egui::Frame::none().fill(Color32::BLACK))
                .show(ctx, |ui| {
                    ui.add_space(ui.available_height() * 0.4);
                    contents(ui, text)
                })
                .inner
        };

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            dismissed = true;
        }
        // In embedded mode this would be the main window's close request.
        if class != egui::ViewportClass::Embedded
            && ctx.input(|i| i.viewport().close_requested())
        {
            dismissed = true;
        }
        dismissed
    })
}

fn contents(ui: &mut egui::Ui, text: OverlayText<'_>) -> bool {
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(text.message).size(30.0).color(Color32::WHITE));
        ui.add_space(20.0);
        ui.button(RichText::new(text.dismiss_label).size(16.0))
            .clicked()
    })
    .inner
}
