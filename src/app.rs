use std::time::Duration;

use eframe::egui::{self, RichText};
use eframe::CreationContext;

use crate::dialog::{NativeDialogs, Notifier};
use crate::interval::Interval;
use crate::overlay::{self, OverlayText};
use crate::scheduler::{Phase, ReminderCycle};
use crate::settings::AppSettings;
use crate::surface::ConfigSurface;
use crate::timer::{ThreadTimer, Timer, TimerEvent};

const START_TITLE: &str = "Blink Reminder";
const INVALID_TITLE: &str = "Invalid Input";
const INVALID_MESSAGE: &str = "Please enter a valid number of minutes.";
const EXIT_TITLE: &str = "Exit Blinkly";
const EXIT_MESSAGE: &str = "Are you sure you want to exit Blinkly?";

pub struct BlinklyApp<T: Timer = ThreadTimer> {
    cycle: ReminderCycle<T>,
    surface: ConfigSurface,
    settings: AppSettings,
    notifier: Box<dyn Notifier>,
    events: Vec<TimerEvent>,
    focus_overlay: bool,
    closing: bool,
}

impl BlinklyApp<ThreadTimer> {
    pub fn new(cc: &CreationContext<'_>, settings: AppSettings, initial: Interval) -> Self {
        // Fire events arrive on the timer thread; wake the UI so it drains them.
        let egui_ctx = cc.egui_ctx.clone();
        let timer = ThreadTimer::new(move || egui_ctx.request_repaint());
        Self::with_parts(timer, settings, initial, Box::new(NativeDialogs))
    }
}

impl<T: Timer> BlinklyApp<T> {
    pub fn with_parts(
        timer: T,
        settings: AppSettings,
        initial: Interval,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let surface = ConfigSurface::new(initial, settings.preset_intervals());
        Self {
            cycle: ReminderCycle::new(timer, initial),
            surface,
            settings,
            notifier,
            events: Vec::new(),
            focus_overlay: false,
            closing: false,
        }
    }

    pub fn ui(&mut self, ctx: &egui::Context) {
        self.drain_events();
        self.handle_close_request(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("Set Reminder Interval in Minutes:").size(16.0));

                let entry = egui::TextEdit::singleline(self.surface.entry_mut())
                    .desired_width(80.0)
                    .font(egui::TextStyle::Heading);
                if ui.add(entry).changed() {
                    self.surface.sync(&mut self.cycle);
                }

                ui.horizontal_wrapped(|ui| {
                    let presets = self.surface.presets().to_vec();
                    for preset in presets {
                        if ui.small_button(format!("{preset} min")).clicked() {
                            self.surface.apply_preset(preset);
                            self.surface.sync(&mut self.cycle);
                        }
                    }
                });

                ui.add_space(6.0);
                if ui.button(RichText::new("Start Blinkly").size(16.0)).clicked() {
                    self.start();
                }
                if ui.button(RichText::new("Close Blinkly").size(16.0)).clicked() {
                    self.request_close(ctx);
                }

                ui.separator();
                ui.label(self.status());
            });
        });

        self.show_overlay(ctx);

        if self.cycle.phase() == Phase::Idle {
            // Keep the countdown in the status line moving.
            ctx.request_repaint_after(Duration::from_secs(1));
        }
    }

    fn start(&mut self) {
        match self.surface.submit(&mut self.cycle) {
            Ok(interval) => {
                if self.settings.confirm_start {
                    self.notifier.info(
                        START_TITLE,
                        &format!("Blinkly set for {interval} minutes."),
                    );
                }
            }
            Err(err) => {
                log::warn!("Rejected interval: {err}");
                self.notifier.error(INVALID_TITLE, INVALID_MESSAGE);
            }
        }
    }

    fn drain_events(&mut self) {
        self.cycle.drain_timer_events(&mut self.events);
        for evt in self.events.drain(..) {
            match evt {
                TimerEvent::Fired(id) => {
                    if self.cycle.on_timer_fire(id) {
                        self.focus_overlay = true;
                    }
                }
            }
        }
    }

    fn show_overlay(&mut self, ctx: &egui::Context) {
        if self.cycle.phase() != Phase::Showing {
            return;
        }
        let text = OverlayText {
            message: &self.settings.message,
            dismiss_label: &self.settings.dismiss_label,
        };
        let focus = std::mem::take(&mut self.focus_overlay);
        if overlay::show(ctx, text, focus) {
            self.cycle.dismiss();
        }
    }

    fn status(&self) -> String {
        match self.cycle.phase() {
            Phase::Stopped => "Not running".to_string(),
            Phase::Idle => {
                let secs = self.cycle.remaining().unwrap_or_default().as_secs();
                format!(
                    "Next reminder in {:02}:{:02}, then every {} min",
                    secs / 60,
                    secs % 60,
                    self.cycle.interval()
                )
            }
            Phase::Showing => "Reminder showing".to_string(),
        }
    }

    fn confirm_exit(&self) -> bool {
        !self.settings.confirm_exit || self.notifier.confirm(EXIT_TITLE, EXIT_MESSAGE)
    }

    /// Ask before closing; on yes the cycle is shut down. Returns whether to close.
    fn allow_close(&mut self) -> bool {
        if self.closing {
            return true;
        }
        if !self.confirm_exit() {
            log::debug!("Close cancelled");
            return false;
        }
        self.shutdown();
        true
    }

    /// Close button: ask, then close the main window.
    fn request_close(&mut self, ctx: &egui::Context) {
        if self.allow_close() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    /// Window manager close: veto it if the user says no.
    fn handle_close_request(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.viewport().close_requested()) && !self.allow_close() {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
        }
    }

    fn shutdown(&mut self) {
        log::info!("Closing Blinkly...");
        self.closing = true;
        self.cycle.cancel_all();
    }
}

impl<T: Timer> Drop for BlinklyApp<T> {
    fn drop(&mut self) {
        self.cycle.cancel_all();
    }
}

impl<T: Timer> eframe::App for BlinklyApp<T> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}
