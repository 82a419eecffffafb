#![windows_subsystem = "windows"]
//! Rabbit Profile - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod api;
mod app;
mod catalog;
mod constants;
mod error;
mod settings;
mod storage;
mod theme;
mod types;
mod ui;
mod utils;

use api::DataSource;
use app::App;
use constants::*;
use eframe::egui;
use settings::Settings;
use storage::CredentialStore;
use tracing::{error, info};
use types::*;
use ui::components;
use utils::{display_or_placeholder, format_updated_at, get_data_dir};

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, EnvFilter, prelude::*};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "rabbit-profile.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rabbit_profile=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

/// Build the configured data source, falling back to the default URL if the
/// configured one does not parse
fn build_source(settings: &Settings) -> DataSource {
    match DataSource::from_settings(settings) {
        Ok(source) => source,
        Err(e) => {
            error!(error = %e, api_url = %settings.api_url, "Invalid profile service config, using default URL");
            let fallback = Settings {
                api_url: DEFAULT_API_URL.to_string(),
                ..settings.clone()
            };
            match DataSource::from_settings(&fallback) {
                Ok(source) => source,
                Err(e) => panic!("Failed to build profile client: {}", e),
            }
        }
    }
}

fn main() -> eframe::Result<()> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Rabbit Profile starting");

    let store_path = data_dir.join("credentials.db");
    let store = match CredentialStore::open(&store_path) {
        Ok(store) => {
            info!(path = %store_path.display(), "Credential store opened");
            store
        }
        Err(e) => {
            error!(error = %e, path = %store_path.display(), "Failed to open credential store");
            panic!("Failed to open credential store: {}", e);
        }
    };

    let settings = Settings::load(&data_dir);
    let source = build_source(&settings);
    info!(
        source = ?source.kind(),
        api_url = %settings.api_url,
        timeout_secs = settings.request_timeout_secs,
        "Profile source ready"
    );

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "Failed to start async runtime");
            panic!("Failed to start async runtime: {}", e);
        }
    };

    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(480.0, 760.0)))
        .with_min_inner_size([400.0, 640.0])
        .with_title(APP_NAME);

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, store, source, runtime, data_dir);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        // Pick up finished fetches before drawing
        self.profile.poll_results();

        self.render_alert(ctx);

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(theme::SPACING_LG as i8)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.set_max_width(theme::CONTENT_WIDTH);
                        match self.nav.current() {
                            Screen::Profile => self.render_profile_screen(ui),
                            Screen::ProfileEdit => self.render_edit_screen(ui),
                        }
                    });
                });
            });

        // Fetch if the profile screen was shown for the first time or navigated back to
        self.handle_focus(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
        self.save_settings();
    }
}

// ============================================================================
// SCREENS
// ============================================================================

impl App {
    fn render_profile_screen(&mut self, ui: &mut egui::Ui) {
        let snapshot = self.profile.snapshot().cloned();
        let (nickname, email) = snapshot
            .as_ref()
            .map(|s| (s.nickname.as_str(), s.email.as_str()))
            .unwrap_or(("", ""));
        let selections = snapshot.as_ref().map(|s| s.selections).unwrap_or_default();

        // Account card
        ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
            components::section_heading(ui, "Account");
        });
        theme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                components::avatar(ui, theme::AVATAR_SIZE);
                ui.add_space(theme::SPACING_SM);
                components::nickname_plate(ui, display_or_placeholder(nickname));
                ui.add_space(theme::SPACING_SM);
                ui.label(
                    egui::RichText::new(format!(
                        "{}  {}",
                        egui_phosphor::regular::ENVELOPE_SIMPLE,
                        display_or_placeholder(email)
                    ))
                    .size(theme::FONT_BODY)
                    .color(theme::TEXT_PRIMARY),
                );
            });
        });

        ui.add_space(theme::SPACING_SM);
        self.render_status_line(ui, snapshot.as_ref());
        ui.add_space(theme::SPACING_MD);

        // Category card
        ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
            components::section_heading(ui, "Crimes you want to avoid");
        });
        theme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(theme::SPACING_MD, theme::SPACING_MD);
                for (category, active) in selections.entries() {
                    components::category_chip(ui, category, active);
                }
            });
        });

        ui.add_space(theme::SPACING_LG);
        let edit = ui.add(
            theme::button_accent(format!("{}  Edit", egui_phosphor::regular::PENCIL_SIMPLE))
                .min_size(egui::vec2(theme::EDIT_BUTTON_WIDTH, 0.0)),
        );
        if edit.clicked() {
            self.profile.on_edit_pressed(&mut self.nav);
        }
    }

    fn render_status_line(&self, ui: &mut egui::Ui, snapshot: Option<&ProfileSnapshot>) {
        let caption = |text: String, color: egui::Color32| {
            egui::RichText::new(text).size(theme::FONT_CAPTION).color(color)
        };

        match self.profile.load_state() {
            LoadState::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(caption("Loading profile...".into(), theme::TEXT_MUTED));
                });
            }
            LoadState::NotAuthenticated => {
                ui.label(caption(
                    format!("{}  Sign in to see your profile.", egui_phosphor::regular::LOCK_SIMPLE),
                    theme::TEXT_ERROR,
                ));
            }
            LoadState::Loaded | LoadState::Failed => {
                if let Some(snap) = snapshot {
                    let mut text = format_updated_at(&snap.fetched_at);
                    if self.profile.source_kind() == DataSourceKind::Static {
                        text.push_str(" (demo profile)");
                    }
                    ui.label(caption(text, theme::TEXT_MUTED));
                }
            }
            LoadState::Idle => {}
        }
    }

    fn render_edit_screen(&mut self, ui: &mut egui::Ui) {
        ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
            components::section_heading(ui, "Edit profile");
        });
        theme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                egui::RichText::new("Profile editing is done from the Rabbit mobile app.")
                    .size(theme::FONT_BODY)
                    .color(theme::TEXT_MUTED),
            );
        });
        ui.add_space(theme::SPACING_LG);
        let back = ui.add(theme::button(format!("{}  Back", egui_phosphor::regular::ARROW_LEFT)));
        if back.clicked() {
            self.nav.navigate(Screen::Profile);
        }
    }

    // ========================================================================
    // ALERT MODAL
    // ========================================================================

    fn render_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.profile.alert().map(str::to_owned) else {
            return;
        };

        let modal = egui::Modal::new(egui::Id::new("fetch_error_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(120))
            .frame(theme::modal_frame());
        let response = modal.show(ctx, |ui| {
            ui.set_max_width(300.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(egui_phosphor::regular::WARNING_CIRCLE)
                        .size(32.0)
                        .color(theme::ACCENT),
                );
                ui.add_space(theme::SPACING_SM);
                ui.label(
                    egui::RichText::new("Error")
                        .size(theme::FONT_HEADING)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                );
                ui.label(egui::RichText::new(&message).color(theme::TEXT_MUTED));
                ui.add_space(theme::SPACING_MD);
                if ui.add(theme::button_accent("OK")).clicked() {
                    self.profile.dismiss_alert();
                }
            });
        });
        if response.should_close() {
            self.profile.dismiss_alert();
        }
    }
}
