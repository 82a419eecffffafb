//! App module - contains the main application state and logic

mod navigation;
mod profile;

pub use navigation::Navigator;
pub use profile::ProfileView;

use crate::api::DataSource;
use crate::settings::Settings;
use crate::storage::CredentialStore;
use crate::theme;
use eframe::egui;
use std::path::PathBuf;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) store: CredentialStore,
    pub(crate) profile: ProfileView,
    pub(crate) nav: Navigator,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) data_dir: PathBuf,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        store: CredentialStore,
        source: DataSource,
        runtime: tokio::runtime::Runtime,
        data_dir: PathBuf,
    ) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Light);

        // Phosphor icons for avatar and email glyphs
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        Self {
            store,
            profile: ProfileView::new(source),
            nav: Navigator::new(),
            runtime,
            data_dir,
            window_pos: None,
            window_size: None,
            needs_center: false,
        }
    }

    /// Persist window geometry; environment overrides are never written back
    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            ..Settings::load_file(&self.data_dir)
        };
        settings.save(&self.data_dir);
    }

    /// Kick off a profile fetch if the profile screen just became visible
    pub fn handle_focus(&mut self, ctx: &egui::Context) {
        if self.nav.take_profile_focus() {
            self.profile
                .on_become_visible(&self.store, self.runtime.handle(), ctx);
        }
    }
}
