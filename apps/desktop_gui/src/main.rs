mod backend_bridge;
mod controller;
mod ui;

use crossbeam_channel::bounded;
use eframe::egui;
use intake_core::{load_settings, AttachmentGate};
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};
use crate::ui::{IntakeApp, StartupConfig};

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // One submission at a time; the extra slot only absorbs a double click.
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(2);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);

    let startup = match load_settings(None) {
        Ok(settings) => {
            tracing::info!(endpoint = %settings.endpoint, "loaded settings");
            let gate = AttachmentGate::new(settings.verify_pdf_signature);
            backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);
            StartupConfig {
                gate,
                config_error: None,
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "intake settings unavailable; submission disabled");
            StartupConfig {
                gate: AttachmentGate::default(),
                config_error: Some(UiError::from_config_error(&err)),
            }
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("EP Renewal")
            .with_inner_size([720.0, 860.0])
            .with_min_inner_size([520.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "EP Renewal",
        options,
        Box::new(|cc| {
            ui::fonts::install_cjk_fallback(&cc.egui_ctx);
            Ok(Box::new(IntakeApp::new(cmd_tx, ui_rx, startup)))
        }),
    )
}
