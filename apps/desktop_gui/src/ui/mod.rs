//! UI layer for the intake window: form rendering, display strings and fonts.

pub mod app;
pub mod fonts;
pub mod i18n;

pub use app::{IntakeApp, StartupConfig};
