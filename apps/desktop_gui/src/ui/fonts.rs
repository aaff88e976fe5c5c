//! Fallback glyphs for the Japanese and Chinese labels. egui's bundled fonts
//! carry no CJK coverage, so a system font is appended to every family.

use std::{ffi::OsString, path::PathBuf, sync::Arc};

use eframe::egui;
use tracing::{info, warn};

pub const CJK_FONT_ENV: &str = "EP_RENEWAL_CJK_FONT";
const CJK_FONT_NAME: &str = "cjk-fallback";

const SYSTEM_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "C:\\Windows\\Fonts\\YuGothM.ttc",
];

pub fn install_cjk_fallback(ctx: &egui::Context) {
    let found = candidate_paths(std::env::var_os(CJK_FONT_ENV))
        .into_iter()
        .find_map(|path| std::fs::read(&path).ok().map(|bytes| (path, bytes)));
    let Some((path, bytes)) = found else {
        warn!("no CJK font found; set {CJK_FONT_ENV} to render Japanese and Chinese labels");
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        CJK_FONT_NAME.to_owned(),
        Arc::new(egui::FontData::from_owned(bytes)),
    );
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(CJK_FONT_NAME.to_owned());
    }
    ctx.set_fonts(fonts);
    info!(path = %path.display(), "installed CJK fallback font");
}

/// Explicit override first, then well-known system locations.
fn candidate_paths(override_path: Option<OsString>) -> Vec<PathBuf> {
    override_path
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
        .into_iter()
        .chain(SYSTEM_CANDIDATES.iter().map(PathBuf::from))
        .collect()
}
