use anyhow::Result;
use winit::dpi::LogicalSize;

use pole_engine::device::GpuInit;
use pole_engine::logging::{init_logging, LoggingConfig};
use pole_engine::window::{Runtime, RuntimeConfig};
use pole_plot::{PlotApp, PlotConfig};

const TITLE: &str = "pole";

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let font = load_font();
    if let Some((path, _)) = &font {
        log::info!("label font: {path}");
    }

    let app = PlotApp::new(TITLE, PlotConfig::default(), font.as_ref().map(|(_, bytes)| bytes.as_slice()));

    log::info!("drag the markers; R or Backspace resets, Escape quits");
    Runtime::run(
        RuntimeConfig {
            title: TITLE.to_string(),
            initial_size: LogicalSize::new(900.0, 700.0),
        },
        GpuInit::default(),
        app,
    )
}

/// First readable font from the usual system locations. `POLE_FONT` wins
/// when set.
fn load_font() -> Option<(String, Vec<u8>)> {
    let from_env = std::env::var("POLE_FONT").ok();
    from_env
        .iter()
        .map(String::as_str)
        .chain([
            "/usr/share/fonts/TTF/DejaVuSans-Oblique.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans-Oblique.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/noto/NotoSans-Regular.ttf",
            "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
            "/System/Library/Fonts/Supplemental/Arial Italic.ttf",
            "C:\\Windows\\Fonts\\ariali.ttf",
        ])
        .find_map(|p| std::fs::read(p).ok().map(|bytes| (p.to_string(), bytes)))
}
