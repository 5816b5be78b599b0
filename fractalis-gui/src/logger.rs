use crate::dir::FractalisDirectory;
use std::{error::Error, fs::File, str::FromStr, sync::Arc};
use tracing_subscriber::{
    filter::{self, LevelFilter},
    fmt::writer::BoxMakeWriter,
    prelude::*,
};

const GUI_LOG_FILE_NAME: &str = "fractalis-gui.log";

/// Targets of the windowing and rendering stack, far too verbose at debug level.
const SILENCED_TARGETS: &[&str] = &[
    "iced_wgpu",
    "iced_winit",
    "iced_graphics",
    "iced_runtime",
    "iced_core",
    "iced_tiny_skia",
    "wgpu_core",
    "wgpu_hal",
    "naga",
    "winit",
    "mio",
    "cosmic_text",
    "polling",
    "calloop",
    "async_io",
    "zbus",
    "tokio",
];

pub fn setup_logger(
    log_level: filter::LevelFilter,
    datadir: FractalisDirectory,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut log_path = datadir.path().to_path_buf();
    log_path.push(GUI_LOG_FILE_NAME);

    let file = File::create(log_path)?;
    let writer = BoxMakeWriter::new(Arc::new(file));

    let file_log = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_file(false);

    let stdout_log = tracing_subscriber::fmt::layer().pretty().with_file(false);

    tracing_subscriber::registry()
        .with(
            stdout_log
                .and_then(file_log)
                .with_filter(log_level)
                .with_filter(filter::filter_fn(|metadata| {
                    !is_silenced(metadata.target())
                })),
        )
        .try_init()?;

    Ok(())
}

fn is_silenced(target: &str) -> bool {
    SILENCED_TARGETS.iter().any(|t| target.starts_with(t))
}

/// Parse LOG_LEVEL environment variable.
pub fn parse_log_level() -> Result<Option<LevelFilter>, Box<dyn Error>> {
    if let Ok(l) = std::env::var("LOG_LEVEL") {
        Ok(Some(LevelFilter::from_str(&l)?))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendering_targets_are_silenced() {
        assert!(is_silenced("wgpu_core::device"));
        assert!(is_silenced("iced_winit"));
        assert!(!is_silenced("fractalis::session"));
        assert!(!is_silenced("fractalis_gui::gui"));
    }
}
