#![windows_subsystem = "windows"]

use std::{error::Error, io::Write, path::PathBuf, process};

#[cfg(target_os = "linux")]
use iced::window::settings::PlatformSpecific;
use iced::{Settings, Size};
use tracing::error;

use fractalis_ui::{component::text, font, theme};

use fractalis_gui::{
    config::Config as GuiConfig,
    dir::FractalisDirectory,
    gui::{Config, GUI},
    logger::parse_log_level,
    VERSION,
};

#[derive(Debug, PartialEq)]
enum Arg {
    DatadirPath(FractalisDirectory),
}

fn parse_args(args: Vec<String>) -> Result<Vec<Arg>, Box<dyn Error>> {
    let mut res = Vec::new();

    if args.len() > 1 && (args[1] == "--version" || args[1] == "-v") {
        println!("{}", VERSION);
        process::exit(0);
    }

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        println!(
            r#"
Usage: fractalis-gui [OPTIONS]

Options:
    --datadir <PATH>    Path of fractalis datadir
    -v, --version       Display fractalis-gui version
    -h, --help          Print help
        "#
        );
        process::exit(0);
    }

    for (i, arg) in args.iter().enumerate().skip(1) {
        if arg == "--datadir" {
            if let Some(a) = args.get(i + 1) {
                res.push(Arg::DatadirPath(FractalisDirectory::new(PathBuf::from(a))));
            } else {
                return Err("missing arg to --datadir".into());
            }
        } else if arg.starts_with('-') {
            return Err(format!("unknown option '{}'", arg).into());
        }
    }

    Ok(res)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = parse_args(std::env::args().collect())?;
    let datadir = match args.as_slice() {
        [] => FractalisDirectory::new_default()?,
        [Arg::DatadirPath(datadir)] => datadir.clone(),
        _ => {
            return Err("Unknown args combination".into());
        }
    };

    if !datadir.exists() {
        datadir.init()?;
    }

    let gui_config = GuiConfig::from_file_or_default(&datadir.config_file())?;
    let log_level = match parse_log_level()? {
        Some(level) => level,
        None => gui_config.log_level()?,
    };

    setup_panic_hook();

    let settings = Settings {
        id: Some("Fractalis".to_string()),
        antialiasing: true,

        default_text_size: text::P1_SIZE.into(),
        default_font: font::REGULAR,
        fonts: Vec::new(),
    };

    #[allow(unused_mut)]
    let mut window_settings = iced::window::Settings {
        size: Size {
            width: 1200.0,
            height: 850.0,
        },
        position: iced::window::Position::Centered,
        min_size: Some(Size {
            width: 800.0,
            height: 600.0,
        }),
        ..Default::default()
    };

    #[cfg(target_os = "linux")]
    {
        window_settings.platform_specific = PlatformSpecific {
            application_id: "Fractalis".to_string(),
            ..Default::default()
        };
    }

    let config = Config {
        datadir,
        gui_config,
        log_level,
    };

    if let Err(e) = iced::application(GUI::title, GUI::update, GUI::view)
        .theme(|_| theme::Theme::default())
        .subscription(GUI::subscription)
        .settings(settings)
        .window(window_settings)
        .run_with(move || GUI::new(config))
    {
        error!("{}", e);
        Err(format!("Failed to launch UI: {}", e).into())
    } else {
        Ok(())
    }
}

// A panic in any thread should stop the main thread, and print the panic.
fn setup_panic_hook() {
    std::panic::set_hook(Box::new(move |panic_info| {
        let file = panic_info
            .location()
            .map(|l| l.file())
            .unwrap_or_else(|| "'unknown'");
        let line = panic_info
            .location()
            .map(|l| l.line().to_string())
            .unwrap_or_else(|| "'unknown'".to_string());

        let bt = backtrace::Backtrace::new();
        let info = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned());
        error!(
            "panic occurred at line {} of file {}: {:?}\n{:?}",
            line, file, info, bt
        );

        let _ = std::io::stdout().flush();
        std::process::exit(1);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split(' ').map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        assert!(parse_args(args("fractalis-gui --datadir")).is_err());
        assert!(parse_args(args("fractalis-gui --meth")).is_err());
        assert_eq!(Some(vec![]), parse_args(args("fractalis-gui")).ok());
        assert_eq!(
            Some(vec![Arg::DatadirPath(FractalisDirectory::new(PathBuf::from(
                "hello"
            )))]),
            parse_args(args("fractalis-gui --datadir hello")).ok()
        );
    }
}
