//! monosynth - play the voice from the terminal
//!
//! Run with: cargo run --release
//!
//!   A W S E D F T G Y H U J K   chromatic octave
//!   Z / X                       octave down / up
//!   1 - 5                       Bass, Lead, Acid, Pad, Brass
//!   Up / Down, Left / Right     select and adjust a parameter
//!   Space                       reset (panic)
//!   Esc / Q                     quit

mod app;
mod keyboard;
mod ui;

use color_eyre::eyre::{Result as EyreResult, WrapErr};

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    init_logging()?;

    app::run()
}

/// Log to a file; the terminal belongs to the UI.
fn init_logging() -> EyreResult<()> {
    let path = std::env::temp_dir().join("monosynth.log");
    let file = std::fs::File::create(&path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    log::info!("monosynth starting, logging to {}", path.display());
    Ok(())
}
