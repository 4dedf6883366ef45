//! Native entry point: replay a pointer script and write the final frame as PNG.
//!
//! Usage: `inkboard [config.json] [script.json]`

use inkboard_app::{AppConfig, AppResult, Script, Session};
use std::path::{Path, PathBuf};

fn main() {
    env_logger::init();
    log::info!("Starting Inkboard");

    if let Err(e) = pollster::block_on(run()) {
        log::error!("{e}");
        eprintln!("inkboard: {e}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let config_path = args.next();
    let script_path = args.next();

    let (config, base) = match &config_path {
        Some(path) => (AppConfig::load(path)?, parent_dir(path)),
        None => (AppConfig::default(), PathBuf::from(".")),
    };
    let fonts = config.load_fonts(&base)?;
    let mut session = Session::offline(&config, fonts)?;

    if let Some(path) = &script_path {
        let script = Script::load(path)?;
        let report = script.run(&mut session, &parent_dir(path)).await?;
        for answer in &report.answers {
            println!("{answer}");
        }
    }

    let png = session.frame_png()?;
    let output = base.join(&config.output);
    std::fs::write(&output, png)?;
    log::info!("Wrote frame to {}", output.display());
    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
