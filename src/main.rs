use std::path::PathBuf;

use anyhow::{Context as _, bail};
use snapmark::capture::FileRelay;
use snapmark::capture::download::{download_dir, save_download};
use snapmark::config::OverlayConfig;
use snapmark::domain::Viewport;
use snapmark::page::HeadlessPage;
use snapmark::render::FontBook;
use snapmark::session::{Injection, Msg, OverlaySession, driver};

const USAGE: &str = "usage: snapmark <script.json> <screenshot.png>";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let (Some(script_path), Some(screenshot)) = (args.next(), args.next()) else {
        bail!(USAGE);
    };

    let config = OverlayConfig::load();
    let script = std::fs::read(&script_path)
        .with_context(|| format!("reading {}", script_path.display()))?;
    let script: Vec<Msg> = serde_json::from_slice(&script)
        .with_context(|| format!("parsing {}", script_path.display()))?;

    // The page is as large as the screenshot the relay will hand back
    let (width, height) = image::image_dimensions(&screenshot)
        .with_context(|| format!("reading {}", screenshot.display()))?;
    let page = HeadlessPage::new(Viewport::new(width, height));
    let fonts = FontBook::from_config(&config.fonts);
    let downloads = download_dir(&config);

    let mut session = match OverlaySession::inject(page, config, fonts) {
        Injection::Started(session) => session,
        Injection::AlreadyActive(_) => bail!("overlay is already active"),
        Injection::Failed(_) => bail!("could not set up the overlay"),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let relay = FileRelay::new(screenshot);
    runtime.block_on(driver::replay(&mut session, &relay, script));

    if !session.is_destroyed() {
        log::info!("Script ended with the overlay open, cancelling");
        session.cancel();
    }

    for alert in session.page().alerts() {
        eprintln!("{alert}");
    }
    for download in session.page().downloads() {
        let path = save_download(&downloads, &download.filename, &download.bytes)?;
        println!("{}", path.display());
    }
    Ok(())
}
