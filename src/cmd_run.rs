//! `run` subcommand handler.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use formpilot_config::Config;
use formpilot_dom::Page;
use formpilot_runloop::ControlLoop;

use crate::cmd_profile::open_store;
use crate::pages::{load_page, PageSequence};

/// Run the fill loop over `pages` until it succeeds, stops or is
/// interrupted.
pub(crate) async fn cmd_run(config: &Config, pages: Vec<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let mut pages = pages.into_iter();
    let first = pages.next().ok_or("at least one page is required")?;
    let page = Arc::new(Page::new(load_page(&first)?));
    let sequence = Arc::new(PageSequence::new(pages));
    page.on_activate(sequence.clone());

    let store = Arc::new(open_store(config).await?);
    let control = Arc::new(ControlLoop::new(page, store, config));
    info!(page = %first.display(), "Starting fill loop");

    let mut handle = control.spawn()?;
    tokio::select! {
        result = &mut handle => result?,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted");
            control.stop();
            handle.await?;
        }
    }

    for entry in control.logs() {
        println!("{}", entry);
    }
    println!(
        "\nFinished: {} after {} tick(s), {} page(s) not reached.",
        control.status(),
        control.ticks(),
        sequence.remaining()
    );
    Ok(())
}
