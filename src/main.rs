use clap::Parser;
use tracing::{error, info};

use sine_rs::audio::render;
use sine_rs::config::Cli;
use sine_rs::device;
use sine_rs::error::Result;
use sine_rs::ui::print_banner;
use sine_rs::utils::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = init_logging() {
        eprintln!("{}", err);
    }

    if let Err(err) = run(cli) {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.into_config()?;
    print_banner(&config.params);

    if let Some(options) = &config.render {
        let summary = render::run(config.params, options)?;
        info!("Final phase: {:.6} rad", summary.final_phase);
        return Ok(());
    }

    let (tx, rx) = crossbeam_channel::bounded::<()>(1);
    ctrlc::set_handler(move || {
        let _ = tx.try_send(());
    })?;

    let stats = device::jack::run(config.params, &config.target, rx)?;
    stats.log_summary();
    Ok(())
}
