mod cancel;
mod cli;
mod command;
mod config;
mod device;
mod drive;
mod sequencer;
mod state;
mod stream;

use anyhow::{bail, Result};
use cancel::CancelToken;
use config::MotionConfig;
use device::sim::SimDevice;
use device::Device;
use sequencer::Sequencer;
use stream::StreamWatcher;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let invocation = match cli::parse() {
        Ok(invocation) => invocation,
        // Clap renders usage/help itself with the right exit code.
        Err(e) => e.exit(),
    };

    let device = open_device(&invocation)?;
    let config = MotionConfig::default();

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupt received, stopping");
                cancel.cancel();
            }
        });
    }

    // Full volume on connect so feedback commands are audible by default.
    device.set_audio_volume(255).await?;

    if let Some(path) = &invocation.stream {
        let mut watcher =
            StreamWatcher::new(path.clone(), device.as_ref(), config, cancel.clone());
        watcher.run().await?;
        info!("Stream session ended (final heading {:.0})", watcher.state().heading);
    } else if invocation.commands.is_empty() {
        info!("Nothing to do (no action flags given; see --help)");
    } else {
        let mut sequencer = Sequencer::new(device.as_ref(), config, cancel.clone());
        sequencer.run(&invocation.commands).await;
        info!("Sequence ended (final heading {:.0})", sequencer.state().heading);
    }

    // However the session ended, never leave the droid rolling.
    if let Err(e) = device.stop_rolling().await {
        error!("Failed to stop the droid during shutdown: {e}");
    }

    Ok(())
}

fn open_device(invocation: &cli::Invocation) -> Result<Box<dyn Device>> {
    if invocation.sim {
        info!("Using simulated droid");
        return Ok(Box::new(SimDevice::new()));
    }
    // Hardware transports plug in behind the Device trait; this build links
    // none, so discovery cannot succeed.
    bail!("no droid discovered (no hardware transport in this build; rerun with --sim)")
}
