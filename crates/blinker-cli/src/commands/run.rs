use std::sync::Arc;
use std::time::Duration;

use blinker_core::{
    parse_duration, BellVibrator, Config, ConfigStore, Controller, CycleService, NoVibrator,
    StatusObserver, Vibrator,
};
use clap::Args;

use crate::terminal::{JsonObserver, TerminalObserver};

#[derive(Args)]
pub struct RunArgs {
    /// Work duration: seconds, or with an s/m/h suffix (default: last used)
    #[arg(long)]
    work: Option<String>,
    /// Break duration: seconds, or with an s/m/h suffix (default: last used)
    #[arg(long = "break", value_name = "BREAK")]
    break_time: Option<String>,
    /// Vibration when work ends, 0 to disable (default: last used)
    #[arg(long)]
    vibration: Option<String>,
    /// Stop automatically after this long
    #[arg(long = "for", value_name = "DURATION")]
    run_for: Option<String>,
    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
    /// No desktop notifications and no terminal bell
    #[arg(long)]
    quiet: bool,
}

fn build_vibrator(config: &Config, quiet: bool) -> Arc<dyn Vibrator> {
    if config.notifications.bell && !quiet {
        Arc::new(BellVibrator::new())
    } else {
        Arc::new(NoVibrator)
    }
}

fn build_observer(config: &Config, json: bool, quiet: bool) -> Arc<dyn StatusObserver> {
    let desktop = config.notifications.desktop && !quiet;
    if json {
        Arc::new(JsonObserver::new(desktop))
    } else {
        Arc::new(TerminalObserver::new(desktop))
    }
}

pub async fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let run_for = args
        .run_for
        .as_deref()
        .map(|d| parse_duration("for", d))
        .transpose()?;

    let store = ConfigStore::open()?;
    let config = store.config().clone();
    let service = CycleService::new(
        build_vibrator(&config, args.quiet),
        build_observer(&config, args.json, args.quiet),
    );
    let mut controller = Controller::new(store, service);

    let prefill = controller.prefill()?;
    let work = args.work.unwrap_or_else(|| prefill.work_secs.to_string());
    let break_time = args
        .break_time
        .unwrap_or_else(|| prefill.break_secs.to_string());
    let vibration = args
        .vibration
        .unwrap_or_else(|| prefill.vibration_secs.to_string());

    controller.start(&work, &break_time, &vibration).await?;

    match run_for {
        Some(secs) => {
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(secs)) => {}
                signal = tokio::signal::ctrl_c() => signal?,
            }
        }
        None => tokio::signal::ctrl_c().await?,
    }

    controller.stop().await;
    if !args.json {
        println!();
    }
    Ok(())
}
