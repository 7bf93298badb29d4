use std::io;
use std::thread;

use anyhow::{Context, anyhow};
use eframe::{NativeOptions, egui};
use egui::ViewportBuilder;
use tokio::sync::oneshot;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use battle_replay::cli::{Args, parse_args};
use battle_replay::gui::ReplayApp;
use battle_replay::headless::run_headless;
use battle_replay::models::{BattleRequest, PlaybackSettings};
use battle_replay::playback::ResultOrchestrator;
use battle_replay::resolver::{CombatResolver, HttpCombatResolver, RecordingResolver, ReplayFileResolver};
use battle_replay::utils::{auto_save_playback_settings, load_my_character_id, load_playback_settings, save_my_character_id};

type BoxedResolver = Box<dyn CombatResolver>;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = parse_args();
    let settings = playback_settings(&args);
    let (request, resolver) = choose_resolver(&args, &settings)?;

    let mut orchestrator = ResultOrchestrator::new(resolver, request, settings);

    if args.headless {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to start the playback runtime")?;
        let outcome = runtime.block_on(run_headless(&mut orchestrator, &mut io::stdout()))?;
        info!(winner = %outcome.winner, lines = outcome.lines_printed, "headless playback complete");
        return Ok(());
    }

    run_viewer(orchestrator)
}

/// Saved settings with command-line overrides applied. Overrides are persisted.
fn playback_settings(args: &Args) -> PlaybackSettings {
    let mut settings = load_playback_settings();
    let mut changed = false;

    if let Some(server) = &args.server {
        settings.server_url = server.clone();
        changed = true;
    }
    if let Some(speed) = args.speed {
        settings.set_playback_speed(speed);
        changed = true;
    }

    if changed {
        auto_save_playback_settings(&settings);
    }
    settings
}

fn choose_resolver(args: &Args, settings: &PlaybackSettings) -> anyhow::Result<(BattleRequest, BoxedResolver)> {
    if let Some(path) = &args.replay {
        let replay = ReplayFileResolver::open(path)?;
        return Ok((replay.request(), Box::new(replay)));
    }

    let attacker_id = args
        .attacker
        .or_else(load_my_character_id)
        .context("no attacker given: pass --attacker or remember a character with --remember")?;
    let defender_id = args.defender.context("no defender given: pass --defender")?;

    if args.remember {
        if let Err(e) = save_my_character_id(attacker_id) {
            warn!("Failed to remember character {}: {}", attacker_id, e);
        }
    }

    let request = BattleRequest { attacker_id, defender_id };
    let http = HttpCombatResolver::new(settings.server_url.clone());
    let resolver: BoxedResolver = match &args.save {
        Some(path) => Box::new(RecordingResolver::new(http, path.clone())),
        None => Box::new(http),
    };
    Ok((request, resolver))
}

fn run_viewer(orchestrator: ResultOrchestrator<BoxedResolver>) -> anyhow::Result<()> {
    let updates = orchestrator.subscribe();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    // Spawn the background thread that drives playback.
    let playback = thread::spawn(move || playback_thread(orchestrator, shutdown_rx));

    let native_options = NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([560.0, 520.0])
            .with_min_inner_size([360.0, 280.0])
            .with_resizable(true),
        ..Default::default()
    };

    let viewer = eframe::run_native(
        "Battle Replay",
        native_options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(ReplayApp::new(updates)))
        }),
    );

    // Closing the window tears the playback down.
    drop(shutdown_tx);
    if playback.join().is_err() {
        error!("playback thread panicked");
    }

    viewer.map_err(|e| anyhow!("viewer failed: {}", e))
}

fn playback_thread(mut orchestrator: ResultOrchestrator<BoxedResolver>, mut shutdown: oneshot::Receiver<()>) {
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to start the playback runtime: {}", e);
            return;
        }
    };

    runtime.block_on(async {
        let outcome = tokio::select! {
            outcome = orchestrator.run() => Some(outcome),
            _ = &mut shutdown => None,
        };

        match outcome {
            Some(Ok(_)) => {
                // Frame clocks keep holding the final poses until the window closes
                let _ = shutdown.await;
            }
            Some(Err(e)) => {
                warn!("Playback ended early: {}", e.describe());
                let _ = shutdown.await;
            }
            None => info!("viewer closed mid-playback"),
        }
        orchestrator.teardown();
    });
}
