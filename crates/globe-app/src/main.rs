//! The binary entry point for the globe viewer.

use std::process::ExitCode;

use clap::Parser;
use globe_app::game_loop::GameLoop;
use globe_app::platform::{PlatformDirs, PlatformError};
use globe_app::session::Session;
use globe_config::{CliArgs, Config};
use globe_surface::{BakeError, bake_equirect, write_png};
use tracing::info;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error(transparent)]
    Bake(#[from] BakeError),
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("globe: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), AppError> {
    let dirs = match &args.config {
        Some(root) => PlatformDirs::resolve_with_root(root),
        None => PlatformDirs::resolve()?,
    };
    dirs.create_dirs()?;

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(args);

    globe_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!(
        config_dir = %dirs.config_dir.display(),
        frames = config.app.frames,
        seed = config.surface.seed,
        "globe viewer starting"
    );

    let mut session = Session::new(&config, args.select.clone());
    let mut game_loop = GameLoop::new(config.app.tick_rate_hz);
    let frame_time = game_loop.fixed_dt();
    for _ in 0..config.app.frames {
        game_loop.tick(frame_time, |dt, _| session.step(dt as f32), |_| {});
    }

    let summary = session.summary();
    let choreographer = session.choreographer();
    info!(
        steps = summary.steps,
        sim_time = game_loop.total_sim_time(),
        approaches = summary.approaches,
        reached_street_level = summary.reached_street_level,
        returned_home = summary.returned_home,
        state = ?choreographer.state(),
        "session finished"
    );
    if let Some(ground) = session.ground() {
        info!(
            land_mask = ground.land_mask,
            elevation = ground.elevation_offset,
            "surface below camera"
        );
    }

    if let Some(path) = &args.bake {
        let (width, height) = (config.app.bake_width, config.app.bake_height);
        let pixels = bake_equirect(
            session.generator(),
            width,
            height,
            config.choreography.default_distance,
        );
        write_png(path, width, height, &pixels)?;
    }

    Ok(())
}
