use anyhow::Result;
use renderer::{FrameSink, FrameTimeline, Pixmap};
use scenepack::SceneRepository;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::bootstrap::{single_run_config, SingleRunConfig};
use crate::cli::{Cli, Command, DefaultsAction, DefaultsCommand};
use crate::defaults;
use crate::paths::AppPaths;
use crate::player::ScenePlayer;
use crate::session;

pub fn run(args: Cli) -> Result<()> {
    initialise_tracing();

    let paths = AppPaths::discover()?;
    tracing::debug!(
        config = %paths.config_dir().display(),
        data = %paths.data_dir().display(),
        cache = %paths.cache_dir().display(),
        "resolved gooshade paths"
    );

    if let Some(command) = args.command {
        return match command {
            Command::Defaults(cmd) => run_defaults(cmd, &paths),
        };
    }

    let repo = SceneRepository::new(paths.scene_roots());
    if let Some(session_path) = args.run.session.as_ref() {
        return session::run_session(&args.run, &repo, session_path, &paths);
    }

    let config = single_run_config(&args.run, &paths)?;
    run_single(&repo, config)
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run_single(repo: &SceneRepository, config: SingleRunConfig) -> Result<()> {
    let pack = repo.resolve(&config.handle)?;
    let mut player = ScenePlayer::from_pack(&pack, config.size)?;
    info!(
        scene = player.label(),
        effect = player.effect(),
        width = config.size.0,
        height = config.size.1,
        "loaded scene"
    );

    let mut frame = Pixmap::new(config.size.0, config.size.1);
    let timeline = FrameTimeline::new(config.fps, config.frames);
    let dt = timeline.frame_interval();

    if let Some(still) = config.still {
        player.advance(still, dt)?;
        player.render(&mut frame);
        let sink = FrameSink::create(&config.output, "still")?;
        sink.submit(0, frame)?;
        sink.finish()?;
        info!(seconds = still, output = %config.output.display(), "wrote still frame");
        return Ok(());
    }

    let sink = FrameSink::create(&config.output, "frame")?;
    for stamp in timeline.stamps() {
        player.advance(stamp.seconds, dt)?;
        player.render(&mut frame);
        sink.submit(stamp.index, frame.clone())?;
    }
    let written = sink.finish()?;
    info!(
        frames = written,
        fps = config.fps,
        output = %config.output.display(),
        "render complete"
    );
    Ok(())
}

fn run_defaults(command: DefaultsCommand, paths: &AppPaths) -> Result<()> {
    match command.action {
        DefaultsAction::Sync(args) => {
            let written = defaults::sync(paths, args.dry_run)?;
            if written.is_empty() {
                println!("all bundled scenes already installed");
            } else {
                let verb = if args.dry_run { "would install" } else { "installed" };
                for path in &written {
                    println!("{verb} {}", path.display());
                }
            }
            Ok(())
        }
        DefaultsAction::List => {
            for status in defaults::scene_statuses(paths) {
                let marker = if status.installed { "✔" } else { "✘" };
                println!("{marker} {:<16} {}", status.name, status.path.display());
            }
            Ok(())
        }
        DefaultsAction::Where => {
            let overview = defaults::describe_paths(paths);
            println!("config: {}", overview.config_dir.display());
            println!("data:   {}", overview.data_dir.display());
            println!("cache:  {}", overview.cache_dir.display());
            for root in &overview.scene_roots {
                println!("scenes: {}", root.display());
            }
            Ok(())
        }
    }
}
