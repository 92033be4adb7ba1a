use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "gooshade",
    author,
    version,
    about = "Offline effect-field renderer for gooey, spectrum, depth, and CRT scenes",
    arg_required_else_help = false
)]
pub struct Cli {
    #[command(flatten)]
    pub run: RunArgs,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Scene handle (e.g. `scene://goo-card` or `packs/demo`)
    #[arg(value_name = "HANDLE")]
    pub scene: Option<String>,

    /// Render a session playlist from the supplied TOML file instead.
    #[arg(long, value_name = "PATH")]
    pub session: Option<PathBuf>,

    /// Override the render resolution (e.g. `640x360`).
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    pub size: Option<String>,

    /// Frames per second of the output sequence.
    #[arg(long, value_name = "FPS")]
    pub fps: Option<f32>,

    /// Frame count for a single-scene render.
    #[arg(long, value_name = "COUNT")]
    pub frames: Option<u32>,

    /// Render one frame at the given timestamp instead of a sequence.
    #[arg(long, value_name = "SECONDS")]
    pub still: Option<f32>,

    /// Directory frames are written into.
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Seed for shuffled playlists.
    #[arg(long, value_name = "SEED", default_value_t = 0)]
    pub seed: u64,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage bundled defaults (demo scene packs, paths).
    Defaults(DefaultsCommand),
}

#[derive(Parser, Debug)]
pub struct DefaultsCommand {
    #[command(subcommand)]
    pub action: DefaultsAction,
}

#[derive(Subcommand, Debug)]
pub enum DefaultsAction {
    /// Copy bundled demo scenes into the user data directory.
    Sync(DefaultsSyncArgs),
    /// Show bundled scenes and whether they exist locally.
    List,
    /// Print resolved directories for config, data, and cache roots.
    Where,
}

#[derive(Parser, Debug, Default)]
pub struct DefaultsSyncArgs {
    /// Preview which defaults would be copied without writing to disk.
    #[arg(long)]
    pub dry_run: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}
