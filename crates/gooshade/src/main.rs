mod bindings;
mod bootstrap;
mod cli;
mod defaults;
mod paths;
mod player;
mod run;
mod session;

use anyhow::Result;

fn main() -> Result<()> {
    let args = cli::parse();
    run::run(args)
}
