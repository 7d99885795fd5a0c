// main.rs - Conway's Game of Life viewer

use clap::Parser;

use life_view::{Args, Config, LifeApp};

fn main() -> life_view::Result<()> {
    env_logger::init();

    let config = Config::try_from(Args::parse())?;
    LifeApp::run(config)
}
