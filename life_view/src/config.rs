// config.rs - Command line arguments and validated configuration

use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use conway::{DEFAULT_HEIGHT, DEFAULT_WIDTH, Preset};

use crate::renderer::DEFAULT_CELL_SIZE;
use crate::{Error, Result};

/// Interactive Conway's Game of Life
#[derive(Parser, Debug)]
#[command(name = "life_view")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Starting pattern: empty, default, random, glider, mwss, blinker, toad,
    /// beacon, pulsar, r-pentomino or gosper-glider-gun
    #[arg(short, long, default_value = "default")]
    pub preset: String,

    /// Seed for presets with a random component (defaults to the clock)
    #[arg(long)]
    pub seed: Option<u32>,

    /// Grid width in cells
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Grid height in cells
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Cell edge length in pixels
    #[arg(long, default_value_t = DEFAULT_CELL_SIZE)]
    pub cell_size: u32,

    /// Generations advanced per rendered frame
    #[arg(short, long, default_value_t = 1)]
    pub steps: u32,

    /// Start paused instead of playing
    #[arg(long)]
    pub paused: bool,

    /// Step with one cooperative task per row
    #[arg(long)]
    pub row_tasks: bool,
}

/// Validated start-up settings.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub preset: Preset,
    pub seed: u32,
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
    pub step_multiplier: u32,
    pub start_paused: bool,
    pub row_tasks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preset: Preset::Default,
            seed: 0,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            step_multiplier: 1,
            start_paused: false,
            row_tasks: false,
        }
    }
}

impl TryFrom<Args> for Config {
    type Error = Error;

    fn try_from(args: Args) -> Result<Self> {
        if args.width == 0 || args.height == 0 {
            return Err(Error::Config(format!(
                "grid must be at least 1x1, got {}x{}",
                args.width, args.height
            )));
        }
        if args.cell_size == 0 {
            return Err(Error::Config("cell size must be at least 1 pixel".into()));
        }

        Ok(Config {
            preset: args.preset.parse()?,
            seed: args.seed.unwrap_or_else(clock_seed),
            width: args.width,
            height: args.height,
            cell_size: args.cell_size,
            step_multiplier: args.steps,
            start_paused: args.paused,
            row_tasks: args.row_tasks,
        })
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.subsec_nanos())
        .unwrap_or_default()
}
