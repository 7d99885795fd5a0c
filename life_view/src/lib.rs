// lib.rs - Visualizer core: packed-grid rendering, frame pacing and pointer input

pub mod app;
pub mod bitgrid;
pub mod config;
pub mod engine;
pub mod error;
pub mod fps;
pub mod interaction;
pub mod renderer;
pub mod scheduler;
pub mod session;
pub mod surface;

pub use app::LifeApp;
pub use bitgrid::Dimensions;
pub use config::{Args, Config};
pub use engine::{Backend, Engine};
pub use error::{Error, Result};
pub use fps::{Clock, FpsMonitor, FpsStats, SystemClock};
pub use renderer::{GridRenderer, Palette};
pub use scheduler::{FrameHandle, FrameHost, Playback, Scheduler};
pub use session::LifeSession;
pub use surface::Surface;
