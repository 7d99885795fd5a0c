// lib.rs - Bit-packed Game of Life engine, patterns and row-coroutine stepping

mod coro;
mod error;
mod patterns;
mod universe;

pub use coro::CoroUniverse;
pub use error::{Error, Result};
pub use patterns::{PATTERNS, Pattern, Preset};
pub use universe::{DEFAULT_HEIGHT, DEFAULT_WIDTH, Universe, next_state, packed_len};
