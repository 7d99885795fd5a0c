// bitgrid.rs - Decoding of the engine's bit-packed cell bytes

/// Grid size as reported by the engine. Fixed for the lifetime of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Bytes needed for one bit per cell.
    pub fn packed_len(&self) -> usize {
        self.cell_count().div_ceil(8)
    }
}

/// Row-major linear index of a cell.
///
/// Callers guarantee `row < height` and `column < width`; nothing is checked
/// because this runs once per cell per frame.
#[inline]
pub fn linear_index(row: u32, column: u32, width: u32) -> usize {
    row as usize * width as usize + column as usize
}

/// Whether bit `index % 8` of byte `index / 8` is set.
///
/// `bytes` must be at least `index / 8 + 1` long.
#[inline]
pub fn is_set(index: usize, bytes: &[u8]) -> bool {
    let mask = 1u8 << (index % 8);
    bytes[index / 8] & mask == mask
}

/// Number of live cells in a packed view.
///
/// Engines only expose their cells as packed bytes through [`crate::Engine`],
/// so the session counts bits here rather than asking the engine.
/// Padding bits past the last cell must be zero.
pub fn population(bytes: &[u8]) -> usize {
    bytes.iter().map(|byte| byte.count_ones() as usize).sum()
}
