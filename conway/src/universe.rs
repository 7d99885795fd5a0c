// universe.rs - Bit-packed toroidal universe for Conway's Game of Life

use fixedbitset::FixedBitSet;
use log::{debug, trace};

// Cell bytes are a view of FixedBitSet's u32 blocks, which only lines bit
// `i % 8` of byte `i / 8` up with cell `i` on little-endian targets.
#[cfg(target_endian = "big")]
compile_error!("the packed cell view assumes a little-endian target");

pub const DEFAULT_WIDTH: u32 = 64;
pub const DEFAULT_HEIGHT: u32 = 64;

/// Number of bytes needed to hold one bit per cell.
pub fn packed_len(width: u32, height: u32) -> usize {
    (width as usize * height as usize).div_ceil(8)
}

/// Conway's rule: survival on 2 or 3 neighbours, birth on exactly 3.
pub fn next_state(alive: bool, live_neighbors: u8) -> bool {
    match (alive, live_neighbors) {
        (true, 2) | (true, 3) => true,   // Survival
        (false, 3)            => true,   // Birth
        _                     => false,  // Death or stays dead
    }
}

pub(crate) fn index(width: u32, row: u32, column: u32) -> usize {
    row as usize * width as usize + column as usize
}

/// Live neighbours of `(row, column)` in `cells`, wrapping at the edges.
pub(crate) fn live_neighbor_count(
    cells: &FixedBitSet,
    width: u32,
    height: u32,
    row: u32,
    column: u32,
) -> u8 {
    let mut count = 0;

    // Adding `height - 1` is a step of -1 modulo `height`, so the edges
    // wrap without signed arithmetic.
    for delta_row in [height - 1, 0, 1] {
        for delta_col in [width - 1, 0, 1] {
            if delta_row == 0 && delta_col == 0 {
                continue;
            }

            let neighbor_row = (row + delta_row) % height;
            let neighbor_col = (column + delta_col) % width;
            count += cells[index(width, neighbor_row, neighbor_col)] as u8;
        }
    }
    count
}

/// A `width` x `height` board whose edges wrap around.
///
/// Cell `row * width + column` lives in bit `index % 8` of byte `index / 8`
/// of [`Universe::as_bytes`]. Bits past the last cell are always zero.
#[derive(Clone, Debug)]
pub struct Universe {
    width: u32,
    height: u32,
    cells: FixedBitSet,
    next_cells: FixedBitSet,
    generation: u64,
}

impl Default for Universe {
    fn default() -> Self {
        Universe::new()
    }
}

impl Universe {
    /// The 64x64 default board.
    pub fn new() -> Universe {
        Universe::from_preset(crate::Preset::Default, DEFAULT_WIDTH, DEFAULT_HEIGHT, 0)
    }

    /// A board with every cell dead.
    pub fn empty(width: u32, height: u32) -> Universe {
        let size = width as usize * height as usize;
        Universe {
            width,
            height,
            cells: FixedBitSet::with_capacity(size),
            next_cells: FixedBitSet::with_capacity(size),
            generation: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The packed cell bytes, borrowed straight from the bitset's blocks.
    /// Any mutation of the universe invalidates this view.
    pub fn as_bytes(&self) -> &[u8] {
        let bytes: &[u8] = bytemuck::cast_slice(self.cells.as_slice());
        &bytes[..packed_len(self.width, self.height)]
    }

    pub fn get_index(&self, row: u32, column: u32) -> usize {
        index(self.width, row, column)
    }

    pub fn is_alive(&self, row: u32, column: u32) -> bool {
        self.cells[self.get_index(row, column)]
    }

    pub fn population(&self) -> usize {
        self.cells.count_ones(..)
    }

    pub fn live_neighbor_count(&self, row: u32, column: u32) -> u8 {
        live_neighbor_count(&self.cells, self.width, self.height, row, column)
    }

    /// Advances the universe by one generation.
    pub fn tick(&mut self) {
        self.next_cells.clear();

        for row in 0..self.height {
            for column in 0..self.width {
                let idx = self.get_index(row, column);
                let alive = next_state(self.cells[idx], self.live_neighbor_count(row, column));
                self.next_cells.set(idx, alive);
            }
        }

        std::mem::swap(&mut self.cells, &mut self.next_cells);
        self.generation += 1;
    }

    pub fn toggle_cell(&mut self, row: u32, column: u32) {
        let idx = self.get_index(row, column);
        self.cells.toggle(idx);
        trace!("toggled cell ({row}, {column})");
    }

    pub fn set(&mut self, row: u32, column: u32, alive: bool) {
        let idx = self.get_index(row, column);
        self.set_index(idx, alive);
    }

    pub(crate) fn set_index(&mut self, idx: usize, alive: bool) {
        self.cells.set(idx, alive);
    }

    /// Marks every listed cell alive.
    pub fn set_cells(&mut self, cells: &[(u32, u32)]) {
        for &(row, column) in cells {
            self.set(row, column, true);
        }
    }

    /// Kills every cell and restarts the generation count.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.generation = 0;
    }

    /// Resizes the board; every cell is reset to dead.
    pub fn set_width(&mut self, width: u32) {
        self.resize(width, self.height);
    }

    /// Resizes the board; every cell is reset to dead.
    pub fn set_height(&mut self, height: u32) {
        self.resize(self.width, height);
    }

    fn resize(&mut self, width: u32, height: u32) {
        debug!("resizing universe {}x{} -> {width}x{height}", self.width, self.height);
        *self = Universe::empty(width, height);
    }

    /// Lends out the current and scratch bitsets so the next generation can
    /// be computed elsewhere. The scratch set comes back cleared.
    pub(crate) fn take_buffers(&mut self) -> (FixedBitSet, FixedBitSet) {
        let mut next = std::mem::take(&mut self.next_cells);
        next.clear();
        (std::mem::take(&mut self.cells), next)
    }

    /// Puts lent bitsets back: `next` becomes the live board when `advanced`.
    pub(crate) fn restore_buffers(&mut self, current: FixedBitSet, next: FixedBitSet, advanced: bool) {
        if advanced {
            self.cells = next;
            self.next_cells = current;
            self.generation += 1;
        } else {
            self.cells = current;
            self.next_cells = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_cells(universe: &Universe) -> Vec<(u32, u32)> {
        let mut out = Vec::new();
        for row in 0..universe.height() {
            for column in 0..universe.width() {
                if universe.is_alive(row, column) {
                    out.push((row, column));
                }
            }
        }
        out
    }

    #[test]
    fn packed_len_rounds_up() {
        assert_eq!(packed_len(8, 8), 8);
        assert_eq!(packed_len(3, 3), 2);
        assert_eq!(packed_len(64, 64), 512);
    }

    #[test]
    fn rule_table() {
        assert!(!next_state(true, 1));
        assert!(next_state(true, 2));
        assert!(next_state(true, 3));
        assert!(!next_state(true, 4));
        assert!(next_state(false, 3));
        assert!(!next_state(false, 2));
    }

    #[test]
    fn blinker_oscillates() {
        let mut universe = Universe::empty(5, 5);
        universe.set_cells(&[(2, 1), (2, 2), (2, 3)]);

        universe.tick();
        assert_eq!(live_cells(&universe), vec![(1, 2), (2, 2), (3, 2)]);

        universe.tick();
        assert_eq!(live_cells(&universe), vec![(2, 1), (2, 2), (2, 3)]);
        assert_eq!(universe.generation(), 2);
    }

    #[test]
    fn neighbours_wrap_across_edges() {
        let mut universe = Universe::empty(4, 4);
        universe.set_cells(&[(3, 3), (0, 3), (3, 0)]);
        assert_eq!(universe.live_neighbor_count(0, 0), 3);
    }

    #[test]
    fn block_is_still_across_a_corner() {
        let mut universe = Universe::empty(6, 6);
        universe.set_cells(&[(0, 0), (0, 5), (5, 0), (5, 5)]);
        let before = universe.as_bytes().to_vec();
        universe.tick();
        assert_eq!(universe.as_bytes(), &before[..]);
    }

    #[test]
    fn toggle_twice_restores_the_cell() {
        let mut universe = Universe::new();
        let before = universe.as_bytes().to_vec();
        universe.toggle_cell(3, 5);
        assert_ne!(universe.as_bytes(), &before[..]);
        universe.toggle_cell(3, 5);
        assert_eq!(universe.as_bytes(), &before[..]);
    }

    #[test]
    fn resizing_clears_every_cell() {
        let mut universe = Universe::new();
        universe.set_width(10);
        assert_eq!((universe.width(), universe.height()), (10, 64));
        assert_eq!(universe.as_bytes().len(), packed_len(10, 64));
        assert_eq!(universe.population(), 0);

        universe.set_height(3);
        assert_eq!(universe.as_bytes().len(), packed_len(10, 3));
    }

    #[test]
    fn byte_view_follows_cell_order() {
        let mut universe = Universe::empty(8, 8);
        universe.set_cells(&[(0, 0), (1, 3), (7, 7)]);
        let bytes = universe.as_bytes();
        assert_eq!(bytes.len(), 8);
        assert_eq!(bytes[0], 0b0000_0001);
        assert_eq!(bytes[1], 0b0000_1000);
        assert_eq!(bytes[7], 0b1000_0000);
        assert_eq!(universe.population(), 3);
    }

    #[test]
    fn tick_alternates_between_two_buffers() {
        let mut universe = Universe::from_preset(crate::Preset::Random, 16, 16, 1);
        let first = universe.as_bytes().as_ptr();
        universe.tick();
        let second = universe.as_bytes().as_ptr();
        universe.tick();
        assert_ne!(first, second);
        assert_eq!(universe.as_bytes().as_ptr(), first);
    }

    #[test]
    fn padding_bits_stay_clear() {
        // 3x3 leaves seven unused bits in the second byte.
        let mut universe = Universe::empty(3, 3);
        universe.set_cells(&[(0, 1), (1, 1), (2, 1)]);
        for _ in 0..4 {
            universe.tick();
            assert_eq!(universe.as_bytes()[1] & !1, 0);
        }
    }
}
