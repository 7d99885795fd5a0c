// engine.rs - The narrow contract the visualizer needs from a simulation

use std::convert::Infallible;

use conway::{CoroUniverse, Universe};

/// A two-state cellular automaton the visualizer can drive.
///
/// `cells` borrows the engine's packed state directly: bit `i % 8` of byte
/// `i / 8` is cell `i = row * width + column`. The borrow ends before any
/// `step` or `toggle_cell`, so a view can never outlive a mutation that might
/// move the backing storage.
pub trait Engine {
    type Error: std::error::Error + Send + Sync + 'static;

    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn cells(&self) -> &[u8];

    /// Advances exactly one generation.
    fn step(&mut self) -> Result<(), Self::Error>;

    /// Flips one cell. `row < height` and `column < width`.
    fn toggle_cell(&mut self, row: u32, column: u32) -> Result<(), Self::Error>;
}

impl Engine for Universe {
    type Error = Infallible;

    fn width(&self) -> u32 {
        Universe::width(self)
    }

    fn height(&self) -> u32 {
        Universe::height(self)
    }

    fn cells(&self) -> &[u8] {
        self.as_bytes()
    }

    fn step(&mut self) -> Result<(), Infallible> {
        self.tick();
        Ok(())
    }

    fn toggle_cell(&mut self, row: u32, column: u32) -> Result<(), Infallible> {
        Universe::toggle_cell(self, row, column);
        Ok(())
    }
}

impl Engine for CoroUniverse {
    type Error = conway::Error;

    fn width(&self) -> u32 {
        self.universe().width()
    }

    fn height(&self) -> u32 {
        self.universe().height()
    }

    fn cells(&self) -> &[u8] {
        self.universe().as_bytes()
    }

    fn step(&mut self) -> conway::Result<()> {
        self.tick()
    }

    fn toggle_cell(&mut self, row: u32, column: u32) -> conway::Result<()> {
        self.universe_mut().toggle_cell(row, column);
        Ok(())
    }
}

/// The engine picked at start-up.
pub enum Backend {
    Sequential(Universe),
    RowTasks(CoroUniverse),
}

impl Backend {
    pub fn new(universe: Universe, row_tasks: bool) -> conway::Result<Self> {
        Ok(if row_tasks {
            Backend::RowTasks(CoroUniverse::new(universe)?)
        } else {
            Backend::Sequential(universe)
        })
    }

    pub fn universe(&self) -> &Universe {
        match self {
            Backend::Sequential(universe) => universe,
            Backend::RowTasks(coro) => coro.universe(),
        }
    }

    /// Swaps in a new board, keeping the stepping strategy.
    pub fn load(&mut self, universe: Universe) {
        match self {
            Backend::Sequential(current) => *current = universe,
            Backend::RowTasks(coro) => *coro.universe_mut() = universe,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Backend::Sequential(_) => "sequential",
            Backend::RowTasks(_) => "row tasks",
        }
    }
}

impl Engine for Backend {
    type Error = conway::Error;

    fn width(&self) -> u32 {
        self.universe().width()
    }

    fn height(&self) -> u32 {
        self.universe().height()
    }

    fn cells(&self) -> &[u8] {
        self.universe().as_bytes()
    }

    fn step(&mut self) -> conway::Result<()> {
        match self {
            Backend::Sequential(universe) => {
                universe.tick();
                Ok(())
            }
            Backend::RowTasks(coro) => coro.tick(),
        }
    }

    fn toggle_cell(&mut self, row: u32, column: u32) -> conway::Result<()> {
        match self {
            Backend::Sequential(universe) => universe.toggle_cell(row, column),
            Backend::RowTasks(coro) => coro.universe_mut().toggle_cell(row, column),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conway::Preset;

    #[test]
    fn backends_agree() {
        let start = Universe::from_preset(Preset::Random, 20, 12, 5);
        let mut sequential = Backend::new(start.clone(), false).unwrap();
        let mut row_tasks = Backend::new(start, true).unwrap();
        assert_eq!(row_tasks.name(), "row tasks");

        for _ in 0..5 {
            sequential.step().unwrap();
            row_tasks.step().unwrap();
            assert_eq!(sequential.cells(), row_tasks.cells());
        }
    }

    #[test]
    fn load_replaces_the_board() {
        let mut backend = Backend::new(Universe::new(), true).unwrap();
        backend.load(Universe::empty(10, 6));
        assert_eq!((Engine::width(&backend), Engine::height(&backend)), (10, 6));
        assert!(backend.cells().iter().all(|&b| b == 0));
    }

    #[test]
    fn universe_toggle_goes_through_the_trait() {
        let mut universe = Universe::empty(8, 8);
        Engine::toggle_cell(&mut universe, 0, 0).unwrap();
        assert_eq!(Engine::cells(&universe)[0], 1);
        Engine::toggle_cell(&mut universe, 0, 0).unwrap();
        assert_eq!(Engine::cells(&universe)[0], 0);
    }
}
