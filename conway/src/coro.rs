// coro.rs - Generation stepping with one cooperative task per row

use std::cell::RefCell;
use std::rc::Rc;

use fixedbitset::FixedBitSet;
use log::debug;
use tokio::task::{self, LocalSet};

use crate::universe::{index, live_neighbor_count, next_state};
use crate::{Result, Universe};

/// Row coroutine: writes the next state of every cell in `row` into `next`.
async fn process_row(
    row: u32,
    width: u32,
    height: u32,
    current: Rc<FixedBitSet>,
    next: Rc<RefCell<FixedBitSet>>,
) {
    for column in 0..width {
        let idx = index(width, row, column);
        let neighbors = live_neighbor_count(&current, width, height, row, column);
        if next_state(current[idx], neighbors) {
            next.borrow_mut().insert(idx);
        }

        task::yield_now().await;  // Cooperative yielding!
    }
}

/// A [`Universe`] stepped by row coroutines on a private current-thread runtime.
///
/// Every row task is joined before `tick` returns, so callers still see a
/// plain synchronous step that produces the same generations as
/// [`Universe::tick`]. The universe's two bitsets are lent to the tasks and
/// swapped afterwards, so a tick allocates no cell storage.
pub struct CoroUniverse {
    universe: Universe,
    runtime: tokio::runtime::Runtime,
}

impl CoroUniverse {
    pub fn new(universe: Universe) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread().build()?;
        debug!(
            "row-task stepping ready for {}x{} universe",
            universe.width(),
            universe.height()
        );
        Ok(Self { universe, runtime })
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn universe_mut(&mut self) -> &mut Universe {
        &mut self.universe
    }

    pub fn into_inner(self) -> Universe {
        self.universe
    }

    pub fn tick(&mut self) -> Result<()> {
        let (width, height) = (self.universe.width(), self.universe.height());
        let (current, next) = self.universe.take_buffers();
        let current = Rc::new(current);
        let next = Rc::new(RefCell::new(next));

        let local = LocalSet::new();
        let joined = local.block_on(&self.runtime, async {
            // Spawn every row coroutine up front so they interleave
            let handles: Vec<_> = (0..height)
                .map(|row| {
                    task::spawn_local(process_row(
                        row,
                        width,
                        height,
                        Rc::clone(&current),
                        Rc::clone(&next),
                    ))
                })
                .collect();

            for handle in handles {
                handle.await?;
            }
            Ok::<_, crate::Error>(())
        });
        // Tasks left behind by a failed join still hold buffer references.
        drop(local);

        let current = Rc::try_unwrap(current).unwrap_or_else(|shared| (*shared).clone());
        let next = Rc::try_unwrap(next)
            .map(RefCell::into_inner)
            .unwrap_or_else(|shared| shared.borrow().clone());
        self.universe.restore_buffers(current, next, joined.is_ok());
        joined
    }
}
