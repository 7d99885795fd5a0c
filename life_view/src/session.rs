// session.rs - One running simulation: engine, renderer, fps and playback

use egui::{Pos2, Rect, Vec2};
use log::{debug, trace};

use crate::bitgrid::{self, Dimensions};
use crate::engine::Engine;
use crate::fps::{Clock, FpsMonitor};
use crate::interaction;
use crate::renderer::GridRenderer;
use crate::scheduler::{FrameHandle, FrameHost, Playback, Scheduler};
use crate::surface::Surface;
use crate::{Error, Result};

/// Drives an [`Engine`]: renders it, steps it once per frame and applies
/// pointer edits.
pub struct LifeSession<E: Engine> {
    engine: E,
    dims: Dimensions,
    renderer: GridRenderer,
    fps: FpsMonitor,
    scheduler: Scheduler,
    generations: u64,
}

impl<E: Engine> LifeSession<E> {
    /// Starts paused. The engine's dimensions are read once, here.
    pub fn new(engine: E, renderer: GridRenderer, step_multiplier: u32, clock: &impl Clock) -> Self {
        let dims = Dimensions::new(engine.width(), engine.height());
        debug!("session over {}x{} grid", dims.width, dims.height);
        Self {
            engine,
            dims,
            renderer,
            fps: FpsMonitor::new(clock),
            scheduler: Scheduler::new(step_multiplier),
            generations: 0,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    pub fn renderer(&self) -> &GridRenderer {
        &self.renderer
    }

    pub fn fps(&self) -> &FpsMonitor {
        &self.fps
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn is_paused(&self) -> bool {
        self.scheduler.is_paused()
    }

    pub fn step_multiplier(&self) -> u32 {
        self.scheduler.step_multiplier()
    }

    pub fn set_step_multiplier(&mut self, step_multiplier: u32) {
        self.scheduler.set_step_multiplier(step_multiplier);
    }

    /// Generations stepped since the session (or the last restart) began.
    pub fn generations(&self) -> u64 {
        self.generations
    }

    pub fn population(&self) -> usize {
        bitgrid::population(self.engine.cells())
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.renderer.canvas_size(self.dims)
    }

    pub fn play(&mut self, host: &mut impl FrameHost) {
        self.scheduler.play(host);
    }

    pub fn pause(&mut self, host: &mut impl FrameHost) {
        self.scheduler.pause(host);
    }

    pub fn toggle_playback(&mut self, host: &mut impl FrameHost) -> Playback {
        self.scheduler.toggle(host)
    }

    /// Draws gridlines and the current cells.
    pub fn redraw(&self, surface: &mut impl Surface) {
        // Fresh view: nothing borrowed from the engine survives a mutation.
        self.renderer.draw(surface, self.dims, self.engine.cells());
    }

    /// Runs the frame callback for `handle`: sample the frame rate, draw, then
    /// step the engine `step_multiplier` times and queue the next frame.
    ///
    /// Returns `Ok(false)` without drawing for a handle that is no longer
    /// pending. An engine error stops the loop and is returned as is.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        host: &mut impl FrameHost,
        surface: &mut impl Surface,
        clock: &impl Clock,
    ) -> Result<bool> {
        let Some(steps) = self.scheduler.fire(handle) else {
            return Ok(false);
        };

        self.fps.render(clock);
        self.redraw(surface);

        for _ in 0..steps {
            if let Err(err) = self.engine.step() {
                self.scheduler.halt();
                return Err(Error::engine(err));
            }
            self.generations += 1;
        }

        self.scheduler.reschedule(host);
        Ok(true)
    }

    /// Toggles the cell under `pointer` and redraws right away, so the edit
    /// shows even while paused. Returns the toggled `(row, column)`.
    pub fn click(
        &mut self,
        pointer: Pos2,
        bounds: Rect,
        surface: &mut impl Surface,
    ) -> Result<(u32, u32)> {
        let (row, column) = interaction::cell_at(
            pointer,
            bounds,
            self.canvas_size(),
            self.dims,
            self.renderer.cell_size(),
        );
        self.engine.toggle_cell(row, column).map_err(Error::engine)?;
        trace!("pointer {pointer:?} toggled ({row}, {column})");

        self.redraw(surface);
        Ok((row, column))
    }

    /// Lets `reset` rebuild the engine state (new preset, clear, resize), then
    /// re-reads the dimensions and starts the counters over. Playback is kept.
    pub fn restart(&mut self, clock: &impl Clock, reset: impl FnOnce(&mut E)) {
        reset(&mut self.engine);
        self.dims = Dimensions::new(self.engine.width(), self.engine.height());
        self.fps.reset(clock);
        self.generations = 0;
        debug!("restarted on {}x{} grid", self.dims.width, self.dims.height);
    }
}
