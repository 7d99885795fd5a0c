// scheduler.rs - Play/pause state and the per-frame step budget

use log::debug;

/// Identifies one pending frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host side of the animation loop: something that can call back once per
/// display refresh.
pub trait FrameHost {
    fn request_frame(&mut self) -> FrameHandle;

    /// Must be a no-op for handles that already fired or were cancelled.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Playback {
    #[default]
    Paused,
    Playing(FrameHandle),
}

/// Owns the playback state and how many generations each frame advances.
#[derive(Debug, Default)]
pub struct Scheduler {
    playback: Playback,
    step_multiplier: u32,
}

impl Scheduler {
    pub fn new(step_multiplier: u32) -> Self {
        Self {
            playback: Playback::Paused,
            step_multiplier,
        }
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    pub fn is_paused(&self) -> bool {
        self.playback == Playback::Paused
    }

    pub fn step_multiplier(&self) -> u32 {
        self.step_multiplier
    }

    /// Takes effect from the next fired frame.
    pub fn set_step_multiplier(&mut self, step_multiplier: u32) {
        self.step_multiplier = step_multiplier;
    }

    /// Label for the play/pause control.
    pub fn button_label(&self) -> &'static str {
        match self.playback {
            Playback::Paused => "▶",
            Playback::Playing(_) => "⏸",
        }
    }

    pub fn play(&mut self, host: &mut impl FrameHost) {
        if self.is_paused() {
            let handle = host.request_frame();
            debug!("playing, first frame {handle:?}");
            self.playback = Playback::Playing(handle);
        }
    }

    pub fn pause(&mut self, host: &mut impl FrameHost) {
        if let Playback::Playing(handle) = std::mem::take(&mut self.playback) {
            host.cancel_frame(handle);
            debug!("paused, cancelled {handle:?}");
        }
    }

    pub fn toggle(&mut self, host: &mut impl FrameHost) -> Playback {
        if self.is_paused() {
            self.play(host);
        } else {
            self.pause(host);
        }
        self.playback
    }

    /// Accepts a fired callback and returns how many steps it should run.
    /// Callbacks for anything but the pending handle are ignored.
    pub fn fire(&self, handle: FrameHandle) -> Option<u32> {
        match self.playback {
            Playback::Playing(pending) if pending == handle => Some(self.step_multiplier),
            _ => None,
        }
    }

    /// Queues the frame after the one that just fired.
    pub fn reschedule(&mut self, host: &mut impl FrameHost) {
        if let Playback::Playing(_) = self.playback {
            self.playback = Playback::Playing(host.request_frame());
        }
    }

    /// Stops the loop after a failed frame. The fired handle needs no cancel.
    pub fn halt(&mut self) {
        self.playback = Playback::Paused;
    }
}
