//! Playback state machine and the scheduling capabilities it depends on.
//!
//! `PlaybackState` is pure bookkeeping: mode transitions, the progress clock
//! anchor and tick generations. Rendering side effects live in
//! `api::playback_controller`.

mod scheduler;

pub use scheduler::{Clock, ManualScheduler, Scheduler, SystemClock, TickHandle, TickToken};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackMode {
    #[default]
    Idle,
    Playing,
    Paused,
    Dragging,
    Finished,
}

impl PlaybackMode {
    #[must_use]
    pub fn is_playing(self) -> bool {
        self == Self::Playing
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ClockAnchor {
    progress: f64,
    time_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingTick {
    handle: TickHandle,
    token: TickToken,
}

/// Owned exclusively by the chart; mutated only from its own operations.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    current_frame: usize,
    progress: f64,
    mode: PlaybackMode,
    resume_mode: Option<PlaybackMode>,
    anchor: Option<ClockAnchor>,
    generation: u64,
    next_sequence: u64,
    pending: Option<PendingTick>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_frame: 0,
            progress: 0.0,
            mode: PlaybackMode::Idle,
            resume_mode: None,
            anchor: None,
            generation: 0,
            next_sequence: 0,
            pending: None,
        }
    }
}

impl PlaybackState {
    #[must_use]
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[must_use]
    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Mode restored when the current drag ends.
    #[must_use]
    pub fn resume_mode(&self) -> Option<PlaybackMode> {
        self.resume_mode
    }

    #[must_use]
    pub fn has_pending_tick(&self) -> bool {
        self.pending.is_some()
    }

    /// Virtual time elapsed along the timeline.
    #[must_use]
    pub fn elapsed_ms(&self, total_duration_ms: u64) -> f64 {
        self.progress * total_duration_ms as f64
    }

    /// Sets the mode; returns `true` when it changed.
    pub(crate) fn set_mode(&mut self, mode: PlaybackMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    /// Moves to a frame; returns `true` when the frame index changed.
    pub(crate) fn set_position(&mut self, frame_index: usize, progress: f64) -> bool {
        let changed = self.current_frame != frame_index;
        self.current_frame = frame_index;
        self.progress = progress.clamp(0.0, 1.0);
        changed
    }

    pub(crate) fn begin_drag(&mut self) {
        if self.mode == PlaybackMode::Dragging {
            return;
        }
        self.resume_mode = Some(if self.mode == PlaybackMode::Playing {
            PlaybackMode::Playing
        } else {
            PlaybackMode::Paused
        });
        self.mode = PlaybackMode::Dragging;
    }

    pub(crate) fn set_resume_mode(&mut self, mode: PlaybackMode) {
        if self.mode == PlaybackMode::Dragging {
            self.resume_mode = Some(mode);
        }
    }

    pub(crate) fn take_resume_mode(&mut self) -> Option<PlaybackMode> {
        self.resume_mode.take()
    }

    pub(crate) fn anchor_clock(&mut self, progress: f64, now_ms: f64) {
        self.anchor = Some(ClockAnchor {
            progress: progress.clamp(0.0, 1.0),
            time_ms: now_ms,
        });
    }

    /// Progress implied by the clock at `now_ms`.
    ///
    /// Never lower than the current progress, never above one.
    #[must_use]
    pub fn progress_at(&self, now_ms: f64, total_duration_ms: u64) -> f64 {
        let Some(anchor) = self.anchor else {
            return self.progress;
        };
        if total_duration_ms == 0 {
            return 1.0;
        }
        let elapsed = (now_ms - anchor.time_ms).max(0.0);
        let advanced = anchor.progress + elapsed / total_duration_ms as f64;
        if !advanced.is_finite() {
            return self.progress;
        }
        advanced.max(self.progress).min(1.0)
    }

    /// Drops any pending tick and starts a new generation.
    ///
    /// Returns the handle the scheduler must cancel, if any.
    pub(crate) fn invalidate(&mut self) -> Option<TickHandle> {
        self.generation += 1;
        self.anchor = None;
        self.pending.take().map(|pending| pending.handle)
    }

    pub(crate) fn next_token(&mut self) -> TickToken {
        self.next_sequence += 1;
        TickToken {
            generation: self.generation,
            sequence: self.next_sequence,
        }
    }

    pub(crate) fn set_pending(&mut self, handle: TickHandle, token: TickToken) {
        self.pending = Some(PendingTick { handle, token });
    }

    /// Consumes the pending tick when `token` is the live one.
    pub(crate) fn accept_tick(&mut self, token: TickToken) -> bool {
        match self.pending {
            Some(pending) if pending.token == token && token.generation == self.generation => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}
