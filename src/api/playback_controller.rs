use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{Diagnostic, Viewport};
use crate::error::{RaceError, RaceResult};
use crate::extensions::RaceEvent;
use crate::playback::{PlaybackMode, TickToken};
use crate::render::Renderer;

use super::RaceChart;

/// What a delivered tick did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// The token was cancelled or superseded; nothing changed.
    Stale,
    /// An interpolated instant was rendered and the next tick scheduled.
    Rendered { frame_index: usize, progress: f64 },
    /// Playback reached the last frame and stopped.
    Finished,
}

impl<R: Renderer> RaceChart<R> {
    /// Starts or resumes playback from the current position.
    ///
    /// From the last frame (or `Finished`) playback restarts at frame 0. A
    /// no-op while already playing.
    pub fn play(&mut self) -> RaceResult<()> {
        let result = self.start_playback(None, true);
        self.finish_operation(result)
    }

    /// Starts playback from overall timeline progress `progress`.
    pub fn play_from(&mut self, progress: f64) -> RaceResult<()> {
        let result = self.start_playback(Some(progress), true);
        self.finish_operation(result)
    }

    pub fn pause(&mut self) {
        self.pause_inner();
        self.flush_events();
    }

    /// Play/pause button behavior.
    pub fn toggle(&mut self) -> RaceResult<()> {
        let result = if self.core.model.playback.mode().is_playing() {
            self.pause_inner();
            Ok(())
        } else {
            self.start_playback(None, true)
        };
        self.finish_operation(result)
    }

    /// Delivers a scheduled tick back to the chart.
    pub fn on_tick(&mut self, token: TickToken) -> RaceResult<TickOutcome> {
        let result = self.on_tick_inner(token);
        self.finish_operation(result)
    }

    /// Jumps to `frame_index` and enters `Dragging`.
    pub fn seek(&mut self, frame_index: usize) -> RaceResult<()> {
        let result = self.seek_inner(frame_index);
        self.finish_operation(result)
    }

    /// Slider path: maps `fraction` in `[0, 1]` to a frame and seeks there.
    pub fn seek_progress(&mut self, fraction: f64) -> RaceResult<()> {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let last_index = self.core.model.last_frame_index();
        let frame_index = ((fraction * last_index as f64).floor() as usize).min(last_index);
        self.seek(frame_index)
    }

    /// Releases a drag, restoring the pre-drag mode.
    pub fn end_drag(&mut self) -> RaceResult<()> {
        let result = self.end_drag_inner();
        self.finish_operation(result)
    }

    /// Rewinds to frame 0, paints it and plays from there.
    pub fn reset(&mut self) -> RaceResult<()> {
        let result = self.reset_inner();
        self.finish_operation(result)
    }

    pub fn toggle_keep_zero_items(&mut self) -> RaceResult<()> {
        let enabled = !self.core.model.ranking.policy().keep_zero_items;
        self.set_keep_zero_items(enabled)
    }

    /// Switches zero-value retention and redraws the displayed instant.
    pub fn set_keep_zero_items(&mut self, enabled: bool) -> RaceResult<()> {
        let result = self.set_keep_zero_items_inner(enabled);
        self.finish_operation(result)
    }

    /// Applies a new viewport and redraws the displayed instant.
    ///
    /// Playback mode and position are left untouched.
    pub fn resize(&mut self, viewport: Viewport) -> RaceResult<()> {
        let result = self.resize_inner(viewport);
        self.finish_operation(result)
    }

    fn start_playback(&mut self, from: Option<f64>, render_now: bool) -> RaceResult<()> {
        let mode = self.core.model.playback.mode();
        if mode.is_playing() && from.is_none() {
            return Ok(());
        }

        let last_index = self.core.model.last_frame_index();
        let mut progress = from
            .filter(|progress| progress.is_finite())
            .unwrap_or_else(|| self.core.model.playback.progress())
            .clamp(0.0, 1.0);
        let at_end = mode == PlaybackMode::Finished
            || progress >= 1.0
            || (from.is_none() && self.core.model.playback.current_frame() >= last_index);
        if at_end {
            progress = 0.0;
        }

        self.cancel_pending_tick();
        self.core.model.playback.take_resume_mode();

        if last_index == 0 {
            self.move_to(0, 1.0);
            if render_now {
                self.render_exact_frame(0)?;
            }
            self.change_mode(PlaybackMode::Finished);
            debug!("single-frame timeline; playback finished immediately");
            return Ok(());
        }

        let (frame_index, _) = self.core.model.store.timeline().split_progress(progress);
        self.move_to(frame_index, progress);
        let now_ms = self.core.runtime.clock.now_ms();
        self.core.model.playback.anchor_clock(progress, now_ms);
        self.change_mode(PlaybackMode::Playing);
        if render_now {
            self.render_progress(progress)?;
        }
        self.schedule_next_tick();

        debug!(
            frame_index,
            progress,
            rewound = at_end,
            generation = self.core.model.playback.generation(),
            "playback started"
        );
        Ok(())
    }

    fn on_tick_inner(&mut self, token: TickToken) -> RaceResult<TickOutcome> {
        let playback = &mut self.core.model.playback;
        if !playback.mode().is_playing() || !playback.accept_tick(token) {
            debug!(
                token_generation = token.generation,
                token_sequence = token.sequence,
                live_generation = playback.generation(),
                "ignoring stale playback tick"
            );
            self.core
                .runtime
                .diagnostics
                .record(Diagnostic::StaleTickIgnored {
                    generation: token.generation,
                });
            return Ok(TickOutcome::Stale);
        }

        let now_ms = self.core.runtime.clock.now_ms();
        let total_ms = self.core.model.config.total_playback_duration_ms;
        let progress = self.core.model.playback.progress_at(now_ms, total_ms);
        let (frame_index, _) = self.core.model.store.timeline().split_progress(progress);
        let last_index = self.core.model.last_frame_index();

        // Progress a hair under one already splits onto the last frame.
        if progress >= 1.0 || frame_index >= last_index {
            self.cancel_pending_tick();
            self.move_to(last_index, 1.0);
            self.render_exact_frame(last_index)?;
            self.change_mode(PlaybackMode::Finished);
            debug!(frame_index = last_index, "playback finished");
            return Ok(TickOutcome::Finished);
        }

        self.move_to(frame_index, progress);
        self.render_progress(progress)?;
        self.schedule_next_tick();
        Ok(TickOutcome::Rendered {
            frame_index,
            progress,
        })
    }

    fn pause_inner(&mut self) {
        match self.core.model.playback.mode() {
            PlaybackMode::Playing => {
                self.cancel_pending_tick();
                self.change_mode(PlaybackMode::Paused);
                debug!(
                    frame_index = self.core.model.playback.current_frame(),
                    progress = self.core.model.playback.progress(),
                    "playback paused"
                );
            }
            PlaybackMode::Dragging => {
                self.core
                    .model
                    .playback
                    .set_resume_mode(PlaybackMode::Paused);
            }
            PlaybackMode::Idle | PlaybackMode::Paused | PlaybackMode::Finished => {}
        }
    }

    fn seek_inner(&mut self, frame_index: usize) -> RaceResult<()> {
        let frame_count = self.core.model.frame_count();
        if frame_index >= frame_count {
            return Err(RaceError::InvalidData(format!(
                "seek frame {frame_index} is out of range for {frame_count} frames"
            )));
        }

        self.cancel_pending_tick();
        let before = self.core.model.playback.mode();
        self.core.model.playback.begin_drag();
        if before != PlaybackMode::Dragging {
            self.queue_event(RaceEvent::PlaybackStateChanged {
                mode: PlaybackMode::Dragging,
            });
        }

        let progress = self.core.model.store.timeline().frame_to_progress(frame_index);
        self.move_to(frame_index, progress);
        self.render_exact_frame(frame_index)
    }

    fn end_drag_inner(&mut self) -> RaceResult<()> {
        if self.core.model.playback.mode() != PlaybackMode::Dragging {
            return Ok(());
        }
        let resume = self.core.model.playback.take_resume_mode();
        let current_frame = self.core.model.playback.current_frame();

        if current_frame >= self.core.model.last_frame_index() {
            self.change_mode(PlaybackMode::Finished);
            return Ok(());
        }
        if resume == Some(PlaybackMode::Playing) {
            let progress = self.core.model.playback.progress();
            // The dragged-to frame is already on screen.
            return self.start_playback(Some(progress), false);
        }
        self.change_mode(PlaybackMode::Paused);
        Ok(())
    }

    fn reset_inner(&mut self) -> RaceResult<()> {
        self.cancel_pending_tick();
        self.move_to(0, 0.0);
        self.render_exact_frame(0)?;
        self.start_playback(Some(0.0), false)
    }

    fn set_keep_zero_items_inner(&mut self, enabled: bool) -> RaceResult<()> {
        if self.core.model.ranking.policy().keep_zero_items == enabled {
            return Ok(());
        }
        self.core.model.ranking.set_keep_zero_items(enabled);
        self.core.model.config.keep_zero_items = enabled;
        self.queue_event(RaceEvent::KeepZeroItemsChanged { enabled });
        debug!(enabled, "keep-zero-items toggled");
        self.render_displayed_instant()
    }

    fn resize_inner(&mut self, viewport: Viewport) -> RaceResult<()> {
        let viewport = viewport.validate()?;
        if self.core.model.viewport != viewport {
            self.core.model.viewport = viewport;
            self.core.model.config.viewport = viewport;
            self.queue_event(RaceEvent::Resized { viewport });
        }
        self.render_displayed_instant()
    }

    /// Flushes queued events after a public operation.
    ///
    /// A failed step that left `Playing` without a pending tick pauses, so
    /// the host can call `play()` again.
    fn finish_operation<T>(&mut self, result: RaceResult<T>) -> RaceResult<T> {
        if let Err(error) = &result {
            let playback = &self.core.model.playback;
            if playback.mode().is_playing() && !playback.has_pending_tick() {
                warn!(
                    %error,
                    frame_index = playback.current_frame(),
                    progress = playback.progress(),
                    "playback step failed; pausing"
                );
                self.cancel_pending_tick();
                self.change_mode(PlaybackMode::Paused);
            }
        }
        self.flush_events();
        result
    }

    /// Invalidates the live tick and cancels it with the scheduler.
    fn cancel_pending_tick(&mut self) {
        if let Some(handle) = self.core.model.playback.invalidate() {
            self.core.runtime.scheduler.cancel(handle);
        }
    }

    fn schedule_next_tick(&mut self) {
        let token = self.core.model.playback.next_token();
        let delay_ms = self.core.model.config.tick_interval_ms;
        let handle = self.core.runtime.scheduler.schedule(token, delay_ms);
        self.core.model.playback.set_pending(handle, token);
    }

    fn change_mode(&mut self, mode: PlaybackMode) {
        if self.core.model.playback.set_mode(mode) {
            self.queue_event(RaceEvent::PlaybackStateChanged { mode });
        }
    }

    /// Updates the playback position and queues the matching events.
    fn move_to(&mut self, frame_index: usize, progress: f64) {
        let before = self.core.model.playback.progress();
        let frame_changed = self.core.model.playback.set_position(frame_index, progress);
        if frame_changed {
            let timeline_label = self
                .core
                .model
                .store
                .timeline()
                .label(frame_index)
                .unwrap_or_default()
                .to_owned();
            self.queue_event(RaceEvent::FrameChanged {
                frame_index,
                timeline_label,
            });
        }
        let fraction = self.core.model.playback.progress();
        if frame_changed || fraction != before {
            self.queue_event(RaceEvent::Progress { fraction });
        }
    }
}
