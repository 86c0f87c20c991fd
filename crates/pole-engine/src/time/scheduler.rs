/// Handed out once per display frame while the loop runs.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FrameTime {
    /// Zero-based, counted from `start`.
    pub frame_index: u64,
}

/// Lifecycle of the render loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SchedulerState {
    /// Created, no frame requested yet.
    Idle,
    /// Each frame schedules the next one.
    Running,
    /// Torn down. Terminal: no frame runs and nothing is rescheduled.
    Stopped,
}

/// Continuous, self-rescheduling render loop driver.
///
/// The runtime asks [`begin_frame`](Self::begin_frame) at the top of every
/// redraw; `None` means the loop was stopped and the frame must not touch
/// any renderer or GPU object. After the frame,
/// [`should_reschedule`](Self::should_reschedule) decides whether the next
/// display-frame callback is requested.
#[derive(Debug)]
pub struct FrameScheduler {
    state: SchedulerState,
    frames: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            state: SchedulerState::Idle,
            frames: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// Starts the loop. Returns `false` if the scheduler was already stopped.
    pub fn start(&mut self) -> bool {
        match self.state {
            SchedulerState::Idle => {
                self.state = SchedulerState::Running;
                log::debug!("frame scheduler started");
                true
            }
            SchedulerState::Running => true,
            SchedulerState::Stopped => {
                log::warn!("frame scheduler restart ignored: already torn down");
                false
            }
        }
    }

    /// Cancels the loop. Idempotent.
    pub fn stop(&mut self) {
        if self.state != SchedulerState::Stopped {
            log::debug!("frame scheduler stopped after {} frames", self.frames);
        }
        self.state = SchedulerState::Stopped;
    }

    /// Loop entry: numbers the frame if the loop is running.
    pub fn begin_frame(&mut self) -> Option<FrameTime> {
        if !self.is_running() {
            return None;
        }
        let frame = FrameTime { frame_index: self.frames };
        self.frames += 1;
        Some(frame)
    }

    /// Whether the next display frame should be requested.
    pub fn should_reschedule(&self) -> bool {
        self.is_running()
    }

    /// Frames produced so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_scheduler_produces_no_frames() {
        let mut s = FrameScheduler::new();
        assert!(s.begin_frame().is_none());
        assert!(!s.should_reschedule());
    }

    #[test]
    fn running_scheduler_produces_consecutive_frames() {
        let mut s = FrameScheduler::new();
        assert!(s.start());
        assert_eq!(s.begin_frame().map(|f| f.frame_index), Some(0));
        assert_eq!(s.begin_frame().map(|f| f.frame_index), Some(1));
        assert!(s.should_reschedule());
    }

    #[test]
    fn no_frame_runs_after_stop() {
        let mut s = FrameScheduler::new();
        s.start();
        s.begin_frame();
        s.stop();
        assert!(s.begin_frame().is_none());
        assert!(!s.should_reschedule());
        assert_eq!(s.frames(), 1);
    }

    #[test]
    fn stop_is_terminal() {
        let mut s = FrameScheduler::new();
        s.start();
        s.stop();
        assert!(!s.start());
        assert_eq!(s.state(), SchedulerState::Stopped);
        assert!(s.begin_frame().is_none());
    }

    #[test]
    fn stop_is_idempotent() {
        let mut s = FrameScheduler::new();
        s.stop();
        s.stop();
        assert_eq!(s.state(), SchedulerState::Stopped);
    }
}
