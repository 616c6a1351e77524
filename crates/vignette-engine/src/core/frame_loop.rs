use winit::event::WindowEvent;

/// Whether the frame loop keeps producing frames.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RunState {
    Running,
    Terminated,
}

/// Window events as the frame loop sees them.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopEvent {
    CloseRequested,
    Other,
}

impl From<&WindowEvent> for LoopEvent {
    fn from(event: &WindowEvent) -> Self {
        match event {
            WindowEvent::CloseRequested => LoopEvent::CloseRequested,
            _ => LoopEvent::Other,
        }
    }
}

/// Run state of the poll → update → render loop.
///
/// Once terminated it stays terminated; the frame in progress completes and
/// no further frame starts.
#[derive(Debug)]
pub struct FrameLoop {
    state: RunState,
    frames: u64,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            state: RunState::Running,
            frames: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Frames started so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn handle(&mut self, event: LoopEvent) -> RunState {
        if event == LoopEvent::CloseRequested {
            self.terminate();
        }
        self.state
    }

    pub fn terminate(&mut self) {
        if self.state == RunState::Running {
            log::info!("frame loop terminating after {} frames", self.frames);
        }
        self.state = RunState::Terminated;
    }

    /// Starts the next iteration; `false` once terminated.
    pub fn begin_frame(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.frames += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── events ────────────────────────────────────────────────────────────

    #[test]
    fn close_request_terminates() {
        let mut fl = FrameLoop::new();
        assert_eq!(fl.handle(LoopEvent::CloseRequested), RunState::Terminated);
        assert!(!fl.is_running());
    }

    #[test]
    fn other_events_are_ignored() {
        let mut fl = FrameLoop::new();
        for _ in 0..10 {
            assert_eq!(fl.handle(LoopEvent::Other), RunState::Running);
        }
    }

    #[test]
    fn window_events_translate() {
        assert_eq!(LoopEvent::from(&WindowEvent::CloseRequested), LoopEvent::CloseRequested);
        assert_eq!(LoopEvent::from(&WindowEvent::Focused(true)), LoopEvent::Other);
        assert_eq!(LoopEvent::from(&WindowEvent::RedrawRequested), LoopEvent::Other);
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn termination_is_sticky() {
        let mut fl = FrameLoop::new();
        fl.handle(LoopEvent::CloseRequested);
        assert_eq!(fl.handle(LoopEvent::Other), RunState::Terminated);
        assert_eq!(fl.state(), RunState::Terminated);
    }

    #[test]
    fn no_frames_start_after_termination() {
        let mut fl = FrameLoop::new();
        assert!(fl.begin_frame());
        assert!(fl.begin_frame());
        fl.terminate();
        assert!(!fl.begin_frame());
        assert_eq!(fl.frames(), 2);
    }
}
