/// Handle to a unit of work that runs once per frame and re-arms itself.
///
/// The owner calls [`FrameTask::run`] from its frame callback; the task keeps
/// running until [`FrameTask::cancel`] is called or the handle is dropped.
#[derive(Debug)]
pub struct FrameTask {
    label: &'static str,
    armed: bool,
    frames: u64,
}

impl FrameTask {
    pub fn arm(label: &'static str) -> Self {
        log::debug!("frame task '{label}' armed");
        Self { label, armed: true, frames: 0 }
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Number of frames this task has run.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs `f` for the current frame if the task is still armed.
    pub fn run<R>(&mut self, f: impl FnOnce() -> R) -> Option<R> {
        if !self.armed {
            return None;
        }
        self.frames += 1;
        Some(f())
    }

    /// Stops the task. Returns `true` only for the call that actually cancelled it.
    pub fn cancel(&mut self) -> bool {
        if !self.armed {
            return false;
        }
        self.armed = false;
        log::debug!("frame task '{}' cancelled after {} frames", self.label, self.frames);
        true
    }
}

impl Drop for FrameTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_until_cancelled() {
        let mut task = FrameTask::arm("test");
        let mut hits = 0;
        assert_eq!(task.run(|| { hits += 1; hits }), Some(1));
        assert_eq!(task.run(|| { hits += 1; hits }), Some(2));
        assert!(task.cancel());
        assert_eq!(task.run(|| { hits += 1; hits }), None);
        assert_eq!(hits, 2);
        assert_eq!(task.frames(), 2);
    }

    #[test]
    fn cancel_reports_only_once() {
        let mut task = FrameTask::arm("test");
        assert!(task.cancel());
        assert!(!task.cancel());
        assert!(!task.is_armed());
    }
}
