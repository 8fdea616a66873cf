/// A coarse progress event emitted while a trajectory is analyzed.
///
/// Events may arrive from whichever thread processed a frame, so consumers
/// must be thread safe.
#[derive(Debug, Clone)]
pub enum Progress {
    /// A named analysis phase began.
    PhaseStart { name: &'static str },
    /// The current phase completed.
    PhaseFinish,

    /// Per-frame processing began; up to `total_frames` completions follow.
    FramesStart { total_frames: u64 },
    /// One frame finished processing.
    FrameDone,
    /// Every frame has been processed.
    FramesFinish,

    /// Free-form status text.
    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards progress events from the trajectory workflow to an optional
/// caller-supplied callback; a reporter without a callback is a no-op.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
