use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// How often the indicator advances by default.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(400);

const LABEL: &str = "Analyzing";
const FRAMES: [&str; 4] = ["", ".", "..", "..."];

/// What the "analyzing" indicator currently shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// Nothing is pending, the indicator is not drawn.
    Hidden,
    /// A verification is pending. Holds the trailing dots of this frame.
    Visible(&'static str),
}

impl Indicator {
    /// Returns the text to draw, e.g. `"Analyzing.."`, or `None` when
    /// hidden.
    pub fn label(&self) -> Option<String> {
        match self {
            Indicator::Hidden => None,
            Indicator::Visible(dots) => Some(format!("{LABEL}{dots}")),
        }
    }
}

/// The endless frame sequence `""`, `"."`, `".."`, `"..."`, `""`, ...
#[derive(Clone, Debug, Default)]
pub struct IndicatorFrames {
    next: usize,
}

impl Iterator for IndicatorFrames {
    type Item = &'static str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let frame = FRAMES[self.next];
        self.next = (self.next + 1) % FRAMES.len();
        Some(frame)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

struct Sink {
    stopped: bool,
    emit: Box<dyn FnMut(Indicator) + Send>,
}

/// A periodic task that feeds indicator frames to a callback.
///
/// The first frame is emitted right away, then one per interval. Dropping
/// the ticker stops it and emits [`Indicator::Hidden`] exactly once. No
/// frame is emitted after that, even if the task was mid-tick.
pub struct IndicatorTicker {
    task: JoinHandle<()>,
    sink: Arc<Mutex<Sink>>,
}

impl IndicatorTicker {
    /// Starts ticking on the current tokio runtime.
    ///
    /// An `interval` of zero is treated as one millisecond.
    pub fn start(
        interval: Duration,
        emit: impl FnMut(Indicator) + Send + 'static,
    ) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        let sink = Arc::new(Mutex::new(Sink {
            stopped: false,
            emit: Box::new(emit),
        }));

        let task = tokio::spawn({
            let sink = Arc::clone(&sink);
            async move {
                let mut ticks = time::interval(interval);
                ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
                for frame in IndicatorFrames::default() {
                    ticks.tick().await;
                    let mut sink =
                        sink.lock().unwrap_or_else(PoisonError::into_inner);
                    if sink.stopped {
                        break;
                    }
                    (sink.emit)(Indicator::Visible(frame));
                }
            }
        });

        Self { task, sink }
    }
}

impl Drop for IndicatorTicker {
    fn drop(&mut self) {
        self.task.abort();
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        if !sink.stopped {
            sink.stopped = true;
            (sink.emit)(Indicator::Hidden);
        }
    }
}
