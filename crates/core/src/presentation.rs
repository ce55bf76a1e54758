//! Keeps a view in sync with a session: scrolls to whatever is newest and
//! animates the "analyzing" indicator while a verification is pending.
//!
//! Nothing here is a source of truth. [`PresentationSync`] only watches the
//! [`SessionState`] published by the controller and derives view effects
//! from it, so a missed or late scroll is harmless.

mod indicator;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::Instrument;

pub use indicator::{
    DEFAULT_INTERVAL, Indicator, IndicatorFrames, IndicatorTicker,
};

use crate::session::SessionState;

/// The position a view should bring into sight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollAnchor {
    /// The entry at this index of the transcript.
    Entry(usize),
    /// The "analyzing" indicator below the last entry.
    Indicator,
}

/// A view that a session is rendered into.
///
/// Methods may be called from any task and should return quickly.
pub trait Viewport: Send + Sync + 'static {
    /// Brings `anchor` into sight.
    fn scroll_to(&self, anchor: ScrollAnchor);

    /// Updates the "analyzing" indicator.
    fn show_indicator(&self, indicator: Indicator);
}

/// A running presentation loop. Dropping it stops the loop, and hides the
/// indicator if one is showing.
pub struct PresentationSync {
    task: JoinHandle<()>,
}

impl PresentationSync {
    /// Starts syncing `viewport` with the session behind `state_rx`, using
    /// the default indicator interval.
    #[inline]
    pub fn spawn<V: Viewport>(
        state_rx: watch::Receiver<SessionState>,
        viewport: V,
    ) -> Self {
        Self::with_interval(state_rx, viewport, DEFAULT_INTERVAL)
    }

    /// Same as [`PresentationSync::spawn`] with a custom indicator
    /// interval.
    pub fn with_interval<V: Viewport>(
        state_rx: watch::Receiver<SessionState>,
        viewport: V,
        interval: Duration,
    ) -> Self {
        let task = tokio::spawn(
            run(state_rx, Arc::new(viewport), interval)
                .instrument(trace_span!("presentation")),
        );
        Self { task }
    }

    /// Returns `true` once the session has ended and the loop exited.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PresentationSync {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<V: Viewport>(
    mut state_rx: watch::Receiver<SessionState>,
    viewport: Arc<V>,
    interval: Duration,
) {
    let mut shown_entries = 0;
    let mut ticker: Option<IndicatorTicker> = None;

    loop {
        let (entries, pending) = {
            let state = state_rx.borrow_and_update();
            (state.transcript().len(), state.is_pending())
        };

        let mut scroll = entries != shown_entries;
        shown_entries = entries;

        if pending && ticker.is_none() {
            trace!("start indicator");
            ticker = Some(start_ticker(&viewport, interval));
        } else if !pending && ticker.take().is_some() {
            // The indicator is gone, the last entry is at the bottom again.
            trace!("stop indicator");
            scroll = true;
        }

        if scroll {
            if let Some(last) = entries.checked_sub(1) {
                viewport.scroll_to(ScrollAnchor::Entry(last));
            }
        }

        if state_rx.changed().await.is_err() {
            debug!("session has ended");
            break;
        }
    }
}

fn start_ticker<V: Viewport>(
    viewport: &Arc<V>,
    interval: Duration,
) -> IndicatorTicker {
    let viewport = Arc::clone(viewport);
    IndicatorTicker::start(interval, move |indicator| {
        viewport.show_indicator(indicator);
        if indicator != Indicator::Hidden {
            viewport.scroll_to(ScrollAnchor::Indicator);
        }
    })
}
