use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::Instrument;

use crate::mailbox::{Mailbox, MailboxParts, Reply};
use crate::scheduler::run_actor;
use crate::{ActorDeadError, Message};

/// Handle to an actor.
///
/// Handles are cheap to clone. The actor keeps running as long as at least
/// one handle exists, or until [`Actor::stop`] is called.
pub struct Actor<S> {
    mailbox: Arc<Mailbox<S>>,
}

impl<S: Send + Sync + 'static> Actor<S> {
    /// Spawns a new actor owning `state` on the current tokio runtime.
    ///
    /// The optional `label` shows up in the actor's tracing span.
    pub fn spawn(state: S, label: Option<&str>) -> Self {
        let MailboxParts {
            mailbox,
            msg_rx,
            stop_rx,
        } = Mailbox::new();
        let mailbox = Arc::new(mailbox);
        tokio::spawn(
            run_actor(Arc::downgrade(&mailbox), state, msg_rx, stop_rx)
                .instrument(trace_span!("actor", label = label)),
        );
        Self { mailbox }
    }

    #[inline]
    pub(crate) fn from_mailbox(mailbox: Arc<Mailbox<S>>) -> Self {
        Self { mailbox }
    }

    /// Sends a message to the actor without waiting for it to be handled.
    #[inline]
    pub fn send<M: Message<S> + 'static>(
        &self,
        msg: M,
    ) -> Result<(), ActorDeadError> {
        self.mailbox.send(Box::new(msg))
    }

    /// Sends a message that carries a [`Reply`] and waits for the answer.
    ///
    /// The message is queued behind every message sent before it, so the
    /// answer reflects the state after all of them have been handled.
    pub async fn request<R, M, F>(
        &self,
        make_msg: F,
    ) -> Result<R, ActorDeadError>
    where
        R: Send + 'static,
        M: Message<S> + 'static,
        F: FnOnce(Reply<R>) -> M,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(make_msg(Reply(reply_tx)))?;
        reply_rx.await.map_err(|_| ActorDeadError)
    }

    /// Asks the actor to stop.
    ///
    /// The actor is not stopped immediately, but it will not handle any
    /// message after noticing the request.
    #[inline]
    pub fn stop(&self) {
        self.mailbox.stop();
    }

    /// Returns `false` once the event loop has exited.
    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.mailbox.is_closed()
    }
}

impl<S> Clone for Actor<S> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            mailbox: Arc::clone(&self.mailbox),
        }
    }
}
