use crate::error::MessagingError;
use crate::messaging::UNREACHABLE_MESSAGE;

use std::sync::Arc;

use log::debug;
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

/// One request plus the means to answer it.
pub struct Envelope<Req, Resp> {
    pub request_id: Uuid,
    pub message: Req,
    pub responder: Responder<Resp>,
}

/// Single-use reply handle. Dropping it unanswered yields `NoResponse` on
/// the sending side.
pub struct Responder<Resp> {
    tx: oneshot::Sender<Resp>,
}

impl<Resp> Responder<Resp> {
    /// Returns false if the requester stopped waiting.
    pub fn reply(self, response: Resp) -> bool {
        self.tx.send(response).is_ok()
    }
}

/// Sending half, addressed to one context.
pub struct Mailbox<Req, Resp> {
    context: Arc<str>,
    tx: mpsc::Sender<Envelope<Req, Resp>>,
}

impl<Req, Resp> Clone for Mailbox<Req, Resp> {
    fn clone(&self) -> Self {
        Self {
            context: Arc::clone(&self.context),
            tx: self.tx.clone(),
        }
    }
}

/// Receiving half, owned by the context's task.
pub struct Inbox<Req, Resp> {
    rx: mpsc::Receiver<Envelope<Req, Resp>>,
}

/// Create a mailbox/inbox pair for `context`.
pub fn channel<Req, Resp>(context: &str, capacity: usize) -> (Mailbox<Req, Resp>, Inbox<Req, Resp>) {
    let (tx, rx) = mpsc::channel(capacity);
    (
        Mailbox {
            context: Arc::from(context),
            tx,
        },
        Inbox { rx },
    )
}

impl<Req, Resp> Mailbox<Req, Resp> {
    /// Send `message` and wait for its single reply.
    ///
    /// # Errors
    ///
    /// - [`MessagingError::Unreachable`] if the target inbox is closed
    /// - [`MessagingError::NoResponse`] if the target dropped the request
    pub async fn send(&self, message: Req) -> Result<Resp, MessagingError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let request_id = Uuid::new_v4();

        self.tx
            .send(Envelope {
                request_id,
                message,
                responder: Responder { tx: reply_tx },
            })
            .await
            .map_err(|_| MessagingError::unreachable(&*self.context, UNREACHABLE_MESSAGE))?;

        debug!("Request {} sent to {}", request_id, self.context);

        reply_rx
            .await
            .map_err(|_| MessagingError::no_response(&*self.context))
    }
}

impl<Req, Resp> Inbox<Req, Resp> {
    pub async fn recv(&mut self) -> Option<Envelope<Req, Resp>> {
        self.rx.recv().await
    }

    /// Non-blocking receive; `None` when nothing is queued.
    pub fn try_recv(&mut self) -> Option<Envelope<Req, Resp>> {
        self.rx.try_recv().ok()
    }
}
