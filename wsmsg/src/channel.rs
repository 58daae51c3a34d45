//! Bounded FIFO queues carrying [`Message`] values between the application and
//! the websocket workers.
//!
//! A queue is bound to one [`Route`]. Its senders refuse variants that cannot
//! travel that way and hand the value back, so nothing is dropped silently.
//! Values are moved through the queue and received exactly once.

use std::{
    pin::Pin,
    task::{Context, Poll},
};

use tokio::sync::mpsc::{self, error::TrySendError};

use crate::{error::SendError, message::Message, message::Route};

/// Queue from the application to the writer.
pub fn outbound(buffer: usize) -> (Sender, Receiver) {
    channel(Route::Outbound, buffer)
}

/// Queue from the reader and writer to the application dispatcher.
pub fn inbound(buffer: usize) -> (Sender, Receiver) {
    channel(Route::Inbound, buffer)
}

pub fn channel(route: Route, buffer: usize) -> (Sender, Receiver) {
    let (tx, rx) = mpsc::channel(buffer);
    (
        Sender { inner: tx, route },
        Receiver { inner: rx, route },
    )
}

#[derive(Debug, Clone)]
pub struct Sender {
    inner: mpsc::Sender<Message>,
    route: Route,
}

impl Sender {
    pub fn route(&self) -> Route {
        self.route
    }

    fn admit(&self, message: Message) -> Result<Message, SendError> {
        if message.allows(self.route) {
            return Ok(message);
        }
        log::warn!("refusing {} on {} queue", message, self.route);
        Err(SendError::Misrouted {
            kind: message.kind(),
            route: self.route,
            message,
        })
    }

    // Rendered before the value moves into the queue, logged only once it is in.
    fn handoff_line(&self, message: &Message) -> Option<String> {
        if log::log_enabled!(log::Level::Trace) {
            return Some(format!("{} <- {}", self.route, message));
        }
        None
    }

    fn handed_off(line: Option<String>) {
        if let Some(line) = line {
            log::trace!("{}", line);
        }
    }

    fn closed(&self, message: Message) -> SendError {
        log::debug!("{} queue closed, returning {}", self.route, message);
        SendError::Closed {
            route: self.route,
            message,
        }
    }

    pub async fn send(&self, message: Message) -> Result<(), SendError> {
        let message = self.admit(message)?;
        let line = self.handoff_line(&message);
        self.inner
            .send(message)
            .await
            .map_err(|mpsc::error::SendError(message)| self.closed(message))?;
        Self::handed_off(line);
        Ok(())
    }

    /// Blocking send for worker threads. Panics if called inside an async runtime.
    pub fn blocking_send(&self, message: Message) -> Result<(), SendError> {
        let message = self.admit(message)?;
        let line = self.handoff_line(&message);
        self.inner
            .blocking_send(message)
            .map_err(|mpsc::error::SendError(message)| self.closed(message))?;
        Self::handed_off(line);
        Ok(())
    }

    pub fn try_send(&self, message: Message) -> Result<(), SendError> {
        let message = self.admit(message)?;
        let line = self.handoff_line(&message);
        match self.inner.try_send(message) {
            Ok(()) => {
                Self::handed_off(line);
                Ok(())
            }
            Err(TrySendError::Full(message)) => Err(SendError::Full {
                route: self.route,
                message,
            }),
            Err(TrySendError::Closed(message)) => Err(self.closed(message)),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}

#[derive(Debug)]
pub struct Receiver {
    inner: mpsc::Receiver<Message>,
    route: Route,
}

impl Receiver {
    pub fn route(&self) -> Route {
        self.route
    }

    /// Next message in send order, or `None` once every sender is gone and the queue is drained.
    pub async fn recv(&mut self) -> Option<Message> {
        self.inner.recv().await
    }

    /// Blocking receive for worker threads. Panics if called inside an async runtime.
    pub fn blocking_recv(&mut self) -> Option<Message> {
        self.inner.blocking_recv()
    }

    /// Stops accepting new messages; already queued ones can still be received.
    pub fn close(&mut self) {
        self.inner.close()
    }
}

impl futures::Stream for Receiver {
    type Item = Message;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_recv(cx)
    }
}
