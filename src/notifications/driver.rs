// SPDX-License-Identifier: MPL-2.0
//! Async driver for the coalescer.
//!
//! [`spawn`] moves a [`Coalescer`] into a tokio task that owns it
//! exclusively. Callers talk to the task through a cloneable
//! [`NotifierHandle`]; the task interleaves their commands with timer
//! expiry so all state changes stay serialized.

use super::clock::Clock;
use super::coalescer::{Coalescer, Outcome};
use super::notification::{Level, NotifyOptions};
use crate::error::{Error, Result};
use std::time::Instant;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Queued commands before senders start waiting.
const COMMAND_CHANNEL_CAPACITY: usize = 64;

/// Clock backed by tokio's time source, so paused test runtimes control
/// the coalescer as well.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

enum Command {
    Notify {
        level: Level,
        message: String,
        options: NotifyOptions,
        reply: oneshot::Sender<Outcome>,
    },
    ForceShow {
        level: Level,
        message: String,
        options: NotifyOptions,
        reply: oneshot::Sender<Outcome>,
    },
    Group {
        level: Level,
        messages: Vec<String>,
        options: NotifyOptions,
        reply: oneshot::Sender<Option<Outcome>>,
    },
    SetEnabled(bool),
    ClearAll,
    Shutdown,
}

/// Cloneable front end to a spawned coalescer.
#[derive(Debug, Clone)]
pub struct NotifierHandle {
    commands: mpsc::Sender<Command>,
}

impl NotifierHandle {
    /// # Errors
    ///
    /// Returns [`Error::DriverClosed`] once the driver has stopped.
    pub async fn notify(
        &self,
        level: Level,
        message: impl Into<String>,
        options: NotifyOptions,
    ) -> Result<Outcome> {
        let message = message.into();
        self.request(|reply| Command::Notify {
            level,
            message,
            options,
            reply,
        })
        .await
    }

    /// # Errors
    ///
    /// Returns [`Error::DriverClosed`] once the driver has stopped.
    pub async fn success(&self, message: impl Into<String>, options: NotifyOptions) -> Result<Outcome> {
        self.notify(Level::Success, message, options).await
    }

    /// # Errors
    ///
    /// Returns [`Error::DriverClosed`] once the driver has stopped.
    pub async fn error(&self, message: impl Into<String>, options: NotifyOptions) -> Result<Outcome> {
        self.notify(Level::Error, message, options).await
    }

    /// # Errors
    ///
    /// Returns [`Error::DriverClosed`] once the driver has stopped.
    pub async fn info(&self, message: impl Into<String>, options: NotifyOptions) -> Result<Outcome> {
        self.notify(Level::Info, message, options).await
    }

    /// # Errors
    ///
    /// Returns [`Error::DriverClosed`] once the driver has stopped.
    pub async fn warning(&self, message: impl Into<String>, options: NotifyOptions) -> Result<Outcome> {
        self.notify(Level::Warning, message, options).await
    }

    /// # Errors
    ///
    /// Returns [`Error::DriverClosed`] once the driver has stopped.
    pub async fn force_show(
        &self,
        level: Level,
        message: impl Into<String>,
        options: NotifyOptions,
    ) -> Result<Outcome> {
        let message = message.into();
        self.request(|reply| Command::ForceShow {
            level,
            message,
            options,
            reply,
        })
        .await
    }

    /// # Errors
    ///
    /// Returns [`Error::DriverClosed`] once the driver has stopped.
    pub async fn group(
        &self,
        messages: Vec<String>,
        level: Level,
        options: NotifyOptions,
    ) -> Result<Option<Outcome>> {
        self.request(|reply| Command::Group {
            level,
            messages,
            options,
            reply,
        })
        .await
    }

    /// # Errors
    ///
    /// Returns [`Error::DriverClosed`] once the driver has stopped.
    pub async fn set_enabled(&self, enabled: bool) -> Result<()> {
        self.send(Command::SetEnabled(enabled)).await
    }

    /// # Errors
    ///
    /// Returns [`Error::DriverClosed`] once the driver has stopped.
    pub async fn clear_all(&self) -> Result<()> {
        self.send(Command::ClearAll).await
    }

    /// Stops the driver. Pending notifications are dropped; the coalescer
    /// is returned through the task's [`JoinHandle`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::DriverClosed`] if the driver already stopped.
    pub async fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown).await
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| Error::DriverClosed)
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.send(build(reply)).await?;
        response.await.map_err(|_| Error::DriverClosed)
    }
}

/// Starts the driver task on the current tokio runtime.
///
/// Build the coalescer with [`TokioClock`] so its timers follow tokio time.
#[must_use]
pub fn spawn(coalescer: Coalescer) -> (NotifierHandle, JoinHandle<Coalescer>) {
    let (commands, receiver) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
    let task = tokio::spawn(run(coalescer, receiver));
    (NotifierHandle { commands }, task)
}

async fn run(mut coalescer: Coalescer, mut commands: mpsc::Receiver<Command>) -> Coalescer {
    debug!("notification driver started");
    loop {
        let deadline = coalescer.next_deadline();
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Shutdown) | None => break,
                Some(command) => apply(&mut coalescer, command),
            },
            () = sleep_until(deadline) => {
                coalescer.poll();
            }
        }
    }
    info!(
        pending = coalescer.pending_count(),
        "notification driver stopped"
    );
    coalescer
}

fn apply(coalescer: &mut Coalescer, command: Command) {
    match command {
        Command::Notify {
            level,
            message,
            options,
            reply,
        } => {
            let _ = reply.send(coalescer.notify(level, message, options));
        }
        Command::ForceShow {
            level,
            message,
            options,
            reply,
        } => {
            let _ = reply.send(coalescer.force_show(level, message, options));
        }
        Command::Group {
            level,
            messages,
            options,
            reply,
        } => {
            let _ = reply.send(coalescer.group(&messages, level, options));
        }
        Command::SetEnabled(enabled) => coalescer.set_enabled(enabled),
        Command::ClearAll => coalescer.clear_all(),
        Command::Shutdown => {}
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}
