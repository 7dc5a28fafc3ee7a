//! UI-thread executor: run engine work on the one thread that owns it.
//!
//! [`UiThread::spawn`] starts a named thread, creates the toolkit there and
//! owns the [`Engine`] for the thread's whole life. Any other thread talks to
//! it through a cloneable [`UiHandle`], which posts jobs over an unbounded
//! channel and waits for each answer on a oneshot.

use std::fmt;
use std::io;
use std::thread::{self, JoinHandle, ThreadId};

use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::sync::oneshot;

use crate::bridge::BridgeResult;
use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::error::{MenuError, Result};
use crate::event::EventSink;
use crate::toolkit::MenuToolkit;

type Job<T> = Box<dyn FnOnce(&mut Engine<T>) + Send>;

enum Command<T: MenuToolkit> {
    Run(Job<T>),
    Shutdown,
}

// ---------------------------------------------------------------------------
// UiHandle
// ---------------------------------------------------------------------------

/// Sending side of the UI thread. Cheap to clone, usable from any thread.
pub struct UiHandle<T: MenuToolkit> {
    tx: UnboundedSender<Command<T>>,
    ui_thread: ThreadId,
}

impl<T: MenuToolkit> Clone for UiHandle<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            ui_thread: self.ui_thread,
        }
    }
}

impl<T: MenuToolkit> fmt::Debug for UiHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiHandle")
            .field("ui_thread", &self.ui_thread)
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

impl<T: MenuToolkit> UiHandle<T> {
    fn post<R, F>(&self, f: F) -> Result<oneshot::Receiver<R>>
    where
        R: Send + 'static,
        F: FnOnce(&mut Engine<T>) -> R + Send + 'static,
    {
        let (reply, rx) = oneshot::channel();
        let job: Job<T> = Box::new(move |engine| {
            // The caller may have given up waiting.
            let _ = reply.send(f(engine));
        });
        self.tx
            .send(Command::Run(job))
            .map_err(|_| MenuError::Unavailable)?;
        Ok(rx)
    }

    /// Run `f` on the UI thread and block until it returns.
    ///
    /// Refused with [`MenuError::Reentrant`] when called from the UI thread
    /// itself. Must not be called from inside an async runtime; use
    /// [`run_async`](Self::run_async) there.
    pub fn run<R, F>(&self, f: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut Engine<T>) -> R + Send + 'static,
    {
        if thread::current().id() == self.ui_thread {
            return Err(MenuError::Reentrant);
        }
        self.post(f)?
            .blocking_recv()
            .map_err(|_| MenuError::Unavailable)
    }

    /// Run `f` on the UI thread and await its result.
    pub async fn run_async<R, F>(&self, f: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut Engine<T>) -> R + Send + 'static,
    {
        self.post(f)?.await.map_err(|_| MenuError::Unavailable)
    }

    /// Run one bridge request on the UI thread, blocking.
    pub fn call(&self, selector: impl Into<String>, payload: impl Into<String>) -> BridgeResult {
        let selector = selector.into();
        let payload = payload.into();
        self.run(move |engine| engine.handle(&selector, &payload))
            .unwrap_or_else(BridgeResult::from)
    }

    /// Run one bridge request on the UI thread, awaiting the reply.
    pub async fn call_async(&self, selector: impl Into<String>, payload: impl Into<String>) -> BridgeResult {
        let selector = selector.into();
        let payload = payload.into();
        self.run_async(move |engine| engine.handle(&selector, &payload))
            .await
            .unwrap_or_else(BridgeResult::from)
    }

    /// Whether the UI thread has stopped accepting work.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

// ---------------------------------------------------------------------------
// UiThread
// ---------------------------------------------------------------------------

/// The running UI thread. Dropping it shuts the thread down.
pub struct UiThread<T: MenuToolkit> {
    handle: UiHandle<T>,
    join: Option<JoinHandle<()>>,
}

impl<T: MenuToolkit + 'static> UiThread<T> {
    /// Start the UI thread.
    ///
    /// `make_toolkit` runs on the new thread, so the toolkit itself need not
    /// be `Send`.
    pub fn spawn<F, S>(config: EngineConfig, make_toolkit: F, sink: S) -> io::Result<Self>
    where
        F: FnOnce() -> T + Send + 'static,
        S: EventSink + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<Command<T>>();
        let name = config.thread_name.clone();
        let join = thread::Builder::new().name(name.clone()).spawn(move || {
            let mut engine = Engine::new(config, make_toolkit(), sink);
            tracing::debug!(thread = name.as_str(), "ui thread started");
            while let Some(command) = rx.blocking_recv() {
                match command {
                    Command::Run(job) => job(&mut engine),
                    Command::Shutdown => break,
                }
            }
            tracing::debug!(thread = name.as_str(), "ui thread stopped");
        })?;

        let handle = UiHandle {
            tx,
            ui_thread: join.thread().id(),
        };
        Ok(Self {
            handle,
            join: Some(join),
        })
    }
}

impl<T: MenuToolkit> UiThread<T> {
    /// A new handle to this thread.
    pub fn handle(&self) -> UiHandle<T> {
        self.handle.clone()
    }

    /// Stop accepting work, finish queued jobs, and join the thread.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.handle.tx.send(Command::Shutdown);
        if let Some(join) = self.join.take() {
            if join.join().is_err() {
                tracing::warn!("ui thread panicked");
            }
        }
    }
}

impl<T: MenuToolkit> Drop for UiThread<T> {
    fn drop(&mut self) {
        self.stop();
    }
}
