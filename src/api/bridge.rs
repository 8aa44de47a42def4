//! API bridge - connects the sync TUI thread with the async worker.
//!
//! The TUI thread never awaits; it queues [`ApiRequest`]s and drains
//! [`ApiEvent`]s once per frame. The worker thread owns the Tokio
//! runtime and the backend for the lifetime of the process.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tokio::runtime::Runtime;

use crate::api::backend::Backend;
use crate::api::worker::run_worker;
use crate::domain::Student;

/// Requests sent from the TUI to the async worker
#[derive(Debug, Clone)]
pub enum ApiRequest {
    /// Replace the worker's bearer token (restored or cleared session)
    SetToken(Option<String>),
    /// Authenticate against the portal backend
    Login { email: String, password: String },
    /// Fetch the full student list
    FetchStudents,
    /// Fetch one student record by id
    FetchStudent { id: String },
    /// Shutdown the worker
    Shutdown,
}

/// Events sent from the async worker to the TUI
#[derive(Debug, Clone)]
pub enum ApiEvent {
    /// Login accepted; the token has not been persisted yet
    LoginOk { token: String },
    /// Login rejected or failed; message is safe to display
    LoginFailed { message: String },
    /// Student list fetched
    StudentsReady { students: Vec<Student> },
    /// Single student fetched; `None` means no matching record
    StudentReady {
        id: String,
        student: Option<Box<Student>>,
    },
    /// A request failed for a reason local to the calling view
    RequestFailed { what: String, message: String },
    /// A 403 arrived on an authenticated request. The request's own
    /// result is suppressed; the app must wipe the session and hard
    /// reset to the login route.
    SessionExpired,
}

/// Bridge between the sync TUI thread and the async worker
pub struct ApiBridge {
    cmd_tx: Sender<ApiRequest>,
    evt_rx: Receiver<ApiEvent>,
}

impl ApiBridge {
    /// Spawn the worker thread with its own Tokio runtime. The initial
    /// token is the one restored from the session store, if any.
    pub fn new(backend: Box<dyn Backend>, token: Option<String>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<ApiRequest>();
        let (evt_tx, evt_rx) = mpsc::channel::<ApiEvent>();

        thread::spawn(move || {
            let rt = Runtime::new().expect("Failed to create Tokio runtime");
            rt.block_on(run_worker(backend, token, cmd_rx, evt_tx));
        });

        Self { cmd_tx, evt_rx }
    }

    /// Send a request to the async worker
    pub fn send(&self, request: ApiRequest) -> anyhow::Result<()> {
        self.cmd_tx
            .send(request)
            .map_err(|_| anyhow::anyhow!("Worker channel closed"))
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<ApiEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.evt_rx.try_recv() {
            events.push(evt);
        }
        events
    }
}

impl Drop for ApiBridge {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(ApiRequest::Shutdown);
    }
}
