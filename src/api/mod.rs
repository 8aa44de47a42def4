//! Portal backend client - bridge, worker, and backend abstraction

mod backend;
mod bridge;
mod worker;

pub use backend::{classify, ApiError, Backend, Disposition, HttpBackend, LoginOutcome, LoginResponse};
pub use bridge::{ApiBridge, ApiEvent, ApiRequest};
pub use worker::run_worker;
