//! Upstream sked HTTP client.
//!
//! The upstream timetable system serves plain HTML pages behind HTTP Basic
//! authentication. Non-success responses are common enough that every
//! request retries a fixed number of times with a short fixed backoff;
//! responses are parsed elsewhere.

mod client;
mod error;
mod mock;

pub use client::{RetryPolicy, SkedClient, SkedConfig};
pub use error::SkedError;
pub use mock::MockSkedClient;
