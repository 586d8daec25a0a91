//! Lifecycle of text-to-image generation attempts
//!
//! A [`Session`] moves through `Idle → InFlight → Succeeded | Failed` and
//! exposes a [`SessionSnapshot`] for rendering. Only one attempt may be in
//! flight at a time.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod download;
mod error;
mod phase;
mod session;

pub use download::{Download, download_filename};
pub use error::{GENERIC_FAILURE_MESSAGE, SubmitRejection, UNAUTHORIZED_MESSAGE, user_message};
pub use phase::{Phase, View};
pub use session::{Attempt, GenerationResult, Session, SessionSnapshot};
