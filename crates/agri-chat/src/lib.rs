//! A terminal chat front-end that relays messages and images to a backend
//! endpoint.
//!
//! The crate includes a CLI tool for using in the terminal. The pieces it
//! is built from are re-exported, so hosts can drive a [`Session`] on
//! their own.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod attach;
mod command;
mod input;

pub use agri_chat_core::{Resolution, Session, SessionBuilder};
pub use attach::{AttachError, load_attachment};
pub use command::{Command, HELP};
pub use input::LineReader;

/// Re-exports of [`agri_chat_core`] crate.
pub mod core {
    pub use agri_chat_core::*;
}

/// Re-exports of [`agri_chat_model`] crate.
pub mod model {
    pub use agri_chat_model::*;
}

/// Re-exports of [`agri_chat_http_relay`] crate.
pub mod http {
    pub use agri_chat_http_relay::*;
}
