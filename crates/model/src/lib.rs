//! Shared types for the chat front-end.
//!
//! This crate defines the message log entries, the draft attachment, the
//! request handed to a relay and the [`Relay`] trait itself. Types in this
//! crate carry no conversation state, that lives in `agri-chat-core`.
//! Relay implementations only need to depend on this crate.

#![deny(missing_docs)]

mod attachment;
mod canned;
mod error;
mod message;
mod relay;
mod request;

pub use attachment::*;
pub use canned::*;
pub use error::*;
pub use message::*;
pub use relay::*;
pub use request::*;
