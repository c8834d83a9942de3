//! Core logic of the chat front-end: the conversation store, the draft and
//! its attachment previews, and the session that relays drafts to an
//! endpoint.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

pub mod conversation;
mod draft;
pub mod preview;
mod relay_client;
mod session;

pub use conversation::Conversation;
pub use draft::Draft;
pub use relay_client::{BoxedSendFuture, RelayClient};
pub use session::{PendingReply, Resolution, Session, SessionBuilder};
