//! A local fake relay for testing purpose.

mod preset;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use agri_chat_model::{Relay, RelayError, RelayRequest};
use tokio::time::sleep;

pub use preset::*;

#[derive(Default)]
struct Script {
    replies: Vec<PresetReply>,
    received: Vec<RelayRequest>,
}

/// A local fake relay for testing purpose.
///
/// Before sending requests, you need to setup the script, which is how the
/// relay should answer each request. The n-th request gets the n-th preset
/// reply. If there are no enough replies in the script, an upstream error
/// will be returned.
///
/// Every request is recorded, so tests can assert whether anything reached
/// the "network" at all. Clones share the same script and records.
///
/// # Note
///
/// This type is not optimized for production use, there are heavy memory
/// copies involved. You should only use it for testing.
#[derive(Clone, Default)]
pub struct TestRelay {
    script: Arc<Mutex<Script>>,
    delay: Option<Duration>,
}

impl TestRelay {
    /// Creates a relay whose script is the given replies.
    pub fn with_replies(replies: impl IntoIterator<Item = PresetReply>) -> Self {
        let relay = Self::default();
        for reply in replies {
            relay.add_reply(reply);
        }
        relay
    }

    #[inline]
    pub fn add_reply(&self, preset: PresetReply) {
        self.lock().replies.push(preset);
    }

    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns all requests received so far.
    #[inline]
    pub fn received(&self) -> Vec<RelayRequest> {
        self.lock().received.clone()
    }

    /// Returns the number of requests received so far.
    #[inline]
    pub fn call_count(&self) -> usize {
        self.lock().received.len()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Relay for TestRelay {
    fn send(
        &self,
        req: &RelayRequest,
    ) -> impl Future<Output = Result<String, RelayError>> + Send + 'static
    {
        let result = {
            let mut script = self.lock();
            let step_idx = script.received.len();
            script.received.push(req.clone());
            match script.replies.get(step_idx) {
                Some(preset) => preset.to_result(),
                None => Err(RelayError::upstream_error()
                    .with_message("no enough replies")),
            }
        };
        let delay = self.delay.unwrap_or(Duration::from_millis(1));

        async move {
            sleep(delay).await;
            result
        }
    }
}
