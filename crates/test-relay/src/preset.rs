use agri_chat_model::RelayError;
use serde::{Deserialize, Serialize};

/// How the fake relay answers one request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetReply {
    /// Answers with the given reply text.
    #[serde(rename = "reply")]
    Reply(String),
    /// Fails as if the endpoint were unreachable.
    #[serde(rename = "network_failure")]
    NetworkFailure,
    /// Fails as if the endpoint answered with an error status.
    #[serde(rename = "upstream_error")]
    UpstreamError(u16),
}

impl PresetReply {
    /// Creates a `PresetReply` answering with the given text.
    #[inline]
    pub fn reply<S: Into<String>>(text: S) -> Self {
        Self::Reply(text.into())
    }

    pub(crate) fn to_result(&self) -> Result<String, RelayError> {
        match self {
            PresetReply::Reply(text) => Ok(text.clone()),
            PresetReply::NetworkFailure => Err(RelayError::network_failure()
                .with_message("connection refused")),
            PresetReply::UpstreamError(status) => {
                Err(RelayError::upstream_error()
                    .with_message(format!("status {status}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_deserialize() {
        let script = vec![
            PresetReply::reply("Water the seedlings twice a day."),
            PresetReply::UpstreamError(502),
            PresetReply::NetworkFailure,
        ];

        let serialized = serde_json::to_string(&script).unwrap();
        let deserialized: Vec<PresetReply> =
            serde_json::from_str(&serialized).unwrap();

        assert_eq!(script, deserialized);
    }
}
