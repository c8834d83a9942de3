use agri_chat_model::{Attachment, ChatMessage, RelayError};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct ReplyBody {
    pub reply: Option<String>,
    pub message: Option<String>,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ConversationPayload<'a> {
    pub messages: &'a [ChatMessage],
}

pub fn create_form(
    text: Option<&str>,
    attachment: Option<&Attachment>,
) -> Result<Form, RelayError> {
    let mut form = Form::new();
    if let Some(text) = text {
        form = form.text("message", text.to_owned());
    }
    if let Some(attachment) = attachment {
        let bytes = attachment.bytes().clone();
        let len = bytes.len() as u64;
        let part = Part::stream_with_length(bytes, len)
            .file_name(attachment.file_name().to_owned())
            .mime_str(attachment.mime().essence_str())
            .map_err(|err| {
                RelayError::network_failure()
                    .with_message(format!("bad attachment: {err}"))
            })?;
        form = form.part("file", part);
    }
    Ok(form)
}

/// Extracts the reply text from a successful response body.
///
/// `reply` wins over `message`. If neither is present, `fallback` is used
/// when given.
pub fn parse_reply(
    body: &[u8],
    fallback: Option<&str>,
) -> Result<String, RelayError> {
    let body: ReplyBody = serde_json::from_slice(body).map_err(|err| {
        RelayError::upstream_error()
            .with_message(format!("malformed reply body: {err}"))
    })?;

    body.reply
        .or(body.message)
        .or_else(|| fallback.map(ToOwned::to_owned))
        .ok_or_else(|| {
            RelayError::upstream_error()
                .with_message("reply body has no `reply` or `message`")
        })
}

#[cfg(test)]
mod tests {
    use agri_chat_model::{ErrorKind, Role};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_conversation_payload() {
        let messages = [
            ChatMessage::new(Role::User, "Hello"),
            ChatMessage::new(Role::Assistant, "Hi there"),
        ];
        let payload = ConversationPayload {
            messages: &messages,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "messages": [
                    { "role": "user", "content": "Hello" },
                    { "role": "assistant", "content": "Hi there" },
                ]
            })
        );
    }

    #[test]
    fn test_parse_reply_fields() {
        assert_eq!(
            parse_reply(br#"{"reply":"Hi there"}"#, None).unwrap(),
            "Hi there"
        );
        assert_eq!(
            parse_reply(br#"{"message":"Processed"}"#, None).unwrap(),
            "Processed"
        );
        assert_eq!(
            parse_reply(br#"{"reply":"a","message":"b"}"#, None).unwrap(),
            "a"
        );
    }

    #[test]
    fn test_parse_reply_fallback() {
        assert_eq!(
            parse_reply(b"{}", Some("File processed successfully.")).unwrap(),
            "File processed successfully."
        );
        let err = parse_reply(b"{}", None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamError);
    }

    #[test]
    fn test_parse_reply_malformed() {
        let bodies: [&[u8]; 3] = [b"<html>", br#"{"reply":42}"#, b"[]"];
        for body in bodies {
            let err = parse_reply(body, Some("unused")).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UpstreamError);
        }
    }
}
