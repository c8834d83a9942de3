use std::future::ready;

use agri_chat_model::{
    Attachment, ChatMessage, ErrorKind, Relay, RelayError, RelayRequest, Role,
};

struct EchoRelay;

impl Relay for EchoRelay {
    fn send(
        &self,
        req: &RelayRequest,
    ) -> impl Future<Output = Result<String, RelayError>> + Send + 'static
    {
        let result = 'blk: {
            if req.endpoint != "echo://local" {
                break 'blk Err(RelayError::network_failure()
                    .with_message(format!("unknown host: {}", req.endpoint)));
            }

            let mut reply = match &req.text {
                Some(text) => format!("You said {text}"),
                None => "You sent nothing to say".to_owned(),
            };
            if let Some(attachment) = &req.attachment {
                reply.push_str(&format!(" and {}", attachment.file_name()));
            }
            Ok(reply)
        };
        ready(result)
    }
}

#[tokio::test]
async fn test_echo() {
    let req = RelayRequest::from_draft(
        "echo://local",
        vec![ChatMessage::new(Role::User, "Hi")],
        Some("Good morning".to_owned()),
        None,
    )
    .unwrap();
    let reply = EchoRelay.send(&req).await.unwrap();
    assert_eq!(reply, "You said Good morning");
}

#[tokio::test]
async fn test_echo_attachment_only() {
    let attachment =
        Attachment::new("field.png", mime::IMAGE_PNG, vec![1, 2, 3]).unwrap();
    let req =
        RelayRequest::from_draft("echo://local", vec![], None, Some(attachment))
            .unwrap();
    assert!(req.messages.is_empty());
    let reply = EchoRelay.send(&req).await.unwrap();
    assert_eq!(reply, "You sent nothing to say and field.png");
}

#[tokio::test]
async fn test_error() {
    let req = RelayRequest::forward(
        "echo://elsewhere",
        vec![ChatMessage::new(Role::User, "Hi")],
    );
    let err = EchoRelay.send(&req).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NetworkFailure);
}
