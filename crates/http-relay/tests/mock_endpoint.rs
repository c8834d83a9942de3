use agri_chat_http_relay::{EncodingMode, HttpRelay, HttpRelayConfigBuilder};
use agri_chat_model::{
    Attachment, ChatMessage, ErrorKind, Relay, RelayRequest, Role,
};
use axum::extract::{Json, Multipart};
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use serde_json::{Value, json};
use tokio::net::TcpListener;

async fn reply_to_log(Json(body): Json<Value>) -> Json<Value> {
    let messages = body["messages"].as_array().cloned().unwrap_or_default();
    if messages.len() == 1 && messages[0]["content"] == "Hello" {
        return Json(json!({ "reply": "Hi there" }));
    }
    let last = messages
        .last()
        .and_then(|msg| msg["content"].as_str())
        .unwrap_or_default()
        .to_owned();
    Json(json!({ "reply": format!("{} messages, last: {last}", messages.len()) }))
}

async fn reply_to_form(mut multipart: Multipart) -> Json<Value> {
    let mut fields = vec![];
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_owned();
        let file_name = field.file_name().map(ToOwned::to_owned);
        let content_type = field.content_type().map(ToOwned::to_owned);
        let data = field.bytes().await.unwrap();
        fields.push(match file_name {
            Some(file_name) => format!(
                "{name}={file_name} ({}, {} bytes)",
                content_type.unwrap_or_default(),
                data.len()
            ),
            None => format!("{name}={}", String::from_utf8_lossy(&data)),
        });
    }
    Json(json!({ "message": fields.join("; ") }))
}

async fn serve() -> String {
    let router = Router::new()
        .route("/chat", post(reply_to_log))
        .route("/upload", post(reply_to_form))
        .route("/empty", post(|| async { Json(json!({})) }))
        .route("/broken", post(|| async { "<html>oops</html>" }))
        .route(
            "/down",
            post(|| async { (StatusCode::BAD_GATEWAY, Json(json!({}))) }),
        );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn relay(mode: EncodingMode) -> HttpRelay {
    HttpRelay::new(HttpRelayConfigBuilder::with_mode(mode).build())
}

fn text_request(endpoint: String, history: Vec<ChatMessage>, text: &str) -> RelayRequest {
    RelayRequest::from_draft(&endpoint, history, Some(text.to_owned()), None)
        .unwrap()
}

fn leaf() -> Attachment {
    Attachment::new("leaf.png", mime::IMAGE_PNG, vec![7u8; 32]).unwrap()
}

#[tokio::test]
async fn test_conversation_reply() {
    let base = serve().await;
    let req = text_request(format!("{base}/chat"), vec![], "Hello");
    let reply = relay(EncodingMode::Conversation).send(&req).await.unwrap();
    assert_eq!(reply, "Hi there");
}

#[tokio::test]
async fn test_conversation_sends_history() {
    let base = serve().await;
    let history = vec![
        ChatMessage::new(Role::User, "Hello"),
        ChatMessage::new(Role::Assistant, "Hi there"),
    ];
    let req = text_request(format!("{base}/chat"), history, "When to plant?");
    let reply = relay(EncodingMode::Conversation).send(&req).await.unwrap();
    assert_eq!(reply, "3 messages, last: When to plant?");
}

#[tokio::test]
async fn test_form_text_and_file() {
    let base = serve().await;
    let req = RelayRequest::from_draft(
        &format!("{base}/upload"),
        vec![],
        Some("What is this spot?".to_owned()),
        Some(leaf()),
    )
    .unwrap();
    let reply = relay(EncodingMode::Form).send(&req).await.unwrap();
    assert_eq!(
        reply,
        "message=What is this spot?; file=leaf.png (image/png, 32 bytes)"
    );
}

#[tokio::test]
async fn test_conversation_mode_uploads_attachments_as_form() {
    let base = serve().await;
    let req = RelayRequest::from_draft(
        &format!("{base}/upload"),
        vec![],
        None,
        Some(leaf()),
    )
    .unwrap();
    let reply = relay(EncodingMode::Conversation).send(&req).await.unwrap();
    assert_eq!(reply, "file=leaf.png (image/png, 32 bytes)");
}

#[tokio::test]
async fn test_fallback_reply() {
    let base = serve().await;
    let req = text_request(format!("{base}/empty"), vec![], "Hi");

    let err = relay(EncodingMode::Form).send(&req).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpstreamError);

    let relay = HttpRelay::new(
        HttpRelayConfigBuilder::with_mode(EncodingMode::Form)
            .with_fallback_reply("File processed successfully.")
            .build(),
    );
    let reply = relay.send(&req).await.unwrap();
    assert_eq!(reply, "File processed successfully.");
}

#[tokio::test]
async fn test_non_200_status() {
    let base = serve().await;
    let req = text_request(format!("{base}/down"), vec![], "Hi");
    let err = relay(EncodingMode::Conversation).send(&req).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpstreamError);
}

#[tokio::test]
async fn test_malformed_body() {
    let base = serve().await;
    let req = text_request(format!("{base}/broken"), vec![], "Hi");
    let err = relay(EncodingMode::Conversation).send(&req).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UpstreamError);
}

#[tokio::test]
async fn test_unreachable_endpoint() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let req = text_request(format!("http://{addr}/chat"), vec![], "Hi");
    let err = relay(EncodingMode::Conversation).send(&req).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NetworkFailure);
}
