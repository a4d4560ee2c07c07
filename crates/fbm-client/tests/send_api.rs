use fbm_client::model::{Button, MessagingType, QuickReply, TemplateElement};
use fbm_client::{
    generate_quick_reply_options, MessengerClient, MessengerConfig, MessengerError, ShareCard,
    ShareContent,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "page-token";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn client_for(server: &MockServer) -> MessengerClient {
    init_tracing();
    let config = MessengerConfig::new(TOKEN).with_graph_url(server.uri());
    MessengerClient::new(config).unwrap()
}

async fn mount_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v6.0/me/messages"))
        .and(query_param("access_token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "recipient_id": "123",
            "message_id": "mid.1"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_send_text_message_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v6.0/me/messages"))
        .and(query_param("access_token", TOKEN))
        .and(header("content-type", "application/json"))
        .and(header("connection", "close"))
        .and(body_json(json!({
            "messaging_type": "RESPONSE",
            "recipient": {"id": "123"},
            "message": {"text": "hello"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "recipient_id": "123",
            "message_id": "mid.1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sent = client_for(&server)
        .send_text_message("123", "hello")
        .await
        .unwrap();

    assert_eq!(sent.recipient_id.as_deref(), Some("123"));
    assert_eq!(sent.message_id.as_deref(), Some("mid.1"));
}

#[tokio::test]
async fn test_platform_rejection_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v6.0/me/messages"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error":"bad"}"#))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .send_image_message("123", "https://example.com/i.png")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    let text = err.to_string();
    assert!(text.contains("400"));
    assert!(text.contains(r#"{"error":"bad"}"#));
    assert!(text.contains("https://example.com/i.png"));
    assert!(!text.contains(TOKEN));

    match err {
        MessengerError::Platform { status_line, url, .. } => {
            assert_eq!(status_line, "400 Bad Request");
            assert!(url.ends_with("/v6.0/me/messages?access_token=***"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_every_send_succeeds_on_200() {
    let server = MockServer::start().await;
    mount_ok(&server).await;
    let client = client_for(&server);

    client.send_text_message("1", "hi").await.unwrap();
    client.send_image_message("1", "https://example.com/i.png").await.unwrap();
    client.send_audio_message("1", "https://example.com/a.mp3").await.unwrap();
    client.send_typing_message("1", false).await.unwrap();
    client
        .send_generic_template_message("1", vec![TemplateElement::new("Card")])
        .await
        .unwrap();
    client
        .send_button_message("1", "Pick", vec![Button::postback("A", "A")])
        .await
        .unwrap();
    client
        .send_url_button_message("1", "Docs", "Open", "https://example.com")
        .await
        .unwrap();
    client.send_share_message("1", "Share", "me").await.unwrap();
    client
        .send_share_content("1", &ShareContent::default())
        .await
        .unwrap();
    client
        .send_quick_reply("1", "Pick", generate_quick_reply_options(&["Yes#Y"]).unwrap())
        .await
        .unwrap();
    client.send_ask_user_location("1", "Where?").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 11);
    for request in &requests {
        assert_eq!(
            request.headers.get("connection").and_then(|v| v.to_str().ok()),
            Some("close")
        );
    }
}

#[tokio::test]
async fn test_typing_indicator_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v6.0/me/messages"))
        .and(body_partial_json(json!({
            "recipient": {"id": "55"},
            "sender_action": "typing_on"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let sent = client_for(&server)
        .send_typing_message("55", true)
        .await
        .unwrap();

    assert!(sent.message_id.is_none());
}

#[tokio::test]
async fn test_share_content_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v6.0/me/messages"))
        .and(body_partial_json(json!({
            "message": {"attachment": {"type": "template", "payload": {"template_type": "generic"}}}
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let content = ShareContent {
        sender: ShareCard {
            title: "Invite".to_string(),
            ..Default::default()
        },
        recipient: ShareCard {
            title: "Join us".to_string(),
            ..Default::default()
        },
        button_title: "Join".to_string(),
        destination_url: "https://example.com/join".to_string(),
    };

    client_for(&server)
        .send_share_content("77", &content)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let share_button = &body["message"]["attachment"]["payload"]["elements"][0]["buttons"][0];
    assert_eq!(share_button["type"], "element_share");
    assert_eq!(
        share_button["share_contents"]["attachment"]["payload"]["elements"][0]["buttons"][0]["url"],
        "https://example.com/join"
    );
}

#[tokio::test]
async fn test_quick_replies_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "message": {
                "text": "Color?",
                "quick_replies": [
                    {"content_type": "text", "title": "Red", "payload": "RED"},
                    {"content_type": "location"}
                ]
            }
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .send_quick_reply(
            "1",
            "Color?",
            vec![QuickReply::text("Red", "RED"), QuickReply::location()],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_token_as_url_override() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mock/send"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    init_tracing();
    let config = MessengerConfig::new(format!("{}/mock/send", server.uri()));
    let client = MessengerClient::new(config).unwrap();

    client.send_text_message("1", "hi").await.unwrap();
}

#[tokio::test]
async fn test_api_version_and_messaging_type_from_config() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2.8/me/messages"))
        .and(body_partial_json(json!({"messaging_type": "UPDATE"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = MessengerConfig::new(TOKEN)
        .with_graph_url(server.uri())
        .with_api_version("v2.8")
        .with_messaging_type(MessagingType::Update);
    let client = MessengerClient::new(config).unwrap();

    client.send_text_message("1", "update").await.unwrap();
}

#[tokio::test]
async fn test_dry_run_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    init_tracing();
    let config = MessengerConfig::new(TOKEN)
        .with_graph_url(server.uri())
        .with_dry_run(true);
    let client = MessengerClient::new(config).unwrap();

    client.send_text_message("1", "never sent").await.unwrap();
    client.send_share_message("1", "x", "").await.unwrap();

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_connection_failure_is_http_error() {
    init_tracing();
    let config = MessengerConfig::new(TOKEN)
        .with_graph_url("http://127.0.0.1:1")
        .with_timeout_secs(5);
    let client = MessengerClient::new(config).unwrap();

    let result = client.send_text_message("1", "hi").await;
    assert!(matches!(result, Err(MessengerError::Http(_))));
}

#[tokio::test]
async fn test_get_user_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v6.0/1160103300748406"))
        .and(query_param("fields", fbm_client::client::USER_FIELDS))
        .and(query_param("access_token", TOKEN))
        .and(header("connection", "close"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "first_name": "Justin",
            "last_name": "Lima",
            "profile_pic": "https://cdn.example.com/p.jpg",
            "locale": "pt_BR",
            "timezone": -3,
            "gender": "male",
            "id": "1160103300748406"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = client_for(&server)
        .get_user_data("1160103300748406")
        .await
        .unwrap();

    assert_eq!(user.first_name.as_deref(), Some("Justin"));
    assert_eq!(user.timezone, Some(-3.0));
    assert_eq!(user.id.as_deref(), Some("1160103300748406"));
}

#[tokio::test]
async fn test_get_user_data_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"error":{"message":"Unknown user"}}"#),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).get_user_data("42").await.unwrap_err();

    match err {
        MessengerError::UserFetch { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("Unknown user"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_get_user_data_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let result = client_for(&server).get_user_data("42").await;
    assert!(matches!(result, Err(MessengerError::Json(_))));
}
