//! Mock API tests for the OpenAI service
//!
//! wiremock stands in for the three deployment profiles; responses follow the
//! OpenAI API reference shapes.

use futures_util::StreamExt;
use openai_service::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn file_object(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "object": "file",
        "bytes": 2,
        "created_at": 1710000000,
        "filename": "a.txt",
        "purpose": "assistants",
        "status": "uploaded"
    })
}

fn openai_service(server: &MockServer) -> OpenAiService {
    OpenAiService::new(
        Deployment::openai("test-api-key", Some("org-123".to_string()))
            .with_base_url(server.uri()),
    )
    .unwrap()
}

#[tokio::test]
async fn chat_completion_sends_json_with_auth_and_org() {
    let mock_server = MockServer::start().await;
    let params = json!({"model": "gpt-4o", "messages": [{"role": "user", "content": "Hi"}]});

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer test-api-key"))
        .and(header("Content-Type", "application/json"))
        .and(header("OpenAI-Organization", "org-123"))
        .and(body_json(&params))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Hello!"},
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = openai_service(&mock_server)
        .create_chat_completion(&params)
        .await
        .unwrap();
    assert_eq!(response["choices"][0]["message"]["content"], "Hello!");
}

#[tokio::test]
async fn list_models_against_local_server_without_credential() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [
                {"id": "llama3", "object": "model", "created": 1, "owned_by": "library"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let service = OpenAiService::local(mock_server.uri(), Authorization::default()).unwrap();
    let models = service.list_models().await.unwrap();
    assert_eq!(models.data.len(), 1);
    assert_eq!(models.data[0].id, "llama3");

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(received[0].body.is_empty());
    assert!(received[0].url.query().is_none());
}

#[tokio::test]
async fn azure_profile_uses_api_key_header_and_api_version() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/openai/files/file-abc"))
        .and(query_param("api-version", "2024-02-01"))
        .and(header("api-key", "azure-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "file-abc",
            "object": "file",
            "deleted": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = OpenAiService::azure(
        AzureConfig::new("unused", "azure-key")
            .with_api_version("2024-02-01")
            .with_base_url(mock_server.uri()),
    )
    .unwrap();
    let status = service.delete_file("file-abc").await.unwrap();
    assert!(status.deleted);

    let received = mock_server.received_requests().await.unwrap();
    assert!(received[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn upload_file_sends_multipart_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/files"))
        .and(header("Authorization", "Bearer test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(file_object("file-1")))
        .mount(&mock_server)
        .await;

    let file = openai_service(&mock_server)
        .upload_file(&FileUploadParameters::new(b"hi".to_vec(), "a.txt", "assistants"))
        .await
        .unwrap();
    assert_eq!(file.id, "file-1");

    let received = mock_server.received_requests().await.unwrap();
    let req = &received[0];
    let content_type = req
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    let boundary = content_type
        .strip_prefix("multipart/form-data; boundary=")
        .unwrap();
    assert_eq!(
        req.headers
            .get("content-length")
            .and_then(|v| v.to_str().ok()),
        Some(req.body.len().to_string().as_str())
    );

    let body = String::from_utf8(req.body.clone()).unwrap();
    assert!(body.starts_with(&format!("--{boundary}\r\n")));
    assert!(body.contains("Content-Disposition: form-data; name=\"purpose\"\r\n\r\nassistants\r\n"));
    assert!(body.contains(
        "Content-Disposition: form-data; name=\"file\"; filename=\"a.txt\"\r\nContent-Type: text/plain\r\n\r\nhi\r\n"
    ));
    assert!(body.ends_with(&format!("--{boundary}--\r\n")));
}

#[tokio::test]
async fn list_files_passes_purpose_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/files"))
        .and(query_param("purpose", "fine-tune"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [file_object("file-1"), file_object("file-2")],
            "has_more": false
        })))
        .mount(&mock_server)
        .await;

    let files = openai_service(&mock_server)
        .list_files(Some("fine-tune"))
        .await
        .unwrap();
    let ids: Vec<_> = files.data.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["file-1", "file-2"]);
}

#[tokio::test]
async fn retrieve_file_content_returns_raw_bytes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/files/file-1/content"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8, 1, 2, 255]))
        .mount(&mock_server)
        .await;

    let bytes = openai_service(&mock_server)
        .retrieve_file_content("file-1")
        .await
        .unwrap();
    assert_eq!(&bytes[..], &[0u8, 1, 2, 255]);
}

#[tokio::test]
async fn error_response_maps_to_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/models/gpt-5"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "message": "The model `gpt-5` does not exist",
                "type": "invalid_request_error",
                "param": null,
                "code": "model_not_found"
            }
        })))
        .mount(&mock_server)
        .await;

    let err = openai_service(&mock_server)
        .retrieve_model("gpt-5")
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert!(err.is_client_error());
    match err {
        LlmError::ApiError { message, .. } => {
            assert_eq!(message, "The model `gpt-5` does not exist");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn streaming_chat_yields_chunks_until_done() {
    let mock_server = MockServer::start().await;

    let sse = concat!(
        "data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"lo\"}}]}\n\n",
        "data: [DONE]\n\n"
    );
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(sse),
        )
        .mount(&mock_server)
        .await;

    let mut stream = openai_service(&mock_server)
        .stream_chat_completion(&json!({"model": "gpt-4o", "messages": []}))
        .await
        .unwrap();

    let mut text = String::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.unwrap();
        text.push_str(chunk["choices"][0]["delta"]["content"].as_str().unwrap());
    }
    assert_eq!(text, "Hello");

    let received = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(body["stream"], true);
}

#[tokio::test]
async fn streaming_error_status_maps_to_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"message": "Rate limit reached", "type": "requests"}
        })))
        .mount(&mock_server)
        .await;

    let result = openai_service(&mock_server)
        .stream_chat_completion(&json!({"model": "gpt-4o"}))
        .await;
    assert!(matches!(result, Err(LlmError::ApiError { code: 429, .. })));
}

#[tokio::test]
async fn assistants_request_carries_beta_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/assistants"))
        .and(header("OpenAI-Beta", "assistants=v2"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"object": "list", "data": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let assistants = openai_service(&mock_server)
        .list_assistants(Some(2))
        .await
        .unwrap();
    assert_eq!(assistants["object"], "list");
}

#[tokio::test]
async fn connection_failure_is_http_error() {
    // Nothing listens on port 9 (discard) in test environments.
    let service = OpenAiService::local("http://127.0.0.1:9", Authorization::default()).unwrap();
    assert!(matches!(
        service.list_models().await,
        Err(LlmError::HttpError(_))
    ));
}
