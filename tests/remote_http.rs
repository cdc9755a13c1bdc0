use ecopot::config::{ChatConfig, PlantIdConfig};
use ecopot::core::advisor;
use ecopot::errors::AppError;
use ecopot::remote::chat::ChatClient;
use ecopot::remote::plant_id::PlantIdClient;
use ecopot::remote::{ChatCompleter, PlantIdentifier};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn plant_id_config(server: &MockServer) -> PlantIdConfig {
    PlantIdConfig {
        endpoint: format!("{}/v2", server.uri()),
        api_key: "test_plant_key".to_string(),
    }
}

fn chat_config(server: &MockServer) -> ChatConfig {
    ChatConfig {
        endpoint: format!("{}/openai/v1/chat/completions", server.uri()),
        api_key: "test_chat_key".to_string(),
        ..Default::default()
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_identify_sends_base64_image_and_parses_suggestions() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/identify"))
        .and(header("Api-Key", "test_plant_key"))
        .and(body_partial_json(json!({
            "images": ["aW1n"],
            "modifiers": ["crops_fast", "similar_images", "health_all"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "suggestions": [{
                "plant_name": "Monstera deliciosa",
                "probability": 0.962,
                "plant_details": {
                    "common_names": ["Swiss cheese plant"],
                    "name_authority": "Monstera deliciosa Liebm."
                }
            }]
        })))
        .mount(&server)
        .await;

    let cfg = plant_id_config(&server);
    let result = tokio::task::spawn_blocking(move || {
        let client = PlantIdClient::new(&cfg)?;
        client.identify(b"img")
    })
    .await
    .unwrap();

    let resp = result.unwrap();
    let top = &resp.suggestions[0];
    assert_eq!(top.display_name(), "Swiss cheese plant");
    assert_eq!(top.species(), "Monstera deliciosa Liebm.");
    assert_eq!(top.confidence_pct(), 96);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_health_assessment_is_formatted_by_advisor() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/health_assessment"))
        .and(body_partial_json(json!({
            "disease_details": [
                "common_names",
                "url",
                "description",
                "treatment",
                "classification",
                "cause"
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "health_assessment": {
                "diseases": [{
                    "name": "Powdery mildew",
                    "probability": 0.81,
                    "disease_details": {
                        "description": "Fungal growth on leaves.",
                        "treatment": { "biological": ["Neem oil"] }
                    }
                }]
            }
        })))
        .mount(&server)
        .await;

    let cfg = plant_id_config(&server);
    let reply = tokio::task::spawn_blocking(move || {
        let client = PlantIdClient::new(&cfg).unwrap();
        advisor::diagnose(&client, b"leaf")
    })
    .await
    .unwrap();

    assert!(!reply.fallback);
    assert!(reply.text.contains("**1. Powdery mildew** (81% confidence)"));
    assert!(reply.text.contains("💊 Treatment: Neem oil"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_plant_id_server_error_triggers_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/health_assessment"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let cfg = plant_id_config(&server);
    let reply = tokio::task::spawn_blocking(move || {
        let client = PlantIdClient::new(&cfg).unwrap();
        advisor::diagnose(&client, b"leaf")
    })
    .await
    .unwrap();

    assert!(reply.fallback);
    assert!(reply.text.starts_with("I'm having trouble analyzing"));
    assert!(reply.error.unwrap().contains("503"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_chat_completion_returns_first_choice() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .and(header("Authorization", "Bearer test_chat_key"))
        .and(body_partial_json(json!({
            "model": "llama-3.3-70b-versatile",
            "max_tokens": 300,
            "messages": [
                { "role": "system" },
                { "role": "user", "content": "How often should I water a cactus?" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Every 2-3 weeks." } }]
        })))
        .mount(&server)
        .await;

    let cfg = chat_config(&server);
    let answer = tokio::task::spawn_blocking(move || {
        let client = ChatClient::new(&cfg)?;
        client.complete("How often should I water a cactus?")
    })
    .await
    .unwrap();

    assert_eq!(answer.unwrap(), "Every 2-3 weeks.");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_chat_error_body_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Invalid API Key" }
        })))
        .mount(&server)
        .await;

    let cfg = chat_config(&server);
    let result = tokio::task::spawn_blocking(move || {
        let client = ChatClient::new(&cfg)?;
        client.complete("hello")
    })
    .await
    .unwrap();

    match result {
        Err(AppError::Remote(msg)) => assert!(msg.contains("Invalid API Key")),
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }

    let cfg = chat_config(&server);
    let reply = tokio::task::spawn_blocking(move || {
        let client = ChatClient::new(&cfg).unwrap();
        advisor::ask(&client, "bugs on my basil")
    })
    .await
    .unwrap();
    assert!(reply.fallback);
    assert!(reply.text.contains("Pest Control"));
}
