/// Integration tests with mocked external APIs
/// Exercises the complete content pipeline without hitting real external
/// services: Groq success/retry/failure paths, callback delivery, and the
/// end-to-end assembly scenarios.
use property_content_api::callback_client::CallbackClient;
use property_content_api::config::Config;
use property_content_api::groq_client::GroqClient;
use property_content_api::handlers::AppState;
use property_content_api::models::IncomingPropertyData;
use property_content_api::pipeline;
use property_content_api::validator::FieldThresholds;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper function to create test config pointing at mock servers
fn create_test_config(groq_url: &str, callback_url: &str) -> Config {
    Config {
        port: 8000,
        groq_api_key: "test_key".to_string(),
        groq_api_url: format!("{}/openai/v1/chat/completions", groq_url),
        groq_model: "llama-3.3-70b-versatile".to_string(),
        callback_url: format!("{}/superadmin/update_contents", callback_url),
        review_count: 5,
        faq_count: 3,
        archive_path: None,
        thresholds: FieldThresholds::default(),
    }
}

fn create_state(config: Config) -> AppState {
    let groq = GroqClient::new(&config).ok();
    let callback = CallbackClient::new(&config).expect("callback client");
    AppState {
        config,
        groq,
        callback,
        archive: None,
    }
}

fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    })
}

fn section_body(label: &str) -> String {
    (0..70)
        .map(|i| format!("{}{}", label, i))
        .collect::<Vec<_>>()
        .join(" ")
}

fn markered_blob() -> String {
    format!(
        "### LOCALITY DESCRIPTION\n{}\n\n\
         ### PROPERTY LOCALITY DESCRIPTION\n{}\n\n\
         ### PROPERTY DESCRIPTION\nTest Towers by the developer is {}\n\n\
         ### BUILDER DETAILS DESCRIPTION\n{}\n\n\
         ### BUILDER LISTING DESCRIPTION\n{}\n",
        section_body("locword"),
        section_body("plocword"),
        section_body("propword"),
        section_body("bdetword"),
        section_body("blistword"),
    )
}

fn test_towers_payload() -> serde_json::Value {
    json!({
        "prop_info": [{
            "propertyid": "9001",
            "propertyName": "Test Towers",
            "city_name": "Bangalore",
            "locality_name": "Sarjapur Road"
        }],
        "basic_details": [{
            "property_description": vec!["word"; 300].join(" "),
            "PossessionDate": "2020-03-03"
        }],
        "amenities": [{"Name": "Gym"}, {"Name": "Swimming Pool"}],
        "highlights": [],
        "developer_info": []
    })
}

#[tokio::test]
async fn test_groq_retries_rate_limit_then_succeeds() {
    let mock_server = MockServer::start().await;

    // First attempt is rate limited, the retry succeeds
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("recovered text")))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "http://callback.invalid");
    let client = GroqClient::new(&config).unwrap();
    let result = client.complete("say something", 100, 0.7).await;

    assert_eq!(result.unwrap(), "recovered text");
}

#[tokio::test]
async fn test_groq_non_retryable_status_fails_fast() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such model"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "http://callback.invalid");
    let client = GroqClient::new(&config).unwrap();
    let result = client.complete("say something", 100, 0.7).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_groq_malformed_response_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "http://callback.invalid");
    let client = GroqClient::new(&config).unwrap();
    let result = client.complete("say something", 100, 0.7).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_callback_form_encodes_lists_as_json_strings() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/superadmin/update_contents"))
        .respond_with(ResponseTemplate::new(200).set_body_string("POST API HITTING"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config("http://groq.invalid", &mock_server.uri());
    let client = CallbackClient::new(&config).unwrap();

    let payload = property_content_api::models::ContentPayload {
        propid: Some("9001".to_string()),
        prop_name: Some("Test Towers".to_string()),
        prop_desc: None,
        localityid: None,
        locality_desc: None,
        prop_locality_desc: None,
        builderid: None,
        builder_desc_details: None,
        builder_desc_listing: None,
        reviews: vec![],
        faq: vec![],
        error_note: None,
    };
    let result = client.deliver(&payload).await;

    assert!(result.ok);
    assert_eq!(result.status_code, Some(200));
    assert_eq!(result.response_text.as_deref(), Some("POST API HITTING"));

    let requests = mock_server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("prop_name=Test+Towers"));
    // Empty lists travel as JSON strings, null scalars as empty strings
    assert!(body.contains("reviews=%5B%5D"));
    assert!(body.contains("FAQ=%5B%5D"));
    assert!(body.contains("prop_desc=&"));
}

#[tokio::test]
async fn test_callback_failure_is_captured_not_raised() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let config = create_test_config("http://groq.invalid", &mock_server.uri());
    let client = CallbackClient::new(&config).unwrap();
    let result = client
        .deliver_minimal(Some("9001"), Some("Test Towers"), "forced failure")
        .await;

    assert!(!result.ok);
    assert_eq!(result.status_code, Some(500));
    assert!(result.error.is_none());
}

#[tokio::test]
async fn test_assembly_passes_through_rich_description_and_generates_the_rest() {
    let groq_server = MockServer::start().await;

    // FAQ requests ask for a JSON array; everything else gets the blob
    Mock::given(method("POST"))
        .and(body_string_contains("JSON array"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            r#"[{"question": "Is parking available?", "answer_count": 1,
                 "answers_text": ["Yes, covered."], "category": "Amenities"}]"#,
        )))
        .mount(&groq_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(&markered_blob())))
        .mount(&groq_server)
        .await;

    let config = create_test_config(&groq_server.uri(), "http://callback.invalid");
    let state = create_state(config);

    let data: IncomingPropertyData =
        serde_json::from_value(test_towers_payload()).unwrap();

    // The 300-word property description is sufficient: no generation for it
    let fields = pipeline::build_content_fields(&data, &state.config.thresholds);
    assert!(!fields.property.needs_generation());
    assert!(fields.locality.needs_generation());

    let payload = pipeline::assemble_content(&state, &data).await;

    // Locality was generated and recovered from the blob
    let locality = payload.locality_desc.expect("locality_desc must be generated");
    assert!(locality.contains("locword0"));
    assert!(locality.starts_with("<p>"));

    // Property description passed through cleaned, not replaced
    let prop_desc = payload.prop_desc.expect("prop_desc present");
    assert!(prop_desc.contains("word word"));
    assert!(!prop_desc.contains("propword0"));

    assert!(payload.error_note.is_none());
    assert_eq!(payload.reviews.len(), 5);
    assert_eq!(payload.faq.len(), 1);
    assert_eq!(payload.faq[0].category, "Amenities");
}

#[tokio::test]
async fn test_generation_failure_degrades_and_still_calls_back_once() {
    let groq_server = MockServer::start().await;
    let callback_server = MockServer::start().await;

    // Force every text-generation call to fail fast
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_string("down"))
        .mount(&groq_server)
        .await;
    // The callback must still be attempted exactly once
    Mock::given(method("POST"))
        .and(path("/superadmin/update_contents"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&callback_server)
        .await;

    let config = create_test_config(&groq_server.uri(), &callback_server.uri());
    let state = create_state(config);

    let body = test_towers_payload();
    let result = pipeline::process_and_deliver(&state, &body)
        .await
        .expect("pipeline must not fail on generation errors");

    assert!(result.ok);

    // Degraded payload still carries synthetic reviews and the error note
    let requests = callback_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("error_note=Content+generation+failed"));
    // Fallback reviews reference the builder placeholder text
    assert!(body.contains("Good+project+by"));
}

#[tokio::test]
async fn test_validation_failure_never_reaches_the_callback() {
    let callback_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&callback_server)
        .await;

    let config = create_test_config("http://groq.invalid", &callback_server.uri());
    let state = create_state(config);

    let body = json!({"prop_info": []});
    let result = pipeline::process_and_deliver(&state, &body).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_config_from_env_requires_key_and_callback() {
    // Single test owns the process environment to avoid races.
    for var in ["GROQ_API_KEY", "CALLBACK_URL", "PORT", "REVIEW_COUNT"] {
        std::env::remove_var(var);
    }
    assert!(Config::from_env().is_err());

    std::env::set_var("GROQ_API_KEY", "test_key");
    std::env::set_var("CALLBACK_URL", "not a url");
    assert!(Config::from_env().is_err());

    std::env::set_var("CALLBACK_URL", "https://callback.example/update");
    let config = Config::from_env().expect("valid environment");
    assert_eq!(config.port, 8000);
    assert_eq!(config.review_count, 10);
    assert_eq!(config.thresholds.property, 250);

    std::env::remove_var("GROQ_API_KEY");
    std::env::remove_var("CALLBACK_URL");
}
