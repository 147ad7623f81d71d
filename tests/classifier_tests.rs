use review_insights::types::Content;
use review_insights::{ChatClient, Classifier, ReviewClassifier, SentimentLabel};
use std::sync::Arc;
use tokio::test;

mod mock_chat_api;
use mock_chat_api::{
    create_json_response, create_text_response, mock_api_to_handler, MockChatApi,
};

fn classifier_with(mock: &Arc<MockChatApi>) -> ReviewClassifier {
    let client = ChatClient::with_mock_api("test-key", mock_api_to_handler(mock.clone()));
    ReviewClassifier::new(client)
}

#[test]
async fn classifies_sentiment_from_label_and_confidence_tokens() {
    let mock = Arc::new(MockChatApi::new());
    mock.enqueue(create_text_response("POSITIVE 0.95"));
    let classifier = classifier_with(&mock);

    let score = classifier.classify_sentiment("I love this product").await;

    assert_eq!(score.label, SentimentLabel::Positive);
    assert!((score.confidence - 0.95).abs() < f64::EPSILON);
}

#[test]
async fn unknown_label_degrades_to_neutral_with_default_confidence() {
    let mock = Arc::new(MockChatApi::new());
    mock.enqueue(create_text_response("maybe"));
    let classifier = classifier_with(&mock);

    let score = classifier.classify_sentiment("hmm").await;

    assert_eq!(score.label, SentimentLabel::Neutral);
    assert!((score.confidence - 0.8).abs() < f64::EPSILON);
}

#[test]
async fn transport_failure_degrades_to_neutral_half_confidence() {
    // No mock response configured: the call errors out.
    let mock = Arc::new(MockChatApi::new());
    let classifier = classifier_with(&mock);

    let score = classifier.classify_sentiment("anything").await;

    assert_eq!(score.label, SentimentLabel::Neutral);
    assert!((score.confidence - 0.5).abs() < f64::EPSILON);
}

#[test]
async fn extracts_aspects_from_fenced_json() {
    let mock = Arc::new(MockChatApi::new());
    mock.enqueue(create_json_response(
        r#"[{"aspect": "battery", "sentiment": "negative"}]"#,
    ));
    let classifier = classifier_with(&mock);

    let aspects = classifier.extract_aspects("battery died fast").await;

    assert_eq!(aspects.len(), 1);
    assert_eq!(aspects[0].name, "battery");
    assert_eq!(aspects[0].sentiment, "negative");
}

#[test]
async fn non_list_aspect_payload_yields_empty_list() {
    let mock = Arc::new(MockChatApi::new());
    mock.enqueue(create_text_response(r#"{"aspect": "battery"}"#));
    let classifier = classifier_with(&mock);

    let aspects = classifier.extract_aspects("whatever").await;

    assert!(aspects.is_empty());
}

#[test]
async fn aspect_transport_failure_yields_empty_list() {
    let mock = Arc::new(MockChatApi::new());
    let classifier = classifier_with(&mock);

    let aspects = classifier.extract_aspects("whatever").await;

    assert!(aspects.is_empty());
}

#[test]
async fn sentiment_request_carries_prompt_contract() {
    let mock = Arc::new(MockChatApi::new());
    mock.enqueue(create_text_response("NEGATIVE 0.7"));
    let classifier = classifier_with(&mock).with_subject("Vision Pro");

    classifier.classify_sentiment("too heavy").await;

    let requests = mock.get_request_history();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];

    let system = request.system.as_deref().unwrap_or_default();
    assert!(system.contains("sentiment analysis expert"));
    assert!(system.contains("Format: SENTIMENT CONFIDENCE"));
    assert_eq!(request.temperature, Some(0.3));
    assert_eq!(request.max_tokens, Some(50));

    let Content::Text { text } = &request.messages[0].content[0];
    assert!(text.contains("Vision Pro review"));
    assert!(text.contains("too heavy"));
}

#[test]
async fn aspect_request_carries_prompt_contract() {
    let mock = Arc::new(MockChatApi::new());
    mock.enqueue(create_json_response("[]"));
    let classifier = classifier_with(&mock);

    classifier.extract_aspects("nice screen").await;

    let requests = mock.get_request_history();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];

    let system = request.system.as_deref().unwrap_or_default();
    assert!(system.contains("JSON array"));
    assert_eq!(request.temperature, Some(0.3));
    assert_eq!(request.max_tokens, Some(300));

    let Content::Text { text } = &request.messages[0].content[0];
    assert!(text.contains("Extract aspects from this review"));
    assert!(text.contains("nice screen"));
}
