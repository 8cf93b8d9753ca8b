use super::*;
use crate::constants::header;

fn headers_with_origin() -> Headers {
    let mut headers = Headers::new();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN.to_string(), "*".to_string());
    headers
}

#[test]
fn when_preflight_should_short_circuit_with_status() {
    // Arrange
    let decision = CorsDecision::Preflight(PreflightResult {
        headers: headers_with_origin(),
        status: 204,
    });

    // Act & Assert
    assert!(decision.is_short_circuit());
    assert_eq!(decision.status(), Some(204));
    assert_eq!(
        decision
            .headers()
            .and_then(|headers| headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN))
            .map(String::as_str),
        Some("*"),
    );
}

#[test]
fn when_simple_should_continue_without_status() {
    // Arrange
    let decision = CorsDecision::Simple(SimpleResult {
        headers: headers_with_origin(),
    });

    // Act & Assert
    assert!(!decision.is_short_circuit());
    assert_eq!(decision.status(), None);
    assert_eq!(decision.into_headers().len(), 1);
}

#[test]
fn when_not_applicable_should_expose_no_headers() {
    // Arrange
    let decision = CorsDecision::NotApplicable;

    // Act & Assert
    assert!(!decision.is_short_circuit());
    assert!(decision.headers().is_none());
    assert!(decision.into_headers().is_empty());
}

#[test]
fn when_callback_error_displayed_should_include_source_message() {
    // Arrange
    let error = CorsError::OriginCallback("allow-list store offline".into());

    // Act
    let message = error.to_string();

    // Assert
    assert_eq!(message, "origin callback failed: allow-list store offline");
    assert!(std::error::Error::source(&error).is_some());
}
