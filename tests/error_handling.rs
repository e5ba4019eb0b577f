use axum::http::StatusCode;
use axum::response::IntoResponse;
use portfolio_server::error::{PortfolioError, Result};
use std::error::Error;

#[test]
fn test_error_display() {
    let error = PortfolioError::RateLimitExceeded("Rate limit hit".to_string());
    assert_eq!(format!("{}", error), "Rate limit exceeded: Rate limit hit");

    let error = PortfolioError::NotFound("User not found".to_string());
    assert_eq!(format!("{}", error), "Resource not found: User not found");

    let error = PortfolioError::ApiError("API failed".to_string());
    assert_eq!(format!("{}", error), "GitHub API error: API failed");

    let error = PortfolioError::InvalidRequest("Unknown tab: x".to_string());
    assert_eq!(format!("{}", error), "Invalid request: Unknown tab: x");

    let error = PortfolioError::ActorError("gone".to_string());
    assert_eq!(format!("{}", error), "Actor error: gone");
}

#[test]
fn test_error_source() {
    let error = PortfolioError::RateLimitExceeded("Rate limit hit".to_string());
    assert!(error.source().is_none());

    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: PortfolioError = json_error.into();
    assert!(error.source().is_some());
}

#[test]
fn test_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error: PortfolioError = io_error.into();
    assert!(matches!(error, PortfolioError::IoError(_)));
}

#[test]
fn test_result_type() {
    fn returns_result() -> Result<String> {
        Ok("success".to_string())
    }

    let result = returns_result();
    tokio_test::assert_ok!(&result);
    assert_eq!(result.unwrap(), "success");

    fn returns_error() -> Result<String> {
        Err(PortfolioError::NotFound("Not found".to_string()))
    }

    tokio_test::assert_err!(returns_error());
}

#[test]
fn test_status_codes() {
    let cases = [
        (PortfolioError::InvalidRequest("bad".to_string()), StatusCode::BAD_REQUEST),
        (PortfolioError::NotFound("missing".to_string()), StatusCode::NOT_FOUND),
        (PortfolioError::ActorError("stopped".to_string()), StatusCode::SERVICE_UNAVAILABLE),
        (PortfolioError::ApiError("boom".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (error, expected) in cases {
        assert_eq!(error.into_response().status(), expected);
    }
}
