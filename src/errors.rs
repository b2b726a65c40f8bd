use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use thiserror::Error;

use crate::external::price_provider::PriceProviderError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Rate limited by external provider")]
    RateLimited,
    #[error("External error: {0}")]
    External(String),
    #[error("Export error: {0}")]
    Export(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::RateLimited => {
                let mut headers = HeaderMap::new();
                headers.insert("Retry-After", HeaderValue::from_static("60"));
                (StatusCode::TOO_MANY_REQUESTS, headers, "Rate limited").into_response()
            },
            AppError::External(msg) => (StatusCode::BAD_GATEWAY, msg).into_response(),
            AppError::Export(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response(),
        }
    }
}

impl From<PriceProviderError> for AppError {
    fn from(value: PriceProviderError) -> Self {
        match value {
            PriceProviderError::RateLimited => AppError::RateLimited,
            PriceProviderError::NotFound(ticker) => {
                AppError::NotFound(format!("No price data found for ticker {}", ticker))
            },
            other => AppError::External(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::header;

    async fn render(err: AppError) -> (StatusCode, HeaderMap, String) {
        let response = err.into_response();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_status_codes() {
        let cases = [
            (AppError::Validation("bad start".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("Unknown asset ZZZZ".into()), StatusCode::NOT_FOUND),
            (AppError::RateLimited, StatusCode::TOO_MANY_REQUESTS),
            (AppError::External("HTTP 503".into()), StatusCode::BAD_GATEWAY),
            (AppError::Export("csv writer closed".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            let (status, _, _) = render(err).await;
            assert_eq!(status, expected);
        }
    }

    #[tokio::test]
    async fn test_rate_limited_sets_retry_after() {
        let (_, headers, body) = render(AppError::RateLimited).await;
        assert_eq!(headers[header::RETRY_AFTER], "60");
        assert_eq!(body, "Rate limited");
    }

    #[tokio::test]
    async fn test_export_error_hides_details() {
        let (_, headers, body) = render(AppError::Export("csv writer closed".into())).await;
        assert_eq!(body, "Internal server error");
        assert!(headers.get(header::RETRY_AFTER).is_none());
    }

    #[tokio::test]
    async fn test_client_errors_keep_message() {
        let (_, _, body) = render(AppError::NotFound("Unknown asset ZZZZ".into())).await;
        assert_eq!(body, "Unknown asset ZZZZ");
    }

    #[test]
    fn test_from_provider_error() {
        assert!(matches!(AppError::from(PriceProviderError::RateLimited), AppError::RateLimited));
        assert!(matches!(
            AppError::from(PriceProviderError::NotFound("AAPL".into())),
            AppError::NotFound(msg) if msg.contains("AAPL")
        ));
        assert!(matches!(
            AppError::from(PriceProviderError::Parse("eof".into())),
            AppError::External(_)
        ));
    }
}
