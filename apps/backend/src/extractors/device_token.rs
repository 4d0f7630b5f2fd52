//! Device token extractor.
//!
//! Clients identify themselves with an opaque per-device token in the
//! `x-device-token` header. The token is generated client-side and owns the
//! player identity within a tournament; there is no account system.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;

pub const DEVICE_TOKEN_HEADER: &str = "x-device-token";
const MAX_TOKEN_LEN: usize = 128;

#[derive(Debug, Clone)]
pub struct DeviceToken(pub String);

impl FromRequest for DeviceToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

fn extract(req: &HttpRequest) -> Result<DeviceToken, AppError> {
    let value = req
        .headers()
        .get(DEVICE_TOKEN_HEADER)
        .ok_or_else(|| {
            AppError::unauthorized(ErrorCode::MissingDeviceToken, "Missing x-device-token header")
        })?
        .to_str()
        .map_err(|_| {
            AppError::unauthorized(ErrorCode::MissingDeviceToken, "Malformed x-device-token header")
        })?
        .trim();

    if value.is_empty() || value.len() > MAX_TOKEN_LEN {
        return Err(AppError::unauthorized(
            ErrorCode::MissingDeviceToken,
            "Device token must be 1..=128 characters",
        ));
    }

    Ok(DeviceToken(value.to_string()))
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    #[test]
    fn extracts_the_header() {
        let req = TestRequest::default()
            .insert_header((DEVICE_TOKEN_HEADER, "abc-123"))
            .to_http_request();
        let token = extract(&req).unwrap();
        assert_eq!(token.0, "abc-123");
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        let err = extract(&req).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[test]
    fn oversized_tokens_are_rejected() {
        let req = TestRequest::default()
            .insert_header((DEVICE_TOKEN_HEADER, "x".repeat(200)))
            .to_http_request();
        assert!(extract(&req).is_err());
    }
}
