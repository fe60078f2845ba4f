use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::ApiError;
use crate::models::request::RequestStatus;

/// JSON body that is deserialized and then checked against its
/// `validator` rules. Both failures become a 400.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::validation(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| ApiError::validation(describe(&errors)))?;

        Ok(Self(value))
    }
}

/// Flattens field errors into one stable, human readable line.
fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map_or_else(|| format!("{field}: {}", e.code), ToString::to_string)
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

pub fn validate_status(status: &str) -> Result<RequestStatus, ApiError> {
    status.parse::<RequestStatus>().map_err(ApiError::validation)
}

pub fn validate_status_filter(status: Option<&str>) -> Result<Option<RequestStatus>, ApiError> {
    status
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(validate_status)
        .transpose()
}

pub fn validate_limit(limit: Option<u64>, max: u64) -> Result<Option<u64>, ApiError> {
    match limit {
        Some(value) if value == 0 || value > max => Err(ApiError::validation(format!(
            "Invalid limit: {value}. Limit must be between 1 and {max}"
        ))),
        other => Ok(other),
    }
}

/// Offsets are bound as signed 64-bit SQL integers.
pub fn validate_offset(offset: Option<u64>) -> Result<Option<u64>, ApiError> {
    match offset {
        Some(value) if i64::try_from(value).is_err() => Err(ApiError::validation(format!(
            "Invalid offset: {value}. Offset must be at most {}",
            i64::MAX
        ))),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::RegisterRequest;

    #[test]
    fn test_validate_status() {
        assert_eq!(validate_status("accepted").unwrap(), RequestStatus::Accepted);
        assert_eq!(validate_status(" Rejected ").unwrap(), RequestStatus::Rejected);
        assert!(validate_status("done").is_err());
    }

    #[test]
    fn test_validate_status_filter() {
        assert_eq!(validate_status_filter(None).unwrap(), None);
        assert_eq!(validate_status_filter(Some("")).unwrap(), None);
        assert_eq!(
            validate_status_filter(Some("pending")).unwrap(),
            Some(RequestStatus::Pending)
        );
        assert!(validate_status_filter(Some("archived")).is_err());
    }

    #[test]
    fn test_validate_limit() {
        assert_eq!(validate_limit(None, 100).unwrap(), None);
        assert_eq!(validate_limit(Some(1), 100).unwrap(), Some(1));
        assert_eq!(validate_limit(Some(100), 100).unwrap(), Some(100));
        assert!(validate_limit(Some(0), 100).is_err());
        assert!(validate_limit(Some(101), 100).is_err());
    }

    #[test]
    fn test_validate_offset() {
        assert_eq!(validate_offset(None).unwrap(), None);
        assert_eq!(validate_offset(Some(0)).unwrap(), Some(0));
        assert_eq!(
            validate_offset(Some(i64::MAX.unsigned_abs())).unwrap(),
            Some(i64::MAX.unsigned_abs())
        );
        assert!(validate_offset(Some(u64::MAX)).is_err());
    }

    #[test]
    fn test_describe_uses_rule_messages() {
        let request = RegisterRequest {
            username: "bruce".into(),
            email: "bruce@wayne.com".into(),
            password: "123".into(),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(describe(&errors), "Password must be at least 6 characters");
    }
}
