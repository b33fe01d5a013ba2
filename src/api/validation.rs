use crate::api::error::ApiError;

pub fn validate_uuid(uuid_str: &str) -> Result<uuid::Uuid, ApiError> {
    uuid::Uuid::parse_str(uuid_str)
        .map_err(|_| ApiError::bad_request("Invalid UUID format"))
}
