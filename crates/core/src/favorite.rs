//! Validation rules for favorites input.

use crate::error::CoreError;

/// Validate the two fields a favorite cannot be stored without.
///
/// Both must be present and contain something other than whitespace. All
/// other fields are optional and stored exactly as given.
pub fn validate_favorite_input(event_id: Option<&str>, name: Option<&str>) -> Result<(), CoreError> {
    if is_blank(event_id) {
        return Err(CoreError::Validation("eventId is required".to_string()));
    }
    if is_blank(name) {
        return Err(CoreError::Validation("name is required".to_string()));
    }
    Ok(())
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
