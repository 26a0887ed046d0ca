use crate::error::{MapGroupError, MapGroupResult};

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> MapGroupResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(MapGroupError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Validates that an integer is positive (> 0).
pub fn positive(value: i64, field: &str) -> MapGroupResult<u32> {
    if value <= 0 {
        Err(MapGroupError::NonPositive {
            field: field.to_string(),
        })
    } else {
        u32::try_from(value).map_err(|_| MapGroupError::Other(format!("{} is out of range", field)))
    }
}

/// Validates a length limit counted in characters, not bytes.
pub fn max_len(value: &str, max: usize, field: &str) -> MapGroupResult<()> {
    if value.chars().count() > max {
        Err(MapGroupError::TooLong {
            field: field.to_string(),
            max,
        })
    } else {
        Ok(())
    }
}

/// Loose email check: one `@` with a non-empty local part and a dotted domain.
pub fn email(value: &str) -> MapGroupResult<String> {
    let trimmed = value.trim();
    let valid = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !trimmed.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(trimmed.to_string())
    } else {
        Err(MapGroupError::InvalidEmail(value.to_string()))
    }
}
