use crate::utils::error::{MomentsError, Result};

/// Title for a new gallery upload: trimmed, must not be empty.
pub fn upload_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(MomentsError::ValidationError(
            "Upload title must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Both the author name and the message of a comment are required.
pub fn comment_fields(name: &str, message: &str) -> Result<()> {
    if name.trim().is_empty() || message.trim().is_empty() {
        return Err(MomentsError::ValidationError(
            "Name and Comment are required".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_title_trims() {
        assert_eq!(upload_title("  Beach day ").unwrap(), "Beach day");
        assert!(upload_title("   ").is_err());
    }

    #[test]
    fn test_comment_fields() {
        assert!(comment_fields("Jim", "Nice!").is_ok());
        assert!(comment_fields(" ", "Nice!").is_err());
        assert!(comment_fields("Jim", "\n").is_err());
    }
}
