//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use overtile::WfcError;
    use overtile::io::error::{invalid_configuration, invalid_target};
    use std::error::Error;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = WfcError::FileSystem {
            path: "/tmp/test.png".into(),
            operation: "read",
            source: io_error,
        };

        assert!(error.source().is_some());
        let message = error.to_string();
        assert!(message.contains("read"));
        assert!(message.contains("/tmp/test.png"));
    }

    // Tests InvalidConfiguration error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_configuration_error() {
        let error = invalid_configuration("pattern_size", &0, &"must be positive");

        let message = error.to_string();
        assert!(message.contains("pattern_size"));
        assert!(message.contains('0'));
        assert!(message.contains("must be positive"));
        assert!(error.source().is_none());
    }

    // Tests exemplar and target errors carry their reason
    // Verified by dropping the reason from the message
    #[test]
    fn test_reason_errors() {
        let exemplar = WfcError::InvalidExemplar {
            reason: "exemplar has no pixels".to_string(),
        };
        assert!(exemplar.to_string().contains("exemplar has no pixels"));

        let target = invalid_target("target must be a PNG file or directory");
        assert!(matches!(target, WfcError::InvalidTarget { .. }));
        assert!(target.to_string().contains("PNG file or directory"));
    }

    // Tests conversion from std::io::Error
    // Verified by removing From implementation
    #[test]
    fn test_from_io_error() {
        let io_error = std::io::Error::other("disk full");
        let error: WfcError = io_error.into();

        assert!(matches!(error, WfcError::FileSystem { .. }));
        assert!(error.to_string().contains("disk full"));
    }

    // Tests conversion from image::ImageError
    // Verified by removing From implementation
    #[test]
    fn test_from_image_error() {
        let image_error = image::ImageError::IoError(std::io::Error::other("truncated"));
        let error: WfcError = image_error.into();

        assert!(matches!(error, WfcError::ImageLoad { .. }));
        assert!(error.source().is_some());
    }
}
