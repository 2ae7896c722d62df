/// Core error types for the graft exporter.

/// A specialized Result type for graft operations.
pub type GraftResult<T> = Result<T, GraftError>;

/// Top-level error type encompassing all graft subsystems.
///
/// Every failure is terminal for the export run: there is no retry policy
/// and no partial output.
#[derive(Debug, thiserror::Error)]
pub enum GraftError {
    /// A required attribute was read before it was resolved, or was left at
    /// its unset default. This is an invariant violation, not a scene error.
    #[error("node '{node}' is missing attribute '{attribute}'")]
    MissingAttribute { node: String, attribute: String },

    /// A resource names another resource that is absent or of the wrong kind.
    #[error("node '{node}' is missing a required reference: {detail}")]
    MissingRequiredReference { node: String, detail: String },

    /// The scene cannot be exported at all (no camera, lock failure).
    #[error("unresolvable scene: {0}")]
    UnresolvableScene(String),

    /// The scene source failed to evaluate a query it accepted.
    #[error("scene source error: {0}")]
    Source(String),

    /// The geometry exporter failed to write a side file.
    #[error("geometry export failed for '{path}': {message}")]
    Geometry { message: String, path: String },

    /// A resource selects a model this exporter does not understand.
    #[error("unsupported model: {0}")]
    Unsupported(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraftError {
    /// Create a missing-attribute error.
    pub fn missing_attribute(node: impl Into<String>, attribute: impl Into<String>) -> Self {
        GraftError::MissingAttribute {
            node: node.into(),
            attribute: attribute.into(),
        }
    }

    /// Create a missing-required-reference error.
    pub fn missing_reference(node: impl Into<String>, detail: impl Into<String>) -> Self {
        GraftError::MissingRequiredReference {
            node: node.into(),
            detail: detail.into(),
        }
    }

    /// Create a geometry-export error.
    pub fn geometry(message: impl Into<String>, path: impl Into<String>) -> Self {
        GraftError::Geometry {
            message: message.into(),
            path: path.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attribute_display() {
        let err = GraftError::missing_attribute("obj__cam1", "focal_length");
        assert_eq!(
            err.to_string(),
            "node 'obj__cam1' is missing attribute 'focal_length'"
        );
    }

    #[test]
    fn test_missing_reference_display() {
        let err = GraftError::missing_reference("obj__geo1__mat", "no surface shader assigned");
        assert!(err.to_string().contains("obj__geo1__mat"));
        assert!(err.to_string().contains("no surface shader assigned"));
    }
}
