use std::sync::Arc;
use thiserror::Error;

/// Result type alias using the structured error
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers (and the CLI) can
/// match on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExErrorKind {
    // Lookup
    NotFound,

    // Store
    /// A write could not be committed; the enclosing transaction was rolled back
    Persistence,
    /// A read could not complete
    Query,
    /// Another writer held the store lock past the busy timeout
    Concurrency,

    // Input
    InvalidInput,
    Configuration,
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Query => "ERR_QUERY",
            ExErrorKind::Concurrency => "ERR_CONCURRENCY",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Configuration => "ERR_CONFIGURATION",
            ExErrorKind::Io => "ERR_IO",
        }
    }
}

type Cause = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Canonical structured error type
///
/// Carries a classification, the operation that failed, the entity key
/// involved, a human-readable message, and the underlying store error (if
/// any) exposed through [`std::error::Error::source`].
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
    cause: Option<Cause>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
            cause: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity key context (student email or course id)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the underlying error that caused this one
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.cause = Some(Arc::new(cause));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity key context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether an underlying cause was preserved
    pub fn has_cause(&self) -> bool {
        self.cause.is_some()
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ExErrorKind::NotFound
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(cause) = &self.cause {
            write!(f, " caused by: {}", cause)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|c| c as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain-level failures raised before or between store calls
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrarError {
    /// No student row has this email
    #[error("Student not found: {email}")]
    StudentNotFound { email: String },

    /// No course row has this id
    #[error("Course not found: {course_id}")]
    CourseNotFound { course_id: i64 },

    /// Email is blank or not of the form local@domain
    #[error("Invalid email '{email}': {reason}")]
    InvalidEmail { email: String, reason: String },

    /// A required text field is empty or whitespace-only
    #[error("Field '{field}' must not be blank")]
    BlankField { field: String },

    /// The same student email appears twice in one seed batch
    #[error("Duplicate student email: {email}")]
    DuplicateStudent { email: String },
}

impl From<RegistrarError> for ExError {
    fn from(err: RegistrarError) -> Self {
        let message = err.to_string();
        match err {
            RegistrarError::StudentNotFound { email } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(email)
                .with_message(message),
            RegistrarError::CourseNotFound { course_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(course_id.to_string())
                .with_message(message),
            RegistrarError::InvalidEmail { email, .. } => ExError::new(ExErrorKind::InvalidInput)
                .with_entity_id(email)
                .with_message(message),
            RegistrarError::BlankField { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }
            RegistrarError::DuplicateStudent { email } => ExError::new(ExErrorKind::InvalidInput)
                .with_entity_id(email)
                .with_message(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[derive(Debug)]
    struct Disk;

    impl std::fmt::Display for Disk {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("disk I/O error")
        }
    }

    impl std::error::Error for Disk {}

    #[test]
    fn test_cause_is_exposed_as_source() {
        let err = ExError::new(ExErrorKind::Persistence)
            .with_op("create_course")
            .with_message("Error creating course")
            .with_cause(Disk);

        assert!(err.has_cause());
        assert_eq!(err.source().map(|s| s.to_string()), Some("disk I/O error".into()));
        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_PERSISTENCE] in operation 'create_course'"));
        assert!(rendered.ends_with("caused by: disk I/O error"));
    }

    #[test]
    fn test_no_cause_means_no_source() {
        let err = ExError::new(ExErrorKind::Query);
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "[ERR_QUERY]");
    }

    #[test]
    fn test_course_not_found_carries_id() {
        let err: ExError = RegistrarError::CourseNotFound { course_id: 7 }.into();
        assert!(err.is_not_found());
        assert_eq!(err.entity_id(), Some("7"));
        assert_eq!(err.message(), "Course not found: 7");
    }
}
