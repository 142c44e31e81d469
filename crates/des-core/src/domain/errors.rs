use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DesResult<T> = Result<T, DesError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DesErrorCategory {
    Success,
    ValidationError,
    DataUnavailableError,
    LookupError,
    AmbiguityError,
    InternalError,
}

impl DesErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::ValidationError => 2,
            Self::DataUnavailableError => 3,
            Self::LookupError => 4,
            Self::AmbiguityError => 5,
            Self::InternalError => 6,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::ValidationError => "ValidationError",
            Self::DataUnavailableError => "DataUnavailableError",
            Self::LookupError => "LookupError",
            Self::AmbiguityError => "AmbiguityError",
            Self::InternalError => "InternalError",
        }
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

impl Display for DesErrorCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Workspace-level error: a category with a stable exit code, a short
/// machine-readable code such as `LOOKUP.ENERGY_OUT_OF_RANGE`, and a message
/// naming the offending value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesError {
    category: DesErrorCategory,
    code: &'static str,
    message: String,
}

impl DesError {
    pub fn new(category: DesErrorCategory, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            category,
            code,
            message: message.into(),
        }
    }

    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(DesErrorCategory::ValidationError, code, message)
    }

    pub fn data_unavailable(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(DesErrorCategory::DataUnavailableError, code, message)
    }

    pub fn lookup(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(DesErrorCategory::LookupError, code, message)
    }

    pub fn ambiguity(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(DesErrorCategory::AmbiguityError, code, message)
    }

    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(DesErrorCategory::InternalError, code, message)
    }

    pub const fn category(&self) -> DesErrorCategory {
        self.category
    }

    pub const fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category.is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.code, self.message)
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        self.category
            .is_fatal()
            .then(|| format!("FATAL EXIT CODE: {}", self.exit_code()))
    }
}

impl Display for DesError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.category, self.code, self.message)
    }
}

impl Error for DesError {}
