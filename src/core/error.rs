use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationMissingArgument,
    ValidationInvalidArgument,

    GitCommandFailed,

    TemplateUnresolvedPlaceholder,

    PipelineDuplicateOrder,
    PipelineStepFailed,

    EnvProvisionFailed,

    InternalIoError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationMissingArgument => "validation.missing_argument",
            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::GitCommandFailed => "git.command_failed",

            ErrorCode::TemplateUnresolvedPlaceholder => "template.unresolved_placeholder",

            ErrorCode::PipelineDuplicateOrder => "pipeline.duplicate_order",
            ErrorCode::PipelineStepFailed => "pipeline.step_failed",

            ErrorCode::EnvProvisionFailed => "env.provision_failed",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingArgumentDetails {
    pub args: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tried: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnresolvedPlaceholderDetails {
    pub placeholder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepFailedDetails {
    pub step: String,
    pub order: u32,
    pub error: String,
    pub compensated: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
    pub retryable: Option<bool>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
            retryable: None,
        }
    }

    pub fn validation_missing_argument(args: Vec<String>) -> Self {
        let details = serde_json::to_value(MissingArgumentDetails { args })
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
        Self::new(
            ErrorCode::ValidationMissingArgument,
            "Missing required argument",
            details,
        )
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        id: Option<String>,
        tried: Option<Vec<String>>,
    ) -> Self {
        let details = serde_json::to_value(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.into(),
            id,
            tried,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            details,
        )
    }

    pub fn git_command_failed(message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::GitCommandFailed,
            message,
            Value::Object(serde_json::Map::new()),
        )
    }

    pub fn template_unresolved(
        placeholder: impl Into<String>,
        template: Option<String>,
    ) -> Self {
        let placeholder = placeholder.into();
        let details = serde_json::to_value(UnresolvedPlaceholderDetails {
            placeholder: placeholder.clone(),
            template,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::TemplateUnresolvedPlaceholder,
            format!("Unresolved template placeholder '{{{{{}}}}}'", placeholder),
            details,
        )
    }

    pub fn pipeline_duplicate_order(order: u32, label: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::PipelineDuplicateOrder,
            format!("Duplicate step order {} ('{}')", order, label.into()),
            serde_json::json!({ "order": order }),
        )
    }

    /// Wrap a step's failure with its identity. Source hints carry over.
    pub fn step_failed(label: &str, order: u32, source: Error, compensated: bool) -> Self {
        let details = serde_json::to_value(StepFailedDetails {
            step: label.to_string(),
            order,
            error: source.message.clone(),
            compensated,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        let mut err = Self::new(
            ErrorCode::PipelineStepFailed,
            format!("Step '{}' failed: {}", label, source.message),
            details,
        );
        err.hints = source.hints;
        err
    }

    pub fn env_provision_failed(message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::EnvProvisionFailed,
            message,
            Value::Object(serde_json::Map::new()),
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let error = error.into();
        let details = serde_json::to_value(InternalIoErrorDetails {
            error: error.clone(),
            context,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::InternalIoError, error, details)
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            "Unexpected error",
            serde_json::json!({ "error": error.into() }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}
