use promptdock_core::error::CoreError;
use serde::Serialize;

/// Caller-visible error: a stable code plus a message safe to show.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AppError {
    pub code: &'static str,
    pub message: String,
}

impl AppError {
    pub fn unknown_operation(op: &str) -> Self {
        log::warn!("Unknown operation: {op}");
        Self {
            code: "UNKNOWN_OPERATION",
            message: format!("Unknown operation: {op}"),
        }
    }

    pub fn invalid_arguments(op: &str, reason: &str) -> Self {
        log::warn!("Invalid arguments for {op}: {reason}");
        Self {
            code: "INVALID_ARGUMENTS",
            message: format!("Invalid arguments for {op}: {reason}"),
        }
    }

    pub fn invalid_request(reason: &str) -> Self {
        log::warn!("Invalid request: {reason}");
        Self {
            code: "INVALID_REQUEST",
            message: format!("Invalid request: {reason}"),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl From<CoreError> for AppError {
    /// 系统错误只记录日志，不把细节（路径、系统消息）返回给调用方
    fn from(err: CoreError) -> Self {
        let code = err.code();
        if err.is_expected() {
            log::warn!("AppError: {err}");
            Self {
                code,
                message: err.to_string(),
            }
        } else {
            log::error!("AppError: {err}");
            Self {
                code,
                message: "Storage operation failed - check logs for details".to_string(),
            }
        }
    }
}
