use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use color_eyre::eyre::Error;
use database::DatabaseError;
use serde::Serialize;
use shared_lib::WbsError;
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;
use validator::ValidationErrors;

/// 服务层和路由层统一使用的结果类型
pub type AppResult<T> = Result<T, AppError>;

/// 使用 [`thiserror`] 定义错误类型
/// 方便根据类型转换为相应的http错误码
///
/// 业务规则的错误信息会原样返回给前端展示，所以这里的文案不要随意修改。
#[derive(Error, Debug)]
pub enum AppError {
    /// 请求的记录不存在
    #[error("{entity} with id: {id} not found!")]
    NotFound { entity: &'static str, id: String },

    /// 请求的记录已经被软删除
    #[error("{entity} with id: {id} has been deleted already!")]
    Deleted { entity: &'static str, id: String },

    /// 权限不足
    #[error("Access Denied: {0}")]
    AccessDenied(String),

    /// 访客不能执行的操作
    #[error("Access Denied: Guests cannot {0}!")]
    AccessDeniedGuest(&'static str),

    /// 只有管理员才能执行的操作
    #[error("Access Denied: Only admins can {0}!")]
    AccessDeniedAdminOnly(&'static str),

    /// 其他业务规则错误，携带具体的状态码
    #[error("{message}")]
    Http { status: StatusCode, message: String },

    /// 请求没有携带有效的当前用户
    #[error("Authentication required")]
    Unauthenticated,

    /// WBS 编号不合法
    #[error(transparent)]
    InvalidWbs(#[from] WbsError),

    /// 数据验证错误，这种错误通常都是用户参数不正确导致的，所以需要转换为400
    #[error(transparent)]
    ValidationFailed(#[from] ValidationErrors),

    /// 仓库层数据库错误
    #[error(transparent)]
    RepositoryError(#[from] DatabaseError),

    /// 其他类型错误
    #[error(transparent)]
    InternalError(#[from] Error),
}

impl AppError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn deleted(entity: &'static str, id: impl ToString) -> Self {
        Self::Deleted {
            entity,
            id: id.to_string(),
        }
    }

    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::AccessDenied(message.into())
    }

    pub fn http(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::http(StatusCode::BAD_REQUEST, message)
    }

    /// 错误对应的http状态码
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Deleted { .. } => StatusCode::BAD_REQUEST,
            AppError::AccessDenied(_) | AppError::AccessDeniedGuest(_) | AppError::AccessDeniedAdminOnly(_) => {
                StatusCode::FORBIDDEN
            }
            AppError::Http { status, .. } => *status,
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::InvalidWbs(_) | AppError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            AppError::RepositoryError(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            AppError::RepositoryError(_) | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 错误返回体
#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Project with id: 1.1.0 not found!")]
    pub message: String,
}

/// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::ValidationFailed(err) => format!("Validate failed: {err}"),
            AppError::RepositoryError(err) if err.is_not_found() => {
                warn!("⚠️ 记录不存在: {err}");
                format!("Resource not found: {err}")
            }
            AppError::RepositoryError(err) => {
                error!("❌ 数据库错误: {err}");
                format!("Repository error: {err}")
            }
            AppError::InternalError(err) => {
                error!("❌ 内部错误: {err:?}");
                format!("Something went wrong: {err}")
            }
            other => {
                warn!("⚠️ 请求被拒绝 ({status}): {other}");
                other.to_string()
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_the_client_contract() {
        assert_eq!(AppError::not_found("Project", "1.1.0").to_string(), "Project with id: 1.1.0 not found!");
        assert_eq!(
            AppError::deleted("Risk", "abc").to_string(),
            "Risk with id: abc has been deleted already!"
        );
        assert_eq!(
            AppError::AccessDeniedGuest("create risks").to_string(),
            "Access Denied: Guests cannot create risks!"
        );
        assert_eq!(
            AppError::AccessDeniedAdminOnly("delete projects").to_string(),
            "Access Denied: Only admins can delete projects!"
        );
    }

    #[test]
    fn deleted_records_answer_bad_request() {
        assert_eq!(AppError::deleted("Project", 1).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::not_found("Project", 1).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::access_denied("nope").status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn missing_repository_records_answer_not_found() {
        let err = AppError::from(DatabaseError::not_found("team id1"));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = AppError::from(DatabaseError::connection("refused"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
