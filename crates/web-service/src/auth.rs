//! 当前用户提取器
//!
//! 登录会话由上游网关处理，网关校验通过后把用户ID写入 `x-user-id` 请求头。
//! 这里只负责根据该ID加载用户。

use crate::models::err::AppError;
use crate::AppState;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use database::models::UserRecord;
use std::sync::Arc;
use tracing::warn;

/// 保存当前用户ID的请求头
pub const USER_ID_HEADER: &str = "x-user-id";

/// 发起请求的用户
///
/// 缺少请求头、请求头格式错误、用户不存在时都返回 401。
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserRecord);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<i32>().ok())
            .ok_or(AppError::Unauthenticated)?;

        match state.repositories.users.get_user_by_id(user_id).await? {
            Some(user) => Ok(CurrentUser(user)),
            None => {
                warn!("⚠️ 请求头中的用户 {} 不存在", user_id);
                Err(AppError::Unauthenticated)
            }
        }
    }
}
