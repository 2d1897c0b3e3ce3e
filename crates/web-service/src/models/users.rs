//! 用户相关的请求/返回对象

use database::models::{UserRecord, UserSettingsRecord};
use serde::{Deserialize, Serialize};
use shared_lib::{Role, Theme};
use utoipa::ToSchema;
use validator::Validate;

/// 用户信息
#[derive(Deserialize, Debug, Clone, ToSchema, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    #[schema(example = 1)]
    pub user_id: i32,

    #[schema(example = "Thomas")]
    pub first_name: String,

    #[schema(example = "Emrax")]
    pub last_name: String,

    #[schema(example = "emrax.t@husky.neu.edu")]
    pub email: String,

    /// 学校邮箱ID
    pub email_id: Option<String>,

    pub role: Role,
}

impl From<&UserRecord> for UserView {
    fn from(user: &UserRecord) -> Self {
        Self {
            user_id: user.user_id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            email_id: user.email_id.clone(),
            role: user.role,
        }
    }
}

impl From<UserRecord> for UserView {
    fn from(user: UserRecord) -> Self {
        Self {
            user_id: user.user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            email_id: user.email_id,
            role: user.role,
        }
    }
}

/// 用户设置
#[derive(Deserialize, Debug, ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettingsView {
    pub id: i32,
    pub default_theme: Theme,
    pub slack_id: String,
}

impl From<UserSettingsRecord> for UserSettingsView {
    fn from(settings: UserSettingsRecord) -> Self {
        Self {
            id: settings.id,
            default_theme: settings.default_theme,
            slack_id: settings.slack_id,
        }
    }
}

/// 更新用户设置
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserSettingsRequest {
    pub default_theme: Theme,

    /// Slack 用户ID，可以为空字符串
    #[schema(example = "U01ABCDEF")]
    pub slack_id: String,
}

/// 修改用户角色
#[derive(Deserialize, Debug, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRoleRequest {
    pub role: Role,
}
