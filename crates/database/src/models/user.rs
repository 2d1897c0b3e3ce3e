//! 用户数据库模型

use shared_lib::{Role, Theme};

/// 用户信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub user_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub email_id: Option<String>,
    pub role: Role,
}

impl UserRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// 用户设置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSettingsRecord {
    pub id: i32,
    pub user_id: i32,
    pub default_theme: Theme,
    pub slack_id: String,
}

/// 用户设置更新参数
#[derive(Debug, Clone, Default)]
pub struct UserSettingsUpdate {
    pub default_theme: Theme,
    pub slack_id: String,
}
