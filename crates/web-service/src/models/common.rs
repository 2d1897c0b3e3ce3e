use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 只包含提示信息的返回对象
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct Message {
    #[schema(example = "Project 1.1.0 successfully assigned to team 1.")]
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 健康检查返回对象
#[derive(Deserialize, Debug, ToSchema, Serialize)]
pub struct HealthStatus {
    #[schema(example = "healthy")]
    pub status: String,

    /// 当前服务器时间（RFC3339）
    pub timestamp: String,
}
