use shared_lib::ParseEnumError;
use thiserror::Error;

/// 数据库操作错误类型
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// SQLX 错误
    #[error("数据库操作错误: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// 连接错误
    #[error("数据库连接错误: {0}")]
    ConnectionError(String),

    /// 迁移错误
    #[error("数据库迁移错误: {0}")]
    MigrationError(String),

    /// 写操作的目标记录不存在
    #[error("记录不存在: {0}")]
    NotFound(String),

    /// 数据库中的文本无法转换为枚举
    #[error("数据解析错误: {0}")]
    DecodeError(#[from] ParseEnumError),
}

impl DatabaseError {
    /// 创建连接错误
    pub fn connection<T: ToString>(msg: T) -> Self {
        Self::ConnectionError(msg.to_string())
    }

    /// 创建迁移错误
    pub fn migration<T: ToString>(msg: T) -> Self {
        Self::MigrationError(msg.to_string())
    }

    /// 创建记录不存在错误
    pub fn not_found<T: ToString>(msg: T) -> Self {
        Self::NotFound(msg.to_string())
    }

    /// 目标记录不存在（包括 sqlx 的 `RowNotFound`）
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::SqlxError(sqlx::Error::RowNotFound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_covers_missing_rows() {
        assert!(DatabaseError::not_found("team id1").is_not_found());
        assert!(DatabaseError::SqlxError(sqlx::Error::RowNotFound).is_not_found());
        assert!(!DatabaseError::connection("refused").is_not_found());
    }
}
