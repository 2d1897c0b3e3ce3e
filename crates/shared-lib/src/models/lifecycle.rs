//! 软删除生命周期
//!
//! 数据库中仍然以 `date_deleted` / `deleted_by_user_id` 两列存储，
//! 读出后统一转换为 [`Lifecycle`]，避免到处判断 `Option` 是否为空。

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Active,
    Deleted {
        at: DateTime<Utc>,
        /// 执行删除的用户，历史数据可能为空
        by: Option<i32>,
    },
}

impl Lifecycle {
    /// 由数据库两列还原生命周期
    ///
    /// 只要 `date_deleted` 有值就视为已删除。
    pub fn from_columns(date_deleted: Option<DateTime<Utc>>, deleted_by: Option<i32>) -> Self {
        match date_deleted {
            Some(at) => Lifecycle::Deleted { at, by: deleted_by },
            None => Lifecycle::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Lifecycle::Active)
    }

    pub fn is_deleted(&self) -> bool {
        !self.is_active()
    }

    pub fn date_deleted(&self) -> Option<DateTime<Utc>> {
        match self {
            Lifecycle::Active => None,
            Lifecycle::Deleted { at, .. } => Some(*at),
        }
    }

    pub fn deleted_by(&self) -> Option<i32> {
        match self {
            Lifecycle::Active => None,
            Lifecycle::Deleted { by, .. } => *by,
        }
    }
}
