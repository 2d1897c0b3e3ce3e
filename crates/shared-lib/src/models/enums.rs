//! 以文本形式存储的枚举
//!
//! 数据库里这些字段都是 `TEXT` 列（带 `CHECK` 约束），json 中使用大写蛇形命名，
//! 与前端共享的类型定义保持一致。

use thiserror::Error;

/// 文本无法转换为对应枚举时返回的错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{value} is not a valid {kind}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// 定义一个与文本互相转换的枚举
///
/// 同时生成 `as_str`、`Display`、`FromStr` 以及 serde/utoipa 的派生实现。
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::models::enums::ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err($crate::models::enums::ParseEnumError {
                        kind: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

text_enum! {
    /// WBS 元素（项目/工作包）的状态
    pub enum WbsElementStatus {
        Inactive => "INACTIVE",
        Active => "ACTIVE",
        Complete => "COMPLETE",
    }
}

text_enum! {
    /// 工作包所处阶段
    pub enum WorkPackageStage {
        Research => "RESEARCH",
        Design => "DESIGN",
        Manufacturing => "MANUFACTURING",
        Install => "INSTALL",
        Testing => "TESTING",
    }
}

text_enum! {
    /// 物料采购状态
    pub enum MaterialStatus {
        NotReadyToOrder => "NOT_READY_TO_ORDER",
        ReadyToOrder => "READY_TO_ORDER",
        Ordered => "ORDERED",
        Shipped => "SHIPPED",
        Received => "RECEIVED",
    }
}

text_enum! {
    /// 用户界面主题
    pub enum Theme {
        Dark => "DARK",
        Light => "LIGHT",
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::Dark
    }
}
