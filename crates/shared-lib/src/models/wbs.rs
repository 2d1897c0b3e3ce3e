//! WBS 编号
//!
//! WBS（Work Breakdown Structure）编号由三段组成：`车号.项目号.工作包号`。
//!
//! - 工作包号为 `0` 时表示一个项目（Project）
//! - 工作包号大于 `0` 时表示一个工作包（Work Package）
//!
//! 编号一旦创建就不可修改，所以这里只提供解析和判断，不提供修改方法。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

/// WBS 编号解析/校验错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WbsError {
    /// 字符串无法解析为三段非负整数
    #[error("{0} is not a valid WBS #!")]
    Invalid(String),

    /// 需要项目编号，但传入的是工作包编号
    #[error("{0} is not a valid project WBS #!")]
    NotProject(WbsNumber),

    /// 需要工作包编号，但传入的是项目编号
    #[error("{0} is not a valid work package WBS #!")]
    NotWorkPackage(WbsNumber),
}

/// WBS 编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WbsNumber {
    #[schema(example = 1)]
    /// 车号
    pub car_number: i32,

    #[schema(example = 2)]
    /// 项目号
    pub project_number: i32,

    #[schema(example = 0)]
    /// 工作包号，`0` 表示项目本身
    pub work_package_number: i32,
}

impl WbsNumber {
    pub const fn new(car_number: i32, project_number: i32, work_package_number: i32) -> Self {
        Self {
            car_number,
            project_number,
            work_package_number,
        }
    }

    /// 解析 `a.b.c` 格式的字符串
    ///
    /// 必须正好三段，每一段都只能由数字组成（不接受符号），否则返回 [`WbsError::Invalid`]。
    pub fn parse(input: &str) -> Result<Self, WbsError> {
        let invalid = || WbsError::Invalid(input.to_string());

        let parts = input
            .trim()
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                part.parse::<i32>().ok()
            })
            .collect::<Option<Vec<_>>>()
            .ok_or_else(invalid)?;

        match parts.as_slice() {
            [car, project, work_package] => Ok(Self::new(*car, *project, *work_package)),
            _ => Err(invalid()),
        }
    }

    pub fn is_project(&self) -> bool {
        self.work_package_number == 0
    }

    pub fn is_work_package(&self) -> bool {
        self.work_package_number > 0
    }

    /// 要求当前编号指向项目
    pub fn ensure_project(&self) -> Result<(), WbsError> {
        if self.is_project() {
            Ok(())
        } else {
            Err(WbsError::NotProject(*self))
        }
    }

    /// 要求当前编号指向工作包
    pub fn ensure_work_package(&self) -> Result<(), WbsError> {
        if self.is_work_package() {
            Ok(())
        } else {
            Err(WbsError::NotWorkPackage(*self))
        }
    }

    /// 当前编号所属项目的编号
    pub fn project_wbs(&self) -> Self {
        Self::new(self.car_number, self.project_number, 0)
    }
}

impl fmt::Display for WbsNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.car_number, self.project_number, self.work_package_number)
    }
}

impl FromStr for WbsNumber {
    type Err = WbsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_project_and_work_package_numbers() {
        let project = WbsNumber::parse("1.2.0").unwrap();
        assert_eq!(project, WbsNumber::new(1, 2, 0));
        assert!(project.is_project());
        assert!(!project.is_work_package());

        let work_package: WbsNumber = "1.2.3".parse().unwrap();
        assert!(work_package.is_work_package());
        assert_eq!(work_package.project_wbs(), project);
    }

    #[test]
    fn rejects_malformed_numbers() {
        for input in ["", "1.2", "1.2.3.4", "a.b.c", "1.-2.0", "1..0", "1.2.x", "+1.2.0", "1.+2.0", "1. 2.0"] {
            assert_eq!(WbsNumber::parse(input), Err(WbsError::Invalid(input.to_string())), "{input}");
        }
    }

    #[test]
    fn scope_checks_render_original_number() {
        let wbs = WbsNumber::new(1, 1, 1);
        assert_eq!(wbs.ensure_project().unwrap_err().to_string(), "1.1.1 is not a valid project WBS #!");
        assert!(wbs.ensure_work_package().is_ok());

        let project = WbsNumber::new(100, 100, 0);
        assert_eq!(
            project.ensure_work_package().unwrap_err().to_string(),
            "100.100.0 is not a valid work package WBS #!"
        );
    }

    #[test]
    fn serializes_in_camel_case() {
        let json = serde_json::to_value(WbsNumber::new(2, 1, 0)).unwrap();
        assert_eq!(json, serde_json::json!({"carNumber": 2, "projectNumber": 1, "workPackageNumber": 0}));
    }
}
