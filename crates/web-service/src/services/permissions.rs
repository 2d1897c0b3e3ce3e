//! 权限判断
//!
//! 角色是全序的，这里只封装几种常用的判断，具体的业务规则仍然写在各个服务里。

use crate::models::err::{AppError, AppResult};
use database::models::{ProjectRecord, UserRecord};

/// 访客不能执行 `action`
pub fn ensure_not_guest(user: &UserRecord, action: &'static str) -> AppResult<()> {
    if user.role.is_guest() {
        return Err(AppError::AccessDeniedGuest(action));
    }
    Ok(())
}

/// 只有管理员才能执行 `action`
pub fn ensure_admin(user: &UserRecord, action: &'static str) -> AppResult<()> {
    if !user.role.is_admin() {
        return Err(AppError::AccessDeniedAdminOnly(action));
    }
    Ok(())
}

/// 用户是管理员，或者是项目某个团队的负责人/组长/成员
pub fn is_admin_or_on_project_team(user: &UserRecord, project: &ProjectRecord) -> bool {
    user.role.is_admin() || project.has_team_user(user.user_id)
}

/// 用户是否可以编辑/删除项目下的风险
///
/// 满足任意一条即可：
/// - 管理员及以上
/// - 项目负责人或项目经理
/// - 非访客，且在项目的某个团队中
pub fn has_risk_permissions(user: &UserRecord, project: &ProjectRecord) -> bool {
    user.role.is_admin()
        || project.is_lead_or_manager(user.user_id)
        || (!user.role.is_guest() && project.has_team_user(user.user_id))
}
