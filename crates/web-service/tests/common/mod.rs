//! 测试用的内存仓库
//!
//! [`MemoryStore`] 一个结构体实现全部仓库 trait，通过 [`Repositories::from_store`] 注入服务层。
//! 每次写操作都会累加 [`MemoryStore::writes`]，用于断言“拒绝时没有任何写入”。

#![allow(dead_code)]

use axum::Router;
use chrono::{DateTime, NaiveDate, Utc};
use database::models::*;
use database::{
    BomRepositoryTrait, ChangeRequestRepositoryTrait, DatabaseError, DatabaseResult, ProjectRepositoryTrait,
    Repositories, RiskRepositoryTrait, TeamRepositoryTrait, UserRepositoryTrait, WorkPackageRepositoryTrait,
};
use shared_lib::{Lifecycle, Role, WbsElementStatus, WbsNumber};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use web_service::AppState;

#[derive(Default)]
struct State {
    users: Vec<UserRecord>,
    settings: Vec<UserSettingsRecord>,
    teams: Vec<TeamRecord>,
    projects: Vec<ProjectRecord>,
    project_teams: Vec<(i32, String)>,
    favorites: Vec<(i32, i32)>,
    work_packages: Vec<WorkPackageRecord>,
    risks: Vec<RiskRecord>,
    change_requests: Vec<ChangeRequestRecord>,
    link_types: Vec<LinkTypeRecord>,
    manufacturers: Vec<ManufacturerRecord>,
    material_types: Vec<MaterialTypeRecord>,
    assemblies: Vec<AssemblyRecord>,
    materials: Vec<MaterialRecord>,
    next_id: i32,
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        1000 + self.next_id
    }

    fn user(&self, user_id: i32) -> DatabaseResult<UserRecord> {
        self.users
            .iter()
            .find(|u| u.user_id == user_id)
            .cloned()
            .ok_or_else(|| DatabaseError::not_found(format!("user {user_id}")))
    }

    /// 按数据库读取时的方式组装项目：只保留未删除的条目和工作包，团队和收藏实时计算
    fn assemble_project(&self, base: &ProjectRecord) -> ProjectRecord {
        let mut project = base.clone();
        let active = |bullets: &[DescriptionBulletRecord]| {
            bullets.iter().filter(|b| b.lifecycle.is_active()).cloned().collect::<Vec<_>>()
        };
        project.goals = active(&base.goals);
        project.features = active(&base.features);
        project.other_constraints = active(&base.other_constraints);
        project.teams = self
            .project_teams
            .iter()
            .filter(|(project_id, _)| *project_id == base.project_id)
            .filter_map(|(_, team_id)| self.teams.iter().find(|t| &t.team_id == team_id))
            .map(TeamRecord::membership)
            .collect();
        project.favorited_by = self
            .favorites
            .iter()
            .filter(|(project_id, _)| *project_id == base.project_id)
            .map(|(_, user_id)| *user_id)
            .collect();
        project.work_packages = self
            .work_packages
            .iter()
            .filter(|wp| wp.project_id == base.project_id && wp.wbs_element.lifecycle.is_active())
            .map(|wp| self.assemble_work_package(wp))
            .collect();
        project
    }

    fn assemble_work_package(&self, base: &WorkPackageRecord) -> WorkPackageRecord {
        let mut work_package = base.clone();
        work_package.expected_activities.retain(|b| b.lifecycle.is_active());
        work_package.deliverables.retain(|b| b.lifecycle.is_active());
        work_package
    }

    fn assemble_team(&self, base: &TeamRecord) -> TeamRecord {
        let mut team = base.clone();
        team.projects = self
            .project_teams
            .iter()
            .filter(|(_, team_id)| team_id == &base.team_id)
            .filter_map(|(project_id, _)| self.projects.iter().find(|p| p.project_id == *project_id))
            .filter(|p| p.wbs_element.lifecycle.is_active())
            .map(ProjectRecord::summary)
            .collect();
        team
    }

    fn project_mut(&mut self, project_id: i32) -> DatabaseResult<&mut ProjectRecord> {
        self.projects
            .iter_mut()
            .find(|p| p.project_id == project_id)
            .ok_or_else(|| DatabaseError::not_found(format!("project {project_id}")))
    }

    fn team_mut(&mut self, team_id: &str) -> DatabaseResult<&mut TeamRecord> {
        self.teams
            .iter_mut()
            .find(|t| t.team_id == team_id)
            .ok_or_else(|| DatabaseError::not_found(format!("team {team_id}")))
    }

    fn team(&self, team_id: &str) -> DatabaseResult<TeamRecord> {
        self.teams
            .iter()
            .find(|t| t.team_id == team_id)
            .map(|t| self.assemble_team(t))
            .ok_or_else(|| DatabaseError::not_found(format!("team {team_id}")))
    }

    fn all_bullets_mut(&mut self) -> impl Iterator<Item = &mut DescriptionBulletRecord> {
        let project_bullets = self
            .projects
            .iter_mut()
            .flat_map(|p| p.goals.iter_mut().chain(p.features.iter_mut()).chain(p.other_constraints.iter_mut()));
        let work_package_bullets = self
            .work_packages
            .iter_mut()
            .flat_map(|wp| wp.expected_activities.iter_mut().chain(wp.deliverables.iter_mut()));
        project_bullets.chain(work_package_bullets)
    }
}

/// 内存仓库
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    fn write(&self) -> MutexGuard<'_, State> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.state()
    }

    /// 已经发生的写操作次数
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn insert_user(&self, user: UserRecord) {
        self.state().users.push(user);
    }

    pub fn insert_team(&self, team: TeamRecord) {
        self.state().teams.push(team);
    }

    pub fn insert_project(&self, project: ProjectRecord) {
        self.state().projects.push(project);
    }

    pub fn assign_team(&self, project_id: i32, team_id: &str) {
        self.state().project_teams.push((project_id, team_id.to_string()));
    }

    pub fn insert_work_package(&self, work_package: WorkPackageRecord) {
        self.state().work_packages.push(work_package);
    }

    pub fn insert_risk(&self, risk: RiskRecord) {
        self.state().risks.push(risk);
    }

    pub fn insert_change_request(&self, change_request: ChangeRequestRecord) {
        self.state().change_requests.push(change_request);
    }

    pub fn insert_link_type(&self, link_type: LinkTypeRecord) {
        self.state().link_types.push(link_type);
    }

    pub fn insert_manufacturer(&self, manufacturer: ManufacturerRecord) {
        self.state().manufacturers.push(manufacturer);
    }

    pub fn insert_material_type(&self, material_type: MaterialTypeRecord) {
        self.state().material_types.push(material_type);
    }

    /// 直接读取存储中的项目（包括已删除的）
    pub fn project(&self, project_id: i32) -> Option<ProjectRecord> {
        let state = self.state();
        state
            .projects
            .iter()
            .find(|p| p.project_id == project_id)
            .map(|p| state.assemble_project(p))
    }

    /// 存储中的原始项目，不过滤已删除的描述条目
    pub fn raw_project(&self, project_id: i32) -> Option<ProjectRecord> {
        self.state().projects.iter().find(|p| p.project_id == project_id).cloned()
    }

    pub fn raw_work_package(&self, work_package_id: i32) -> Option<WorkPackageRecord> {
        self.state()
            .work_packages
            .iter()
            .find(|wp| wp.work_package_id == work_package_id)
            .cloned()
    }

    pub fn raw_risk(&self, risk_id: &str) -> Option<RiskRecord> {
        self.state().risks.iter().find(|r| r.id == risk_id).cloned()
    }

    pub fn raw_team(&self, team_id: &str) -> Option<TeamRecord> {
        self.state().team(team_id).ok()
    }

    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories::from_store(self.clone())
    }

    pub fn app_state(self: &Arc<Self>) -> Arc<AppState> {
        Arc::new(AppState::new(self.repositories()))
    }

    pub fn router(self: &Arc<Self>) -> Router {
        web_service::routes::create_app_router(self.app_state())
    }
}

#[async_trait::async_trait]
impl UserRepositoryTrait for MemoryStore {
    async fn find_users(&self) -> DatabaseResult<Vec<UserRecord>> {
        Ok(self.state().users.clone())
    }

    async fn get_user_by_id(&self, user_id: i32) -> DatabaseResult<Option<UserRecord>> {
        Ok(self.state().users.iter().find(|u| u.user_id == user_id).cloned())
    }

    async fn get_users_by_ids(&self, user_ids: &[i32]) -> DatabaseResult<Vec<UserRecord>> {
        Ok(self
            .state()
            .users
            .iter()
            .filter(|u| user_ids.contains(&u.user_id))
            .cloned()
            .collect())
    }

    async fn update_user_role(&self, user_id: i32, role: Role) -> DatabaseResult<UserRecord> {
        let mut state = self.write();
        let user = state
            .users
            .iter_mut()
            .find(|u| u.user_id == user_id)
            .ok_or_else(|| DatabaseError::not_found(format!("user {user_id}")))?;
        user.role = role;
        Ok(user.clone())
    }

    async fn get_or_create_user_settings(&self, user_id: i32) -> DatabaseResult<UserSettingsRecord> {
        if let Some(settings) = self.state().settings.iter().find(|s| s.user_id == user_id) {
            return Ok(settings.clone());
        }
        self.upsert_user_settings(user_id, UserSettingsUpdate::default()).await
    }

    async fn upsert_user_settings(&self, user_id: i32, update: UserSettingsUpdate) -> DatabaseResult<UserSettingsRecord> {
        let mut state = self.write();
        if let Some(settings) = state.settings.iter_mut().find(|s| s.user_id == user_id) {
            settings.default_theme = update.default_theme;
            settings.slack_id = update.slack_id;
            return Ok(settings.clone());
        }
        let settings = UserSettingsRecord {
            id: state.next_id(),
            user_id,
            default_theme: update.default_theme,
            slack_id: update.slack_id,
        };
        state.settings.push(settings.clone());
        Ok(settings)
    }

    async fn find_favorite_project_ids(&self, user_id: i32) -> DatabaseResult<Vec<i32>> {
        let state = self.state();
        Ok(state
            .favorites
            .iter()
            .filter(|(_, uid)| *uid == user_id)
            .map(|(project_id, _)| *project_id)
            .filter(|project_id| {
                state
                    .projects
                    .iter()
                    .any(|p| p.project_id == *project_id && p.wbs_element.lifecycle.is_active())
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl TeamRepositoryTrait for MemoryStore {
    async fn find_teams(&self) -> DatabaseResult<Vec<TeamRecord>> {
        let state = self.state();
        Ok(state.teams.iter().map(|t| state.assemble_team(t)).collect())
    }

    async fn get_team_by_id(&self, team_id: &str) -> DatabaseResult<Option<TeamRecord>> {
        Ok(self.state().team(team_id).ok())
    }

    async fn find_teams_with_user(&self, user_id: i32) -> DatabaseResult<Vec<TeamRecord>> {
        let state = self.state();
        Ok(state
            .teams
            .iter()
            .filter(|t| t.is_head(user_id) || t.is_lead(user_id) || t.is_member(user_id))
            .map(|t| state.assemble_team(t))
            .collect())
    }

    async fn create_team(&self, team: NewTeam) -> DatabaseResult<TeamRecord> {
        let mut state = self.write();
        let head = state.user(team.head_id)?;
        let team_id = format!("team-{}", state.next_id());
        state.teams.push(TeamRecord {
            team_id: team_id.clone(),
            team_name: team.team_name,
            slack_id: team.slack_id,
            description: team.description,
            head,
            leads: vec![],
            members: vec![],
            projects: vec![],
        });
        state.team(&team_id)
    }

    async fn set_team_members(&self, team_id: &str, user_ids: &[i32]) -> DatabaseResult<TeamRecord> {
        let mut state = self.write();
        let members = user_ids.iter().map(|id| state.user(*id)).collect::<DatabaseResult<Vec<_>>>()?;
        state.team_mut(team_id)?.members = members;
        state.team(team_id)
    }

    async fn set_team_leads(&self, team_id: &str, user_ids: &[i32]) -> DatabaseResult<TeamRecord> {
        let mut state = self.write();
        let leads = user_ids.iter().map(|id| state.user(*id)).collect::<DatabaseResult<Vec<_>>>()?;
        state.team_mut(team_id)?.leads = leads;
        state.team(team_id)
    }

    async fn set_team_head(&self, team_id: &str, user_id: i32) -> DatabaseResult<TeamRecord> {
        let mut state = self.write();
        let head = state.user(user_id)?;
        state.team_mut(team_id)?.head = head;
        state.team(team_id)
    }

    async fn update_team_description(&self, team_id: &str, description: &str) -> DatabaseResult<TeamRecord> {
        let mut state = self.write();
        state.team_mut(team_id)?.description = description.to_string();
        state.team(team_id)
    }

    async fn delete_team(&self, team_id: &str) -> DatabaseResult<()> {
        let mut state = self.write();
        let before = state.teams.len();
        state.teams.retain(|t| t.team_id != team_id);
        if state.teams.len() == before {
            return Err(DatabaseError::not_found(format!("team {team_id}")));
        }
        state.project_teams.retain(|(_, tid)| tid != team_id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl ProjectRepositoryTrait for MemoryStore {
    async fn find_projects(&self) -> DatabaseResult<Vec<ProjectRecord>> {
        let state = self.state();
        Ok(state
            .projects
            .iter()
            .filter(|p| p.wbs_element.lifecycle.is_active())
            .map(|p| state.assemble_project(p))
            .collect())
    }

    async fn get_project_by_wbs(&self, wbs_num: WbsNumber) -> DatabaseResult<Option<ProjectRecord>> {
        let state = self.state();
        Ok(state
            .projects
            .iter()
            .find(|p| p.wbs_num() == wbs_num)
            .map(|p| state.assemble_project(p)))
    }

    async fn get_project_by_id(&self, project_id: i32) -> DatabaseResult<Option<ProjectRecord>> {
        let state = self.state();
        Ok(state
            .projects
            .iter()
            .find(|p| p.project_id == project_id)
            .map(|p| state.assemble_project(p)))
    }

    async fn highest_project_number(&self, car_number: i32) -> DatabaseResult<i32> {
        Ok(self
            .state()
            .projects
            .iter()
            .map(|p| p.wbs_num())
            .filter(|wbs| wbs.car_number == car_number)
            .map(|wbs| wbs.project_number)
            .max()
            .unwrap_or(0))
    }

    async fn create_project(&self, project: NewProject) -> DatabaseResult<WbsNumber> {
        let mut state = self.write();
        let wbs_num = WbsNumber::new(project.car_number, project.project_number, 0);
        let project_id = state.next_id();
        let mut record = project_fixture(project_id, wbs_num, &project.name);
        record.wbs_element.wbs_element_id = state.next_id();
        record.summary = project.summary;
        state.projects.push(record);
        for team_id in project.team_ids {
            state.project_teams.push((project_id, team_id));
        }
        Ok(wbs_num)
    }

    async fn update_project(&self, project_id: i32, changes: ProjectChanges) -> DatabaseResult<ProjectRecord> {
        let mut state = self.write();
        let lead = changes.project_lead_id.map(|id| state.user(id)).transpose()?;
        let manager = changes.project_manager_id.map(|id| state.user(id)).transpose()?;
        let editor = state.user(changes.edited_by)?;
        let new_links = changes
            .links
            .create
            .iter()
            .map(|link| {
                let link_type = state
                    .link_types
                    .iter()
                    .find(|t| t.name == link.link_type_name)
                    .cloned()
                    .ok_or_else(|| DatabaseError::not_found(format!("link type {}", link.link_type_name)))?;
                Ok(LinkRecord {
                    link_id: format!("link-{}", link.url),
                    link_type,
                    date_created: Utc::now(),
                    creator: editor.clone(),
                    url: link.url.clone(),
                })
            })
            .collect::<DatabaseResult<Vec<_>>>()?;
        let mut new_ids = Vec::new();
        for bullet_changes in &changes.bullets {
            for _ in &bullet_changes.create {
                new_ids.push(state.next_id());
            }
        }

        let project = state.project_mut(project_id)?;
        project.wbs_element.name = changes.name;
        project.wbs_element.project_lead = lead;
        project.wbs_element.project_manager = manager;
        project.budget = changes.budget;
        project.summary = changes.summary;
        project.rules = changes.rules;

        let wbs_element_id = project.wbs_element.wbs_element_id;
        let mut new_ids = new_ids.into_iter();
        for bullet_changes in changes.bullets {
            let bullets = match bullet_changes.kind {
                BulletKind::Goal => &mut project.goals,
                BulletKind::Feature => &mut project.features,
                _ => &mut project.other_constraints,
            };
            for (id, detail) in bullet_changes.update {
                if let Some(bullet) = bullets.iter_mut().find(|b| b.id == id) {
                    bullet.detail = detail;
                }
            }
            for bullet in bullets.iter_mut().filter(|b| bullet_changes.delete.contains(&b.id)) {
                bullet.lifecycle = Lifecycle::Deleted {
                    at: Utc::now(),
                    by: Some(changes.edited_by),
                };
            }
            for detail in bullet_changes.create {
                let mut bullet = bullet_fixture(new_ids.next().unwrap_or_default(), bullet_changes.kind, &detail);
                bullet.wbs_element_id = wbs_element_id;
                bullets.push(bullet);
            }
        }

        project.links.retain(|link| !changes.links.delete.contains(&link.link_id));
        project.links.extend(new_links);

        let project = project.clone();
        Ok(state.assemble_project(&project))
    }

    async fn add_project_team(&self, project_id: i32, team_id: &str) -> DatabaseResult<()> {
        let mut state = self.write();
        if !state.project_teams.iter().any(|(p, t)| *p == project_id && t == team_id) {
            state.project_teams.push((project_id, team_id.to_string()));
        }
        Ok(())
    }

    async fn soft_delete_project(&self, project_id: i32, deleted_by: i32) -> DatabaseResult<ProjectRecord> {
        let mut state = self.write();
        let deleted = Lifecycle::Deleted {
            at: Utc::now(),
            by: Some(deleted_by),
        };
        for work_package in state
            .work_packages
            .iter_mut()
            .filter(|wp| wp.project_id == project_id && wp.wbs_element.lifecycle.is_active())
        {
            work_package.wbs_element.lifecycle = deleted;
        }
        let project = state.project_mut(project_id)?;
        project.wbs_element.lifecycle = deleted;
        let project = project.clone();
        Ok(state.assemble_project(&project))
    }

    async fn set_project_favorite(&self, project_id: i32, user_id: i32, favorite: bool) -> DatabaseResult<()> {
        let mut state = self.write();
        state.favorites.retain(|entry| *entry != (project_id, user_id));
        if favorite {
            state.favorites.push((project_id, user_id));
        }
        Ok(())
    }

    async fn find_link_types(&self) -> DatabaseResult<Vec<LinkTypeRecord>> {
        Ok(self.state().link_types.clone())
    }

    async fn get_description_bullet(&self, bullet_id: i32) -> DatabaseResult<Option<DescriptionBulletRecord>> {
        let mut state = self.state();
        let found = state.all_bullets_mut().find(|b| b.id == bullet_id).map(|b| b.clone());
        Ok(found)
    }

    async fn set_description_bullet_check(
        &self,
        bullet_id: i32,
        checked: Option<(i32, DateTime<Utc>)>,
    ) -> DatabaseResult<DescriptionBulletRecord> {
        let mut state = self.write();
        let check = match checked {
            Some((user_id, at)) => Some(BulletCheck {
                user: state.user(user_id)?,
                at,
            }),
            None => None,
        };
        let bullet = state
            .all_bullets_mut()
            .find(|b| b.id == bullet_id)
            .ok_or_else(|| DatabaseError::not_found(format!("bullet {bullet_id}")))?;
        bullet.checked = check;
        Ok(bullet.clone())
    }
}

#[async_trait::async_trait]
impl WorkPackageRepositoryTrait for MemoryStore {
    async fn find_work_packages(&self) -> DatabaseResult<Vec<WorkPackageRecord>> {
        let state = self.state();
        Ok(state
            .work_packages
            .iter()
            .filter(|wp| wp.wbs_element.lifecycle.is_active())
            .filter(|wp| {
                state
                    .projects
                    .iter()
                    .any(|p| p.project_id == wp.project_id && p.wbs_element.lifecycle.is_active())
            })
            .map(|wp| state.assemble_work_package(wp))
            .collect())
    }

    async fn get_work_package_by_wbs(&self, wbs_num: WbsNumber) -> DatabaseResult<Option<WorkPackageRecord>> {
        let state = self.state();
        Ok(state
            .work_packages
            .iter()
            .find(|wp| wp.wbs_element.wbs_num == wbs_num)
            .map(|wp| state.assemble_work_package(wp)))
    }

    async fn soft_delete_work_package(&self, work_package_id: i32, deleted_by: i32) -> DatabaseResult<WorkPackageRecord> {
        let mut state = self.write();
        let work_package = state
            .work_packages
            .iter_mut()
            .find(|wp| wp.work_package_id == work_package_id)
            .ok_or_else(|| DatabaseError::not_found(format!("work package {work_package_id}")))?;
        work_package.wbs_element.lifecycle = Lifecycle::Deleted {
            at: Utc::now(),
            by: Some(deleted_by),
        };
        Ok(work_package.clone())
    }
}

#[async_trait::async_trait]
impl RiskRepositoryTrait for MemoryStore {
    async fn find_risks_for_project(&self, project_id: i32) -> DatabaseResult<Vec<RiskRecord>> {
        Ok(self
            .state()
            .risks
            .iter()
            .filter(|r| r.project.project_id == project_id && r.lifecycle.is_active())
            .cloned()
            .collect())
    }

    async fn get_risk_by_id(&self, risk_id: &str) -> DatabaseResult<Option<RiskRecord>> {
        Ok(self.state().risks.iter().find(|r| r.id == risk_id).cloned())
    }

    async fn create_risk(&self, risk: NewRisk) -> DatabaseResult<RiskRecord> {
        let mut state = self.write();
        let created_by = state.user(risk.created_by)?;
        let project = state
            .projects
            .iter()
            .find(|p| p.project_id == risk.project_id)
            .map(ProjectRecord::summary)
            .ok_or_else(|| DatabaseError::not_found(format!("project {}", risk.project_id)))?;
        let record = RiskRecord {
            id: format!("risk-{}", state.next_id()),
            project,
            detail: risk.detail,
            date_created: Utc::now(),
            created_by,
            resolution: None,
            lifecycle: Lifecycle::Active,
        };
        state.risks.push(record.clone());
        Ok(record)
    }

    async fn update_risk(&self, risk_id: &str, update: RiskUpdate) -> DatabaseResult<RiskRecord> {
        let mut state = self.write();
        let resolution = match &update.resolution {
            ResolutionChange::Resolve { by, at } => Some(Some(RiskResolution {
                resolved_by: state.user(*by)?,
                resolved_at: *at,
            })),
            ResolutionChange::Clear => Some(None),
            ResolutionChange::Keep => None,
        };
        let risk = state
            .risks
            .iter_mut()
            .find(|r| r.id == risk_id)
            .ok_or_else(|| DatabaseError::not_found(format!("risk {risk_id}")))?;
        risk.detail = update.detail;
        if let Some(resolution) = resolution {
            risk.resolution = resolution;
        }
        Ok(risk.clone())
    }

    async fn soft_delete_risk(&self, risk_id: &str, deleted_by: i32) -> DatabaseResult<RiskRecord> {
        let mut state = self.write();
        let risk = state
            .risks
            .iter_mut()
            .find(|r| r.id == risk_id)
            .ok_or_else(|| DatabaseError::not_found(format!("risk {risk_id}")))?;
        risk.lifecycle = Lifecycle::Deleted {
            at: Utc::now(),
            by: Some(deleted_by),
        };
        Ok(risk.clone())
    }
}

#[async_trait::async_trait]
impl BomRepositoryTrait for MemoryStore {
    async fn find_manufacturers(&self) -> DatabaseResult<Vec<ManufacturerRecord>> {
        Ok(self.state().manufacturers.clone())
    }

    async fn get_manufacturer(&self, name: &str) -> DatabaseResult<Option<ManufacturerRecord>> {
        Ok(self.state().manufacturers.iter().find(|m| m.name == name).cloned())
    }

    async fn create_manufacturer(&self, name: &str, creator_id: i32) -> DatabaseResult<ManufacturerRecord> {
        let record = ManufacturerRecord {
            name: name.to_string(),
            date_created: Utc::now(),
            creator_id,
        };
        self.write().manufacturers.push(record.clone());
        Ok(record)
    }

    async fn find_material_types(&self) -> DatabaseResult<Vec<MaterialTypeRecord>> {
        Ok(self.state().material_types.clone())
    }

    async fn get_material_type(&self, name: &str) -> DatabaseResult<Option<MaterialTypeRecord>> {
        Ok(self.state().material_types.iter().find(|m| m.name == name).cloned())
    }

    async fn create_material_type(&self, name: &str, creator_id: i32) -> DatabaseResult<MaterialTypeRecord> {
        let record = MaterialTypeRecord {
            name: name.to_string(),
            date_created: Utc::now(),
            creator_id,
        };
        self.write().material_types.push(record.clone());
        Ok(record)
    }

    async fn delete_material_type(&self, name: &str) -> DatabaseResult<MaterialTypeRecord> {
        let mut state = self.write();
        let index = state
            .material_types
            .iter()
            .position(|m| m.name == name)
            .ok_or_else(|| DatabaseError::not_found(format!("material type {name}")))?;
        Ok(state.material_types.remove(index))
    }

    async fn count_materials_of_type(&self, name: &str) -> DatabaseResult<i64> {
        let count = self
            .state()
            .materials
            .iter()
            .filter(|m| m.material_type_name == name)
            .count();
        Ok(count as i64)
    }

    async fn get_assembly_by_name(&self, name: &str) -> DatabaseResult<Option<AssemblyRecord>> {
        Ok(self.state().assemblies.iter().find(|a| a.name == name).cloned())
    }

    async fn get_assembly_by_id(&self, assembly_id: &str) -> DatabaseResult<Option<AssemblyRecord>> {
        Ok(self.state().assemblies.iter().find(|a| a.assembly_id == assembly_id).cloned())
    }

    async fn create_assembly(&self, assembly: NewAssembly) -> DatabaseResult<AssemblyRecord> {
        let mut state = self.write();
        let record = AssemblyRecord {
            assembly_id: format!("assembly-{}", state.next_id()),
            name: assembly.name,
            wbs_element_id: assembly.wbs_element_id,
            pdm_file_name: assembly.pdm_file_name,
            creator_id: assembly.creator_id,
            date_created: Utc::now(),
        };
        state.assemblies.push(record.clone());
        Ok(record)
    }

    async fn find_assemblies(&self, wbs_element_id: i32) -> DatabaseResult<Vec<AssemblyRecord>> {
        Ok(self
            .state()
            .assemblies
            .iter()
            .filter(|a| a.wbs_element_id == wbs_element_id)
            .cloned()
            .collect())
    }

    async fn find_materials(&self, wbs_element_id: i32) -> DatabaseResult<Vec<MaterialRecord>> {
        Ok(self
            .state()
            .materials
            .iter()
            .filter(|m| m.wbs_element_id == wbs_element_id)
            .cloned()
            .collect())
    }

    async fn get_material_by_id(&self, material_id: &str) -> DatabaseResult<Option<MaterialRecord>> {
        Ok(self.state().materials.iter().find(|m| m.material_id == material_id).cloned())
    }

    async fn create_material(&self, material: NewMaterial) -> DatabaseResult<MaterialRecord> {
        let mut state = self.write();
        let record = MaterialRecord {
            material_id: format!("material-{}", state.next_id()),
            name: material.name,
            wbs_element_id: material.wbs_element_id,
            assembly_id: material.assembly_id,
            status: material.status,
            material_type_name: material.material_type_name,
            manufacturer_name: material.manufacturer_name,
            manufacturer_part_number: material.manufacturer_part_number,
            pdm_file_name: material.pdm_file_name,
            quantity: material.quantity,
            unit_name: material.unit_name,
            price: material.price,
            subtotal: material.subtotal,
            link_url: material.link_url,
            notes: material.notes,
            creator_id: material.creator_id,
            date_created: Utc::now(),
        };
        state.materials.push(record.clone());
        Ok(record)
    }

    async fn update_material(&self, material_id: &str, changes: MaterialChanges) -> DatabaseResult<MaterialRecord> {
        let mut state = self.write();
        let material = state
            .materials
            .iter_mut()
            .find(|m| m.material_id == material_id)
            .ok_or_else(|| DatabaseError::not_found(format!("material {material_id}")))?;

        material.name = changes.name;
        material.assembly_id = changes.assembly_id;
        material.status = changes.status;
        material.material_type_name = changes.material_type_name;
        material.manufacturer_name = changes.manufacturer_name;
        material.manufacturer_part_number = changes.manufacturer_part_number;
        material.pdm_file_name = changes.pdm_file_name;
        material.quantity = changes.quantity;
        material.unit_name = changes.unit_name;
        material.price = changes.price;
        material.subtotal = changes.subtotal;
        material.link_url = changes.link_url;
        material.notes = changes.notes;
        Ok(material.clone())
    }
}

#[async_trait::async_trait]
impl ChangeRequestRepositoryTrait for MemoryStore {
    async fn get_change_request_by_id(&self, cr_id: i32) -> DatabaseResult<Option<ChangeRequestRecord>> {
        Ok(self.state().change_requests.iter().find(|cr| cr.cr_id == cr_id).cloned())
    }
}

// ---------------------------------------------------------------------------
// 测试数据
// ---------------------------------------------------------------------------

pub fn user_fixture(user_id: i32, first_name: &str, last_name: &str, role: Role) -> UserRecord {
    UserRecord {
        user_id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!("{}.{}@justice.league", first_name.to_lowercase(), last_name.to_lowercase()),
        email_id: None,
        role,
    }
}

pub fn batman() -> UserRecord {
    user_fixture(1, "Bruce", "Wayne", Role::Head)
}

pub fn superman() -> UserRecord {
    user_fixture(2, "Clark", "Kent", Role::Admin)
}

pub fn wonderwoman() -> UserRecord {
    user_fixture(3, "Diana", "Prince", Role::Leadership)
}

pub fn flash() -> UserRecord {
    user_fixture(4, "Barry", "Allen", Role::AppAdmin)
}

pub fn aquaman() -> UserRecord {
    user_fixture(5, "Arthur", "Curry", Role::Member)
}

pub fn alfred() -> UserRecord {
    user_fixture(6, "Alfred", "Pennyworth", Role::Member)
}

pub fn greenlantern() -> UserRecord {
    user_fixture(7, "Hal", "Jordan", Role::Head)
}

pub fn the_visitor() -> UserRecord {
    user_fixture(8, "The", "Visitor", Role::Guest)
}

pub fn all_users() -> Vec<UserRecord> {
    vec![
        batman(),
        superman(),
        wonderwoman(),
        flash(),
        aquaman(),
        alfred(),
        greenlantern(),
        the_visitor(),
    ]
}

pub fn team_fixture(team_id: &str, team_name: &str, head: UserRecord) -> TeamRecord {
    TeamRecord {
        team_id: team_id.to_string(),
        team_name: team_name.to_string(),
        slack_id: "slack".to_string(),
        description: String::new(),
        head,
        leads: vec![],
        members: vec![],
        projects: vec![],
    }
}

/// 正义联盟：负责人 batman，组长 wonderwoman，成员 aquaman
pub fn justice_league() -> TeamRecord {
    let mut team = team_fixture("1", "Justice League", batman());
    team.leads = vec![wonderwoman()];
    team.members = vec![aquaman()];
    team
}

/// 负责人 greenlantern，没有组长和成员
pub fn ravenclaw() -> TeamRecord {
    team_fixture("id1", "Ravenclaw", greenlantern())
}

pub fn bullet_fixture(id: i32, kind: BulletKind, detail: &str) -> DescriptionBulletRecord {
    DescriptionBulletRecord {
        id,
        wbs_element_id: 0,
        kind,
        detail: detail.to_string(),
        date_added: Utc::now(),
        checked: None,
        lifecycle: Lifecycle::Active,
    }
}

pub fn project_fixture(project_id: i32, wbs_num: WbsNumber, name: &str) -> ProjectRecord {
    ProjectRecord {
        project_id,
        wbs_element: WbsElementRecord {
            wbs_element_id: project_id * 10,
            date_created: Utc::now(),
            wbs_num,
            name: name.to_string(),
            status: WbsElementStatus::Active,
            project_lead: None,
            project_manager: None,
            lifecycle: Lifecycle::Active,
        },
        summary: "summary".to_string(),
        budget: 0,
        rules: vec![],
        goals: vec![],
        features: vec![],
        other_constraints: vec![],
        links: vec![],
        work_packages: vec![],
        teams: vec![],
        favorited_by: vec![],
    }
}

/// 项目 1.1.0，带一个目标和一个功能描述条目
pub fn impact_attenuator() -> ProjectRecord {
    let mut project = project_fixture(1, WbsNumber::new(1, 1, 0), "Impact Attenuator");
    project.goals = vec![bullet_fixture(11, BulletKind::Goal, "Decrease weight by 5 lbs")];
    project.features = vec![bullet_fixture(12, BulletKind::Feature, "Carbon fiber shell")];
    project
}

pub fn work_package_fixture(
    work_package_id: i32,
    project: &ProjectRecord,
    work_package_number: i32,
    start_date: NaiveDate,
    duration: i32,
) -> WorkPackageRecord {
    let project_wbs = project.wbs_num();
    WorkPackageRecord {
        work_package_id,
        wbs_element: WbsElementRecord {
            wbs_element_id: work_package_id * 10 + 1,
            date_created: Utc::now(),
            wbs_num: WbsNumber::new(project_wbs.car_number, project_wbs.project_number, work_package_number),
            name: format!("Work package {work_package_number}"),
            status: WbsElementStatus::Active,
            project_lead: None,
            project_manager: None,
            lifecycle: Lifecycle::Active,
        },
        project_id: project.project_id,
        project_name: project.wbs_element.name.clone(),
        order_in_project: work_package_number,
        start_date,
        duration,
        stage: None,
        blocked_by: vec![],
        expected_activities: vec![],
        deliverables: vec![],
    }
}

pub fn change_request_fixture(cr_id: i32, accepted: Option<bool>) -> ChangeRequestRecord {
    ChangeRequestRecord {
        cr_id,
        submitter_id: 1,
        date_submitted: Utc::now(),
        reviewer_id: accepted.map(|_| 2),
        date_reviewed: accepted.map(|_| Utc::now()),
        accepted,
        lifecycle: Lifecycle::Active,
    }
}

pub fn link_type_fixture(name: &str) -> LinkTypeRecord {
    LinkTypeRecord {
        name: name.to_string(),
        date_created: Utc::now(),
        creator: superman(),
        required: false,
        icon_name: "description".to_string(),
    }
}

pub fn risk_fixture(id: &str, project: &ProjectRecord, created_by: UserRecord) -> RiskRecord {
    RiskRecord {
        id: id.to_string(),
        project: project.summary(),
        detail: "Supplier may not deliver the cells in time".to_string(),
        date_created: Utc::now(),
        created_by,
        resolution: None,
        lifecycle: Lifecycle::Active,
    }
}

/// 一套常用的初始数据：
/// - 全部用户
/// - 正义联盟、Ravenclaw 两个团队
/// - 项目 1.1.0（由正义联盟负责）
/// - 已通过的变更申请 1、未审核的 2、已拒绝的 3
/// - 链接类型 Confluence、Bill of Materials
pub fn seeded_store() -> Arc<MemoryStore> {
    let store = MemoryStore::new();
    for user in all_users() {
        store.insert_user(user);
    }
    store.insert_team(justice_league());
    store.insert_team(ravenclaw());
    store.insert_project(impact_attenuator());
    store.assign_team(1, "1");
    store.insert_change_request(change_request_fixture(1, Some(true)));
    store.insert_change_request(change_request_fixture(2, None));
    store.insert_change_request(change_request_fixture(3, Some(false)));
    store.insert_link_type(link_type_fixture("Confluence"));
    store.insert_link_type(link_type_fixture("Bill of Materials"));
    store
}
