//! 用户服务的集成测试

mod common;

use axum::http::StatusCode;
use common::*;
use database::models::UserSettingsUpdate;
use shared_lib::{Role, Theme, WbsNumber};
use web_service::services::{ProjectService, UserService};

#[tokio::test]
async fn test_get_all_users_sorted_by_first_name() {
    let store = seeded_store();
    let service = UserService::new(store.repositories());

    let names: Vec<String> = service
        .get_all_users()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.first_name)
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert_eq!(names.first().map(String::as_str), Some("Alfred"));
}

#[tokio::test]
async fn test_update_user_role() {
    let store = seeded_store();
    let service = UserService::new(store.repositories());

    let updated = service
        .update_user_role(aquaman().user_id, &batman(), Role::Leadership)
        .await
        .unwrap();
    assert_eq!(updated.role, Role::Leadership);
}

#[tokio::test]
async fn test_update_user_role_cannot_promote_above_self() {
    let store = seeded_store();
    let service = UserService::new(store.repositories());

    let err = service
        .update_user_role(aquaman().user_id, &batman(), Role::Admin)
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        err.to_string(),
        "Access Denied: Cannot promote user to a higher role than yourself"
    );
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn test_update_user_role_of_equal_or_higher_user() {
    let store = seeded_store();
    let service = UserService::new(store.repositories());

    // 同为 HEAD
    let err = service
        .update_user_role(greenlantern().user_id, &batman(), Role::Member)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Access Denied: Cannot change the role of a user with an equal or higher role than you"
    );

    let err = service
        .update_user_role(122, &superman(), Role::Member)
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn test_user_settings_default_and_update() {
    let store = seeded_store();
    let service = UserService::new(store.repositories());

    let settings = service.get_user_settings(aquaman().user_id).await.unwrap();
    assert_eq!(settings.default_theme, Theme::Dark);
    assert_eq!(settings.slack_id, "");

    let update = UserSettingsUpdate {
        default_theme: Theme::Light,
        slack_id: "U123".to_string(),
    };
    let settings = service
        .update_user_settings(&aquaman(), aquaman().user_id, update)
        .await
        .unwrap();
    assert_eq!(settings.default_theme, Theme::Light);

    let settings = service.get_user_settings(aquaman().user_id).await.unwrap();
    assert_eq!(settings.slack_id, "U123");
}

#[tokio::test]
async fn test_update_settings_of_other_user_is_denied() {
    let store = seeded_store();
    let service = UserService::new(store.repositories());

    let err = service
        .update_user_settings(&superman(), aquaman().user_id, UserSettingsUpdate::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Access Denied: You can only update your own settings!");
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn test_favorite_projects_skip_deleted() {
    let store = seeded_store();
    store.insert_project(project_fixture(2, WbsNumber::new(1, 2, 0), "Chassis"));
    let projects = ProjectService::new(store.repositories());
    let users = UserService::new(store.repositories());

    projects.toggle_favorite(WbsNumber::new(1, 1, 0), &aquaman()).await.unwrap();
    projects.toggle_favorite(WbsNumber::new(1, 2, 0), &aquaman()).await.unwrap();
    assert_eq!(users.get_user_favorite_projects(aquaman().user_id).await.unwrap().len(), 2);

    projects.delete_project(&superman(), WbsNumber::new(1, 2, 0)).await.unwrap();
    let favorites = users.get_user_favorite_projects(aquaman().user_id).await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].wbs_num(), WbsNumber::new(1, 1, 0));
}
