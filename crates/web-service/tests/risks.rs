//! 风险服务的集成测试

mod common;

use axum::http::StatusCode;
use common::*;
use web_service::services::RiskService;

fn store_with_risk() -> std::sync::Arc<MemoryStore> {
    let store = seeded_store();
    store.insert_risk(risk_fixture("risk-1", &impact_attenuator(), aquaman()));
    store
}

#[tokio::test]
async fn test_create_risk() {
    let store = seeded_store();
    let service = RiskService::new(store.repositories());

    let risk_id = service.create_risk(&aquaman(), 1, "Cells arrive late").await.unwrap();

    let risks = service.get_risks_for_project(1).await.unwrap();
    assert_eq!(risks.len(), 1);
    assert_eq!(risks[0].id, risk_id);
    assert_eq!(risks[0].detail, "Cells arrive late");
    assert!(!risks[0].is_resolved());
}

#[tokio::test]
async fn test_create_risk_rejects_guests() {
    let store = seeded_store();
    let service = RiskService::new(store.repositories());

    let err = service.create_risk(&the_visitor(), 1, "nope").await.unwrap_err();
    assert_eq!(err.to_string(), "Access Denied: Guests cannot create risks!");
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn test_get_risks_for_missing_project() {
    let store = seeded_store();
    let service = RiskService::new(store.repositories());

    let err = service.get_risks_for_project(77).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_risk_resolves_and_clears() {
    let store = store_with_risk();
    let service = RiskService::new(store.repositories());

    // 未解决 -> 已解决：记录解决人
    let risk = service.edit_risk(&batman(), "risk-1", "still risky", true).await.unwrap();
    let resolution = risk.resolution.clone().unwrap();
    assert_eq!(resolution.resolved_by.user_id, batman().user_id);
    assert_eq!(risk.detail, "still risky");

    // 已解决 -> 已解决：解决人和时间不变
    let risk = service.edit_risk(&superman(), "risk-1", "edited", true).await.unwrap();
    let kept = risk.resolution.clone().unwrap();
    assert_eq!(kept.resolved_by.user_id, batman().user_id);
    assert_eq!(kept.resolved_at, resolution.resolved_at);
    assert_eq!(risk.detail, "edited");

    // 已解决 -> 未解决：清空解决信息
    let risk = service.edit_risk(&batman(), "risk-1", "edited", false).await.unwrap();
    assert!(risk.resolution.is_none());
}

#[tokio::test]
async fn test_edit_unresolved_risk_keeps_it_unresolved() {
    let store = store_with_risk();
    let service = RiskService::new(store.repositories());

    // 未解决 -> 未解决：只修改描述
    let risk = service.edit_risk(&aquaman(), "risk-1", "cells delayed a week", false).await.unwrap();
    assert_eq!(risk.detail, "cells delayed a week");
    assert!(risk.resolution.is_none());
    assert!(!risk.is_resolved());

    let stored = store.raw_risk("risk-1").unwrap();
    assert_eq!(stored.detail, "cells delayed a week");
    assert!(stored.resolution.is_none());
}

#[tokio::test]
async fn test_edit_risk_requires_permissions() {
    let store = store_with_risk();
    let service = RiskService::new(store.repositories());

    // alfred 不在项目团队中
    let err = service.edit_risk(&alfred(), "risk-1", "x", true).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
    assert_eq!(err.to_string(), "Access Denied: You do not have the permissions to edit this risk!");
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn test_delete_risk_by_creator() {
    let store = seeded_store();
    store.insert_risk(risk_fixture("risk-2", &impact_attenuator(), alfred()));
    let service = RiskService::new(store.repositories());

    // 创建者本人即使不在团队中也可以删除
    let deleted = service.delete_risk(&alfred(), "risk-2").await.unwrap();
    assert!(deleted.lifecycle.is_deleted());
    assert!(service.get_risks_for_project(1).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_risk_twice_is_rejected_without_writes() {
    let store = store_with_risk();
    let service = RiskService::new(store.repositories());

    service.delete_risk(&superman(), "risk-1").await.unwrap();
    let writes = store.writes();

    let err = service.delete_risk(&superman(), "risk-1").await.unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(err.to_string(), "Risk with id: risk-1 has been deleted already!");
    assert_eq!(store.writes(), writes);
}

#[tokio::test]
async fn test_delete_risk_requires_permissions() {
    let store = store_with_risk();
    let service = RiskService::new(store.repositories());

    let err = service.delete_risk(&alfred(), "risk-1").await.unwrap_err();
    assert_eq!(err.to_string(), "Access Denied: You do not have the permissions to delete this risk!");

    let err = service.delete_risk(&alfred(), "missing").await.unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    assert!(store.raw_risk("risk-1").unwrap().lifecycle.is_active());
}
