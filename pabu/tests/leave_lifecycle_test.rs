use chrono::{Duration, Utc};

use pabu::models::{LeaveApplication, LeaveStatus, LeaveType, Role};

mod common;
use common::{test_backend, test_user};

fn application(id: &str, employee_id: &str, approver_id: &str) -> LeaveApplication {
    let now = Utc::now();
    LeaveApplication {
        id: id.to_string(),
        employee_id: employee_id.to_string(),
        leave_type: LeaveType::Annual,
        start_date: now + Duration::days(7),
        end_date: now + Duration::days(11),
        days: 5,
        reason: Some("family trip".to_string()),
        status: LeaveStatus::Pending,
        approver_id: Some(approver_id.to_string()),
        submitted_at: now,
        reviewed_at: None,
    }
}

#[tokio::test]
async fn application_round_trips_through_storage() {
    let (db, _dir) = test_backend().await;
    db.upsert_user(&test_user("u_alice", "Alice", Role::Employee))
        .await
        .unwrap();

    let app = application("lv_1", "u_alice", "u_bob");
    db.create_leave_application(&app).await.unwrap();

    let loaded = db
        .get_leave_application("lv_1")
        .await
        .unwrap()
        .expect("application should exist");
    assert_eq!(loaded.employee_id, "u_alice");
    assert_eq!(loaded.leave_type, LeaveType::Annual);
    assert_eq!(loaded.status, LeaveStatus::Pending);
    assert_eq!(loaded.days, 5);
    assert_eq!(loaded.reason.as_deref(), Some("family trip"));
    assert_eq!(loaded.approver_id.as_deref(), Some("u_bob"));
}

#[tokio::test]
async fn approval_flow_persists_reviewed_state() {
    let (db, _dir) = test_backend().await;

    let mut app = application("lv_1", "u_alice", "u_bob");
    db.create_leave_application(&app).await.unwrap();

    app.decide("u_bob", true).unwrap();
    db.update_leave_application(&app).await.unwrap();

    let loaded = db.get_leave_application("lv_1").await.unwrap().unwrap();
    assert_eq!(loaded.status, LeaveStatus::Approved);
    assert!(loaded.reviewed_at.is_some());
}

#[tokio::test]
async fn rejection_is_terminal() {
    let (db, _dir) = test_backend().await;

    let mut app = application("lv_1", "u_alice", "u_bob");
    db.create_leave_application(&app).await.unwrap();

    app.decide("u_bob", false).unwrap();
    db.update_leave_application(&app).await.unwrap();

    let mut loaded = db.get_leave_application("lv_1").await.unwrap().unwrap();
    assert_eq!(loaded.status, LeaveStatus::Rejected);
    assert!(loaded.decide("u_bob", true).is_err());
    assert!(loaded.cancel().is_err());
}

#[tokio::test]
async fn cancel_works_from_pending_and_approved() {
    let (db, _dir) = test_backend().await;

    let mut pending = application("lv_1", "u_alice", "u_bob");
    db.create_leave_application(&pending).await.unwrap();
    pending.cancel().unwrap();
    db.update_leave_application(&pending).await.unwrap();

    let mut approved = application("lv_2", "u_alice", "u_bob");
    approved.status = LeaveStatus::Approved;
    db.create_leave_application(&approved).await.unwrap();
    approved.cancel().unwrap();
    db.update_leave_application(&approved).await.unwrap();

    for id in ["lv_1", "lv_2"] {
        let loaded = db.get_leave_application(id).await.unwrap().unwrap();
        assert_eq!(loaded.status, LeaveStatus::Cancelled);
    }
}

#[tokio::test]
async fn listing_filters_by_employee_and_status() {
    let (db, _dir) = test_backend().await;

    db.create_leave_application(&application("lv_1", "u_alice", "u_bob"))
        .await
        .unwrap();
    let mut approved = application("lv_2", "u_alice", "u_bob");
    approved.status = LeaveStatus::Approved;
    db.create_leave_application(&approved).await.unwrap();
    db.create_leave_application(&application("lv_3", "u_dana", "u_bob"))
        .await
        .unwrap();

    let all = db.list_leave_applications("u_alice", 50).await.unwrap();
    assert_eq!(all.len(), 2);

    let approved_only = db
        .list_leave_applications_by_status("u_alice", &[LeaveStatus::Approved])
        .await
        .unwrap();
    assert_eq!(approved_only.len(), 1);
    assert_eq!(approved_only[0].id, "lv_2");

    let active = db
        .list_leave_applications_by_status(
            "u_alice",
            &[LeaveStatus::Pending, LeaveStatus::Approved],
        )
        .await
        .unwrap();
    assert_eq!(active.len(), 2);
}
