use chrono::{Duration, NaiveDate, Utc};

use pabu::context::ContextAssembler;
use pabu::models::{
    Availability, LeaveApplication, LeaveBalance, LeaveStatus, LeaveType, Role, TypeBalance,
};

mod common;
use common::{test_backend, test_user};

fn leave_application(
    id: &str,
    employee_id: &str,
    status: LeaveStatus,
    start_offset_days: i64,
    end_offset_days: i64,
) -> LeaveApplication {
    let now = Utc::now();
    LeaveApplication {
        id: id.to_string(),
        employee_id: employee_id.to_string(),
        leave_type: LeaveType::Annual,
        start_date: now + Duration::days(start_offset_days),
        end_date: now + Duration::days(end_offset_days),
        days: (end_offset_days - start_offset_days + 1) as i32,
        reason: None,
        status,
        approver_id: Some("u_bob".to_string()),
        submitted_at: now,
        reviewed_at: None,
    }
}

#[tokio::test]
async fn employee_context_has_no_team() {
    let (db, _dir) = test_backend().await;
    let alice = test_user("u_alice", "Alice", Role::Employee);
    db.upsert_user(&alice).await.unwrap();

    let assembler = ContextAssembler::new(db);
    let context = assembler.assemble(&alice).await;

    assert!(context.team.is_none());
    assert_eq!(context.user.id, "u_alice");
}

#[tokio::test]
async fn missing_balance_falls_back_to_defaults() {
    let (db, _dir) = test_backend().await;
    let alice = test_user("u_alice", "Alice", Role::Employee);
    db.upsert_user(&alice).await.unwrap();

    let assembler = ContextAssembler::new(db);
    let context = assembler.assemble(&alice).await;

    assert_eq!(context.balance.annual.available, 20);
    assert_eq!(context.balance.sick.available, 10);
    assert_eq!(context.balance.emergency.available, 5);
}

#[tokio::test]
async fn stored_balance_is_used_verbatim() {
    let (db, _dir) = test_backend().await;
    let alice = test_user("u_alice", "Alice", Role::Employee);
    db.upsert_user(&alice).await.unwrap();

    let mut balance = LeaveBalance::default_for("u_alice");
    balance.annual = TypeBalance {
        earned: 20,
        used: 3,
        available: 15,
        pending: 2,
    };
    db.put_leave_balance(&balance).await.unwrap();

    let assembler = ContextAssembler::new(db);
    let context = assembler.assemble(&alice).await;

    assert_eq!(context.balance.annual.available, 15);
    assert_eq!(context.balance.annual.used, 3);
    assert_eq!(context.balance.annual.pending, 2);
}

#[tokio::test]
async fn manager_with_no_reports_gets_empty_roster() {
    let (db, _dir) = test_backend().await;
    let bob = test_user("u_bob", "Bob", Role::Manager);
    db.upsert_user(&bob).await.unwrap();

    let assembler = ContextAssembler::new(db);
    let context = assembler.assemble(&bob).await;

    let team = context.team.expect("privileged role should get a roster");
    assert!(team.is_empty());
}

#[tokio::test]
async fn approved_leave_forces_on_leave_status() {
    let (db, _dir) = test_backend().await;
    let bob = test_user("u_bob", "Bob", Role::Manager);
    let mut charlie = test_user("u_charlie", "Charlie", Role::Employee);
    charlie.manager_id = Some("u_bob".to_string());
    charlie.status = Availability::Busy;
    db.upsert_user(&bob).await.unwrap();
    db.upsert_user(&charlie).await.unwrap();

    // Approved leave spanning today. The stored busy status must lose.
    db.create_leave_application(&leave_application(
        "lv_1",
        "u_charlie",
        LeaveStatus::Approved,
        -1,
        2,
    ))
    .await
    .unwrap();

    let assembler = ContextAssembler::new(db);
    let context = assembler.assemble(&bob).await;

    let team = context.team.expect("manager should get a roster");
    assert_eq!(team.len(), 1);
    assert_eq!(team[0].status, Availability::OnLeave);
    let current = team[0].current_leave.as_ref().expect("current leave set");
    assert_eq!(current.leave_type, LeaveType::Annual);
}

#[tokio::test]
async fn rejected_leave_does_not_affect_status() {
    let (db, _dir) = test_backend().await;
    let bob = test_user("u_bob", "Bob", Role::Manager);
    let mut charlie = test_user("u_charlie", "Charlie", Role::Employee);
    charlie.manager_id = Some("u_bob".to_string());
    db.upsert_user(&bob).await.unwrap();
    db.upsert_user(&charlie).await.unwrap();

    db.create_leave_application(&leave_application(
        "lv_1",
        "u_charlie",
        LeaveStatus::Rejected,
        -1,
        2,
    ))
    .await
    .unwrap();

    let assembler = ContextAssembler::new(db);
    let context = assembler.assemble(&bob).await;

    let team = context.team.expect("manager should get a roster");
    assert_eq!(team[0].status, Availability::Available);
    assert!(team[0].current_leave.is_none());
}

#[tokio::test]
async fn leave_window_is_date_inclusive() {
    let (db, _dir) = test_backend().await;
    let bob = test_user("u_bob", "Bob", Role::Manager);
    let mut charlie = test_user("u_charlie", "Charlie", Role::Employee);
    charlie.manager_id = Some("u_bob".to_string());
    db.upsert_user(&bob).await.unwrap();
    db.upsert_user(&charlie).await.unwrap();

    // Leave ends today; the member is still on leave today.
    db.create_leave_application(&leave_application(
        "lv_1",
        "u_charlie",
        LeaveStatus::Approved,
        -3,
        0,
    ))
    .await
    .unwrap();

    let assembler = ContextAssembler::new(db);

    let today = Utc::now().date_naive();
    let context = assembler.assemble_at(&bob, today).await;
    assert_eq!(
        context.team.expect("roster")[0].status,
        Availability::OnLeave
    );

    // Tomorrow the window has passed.
    let tomorrow = today + Duration::days(1);
    let context = assembler.assemble_at(&bob, tomorrow).await;
    assert_eq!(
        context.team.expect("roster")[0].status,
        Availability::Available
    );
}

#[tokio::test]
async fn roster_includes_member_balances() {
    let (db, _dir) = test_backend().await;
    let bob = test_user("u_bob", "Bob", Role::Manager);
    let mut charlie = test_user("u_charlie", "Charlie", Role::Employee);
    charlie.manager_id = Some("u_bob".to_string());
    db.upsert_user(&bob).await.unwrap();
    db.upsert_user(&charlie).await.unwrap();

    let mut balance = LeaveBalance::default_for("u_charlie");
    balance.annual.available = 7;
    db.put_leave_balance(&balance).await.unwrap();

    let assembler = ContextAssembler::new(db);
    let date = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
    let context = assembler.assemble_at(&bob, date).await;

    let team = context.team.expect("roster");
    let member_balance = team[0].balance.as_ref().expect("member balance");
    assert_eq!(member_balance.annual.available, 7);
}
