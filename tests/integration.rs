//! Integration tests for the attendance engine.
//!
//! This test suite drives the full HTTP surface and covers:
//! - Staff clock-in/clock-out transitions and hours accumulation
//! - Manual entry corrections by name
//! - Student check-in/check-out
//! - The multi-location payroll approval and admin-notification flow
//! - Role scoping and authorization failures

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use attendance_engine::api::{create_router, AppState};
use attendance_engine::attendance::InMemoryEventLog;
use attendance_engine::config::{AppConfig, ConfigLoader, ExternalLinks};
use attendance_engine::directory::InMemoryDirectory;
use attendance_engine::models::{Person, Role};
use attendance_engine::payroll::InMemoryNotifier;

// =============================================================================
// Test Helpers
// =============================================================================

struct TestHarness {
    router: Router,
    events: Arc<InMemoryEventLog>,
    notifier: Arc<InMemoryNotifier>,
}

fn person(id: &str, first: &str, last: &str, role: Role, locations: &[&str]) -> Person {
    Person {
        id: id.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        role,
        locations: locations.iter().map(|l| l.to_string()).collect(),
    }
}

/// Two locations, one senior PM per location, one junior PM, staff,
/// a student, and an admin.
fn harness() -> TestHarness {
    let config = ConfigLoader::from_config(AppConfig::new(
        vec!["LocationA".to_string(), "LocationB".to_string()],
        ExternalLinks::default(),
    ));
    let directory = Arc::new(InMemoryDirectory::with_people([
        person("p_1", "Mary", "Johnson", Role::Staff, &["LocationA"]),
        person("p_2", "John", "Smith", Role::Tutor, &["LocationA"]),
        person("pm_a", "Rosa", "Diaz", Role::SeniorPm, &["LocationA"]),
        person("pm_b", "Femi", "Ade", Role::SeniorPm, &["LocationB"]),
        person("jpm_a", "Kim", "Lo", Role::JuniorPm, &["LocationA"]),
        person("adm", "Dana", "Okafor", Role::Admin, &[]),
        person("s_1", "Tim", "Nguyen", Role::Student, &["LocationA"]),
    ]));
    let events = Arc::new(InMemoryEventLog::new());
    let notifier = Arc::new(InMemoryNotifier::new());
    let state = AppState::new(
        config,
        directory,
        Arc::clone(&events) as Arc<dyn attendance_engine::attendance::ClockEventSink>,
        Arc::clone(&notifier) as Arc<dyn attendance_engine::payroll::NotificationSink>,
    );
    TestHarness {
        router: create_router(state),
        events,
        notifier,
    }
}

async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

fn clock_body(person_id: &str, actor_id: &str) -> Value {
    json!({
        "person_id": person_id,
        "location": "LocationA",
        "actor_id": actor_id
    })
}

// =============================================================================
// Staff clock scenario
// =============================================================================

#[tokio::test]
async fn test_clock_scenario_double_in_then_out() {
    let h = harness();

    // Initial state OUT: clock-in succeeds.
    let (status, body) = post(&h.router, "/clock-in", clock_body("p_1", "p_1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["checked_in"], true);

    // Second clock-in is an invalid transition; first is unaffected.
    let (status, body) = post(&h.router, "/clock-in", clock_body("p_1", "p_1")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_TRANSITION");
    assert!(body["message"].as_str().unwrap().contains("already clocked in"));

    // Clock-out returns to OUT and reports accumulated hours.
    let (status, body) = post(&h.router, "/clock-out", clock_body("p_1", "p_1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["checked_in"], false);
    // Sub-second elapsed time rounds to zero hours at 2dp resolution.
    let hours: rust_decimal::Decimal = body["data"]["accumulated_hours"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(hours, rust_decimal::Decimal::ZERO);

    // One in + one out event in the audit log.
    assert_eq!(h.events.events().len(), 2);
}

#[tokio::test]
async fn test_clock_out_without_clock_in_conflicts() {
    let h = harness();
    let (status, body) = post(&h.router, "/clock-out", clock_body("p_1", "p_1")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains("not clocked in"));
    assert!(h.events.events().is_empty());
}

#[tokio::test]
async fn test_unknown_person_404() {
    let h = harness();
    let (status, body) = post(&h.router, "/clock-in", clock_body("p_404", "adm")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_pm_clocks_staff_and_roster_reflects_it() {
    let h = harness();

    let (status, _) = post(&h.router, "/clock-in", clock_body("p_1", "jpm_a")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&h.router, "/roster/LocationA?actor_id=jpm_a").await;
    assert_eq!(status, StatusCode::OK);
    let roster = body.as_array().unwrap();
    let mary = roster
        .iter()
        .find(|e| e["id"] == "p_1")
        .expect("Mary on roster");
    assert_eq!(mary["checked_in"], true);
    assert_eq!(mary["first_name"], "Mary");
    assert_eq!(mary["last_name"], "Johnson");
}

#[tokio::test]
async fn test_staff_cannot_view_roster_or_clock_others() {
    let h = harness();

    let (status, _) = get(&h.router, "/roster/LocationA?actor_id=p_1").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = post(&h.router, "/clock-in", clock_body("p_2", "p_1")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

// =============================================================================
// Manual entry
// =============================================================================

#[tokio::test]
async fn test_manual_entry_by_name() {
    let h = harness();
    let (status, body) = post(
        &h.router,
        "/manual-entry",
        json!({
            "first_name": "Mary",
            "last_name": "Johnson",
            "action": "clock-in",
            "location": "LocationA",
            "actor_id": "adm"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Manual clock-in recorded");
    assert_eq!(body["data"]["id"], "p_1");
}

#[tokio::test]
async fn test_manual_entry_unknown_name_404() {
    let h = harness();
    let (status, body) = post(
        &h.router,
        "/manual-entry",
        json!({
            "first_name": "Nadia",
            "last_name": "Khan",
            "action": "clock-in",
            "location": "LocationA",
            "actor_id": "adm"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("Nadia Khan"));
}

#[tokio::test]
async fn test_manual_entry_forbidden_for_junior_pm() {
    let h = harness();
    let (status, _) = post(
        &h.router,
        "/manual-entry",
        json!({
            "first_name": "Mary",
            "last_name": "Johnson",
            "action": "clock-in",
            "location": "LocationA",
            "actor_id": "jpm_a"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// =============================================================================
// Student attendance
// =============================================================================

#[tokio::test]
async fn test_student_check_in_out_cycle() {
    let h = harness();
    let body = json!({
        "student_id": "s_1",
        "location": "LocationA",
        "actor_id": "jpm_a"
    });

    let (status, entry) = post(&h.router, "/students/check-in", body.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry["checked_in"], true);

    // Duplicate check-in conflicts.
    let (status, _) = post(&h.router, "/students/check-in", body.clone()).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, entry) = post(&h.router, "/students/check-out", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry["checked_in"], false);
}

#[tokio::test]
async fn test_student_list_scoped_by_location() {
    let h = harness();
    let (status, body) = get(&h.router, "/students/LocationA?actor_id=jpm_a").await;
    assert_eq!(status, StatusCode::OK);
    let students = body.as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["id"], "s_1");

    // The junior PM is not assigned to LocationB.
    let (status, _) = get(&h.router, "/students/LocationB?actor_id=jpm_a").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_student_checks_self_but_not_others() {
    let h = harness();
    let (status, _) = post(
        &h.router,
        "/students/check-in",
        json!({
            "student_id": "s_1",
            "location": "LocationA",
            "actor_id": "s_1"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&h.router, "/students/LocationA?actor_id=s_1").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// =============================================================================
// Payroll approval scenario
// =============================================================================

#[tokio::test]
async fn test_two_location_approval_flow_with_single_notification() {
    let h = harness();
    let notify = json!({"actor_id": "adm"});

    // Both locations pending: notify-admin fails.
    let (status, body) = post(&h.router, "/payroll/notify-admin", notify.clone()).await;
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(body["code"], "PRECONDITION_FAILED");
    assert!(body["message"].as_str().unwrap().contains("LocationA"));
    assert!(body["message"].as_str().unwrap().contains("LocationB"));

    // Approve LocationA.
    let (status, body) = post(
        &h.router,
        "/payroll/approve",
        json!({"location": "LocationA", "actor_id": "pm_a"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["approval"]["status"], "approved");

    // Still pending on LocationB.
    let (status, body) = post(&h.router, "/payroll/notify-admin", notify.clone()).await;
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);
    assert!(body["message"].as_str().unwrap().contains("LocationB"));
    assert!(!body["message"].as_str().unwrap().contains("LocationA"));

    // Approve LocationB from its own senior PM.
    let (status, _) = post(
        &h.router,
        "/payroll/approve",
        json!({"location": "LocationB", "actor_id": "pm_b"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // All approved: exactly one notification goes out.
    let (status, body) = post(&h.router, "/payroll/notify-admin", notify).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["notification_id"].is_string());
    assert_eq!(h.notifier.sent().len(), 1);
    assert_eq!(
        h.notifier.sent()[0].locations,
        vec!["LocationA".to_string(), "LocationB".to_string()]
    );
}

#[tokio::test]
async fn test_approve_is_idempotent_over_http() {
    let h = harness();
    let body = json!({"location": "LocationA", "actor_id": "pm_a"});

    let (status, first) = post(&h.router, "/payroll/approve", body.clone()).await;
    assert_eq!(status, StatusCode::OK);
    let (status, second) = post(&h.router, "/payroll/approve", body).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(first["approval"]["status"], "approved");
    assert_eq!(second["approval"]["status"], "approved");
    assert_eq!(
        first["approval"]["approved_at"],
        second["approval"]["approved_at"]
    );
}

#[tokio::test]
async fn test_junior_pm_cannot_approve_out_of_scope_location() {
    let h = harness();

    let (status, body) = post(
        &h.router,
        "/payroll/approve",
        json!({"location": "LocationB", "actor_id": "jpm_a"}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    // LocationB is unchanged: the admin still sees it pending.
    let (status, approvals) = get(&h.router, "/payroll/approvals?actor_id=adm").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approvals["LocationB"]["status"], "pending");
}

#[tokio::test]
async fn test_scoped_pm_notify_covers_only_their_locations() {
    let h = harness();

    // pm_a approves their only location; their scoped invariant holds
    // even though LocationB is pending for the admin.
    let (status, _) = post(
        &h.router,
        "/payroll/approve",
        json!({"location": "LocationA", "actor_id": "pm_a"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post(
        &h.router,
        "/payroll/notify-admin",
        json!({"actor_id": "pm_a"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(h.notifier.sent()[0].locations, vec!["LocationA".to_string()]);

    let (status, _) = post(
        &h.router,
        "/payroll/notify-admin",
        json!({"actor_id": "adm"}),
    )
    .await;
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);
}

#[tokio::test]
async fn test_staff_cannot_view_or_approve_payroll() {
    let h = harness();

    let (status, _) = get(&h.router, "/payroll/approvals?actor_id=p_1").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = post(
        &h.router,
        "/payroll/approve",
        json!({"location": "LocationA", "actor_id": "p_1"}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_sees_all_locations_in_approvals() {
    let h = harness();
    let (status, approvals) = get(&h.router, "/payroll/approvals?actor_id=adm").await;
    assert_eq!(status, StatusCode::OK);
    let map = approvals.as_object().unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(approvals["LocationA"]["status"], "pending");
    assert_eq!(approvals["LocationB"]["status"], "pending");
}
