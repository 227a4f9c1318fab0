//! End-to-end tests for the HTTP API.
//!
//! Drives the full router (auth middleware, request ids, error mapping)
//! against the in-memory store and the mock session validator.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use conference_scheduler::adapters::auth::MockSessionValidator;
use conference_scheduler::adapters::http::{api_router, AppPorts, RouterSettings};
use conference_scheduler::adapters::memory::InMemoryScheduleStore;
use conference_scheduler::adapters::UuidV7Generator;
use conference_scheduler::domain::conference::{Conference, ConferenceDetails};
use conference_scheduler::domain::foundation::{
    ConferenceId, ConferenceStatus, TimeWindow, Timestamp, UserId, UserRole,
};
use conference_scheduler::domain::registration::Registration;
use conference_scheduler::ports::{ConferenceRepository, RegistrationRepository};

// =============================================================================
// Test Infrastructure
// =============================================================================

const HOST: &str = "host-token";
const ATTENDEE: &str = "attendee-token";
const OTHER: &str = "other-token";
const COORDINATOR: &str = "coordinator-token";

struct TestApp {
    router: Router,
    store: Arc<InMemoryScheduleStore>,
    host: UserId,
    attendee: UserId,
}

impl TestApp {
    fn new() -> Self {
        let host = UserId::new();
        let attendee = UserId::new();
        let sessions = MockSessionValidator::new()
            .with_test_user(HOST, host, UserRole::User)
            .with_test_user(ATTENDEE, attendee, UserRole::User)
            .with_test_user(OTHER, UserId::new(), UserRole::User)
            .with_test_user(COORDINATOR, UserId::new(), UserRole::EventCoordinator);
        let store = Arc::new(InMemoryScheduleStore::new());
        let ports = AppPorts::in_memory(
            store.clone(),
            Arc::new(UuidV7Generator::new()),
            Arc::new(sessions),
        );

        Self {
            router: api_router(ports, &RouterSettings::default()),
            store,
            host,
            attendee,
        }
    }

    async fn send(&self, method: Method, uri: &str, token: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("Authorization", format!("Bearer {}", token));
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        // Extractor rejections answer in plain text.
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, json)
    }

    /// Proposes a conference `start_h..end_h` hours from now as the host.
    async fn propose(&self, token: &str, start_h: i64, end_h: i64) -> (StatusCode, Value) {
        let now = Timestamp::now();
        let body = json!({
            "title": "Rust at Scale",
            "description": "Lessons from running Rust services in production",
            "speaker_name": "Grace",
            "speaker_title": "Principal Engineer",
            "target_audience": "Backend developers",
            "seats": 2,
            "starts_at": now.plus_hours(start_h),
            "ends_at": now.plus_hours(end_h),
        });
        self.send(Method::POST, "/conferences", token, Some(body)).await
    }

    async fn approved(&self, token: &str, start_h: i64, end_h: i64) -> String {
        let (status, body) = self.propose(token, start_h, end_h).await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        let id = body["conference"]["id"].as_str().unwrap().to_string();
        let (status, _) = self
            .send(
                Method::PATCH,
                &format!("/conferences/{}/status", id),
                COORDINATOR,
                Some(json!({"status": "approved"})),
            )
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        id
    }

    /// Stores an approved conference that has already ended.
    async fn past_conference(&self, host: UserId) -> ConferenceId {
        let now = Timestamp::now();
        let id = ConferenceId::new();
        let conference = Conference::reconstitute(
            id,
            host,
            ConferenceDetails {
                title: "Yesterday's talk".to_string(),
                description: "Already happened".to_string(),
                speaker_name: "Linus".to_string(),
                speaker_title: "Maintainer".to_string(),
                target_audience: "Everyone".to_string(),
                prerequisites: None,
                seats: 10,
            },
            TimeWindow::new(now.plus_hours(-30), now.plus_hours(-28)).unwrap(),
            ConferenceStatus::Approved,
            now.plus_days(-3),
            now.plus_days(-3),
            None,
        );
        ConferenceRepository::save(&*self.store, &conference)
            .await
            .unwrap();
        id
    }
}

// =============================================================================
// Conference lifecycle
// =============================================================================

#[tokio::test]
async fn proposal_is_hidden_until_approved() {
    let app = TestApp::new();

    let (status, body) = app.propose(HOST, 2, 3).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["conference"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(Method::GET, &format!("/conferences/{}", id), OTHER, None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let (status, body) = app
        .send(Method::GET, &format!("/conferences/{}", id), HOST, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["conference"]["status"], "pending");

    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/conferences/{}/status", id),
            COORDINATOR,
            Some(json!({"status": "approved"})),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app
        .send(Method::GET, &format!("/conferences/{}", id), OTHER, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["conference"]["registration_count"], 0);
}

#[tokio::test]
async fn plain_user_cannot_moderate() {
    let app = TestApp::new();
    let (_, body) = app.propose(HOST, 2, 3).await;
    let id = body["conference"]["id"].as_str().unwrap();

    let (status, body) = app
        .send(
            Method::PATCH,
            &format!("/conferences/{}/status", id),
            HOST,
            Some(json!({"status": "approved"})),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn proposing_over_the_approved_schedule_lists_the_conflict() {
    let app = TestApp::new();
    let first = app.approved(HOST, 2, 4).await;

    let (status, body) = app.propose(ATTENDEE, 3, 5).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "TIME_WINDOW_CONFLICT");
    assert_eq!(body["details"]["conflicts"][0]["id"], first);
}

#[tokio::test]
async fn second_proposal_names_the_pending_one() {
    let app = TestApp::new();
    let (_, first) = app.propose(HOST, 2, 3).await;
    let pending = first["conference"]["id"].as_str().unwrap();

    let (status, body) = app.propose(HOST, 6, 7).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "USER_HAS_ACTIVE_PROPOSAL");
    assert_eq!(body["details"]["conference"]["id"], pending);
    assert_eq!(body["details"]["conference"]["status"], "pending");
}

#[tokio::test]
async fn malformed_identifiers_and_sort_keys_are_bad_requests() {
    let app = TestApp::new();

    let (status, _) = app
        .send(Method::GET, "/conferences/not-a-uuid", OTHER, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(Method::GET, "/conferences?order_by=title", OTHER, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn listing_pages_forward_with_the_cursor_envelope() {
    let app = TestApp::new();
    let mut ids = Vec::new();
    for i in 0..3 {
        ids.push(app.approved(HOST, 2 + i * 2, 3 + i * 2).await);
    }

    let (status, first) = app
        .send(Method::GET, "/conferences?limit=2", OTHER, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["conferences"].as_array().unwrap().len(), 2);
    assert_eq!(first["pagination"]["has_more"], true);
    assert_eq!(first["pagination"]["first_id"], ids[0]);

    let last = first["pagination"]["last_id"].as_str().unwrap();
    let (_, second) = app
        .send(
            Method::GET,
            &format!("/conferences?limit=2&after_id={}", last),
            OTHER,
            None,
        )
        .await;
    assert_eq!(second["conferences"][0]["id"], ids[2]);
    assert_eq!(second["pagination"]["has_more"], false);
}

#[tokio::test]
async fn both_cursors_are_rejected() {
    let app = TestApp::new();
    let (a, b) = (ConferenceId::new(), ConferenceId::new());

    let (status, body) = app
        .send(
            Method::GET,
            &format!("/conferences?after_id={}&before_id={}", a, b),
            OTHER,
            None,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PAGINATION");
}

#[tokio::test]
async fn host_deletes_own_conference() {
    let app = TestApp::new();
    let id = app.approved(HOST, 2, 3).await;

    let (status, _) = app
        .send(Method::DELETE, &format!("/conferences/{}", id), OTHER, None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(Method::DELETE, &format!("/conferences/{}", id), HOST, None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app
        .send(Method::GET, &format!("/conferences/{}", id), HOST, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "CONFERENCE_NOT_FOUND");
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn registration_flow() {
    let app = TestApp::new();
    let id = app.approved(HOST, 2, 3).await;
    let body = json!({"conference_id": id});

    let (status, created) = app
        .send(Method::POST, "/registrations", ATTENDEE, Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        created["registration"]["user_id"],
        app.attendee.to_string()
    );

    let (status, dup) = app
        .send(Method::POST, "/registrations", ATTENDEE, Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(dup["code"], "ALREADY_REGISTERED");

    let (status, host) = app
        .send(Method::POST, "/registrations", HOST, Some(body))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(host["code"], "HOST_CANNOT_REGISTER");

    let (status, users) = app
        .send(
            Method::GET,
            &format!("/registrations/conferences/{}", id),
            HOST,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users["users"][0]["id"], app.attendee.to_string());

    let (status, _) = app
        .send(
            Method::GET,
            &format!("/registrations/conferences/{}", id),
            OTHER,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, mine) = app
        .send(
            Method::GET,
            &format!("/registrations/users/{}", app.attendee),
            ATTENDEE,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine["conferences"][0]["id"], id);
    assert_eq!(mine["conferences"][0]["registration_count"], 1);
}

#[tokio::test]
async fn full_conference_refuses_registration() {
    let app = TestApp::new();
    let id = app.approved(HOST, 2, 3).await;
    let conference_id: ConferenceId = id.parse().unwrap();
    for _ in 0..2 {
        app.store
            .create(&Registration::new(conference_id, UserId::new(), Timestamp::now()))
            .await
            .unwrap();
    }

    let (status, body) = app
        .send(
            Method::POST,
            "/registrations",
            ATTENDEE,
            Some(json!({"conference_id": id})),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFERENCE_FULL");
}

// =============================================================================
// Feedback
// =============================================================================

#[tokio::test]
async fn feedback_flow_after_conference_ends() {
    let app = TestApp::new();
    let id = app.past_conference(app.host).await;
    app.store
        .create(&Registration::new(id, app.attendee, Timestamp::now()))
        .await
        .unwrap();
    let body = json!({"conference_id": id, "comment": "Clear and well paced"});

    let (status, _) = app
        .send(Method::POST, "/feedbacks", OTHER, Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = app
        .send(Method::POST, "/feedbacks", ATTENDEE, Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let feedback_id = created["feedback"]["id"].as_str().unwrap().to_string();

    let (status, dup) = app
        .send(Method::POST, "/feedbacks", ATTENDEE, Some(body))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(dup["code"], "FEEDBACK_ALREADY_GIVEN");

    let (status, list) = app
        .send(
            Method::GET,
            &format!("/feedbacks/conferences/{}", id),
            OTHER,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["feedbacks"][0]["id"], feedback_id);

    let (status, _) = app
        .send(Method::DELETE, &format!("/feedbacks/{}", feedback_id), ATTENDEE, None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/feedbacks/{}", feedback_id),
            COORDINATOR,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn feedback_before_end_is_refused() {
    let app = TestApp::new();
    let id = app.approved(HOST, 2, 3).await;
    let (status, _) = app
        .send(
            Method::POST,
            "/registrations",
            ATTENDEE,
            Some(json!({"conference_id": id})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .send(
            Method::POST,
            "/feedbacks",
            ATTENDEE,
            Some(json!({"conference_id": id, "comment": "Looking forward"})),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFERENCE_NOT_ENDED");
}
