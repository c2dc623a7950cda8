use std::sync::Arc;

use provider_console::gateway::{ApiPath, Method, MockGateway, RequestBody};
use provider_console::models::{BookingStatus, GeoPoint, ServiceDraft};
use provider_console::notify::RecordingNotifier;
use provider_console::{Console, ConsoleConfig};
use serde_json::{json, Value};

fn console() -> (Arc<MockGateway>, Arc<RecordingNotifier>, Console) {
    let gateway = Arc::new(MockGateway::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let console = Console::new(gateway.clone(), notifier.clone(), &ConsoleConfig::default());
    (gateway, notifier, console)
}

fn agent(id: &str, status: &str) -> Value {
    json!({ "_id": id, "name": id.to_uppercase(), "email": format!("{id}@example.com"), "status": status })
}

fn booking(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "client": { "_id": "c1", "name": "Cleo", "email": "cleo@example.com" },
        "service": { "_id": "s1", "name": "Deep clean", "description": "" },
        "bookingDate": "2024-05-01",
        "bookingTime": "10:00",
        "status": status,
        "paymentStatus": "Unpaid"
    })
}

#[tokio::test]
async fn empty_agent_store_takes_three_agents_in_order() {
    let (gateway, _notifier, console) = console();
    gateway.reply(
        Method::Get,
        ApiPath::shopkeeper("all-agents"),
        200,
        json!({ "data": [agent("a2", "BUSY"), agent("a1", "FREE"), agent("a3", "OFFLINE")] }),
    );
    assert!(console.agents.is_empty());

    console.agents.list().await;

    let ids: Vec<_> = console.agents.snapshot().into_iter().map(|a| a.id).collect();
    assert_eq!(ids, vec!["a2", "a1", "a3"]);
}

#[tokio::test]
async fn successful_assignment_leaves_booking_pending_until_relisted() {
    let (gateway, notifier, console) = console();
    gateway.reply(
        Method::Get,
        ApiPath::shopkeeper("bookings"),
        200,
        json!({ "bookings": [booking("b1", "Pending")] }),
    );
    gateway.reply(
        Method::Get,
        ApiPath::shopkeeper("bookings"),
        200,
        json!({ "bookings": [booking("b1", "In Progress")] }),
    );
    gateway.reply(Method::Post, ApiPath::shopkeeper("assign-booking"), 200, json!({}));
    console.bookings.list().await;

    console.assignments.assign("b1", "a1").await;

    assert!(notifier.successes().contains(&"Booking assigned successfully".to_string()));
    assert_eq!(console.bookings.find("b1").unwrap().status, BookingStatus::Pending);
    assert!(console.bookings.find("b1").unwrap().agent.is_none());

    console.bookings.list().await;
    assert_eq!(console.bookings.find("b1").unwrap().status, BookingStatus::InProgress);
}

#[tokio::test]
async fn service_create_with_server_error_changes_nothing() {
    let (gateway, notifier, console) = console();
    gateway.reply(
        Method::Get,
        ApiPath::shopkeeper("services"),
        200,
        json!({ "data": [{ "_id": "s1", "name": "Clean", "basePrice": 10 }] }),
    );
    gateway.reply(
        Method::Post,
        ApiPath::shopkeeper("add-new-service"),
        500,
        json!({ "message": "internal error" }),
    );
    console.services.list().await;
    let before = console.services.snapshot();

    let draft = ServiceDraft::new("Paint", 50.0, GeoPoint::new(59.0, 18.0));
    console.services.create(&draft).await;

    assert_eq!(console.services.snapshot(), before);
    assert_eq!(notifier.errors(), vec!["Failed to add service"]);
}

#[tokio::test]
async fn concurrent_assignments_for_one_booking_both_go_through() {
    let (gateway, notifier, console) = console();
    gateway.reply(Method::Post, ApiPath::shopkeeper("assign-booking"), 200, json!({}));

    tokio::join!(
        console.assignments.assign("b1", "a1"),
        console.assignments.assign("b1", "a2"),
    );

    let sent = gateway.requests_to(Method::Post, &ApiPath::shopkeeper("assign-booking"));
    assert_eq!(sent.len(), 2);
    let agents: Vec<_> = sent
        .iter()
        .map(|r| match &r.body {
            RequestBody::Json(body) => body["agentId"].as_str().unwrap_or_default().to_string(),
            other => panic!("unexpected body {other:?}"),
        })
        .collect();
    assert!(agents.contains(&"a1".to_string()));
    assert!(agents.contains(&"a2".to_string()));
    assert_eq!(notifier.successes().len(), 2);
    assert!(notifier.errors().is_empty());
}

#[tokio::test]
async fn assignment_never_touches_either_store() {
    let (gateway, _notifier, console) = console();
    gateway.reply(
        Method::Get,
        ApiPath::shopkeeper("all-agents"),
        200,
        json!({ "data": [agent("a1", "FREE")] }),
    );
    gateway.reply(
        Method::Get,
        ApiPath::shopkeeper("bookings"),
        200,
        json!({ "bookings": [booking("b1", "Pending")] }),
    );
    gateway.reply(Method::Post, ApiPath::shopkeeper("assign-booking"), 200, json!({}));
    gateway.reply(Method::Post, ApiPath::shopkeeper("assign-booking"), 500, json!({}));
    console.agents.list().await;
    console.bookings.list().await;
    let agents = console.agents.snapshot();
    let bookings = console.bookings.snapshot();

    console.assignments.assign("b1", "a1").await;
    console.assignments.assign("b1", "a1").await;

    assert_eq!(console.agents.snapshot(), agents);
    assert_eq!(console.bookings.snapshot(), bookings);
}

#[tokio::test]
async fn last_response_wins_between_list_and_delete() {
    let (gateway, _notifier, console) = console();
    let list_path = ApiPath::shopkeeper("all-agents");
    gateway.reply(
        Method::Get,
        list_path.clone(),
        200,
        json!({ "data": [agent("a1", "FREE"), agent("a2", "FREE")] }),
    );
    gateway.reply(Method::Delete, ApiPath::shopkeeper("agent/a1"), 200, json!({}));
    let gate = gateway.gate(Method::Get, list_path.clone());

    // The list is already in flight when the delete lands; its response,
    // which still contains a1, arrives last and overwrites the removal.
    let agents = console.agents.clone();
    let listing = tokio::spawn(async move { agents.list().await });
    while gateway.requests_to(Method::Get, &list_path).is_empty() {
        tokio::task::yield_now().await;
    }
    console.agents.remove("a1").await;
    gate.notify_one();
    listing.await.unwrap();

    assert!(console.agents.contains("a1"));
    assert_eq!(console.agents.len(), 2);
}

#[tokio::test]
async fn enforced_preconditions_come_from_config() {
    let gateway = Arc::new(MockGateway::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let config = ConsoleConfig {
        enforce_assignment_preconditions: true,
        ..ConsoleConfig::default()
    };
    let console = Console::new(gateway.clone(), notifier.clone(), &config);
    gateway.reply(
        Method::Get,
        ApiPath::shopkeeper("bookings"),
        200,
        json!({ "bookings": [booking("b1", "Cancelled")] }),
    );
    console.bookings.list().await;

    console.assignments.assign("b1", "a1").await;

    assert!(gateway
        .requests_to(Method::Post, &ApiPath::shopkeeper("assign-booking"))
        .is_empty());
    assert_eq!(notifier.errors(), vec!["Error in assigning"]);
}
