use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn scenario_body() -> serde_json::Value {
    serde_json::json!([
        { "id": 1, "name": "Rank Rocket", "niche": "SEO", "pricing": "$200", "reviews": 3 },
        { "id": 2, "name": "Clickwise", "niche": "SEO", "pricing": "$100", "reviews": 9 },
        { "id": 3, "name": "Bidsmith", "niche": "PPC", "pricing": "$50", "reviews": 1 }
    ])
}

async fn serve(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/agencies"))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

fn client_for(server: &MockServer) -> AgencyClient {
    AgencyClient::with_base_url(&format!("{}/api", server.uri()))
        .expect("client construction should not fail")
}

#[tokio::test]
async fn load_once_selects_first_niche() {
    let server = serve(ResponseTemplate::new(200).set_body_json(scenario_body())).await;
    let client = client_for(&server);
    let mut controller = Controller::new();

    let outcome = load_once(&mut controller, &client).await;

    assert_eq!(outcome, LoadOutcome::Applied { count: 3 });
    assert_eq!(controller.state().selected_niche.as_deref(), Some("SEO"));
    let ids: Vec<i64> = controller
        .view()
        .agencies
        .iter()
        .map(|a| a.record.id)
        .collect();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn load_once_failure_leaves_empty_state() {
    let server = serve(ResponseTemplate::new(500)).await;
    let client = client_for(&server);
    let mut controller = Controller::new();

    let outcome = load_once(&mut controller, &client).await;

    assert_eq!(outcome, LoadOutcome::Failed);
    assert!(controller.records().is_empty());
    assert!(controller.state().selected_niche.is_none());
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn spawned_load_delivers_tagged_result() {
    let server = serve(ResponseTemplate::new(200).set_body_json(scenario_body())).await;
    let client = Arc::new(client_for(&server));
    let mut controller = Controller::new();
    let (tx, mut rx) = mpsc::channel(1);

    let ticket = controller.begin_load();
    spawn_load(client, ticket, tx).await.expect("load task should not panic");

    let (received, result) = rx.recv().await.expect("result should be sent");
    assert_eq!(received, ticket);
    assert_eq!(
        controller.apply_load(received, result),
        LoadOutcome::Applied { count: 3 }
    );
}

#[tokio::test]
async fn late_result_after_cancel_is_discarded() {
    let server = serve(ResponseTemplate::new(200).set_body_json(scenario_body())).await;
    let client = Arc::new(client_for(&server));
    let mut controller = Controller::new();
    let (tx, mut rx) = mpsc::channel(1);

    let ticket = controller.begin_load();
    let handle = spawn_load(client, ticket, tx);
    controller.cancel_pending();
    handle.await.expect("load task should not panic");

    let (received, result) = rx.recv().await.expect("result should be sent");
    assert_eq!(controller.apply_load(received, result), LoadOutcome::Discarded);
    assert!(controller.records().is_empty());
}

#[tokio::test]
async fn dropped_receiver_does_not_panic_task() {
    let server = serve(ResponseTemplate::new(200).set_body_json(scenario_body())).await;
    let client = Arc::new(client_for(&server));
    let mut controller = Controller::new();
    let (tx, rx) = mpsc::channel(1);
    drop(rx);

    let ticket = controller.begin_load();
    spawn_load(client, ticket, tx)
        .await
        .expect("task should finish cleanly");
}

#[tokio::test(flavor = "multi_thread")]
async fn load_spawned_from_blocking_thread_is_applied() {
    let server = serve(ResponseTemplate::new(200).set_body_json(scenario_body())).await;
    let client = Arc::new(client_for(&server));

    let outcome = tokio::task::spawn_blocking(move || {
        let mut controller = Controller::new();
        let (tx, mut rx) = mpsc::channel(1);
        let ticket = controller.begin_load();
        let _load = spawn_load(client, ticket, tx);

        let (received, result) = rx.blocking_recv().expect("result should be sent");
        controller.apply_load(received, result)
    })
    .await
    .expect("blocking task should not panic");

    assert_eq!(outcome, LoadOutcome::Applied { count: 3 });
}
