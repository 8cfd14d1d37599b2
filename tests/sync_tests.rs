//! End-to-end outbox drain against a live replication endpoint.

use sea_orm::{EntityTrait, Set};
use vitalog::clients::BackendClient;
use vitalog::db::{NewUser, Store};
use vitalog::entities::sync_outbox;
use vitalog::models::outbox::{OutboxPayload, UserPayload, VitalPayload};
use vitalog::services::SyncService;

async fn spawn_store() -> Store {
    let db_path =
        std::env::temp_dir().join(format!("vitalog-sync-test-{}.db", uuid::Uuid::new_v4()));

    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to open store")
}

/// Boot the replication endpoint on an ephemeral port, backed by its own
/// temp database, and return its base URL.
async fn spawn_backend() -> String {
    let db_path =
        std::env::temp_dir().join(format!("vitalog-sync-server-{}.db", uuid::Uuid::new_v4()));

    let state = vitalog::api::create_app_state(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to create server state");
    let app = vitalog::api::router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind");
    let addr = listener.local_addr().expect("no local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server crashed");
    });

    format!("http://{addr}")
}

fn sync_service(store: &Store, base_url: &str) -> SyncService {
    let backend = BackendClient::new(base_url, 2, 5).expect("failed to build client");
    SyncService::new(store.clone(), backend)
}

/// Register locally and enqueue the matching replication entry, the way the
/// registration flow does.
async fn register_and_enqueue(store: &Store, username: &str) -> i32 {
    let user_id = store
        .register_user(&NewUser {
            username: username.to_string(),
            password: "secret".to_string(),
            full_name: None,
            birthdate: "1990-04-02".to_string(),
            email: None,
        })
        .await
        .unwrap();

    store
        .enqueue(
            user_id,
            &OutboxPayload::User(UserPayload {
                username: username.to_string(),
                password: "secret".to_string(),
                full_name: None,
                birthdate: "1990-04-02".to_string(),
                email: None,
            }),
        )
        .await
        .unwrap();

    user_id
}

async fn add_vital_and_enqueue(store: &Store, user_id: i32, username: &str, date: &str) {
    let vital_id = store
        .add_vital(user_id, date, "120/80", "95.5", "")
        .await
        .unwrap();

    store
        .enqueue(
            vital_id,
            &OutboxPayload::Vital(VitalPayload {
                user_external: username.to_string(),
                date: date.to_string(),
                pressure_systolic: Some(120),
                pressure_diastolic: Some(80),
                glucose: Some(95.5),
                notes: None,
            }),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unreachable_backend_makes_no_progress() {
    let store = spawn_store().await;
    register_and_enqueue(&store, "ana").await;

    // Nothing is listening on this port.
    let service = sync_service(&store, "http://127.0.0.1:9");
    assert_eq!(service.sync_if_possible().await, 0);

    let pending = store.pending_outbox().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert!(!pending[0].processed);
}

#[tokio::test]
async fn test_drain_replicates_fifo_and_is_idempotent() {
    let store = spawn_store().await;
    let user_id = register_and_enqueue(&store, "ana").await;
    add_vital_and_enqueue(&store, user_id, "ana", "2026-02-01").await;
    add_vital_and_enqueue(&store, user_id, "ana", "2026-02-02").await;

    let base_url = spawn_backend().await;
    let service = sync_service(&store, &base_url);

    // FIFO matters here: the vitals resolve "ana" by natural key, so they
    // can only land if the user entry went first.
    assert_eq!(service.sync_if_possible().await, 3);
    assert!(store.pending_outbox().await.unwrap().is_empty());
    assert_eq!(store.outbox_counts().await.unwrap(), (0, 3));

    // No reachability change, no new mutations: nothing left to do.
    assert_eq!(service.sync_if_possible().await, 0);
}

#[tokio::test]
async fn test_rejected_entry_does_not_block_later_entries() {
    let store = spawn_store().await;

    // A vital whose owner the server will never know: permanently rejected
    // with a 404 on every drain.
    store
        .enqueue(
            999,
            &OutboxPayload::Vital(VitalPayload {
                user_external: "ghost".to_string(),
                date: "2026-02-01".to_string(),
                pressure_systolic: Some(120),
                pressure_diastolic: Some(80),
                glucose: None,
                notes: None,
            }),
        )
        .await
        .unwrap();

    let user_id = register_and_enqueue(&store, "ana").await;
    add_vital_and_enqueue(&store, user_id, "ana", "2026-02-02").await;

    let base_url = spawn_backend().await;
    let service = sync_service(&store, &base_url);

    // The ghost vital stays pending; the entries behind it still land.
    assert_eq!(service.sync_if_possible().await, 2);

    let pending = store.pending_outbox().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].entity, "vital");

    // And it is retried (and rejected) again on the next call.
    assert_eq!(service.sync_if_possible().await, 0);
    assert_eq!(store.pending_outbox().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_undecodable_payload_is_skipped() {
    let store = spawn_store().await;

    // Simulate a corrupted row written by some earlier version.
    sync_outbox::Entity::insert(sync_outbox::ActiveModel {
        entity: Set("user".to_string()),
        entity_id: Set(1),
        action: Set("create".to_string()),
        payload: Set("not json at all".to_string()),
        processed: Set(false),
        created_at: Set(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    })
    .exec(&store.conn)
    .await
    .unwrap();

    register_and_enqueue(&store, "ana").await;

    let base_url = spawn_backend().await;
    let service = sync_service(&store, &base_url);

    assert_eq!(service.sync_if_possible().await, 1);

    let pending = store.pending_outbox().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].payload, "not json at all");
}
