#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use statusdeck_api::{ApiClient, Error, StatusUpdateBody};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/api", server.uri())).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

// ── Server tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_servers() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "alpha", "statuses": []},
            {"id": 2, "name": "beta"}
        ])))
        .mount(&server)
        .await;

    let servers = client.list_servers().await.unwrap();

    assert_eq!(servers.len(), 2);
    assert_eq!(servers[0].id, 1);
    assert_eq!(servers[0].name, "alpha");
    assert_eq!(servers[1].name, "beta");
}

#[tokio::test]
async fn test_list_servers_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert!(client.list_servers().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_server_sends_json_name() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/servers"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"name": "alpha"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 9, "name": "alpha"})))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_server("alpha").await.unwrap();
    assert_eq!(created.id, 9);
}

#[tokio::test]
async fn test_update_server() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/servers/4"))
        .and(body_json(json!({"name": "renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 4, "name": "renamed"})))
        .expect(1)
        .mount(&server)
        .await;

    let updated = client.update_server(4, "renamed").await.unwrap();
    assert_eq!(updated.name, "renamed");
}

#[tokio::test]
async fn test_delete_server_no_content() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/servers/4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_server(4).await.unwrap();
}

#[tokio::test]
async fn test_get_server_missing_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/servers/99"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string("Internal Server Error: Server not found with id: 99"),
        )
        .mount(&server)
        .await;

    let err = client.get_server(99).await.unwrap_err();
    assert!(err.is_not_found(), "expected not-found, got: {err:?}");
    assert_eq!(err.status(), Some(500));
}

// ── Status tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_check_status_encodes_url_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/server-status/check"))
        .and(query_param("url", "http://x/?q=1&r=2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "url": "http://x/?q=1&r=2", "isAvailable": false, "message": "timeout"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let status = client.check_status("http://x/?q=1&r=2").await.unwrap();
    assert_eq!(status.id, 1);
    assert!(!status.is_available);
    assert_eq!(status.message, "timeout");
}

#[tokio::test]
async fn test_check_statuses_bulk_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/server-status/bulk"))
        .and(body_json(json!([{"url": "http://a"}, {"url": "http://b"}])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "url": "http://a", "isAvailable": true, "message": "up"},
            {"id": 2, "url": "http://b", "available": false, "message": "down"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let statuses = client
        .check_statuses(&["http://a".into(), "http://b".into()])
        .await
        .unwrap();
    assert_eq!(statuses.len(), 2);
    assert!(statuses[0].is_available);
    assert!(!statuses[1].is_available);
}

#[tokio::test]
async fn test_create_status_attaches_server() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/server-status"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"url": "http://e", "server": {"id": 2}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 11, "url": "http://e", "isAvailable": false, "message": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_status(2, "http://e").await.unwrap();
    assert_eq!(created.id, 11);
    assert_eq!(created.message, "");
}

#[tokio::test]
async fn test_update_status() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/server-status/3"))
        .and(body_json(json!({"url": "http://c", "isAvailable": true, "message": "manual"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "url": "http://c", "isAvailable": true, "message": "manual"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let body = StatusUpdateBody {
        url: "http://c".into(),
        is_available: true,
        message: "manual".into(),
    };
    let updated = client.update_status(3, &body).await.unwrap();
    assert_eq!(updated.message, "manual");
}

#[tokio::test]
async fn test_statuses_by_server() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/server-status/statuses-by-server"))
        .and(query_param("serverName", "Default Server"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 5, "url": "http://d", "isAvailable": true, "message": "up"}
        ])))
        .mount(&server)
        .await;

    let statuses = client.statuses_by_server("Default Server").await.unwrap();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].url, "http://d");
}

#[tokio::test]
async fn test_delete_status() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/server-status/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_status(5).await.unwrap();
}

// ── Request counter tests ───────────────────────────────────────────

#[tokio::test]
async fn test_request_count_bare_number() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/server-status/request-count"))
        .respond_with(ResponseTemplate::new(200).set_body_string("17"))
        .mount(&server)
        .await;

    assert_eq!(client.request_count().await.unwrap(), 17);
}

#[tokio::test]
async fn test_reset_request_count() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/server-status/request-count/reset"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.reset_request_count().await.unwrap();
}

// ── Error handling ──────────────────────────────────────────────────

#[tokio::test]
async fn test_bad_request_surfaces_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/servers"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string("Bad Request: Server name cannot be null or empty"),
        )
        .mount(&server)
        .await;

    let result = client.create_server(" ").await;
    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 400);
            assert!(message.contains("cannot be null or empty"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_success_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.list_servers().await;
    assert!(
        matches!(result, Err(Error::Deserialization { ref body, .. }) if body.contains("oops")),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_connection_refused_is_connect_error() {
    // Grab a free port, then release it so nothing is listening there.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = ApiClient::with_client(
        reqwest::Client::new(),
        Url::parse(&format!("http://127.0.0.1:{port}/api")).unwrap(),
    );

    let err = client.list_servers().await.unwrap_err();
    assert!(err.is_connect(), "expected connect error, got: {err:?}");
}
