use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::StatusCode;
use axum::Router;
use http::Request;
use serde_json::{json, Value};
use tower::ServiceExt;

use issuetrack_http::router;
use issuetrack_service::IssueService;
use issuetrack_store::{DataLayout, MemoryStore, RecordStore, RedbStore};

struct Client {
    app: Router,
}

impl Client {
    fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            app: router(IssueService::new(store)),
        }
    }

    fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    async fn call(&self, request: Request<Body>) -> Value {
        let response = self.app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn send_json(&self, method: &str, project: &str, body: Value) -> Value {
        self.send_raw(method, project, &body.to_string()).await
    }

    async fn send_raw(&self, method: &str, project: &str, body: &str) -> Value {
        let request = Request::builder()
            .method(method)
            .uri(format!("/api/issues/{project}"))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.call(request).await
    }

    async fn post(&self, project: &str, body: Value) -> Value {
        self.send_json("POST", project, body).await
    }

    async fn put(&self, project: &str, body: Value) -> Value {
        self.send_json("PUT", project, body).await
    }

    async fn delete(&self, project: &str, body: Value) -> Value {
        self.send_json("DELETE", project, body).await
    }

    async fn get(&self, project: &str, query: &[(&str, &str)]) -> Vec<Value> {
        let query: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
        let uri = if query.is_empty() {
            format!("/api/issues/{project}")
        } else {
            format!("/api/issues/{project}?{}", query.join("&"))
        };
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        match self.call(request).await {
            Value::Array(items) => items,
            other => panic!("expected an array, got {other}"),
        }
    }

    async fn seed(&self, project: &str, title: &str, text: &str, by: &str) -> Value {
        self.post(
            project,
            json!({"issue_title": title, "issue_text": text, "created_by": by}),
        )
        .await
    }
}

fn id_of(issue: &Value) -> String {
    issue["_id"].as_str().unwrap().to_string()
}

/// Valid ULID that no store ever handed out.
const UNKNOWN_ID: &str = "01GKJ8ZQ0YB8Q3W9VY7C2M4N5P";

// === POST ===

#[tokio::test]
async fn create_an_issue_with_every_field() {
    let client = Client::in_memory();
    let body = client
        .post(
            "projects",
            json!({
                "issue_title": "Issue",
                "issue_text": "Functional Test",
                "created_by": "fCC",
                "assigned_to": "Dom",
                "status_text": "Not Done",
            }),
        )
        .await;

    assert_eq!(body["issue_title"], "Issue");
    assert_eq!(body["issue_text"], "Functional Test");
    assert_eq!(body["created_by"], "fCC");
    assert_eq!(body["assigned_to"], "Dom");
    assert_eq!(body["status_text"], "Not Done");
    assert_eq!(body["open"], true);
    assert!(body["_id"].as_str().is_some());
    assert!(body["created_on"].as_str().is_some());
    assert_eq!(body["created_on"], body["updated_on"]);
}

#[tokio::test]
async fn create_an_issue_with_only_required_fields() {
    let client = Client::in_memory();
    let body = client
        .post(
            "projects",
            json!({
                "issue_title": "Issue",
                "issue_text": "Functional Test",
                "created_by": "fCC",
                "assigned_to": "",
                "status_text": "",
            }),
        )
        .await;
    assert_eq!(body["assigned_to"], "");
    assert_eq!(body["status_text"], "");

    let omitted = client.seed("projects", "Issue", "Functional Test", "fCC").await;
    assert_eq!(omitted["assigned_to"], "");
    assert_eq!(omitted["status_text"], "");
}

#[tokio::test]
async fn create_an_issue_with_missing_required_fields() {
    let client = Client::in_memory();
    let body = client
        .post(
            "projects",
            json!({
                "issue_title": "",
                "issue_text": "",
                "created_by": "fCC",
                "assigned_to": "",
                "status_text": "",
            }),
        )
        .await;
    assert_eq!(body, json!({"error": "required field(s) missing"}));
    assert!(client.get("projects", &[]).await.is_empty());
}

// === GET ===

async fn seeded_view_project(client: &Client) -> Value {
    let hey = client.seed("test-data-abc123", "Hey", "testing", "goku").await;
    client.seed("test-data-abc123", "Hey", "other text", "vegeta").await;
    client.seed("test-data-abc123", "Bye", "testing", "goku").await;
    client.seed("test-data-abc123", "Third", "more", "piccolo").await;
    client.seed("somewhere-else", "Hey", "testing", "goku").await;
    hey
}

#[tokio::test]
async fn view_issues_on_a_project() {
    let client = Client::in_memory();
    seeded_view_project(&client).await;

    let issues = client.get("test-data-abc123", &[]).await;
    assert_eq!(issues.len(), 4);
    let titles: Vec<&str> = issues
        .iter()
        .map(|i| i["issue_title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Hey", "Hey", "Bye", "Third"]);
}

#[tokio::test]
async fn view_issues_on_a_project_with_one_filter() {
    let client = Client::in_memory();
    let hey = seeded_view_project(&client).await;
    let id = id_of(&hey);

    let issues = client.get("test-data-abc123", &[("_id", &id)]).await;
    assert_eq!(issues, vec![hey.clone()]);
    assert_eq!(
        issues[0],
        json!({
            "_id": id,
            "issue_title": "Hey",
            "issue_text": "testing",
            "created_on": hey["created_on"],
            "updated_on": hey["created_on"],
            "created_by": "goku",
            "assigned_to": "",
            "open": true,
            "status_text": "",
        })
    );
}

#[tokio::test]
async fn view_issues_on_a_project_with_multiple_filters() {
    let client = Client::in_memory();
    let hey = seeded_view_project(&client).await;

    let issues = client
        .get(
            "test-data-abc123",
            &[("issue_title", "Hey"), ("issue_text", "testing")],
        )
        .await;
    assert_eq!(issues, vec![hey]);

    let by_goku = client.get("test-data-abc123", &[("created_by", "goku")]).await;
    assert_eq!(by_goku.len(), 2);
}

#[tokio::test]
async fn view_issues_filtered_by_open_state() {
    let client = Client::in_memory();
    let hey = seeded_view_project(&client).await;
    client
        .put("test-data-abc123", json!({"_id": id_of(&hey), "open": false}))
        .await;

    assert_eq!(client.get("test-data-abc123", &[("open", "false")]).await.len(), 1);
    assert_eq!(client.get("test-data-abc123", &[("open", "true")]).await.len(), 3);
}

#[tokio::test]
async fn view_issues_with_unmatchable_filters() {
    let client = Client::in_memory();
    seeded_view_project(&client).await;

    assert!(client
        .get("test-data-abc123", &[("_id", "638de4d036c9d4fad1acb5e2")])
        .await
        .is_empty());
    assert!(client
        .get("test-data-abc123", &[("priority", "high")])
        .await
        .is_empty());
    assert!(client.get("never-used", &[]).await.is_empty());
}

// === PUT ===

async fn seeded_put_issue(client: &Client) -> Value {
    client
        .post(
            "test-data-put",
            json!({
                "issue_title": "Issue",
                "issue_text": "Functional Test",
                "created_by": "fCC",
                "assigned_to": "Dom",
                "status_text": "Not Done",
            }),
        )
        .await
}

#[tokio::test]
async fn update_one_field_on_an_issue() {
    let client = Client::in_memory();
    let issue = seeded_put_issue(&client).await;
    let id = id_of(&issue);

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let body = client
        .put("test-data-put", json!({"_id": id, "issue_title": "different"}))
        .await;
    assert_eq!(body, json!({"result": "successfully updated", "_id": id}));

    let stored = client.get("test-data-put", &[("_id", &id)]).await;
    assert_eq!(stored[0]["issue_title"], "different");
    assert_eq!(stored[0]["issue_text"], "Functional Test");
    assert_eq!(stored[0]["created_on"], issue["created_on"]);
    assert_ne!(stored[0]["updated_on"], issue["updated_on"]);
}

#[tokio::test]
async fn update_multiple_fields_on_an_issue() {
    let client = Client::in_memory();
    let id = id_of(&seeded_put_issue(&client).await);

    let body = client
        .put(
            "test-data-put",
            json!({"_id": id, "issue_title": "random", "issue_text": "random"}),
        )
        .await;
    assert_eq!(body["result"], "successfully updated");
    assert_eq!(body["_id"], id.as_str());

    let stored = client
        .get("test-data-put", &[("issue_title", "random"), ("issue_text", "random")])
        .await;
    assert_eq!(stored.len(), 1);
    assert_eq!(id_of(&stored[0]), id);
}

#[tokio::test]
async fn update_an_issue_with_missing_id() {
    let client = Client::in_memory();
    let body = client
        .put(
            "test-data-put",
            json!({"issue_title": "update", "issue_text": "update"}),
        )
        .await;
    assert_eq!(body, json!({"error": "missing _id"}));
}

#[tokio::test]
async fn update_an_issue_with_no_fields_to_update() {
    let client = Client::in_memory();
    let id = id_of(&seeded_put_issue(&client).await);
    let body = client.put("test-data-put", json!({"_id": id})).await;
    assert_eq!(body, json!({"error": "no update field(s) sent"}));
}

#[tokio::test]
async fn update_an_issue_with_an_invalid_id() {
    let client = Client::in_memory();
    seeded_put_issue(&client).await;

    let body = client
        .put(
            "test-data-put",
            json!({"_id": UNKNOWN_ID, "issue_title": "update", "issue_text": "update"}),
        )
        .await;
    assert_eq!(body["error"], "could not update");

    let body = client
        .put(
            "test-data-put",
            json!({"_id": "638de70a12fa7a39ec4f051e", "issue_title": "update"}),
        )
        .await;
    assert_eq!(
        body,
        json!({"error": "could not update", "_id": "638de70a12fa7a39ec4f051e"})
    );
    assert_eq!(client.get("test-data-put", &[]).await.len(), 1);
}

#[tokio::test]
async fn update_cannot_reach_across_projects() {
    let client = Client::in_memory();
    let id = id_of(&seeded_put_issue(&client).await);
    let body = client
        .put("another-project", json!({"_id": id, "status_text": "moved"}))
        .await;
    assert_eq!(body["error"], "could not update");
}

// === DELETE ===

#[tokio::test]
async fn delete_an_issue() {
    let client = Client::in_memory();
    let id = id_of(&client.seed("projects", "Issue", "Functional Test", "fCC").await);

    let body = client.delete("projects", json!({"_id": id})).await;
    assert_eq!(body, json!({"result": "successfully deleted", "_id": id}));
    assert!(client.get("projects", &[("_id", &id)]).await.is_empty());

    let again = client.delete("projects", json!({"_id": id})).await;
    assert_eq!(again, json!({"error": "could not delete", "_id": id}));
}

#[tokio::test]
async fn delete_an_issue_with_an_invalid_id() {
    let client = Client::in_memory();
    let body = client
        .delete("projects", json!({"_id": "638de33136c9d4fad1acb555"}))
        .await;
    assert_eq!(body["error"], "could not delete");

    let body = client.delete("projects", json!({"_id": UNKNOWN_ID})).await;
    assert_eq!(body["error"], "could not delete");
}

#[tokio::test]
async fn delete_an_issue_with_missing_id() {
    let client = Client::in_memory();
    let body = client.delete("projects", json!({})).await;
    assert_eq!(body, json!({"error": "missing _id"}));
}

// === mistyped input ===

#[tokio::test]
async fn numeric_id_on_update_is_an_unknown_issue() {
    let client = Client::in_memory();
    seeded_put_issue(&client).await;
    let body = client
        .put("test-data-put", json!({"_id": 12345, "issue_title": "x"}))
        .await;
    assert_eq!(body, json!({"error": "could not update", "_id": "12345"}));
}

#[tokio::test]
async fn numeric_id_on_delete_is_an_unknown_issue() {
    let client = Client::in_memory();
    let body = client.delete("projects", json!({"_id": 12345})).await;
    assert_eq!(body, json!({"error": "could not delete", "_id": "12345"}));
}

#[tokio::test]
async fn numeric_fields_on_create_are_stored_as_text() {
    let client = Client::in_memory();
    let body = client
        .post(
            "projects",
            json!({"issue_title": 5, "issue_text": "Functional Test", "created_by": "fCC"}),
        )
        .await;
    assert_eq!(body["issue_title"], "5");
    assert_eq!(client.get("projects", &[("issue_title", "5")]).await.len(), 1);
}

#[tokio::test]
async fn structured_values_are_reported_not_rejected() {
    let client = Client::in_memory();
    let body = client
        .post(
            "projects",
            json!({"issue_title": {"nested": true}, "issue_text": "x", "created_by": "fCC"}),
        )
        .await;
    assert!(body["error"].as_str().is_some());
    assert!(client.get("projects", &[]).await.is_empty());
}

#[tokio::test]
async fn empty_delete_body_is_missing_id() {
    let client = Client::in_memory();
    let body = client.send_raw("DELETE", "projects", "").await;
    assert_eq!(body, json!({"error": "missing _id"}));
}

#[tokio::test]
async fn padded_id_is_echoed_trimmed() {
    let client = Client::in_memory();
    let id = id_of(&client.seed("projects", "Issue", "Functional Test", "fCC").await);
    let body = client
        .delete("projects", json!({"_id": format!("  {id} ")}))
        .await;
    assert_eq!(body, json!({"result": "successfully deleted", "_id": id}));
}

// === persistence ===

#[tokio::test]
async fn redb_backend_serves_the_same_contract_and_persists() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = DataLayout::new(tmp.path());
    issuetrack_store::init(&layout).unwrap();

    let id = {
        let client = Client::new(Arc::new(RedbStore::open(&layout.db_file()).unwrap()));
        let created = client.seed("apitest", "Persisted", "on disk", "fCC").await;
        let id = id_of(&created);
        let body = client
            .put("apitest", json!({"_id": id, "open": "false", "assigned_to": "Dom"}))
            .await;
        assert_eq!(body["result"], "successfully updated");
        id
    };

    let client = Client::new(Arc::new(RedbStore::open(&layout.db_file()).unwrap()));
    let stored = client.get("apitest", &[("open", "false")]).await;
    assert_eq!(stored.len(), 1);
    assert_eq!(id_of(&stored[0]), id);
    assert_eq!(stored[0]["assigned_to"], "Dom");

    let body = client.delete("apitest", json!({"_id": id})).await;
    assert_eq!(body["result"], "successfully deleted");
    assert!(client.get("apitest", &[]).await.is_empty());
}
