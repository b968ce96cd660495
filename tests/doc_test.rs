//! Integration tests for document and search operations.

mod common;

use aliyun_opensearch::{DocEnvelope, Document, Documents, HttpMethod, SearchQuery};
use common::{client_for, request_params, NoParam, ValidSignature};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn doc(value: Value) -> Document {
    serde_json::from_value(value).unwrap()
}

fn sample_docs() -> Vec<Document> {
    vec![
        doc(json!({"id": "12113313177", "title": "A test title 1", "content": "搜索， 内容"})),
        doc(json!({"id": "12113933131", "title": "A test Title 2", "content": "搜索， 内容2"})),
    ]
}

async fn push_server() -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/index/doc/products"))
        .and(ValidSignature(HttpMethod::Post))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
        .mount(&mock_server)
        .await;
    mock_server
}

fn pushed_items(request: &wiremock::Request) -> Vec<DocEnvelope> {
    serde_json::from_str(&request_params(request)["items"]).unwrap()
}

#[tokio::test]
async fn test_add_single_document() {
    let mock_server = push_server().await;
    let client = client_for(&mock_server);

    let first = sample_docs().remove(0);
    let result = client.docs("products").add(first.clone(), "main").await.unwrap();
    assert_eq!(result["status"], "OK");

    let received = mock_server.received_requests().await.unwrap();
    let params = request_params(&received[0]);
    assert_eq!(params["action"], "push");
    assert_eq!(params["table_name"], "main");
    assert_eq!(params["sign_mode"], "1");
    assert_eq!(pushed_items(&received[0]), vec![DocEnvelope::add(first)]);
}

#[tokio::test]
async fn test_single_and_batch_add_send_same_items() {
    let mock_server = push_server().await;
    let client = client_for(&mock_server);
    let docs = client.docs("products");

    let first = sample_docs().remove(0);
    docs.add(first.clone(), "main").await.unwrap();
    docs.add(vec![first], "main").await.unwrap();

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 2);
    assert_eq!(
        request_params(&received[0])["items"],
        request_params(&received[1])["items"]
    );
}

#[tokio::test]
async fn test_add_batch_keeps_order() {
    let mock_server = push_server().await;
    let client = client_for(&mock_server);

    client.docs("products").add(sample_docs(), "main").await.unwrap();

    let received = mock_server.received_requests().await.unwrap();
    let items = pushed_items(&received[0]);
    let ids: Vec<_> = items.iter().map(|e| e.fields["id"].clone()).collect();
    assert_eq!(ids, vec![json!("12113313177"), json!("12113933131")]);
}

#[tokio::test]
async fn test_update_pushes_add_command() {
    let mock_server = push_server().await;
    let client = client_for(&mock_server);

    let docs = Documents::try_from(json!({"id": "1", "title": "new title"})).unwrap();
    client.docs("products").update(docs, "main").await.unwrap();

    let received = mock_server.received_requests().await.unwrap();
    let raw = &request_params(&received[0])["items"];
    assert_eq!(raw, r#"[{"cmd":"add","fields":{"id":"1","title":"new title"}}]"#);
}

#[tokio::test]
async fn test_delete_by_ids_keeps_order() {
    let mock_server = push_server().await;
    let client = client_for(&mock_server);
    let docs = client.docs("products");

    docs.delete("12113933131", "main").await.unwrap();
    docs.delete(vec!["12113933131", "12113313177"], "main")
        .await
        .unwrap();

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(
        pushed_items(&received[0]),
        vec![DocEnvelope::delete("12113933131")]
    );
    assert_eq!(
        pushed_items(&received[1]),
        vec![
            DocEnvelope::delete("12113933131"),
            DocEnvelope::delete("12113313177"),
        ]
    );
}

#[tokio::test]
async fn test_large_payload_is_sent_but_still_verifies() {
    let mock_server = push_server().await;
    let client = client_for(&mock_server);

    let big = doc(json!({"id": "1", "content": "x".repeat(20_000)}));
    client.docs("products").add(big, "main").await.unwrap();

    let received = mock_server.received_requests().await.unwrap();
    assert!(request_params(&received[0])["items"].len() > 20_000);
}

#[tokio::test]
async fn test_empty_batch_is_rejected() {
    let mock_server = push_server().await;
    let client = client_for(&mock_server);

    let err = client
        .docs("products")
        .add(Vec::<Document>::new(), "main")
        .await
        .unwrap_err();
    assert!(matches!(err, aliyun_opensearch::OpenSearchError::InvalidRequest(_)));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/index/doc/products"))
        .and(ValidSignature(HttpMethod::Post))
        .and(NoParam("action"))
        .and(NoParam("items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": {"id": "12113313177", "title": "A test title 1"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .docs("products")
        .detail("12113313177", "main")
        .await
        .unwrap();
    assert_eq!(result["result"]["title"], "A test title 1");

    let received = mock_server.received_requests().await.unwrap();
    let params = request_params(&received[0]);
    assert_eq!(params["id"], "12113313177");
    assert_eq!(params["table_name"], "main");
}

#[tokio::test]
async fn test_search_with_bare_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("index_name", "products"))
        .and(query_param("query", "query=搜索"))
        .and(NoParam("fetch_fields"))
        .and(NoParam("formula_name"))
        .and(NoParam("first_formula_name"))
        .and(NoParam("summary"))
        .and(ValidSignature(HttpMethod::Get))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": {"num": 1, "items": [{"id": "12113313177"}]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.docs("products").search("query=搜索").await.unwrap();
    assert_eq!(result["result"]["num"], 1);
}

#[tokio::test]
async fn test_search_with_options() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("index_name", "news"))
        .and(query_param("fetch_fields", "id;title"))
        .and(query_param("formula_name", "hot"))
        .and(query_param("first_formula_name", "rough"))
        .and(query_param("summary", "summary_field:title,summary_len:50"))
        .and(ValidSignature(HttpMethod::Get))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let query = SearchQuery::new("query=default:'phone'")
        .with_index_name("news")
        .with_fetch_fields("id;title")
        .with_formula_name("hot")
        .with_first_formula_name("rough")
        .with_summary("summary_field:title,summary_len:50");

    client.docs("products").search(query).await.unwrap();
}
