//! Power ranger API tests, driven through the full request pipeline

use genz_rs::prelude::*;
use genz_rs::{TestClient, TestRequest};
use power_ranger::MemoryStore;
use serde_json::{json, Value};
use std::sync::Arc;

fn client() -> TestClient {
    let app = GenZApp::new().environment(Environment::Development);
    TestClient::new(power_ranger::build(app, Arc::new(MemoryStore::seeded())))
}

fn names(response: &genz_rs::TestResponse) -> Vec<String> {
    let body: Value = response.json().unwrap();
    body.as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn lists_every_ranger() {
    let response = client().get("/power-ranger").await;
    response.assert_status(StatusCode::OK);
    assert_eq!(names(&response).len(), 6);
}

#[tokio::test]
async fn searches_by_name() {
    let client = client();

    let response = client.get("/power-ranger/?name=TOMMY").await;
    response.assert_status(StatusCode::OK);
    assert_eq!(names(&response), vec!["Tommy Oliver"]);

    let response = client.get("/power-ranger?name=nobody").await;
    assert!(names(&response).is_empty());
}

#[tokio::test]
async fn filters_by_season() {
    let client = client();

    // A single value still reaches the handler as a list
    let response = client.get("/power-ranger?seasons=3").await;
    response.assert_status(StatusCode::OK);
    assert_eq!(
        names(&response),
        vec!["Kimberly Hart", "Billy Cranston", "Tommy Oliver"]
    );

    let response = client.get("/power-ranger?name=a&seasons=1&seasons=3").await;
    assert_eq!(names(&response).len(), 5);

    client
        .get("/power-ranger?seasons=zeo")
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn gets_one_ranger() {
    let client = client();

    client
        .get("/power-ranger/2")
        .await
        .assert_status(StatusCode::OK)
        .assert_json(&json!({
            "id": 2,
            "name": "Trini Kwan",
            "seasons": [
                {"season": "1", "color": "yellow"},
                {"season": "2", "color": "yellow"}
            ]
        }));

    let missing = client.get("/power-ranger/99").await;
    missing.assert_status(StatusCode::NOT_FOUND);
    let body: Value = missing.json().unwrap();
    assert_eq!(body["error"]["message"], "Power ranger 99 not found");

    let invalid = client.get("/power-ranger/red").await;
    invalid.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = invalid.json().unwrap();
    assert_eq!(body["error"]["fields"][0]["field"], "id");
}

#[tokio::test]
async fn creates_and_renames_rangers() {
    let client = client();

    let created = client
        .post_json("/power-ranger", &json!({"name": "Rocky DeSantos"}))
        .await;
    created
        .assert_status(StatusCode::CREATED)
        .assert_json(&json!({"id": 7, "name": "Rocky DeSantos", "seasons": []}));

    client
        .request(TestRequest::put("/power-ranger/7").json(&json!({"name": "Rocky"})))
        .await
        .assert_status(StatusCode::OK);

    let fetched: Value = client.get("/power-ranger/7").await.json().unwrap();
    assert_eq!(fetched["name"], "Rocky");

    client
        .request(TestRequest::put("/power-ranger/70").json(&json!({"name": "Rocky"})))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rejects_bad_bodies() {
    let client = client();

    let response = client
        .post_json("/power-ranger", &json!({"color": "purple"}))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().unwrap();
    assert_eq!(body["error"]["type"], "validation_error");
    assert_eq!(body["error"]["fields"][0]["field"], "name");
    assert_eq!(body["error"]["fields"][0]["code"], "required");

    client
        .request(TestRequest::post("/power-ranger").body("{not json"))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn deletes_rangers() {
    let client = client();

    let removed: Value = client
        .request(TestRequest::delete("/power-ranger/1"))
        .await
        .json()
        .unwrap();
    assert_eq!(removed["name"], "Jason Lee Scott");

    client
        .request(TestRequest::delete("/power-ranger/1"))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    client
        .request(TestRequest::delete("/power-ranger").json(&json!({"ids": [2, 3, 42]})))
        .await
        .assert_status(StatusCode::OK)
        .assert_json(&json!({"deleted": 2}));

    assert_eq!(names(&client.get("/power-ranger").await).len(), 3);
}

#[tokio::test]
async fn serves_the_document() {
    let response = client().get("/api-spec.json").await;
    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "application/json");

    let doc: Value = response.json().unwrap();
    assert_eq!(doc["info"]["title"], "Gen Z Validation");
    assert_eq!(doc["info"]["contact"]["name"], "General Zod");

    let paths = &doc["paths"];
    assert_eq!(paths["/power-ranger/"]["get"]["operationId"], "getManyPowerRangers");
    assert_eq!(paths["/power-ranger/"]["post"]["operationId"], "createPowerRangers");
    assert_eq!(paths["/power-ranger/"]["delete"]["operationId"], "deleteManyPowerRangers");
    assert_eq!(paths["/power-ranger/{id}"]["get"]["operationId"], "getOnePowerRangers");
    assert_eq!(paths["/power-ranger/{id}"]["put"]["tags"][0], "Power Rangers");

    let schemas = doc["components"]["schemas"].as_object().unwrap();
    assert!(schemas.contains_key("PowerRanger"));
    assert!(schemas.contains_key("RangerName"));
    assert_eq!(
        paths["/power-ranger/{id}"]["get"]["responses"]["200"]["content"]["application/json"]
            ["schema"]["$ref"],
        "#/components/schemas/PowerRanger"
    );
}
