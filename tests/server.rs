use std::net::SocketAddr;

use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pokemon_details::cli::fetch_only;
use pokemon_details::{build_router, lookup_details, AppState, DetailsLookup, GraphqlClient};

async fn spawn_app(upstream: &MockServer) -> SocketAddr {
    let client = GraphqlClient::new(format!("{}/v1beta2", upstream.uri()));
    let app = build_router(AppState::new(client));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

async fn get_json(addr: SocketAddr, route: &str) -> (u16, Value) {
    let resp = reqwest::get(format!("http://{addr}{route}"))
        .await
        .expect("request");
    let status = resp.status().as_u16();
    let body = resp.json::<Value>().await.expect("json body");
    (status, body)
}

fn species_response(name: &str, flavor: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "data": { "species": [{
            "name": name,
            "is_legendary": false,
            "is_mythical": false,
            "pokemon": { "nodes": [{ "id": 6, "name": name }] },
            "flavorText": [{ "flavor_text": flavor }]
        }] }
    }))
}

#[tokio::test]
async fn found_species_returns_200_with_summary() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta2"))
        .and(body_partial_json(json!({ "variables": { "name": "charizard" } })))
        .respond_with(species_response("charizard", "Drawn to power..."))
        .expect(1)
        .mount(&upstream)
        .await;
    let addr = spawn_app(&upstream).await;

    let (status, body) = get_json(addr, "/pokemon/details/Charizard").await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!([{ "name": "charizard", "flavorText": [{ "flavor_text": "Drawn to power..." }] }])
    );
}

#[tokio::test]
async fn unknown_species_returns_404_sentinel_with_original_casing() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "name": "notapokemon" } })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "species": [] } })),
        )
        .expect(1)
        .mount(&upstream)
        .await;
    let addr = spawn_app(&upstream).await;

    let (status, body) = get_json(addr, "/pokemon/details/NotAPokemon").await;
    assert_eq!(status, 404);
    assert_eq!(
        body,
        json!([{ "name": "Pokemon not found for name: NotAPokemon", "flavorText": [{ "flavor_text": "" }] }])
    );
}

#[tokio::test]
async fn upstream_status_failure_returns_502_error_body() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&upstream)
        .await;
    let addr = spawn_app(&upstream).await;

    let (status, body) = get_json(addr, "/pokemon/details/pikachu").await;
    assert_eq!(status, 502);
    assert_eq!(body["error"]["code"], "upstream_transport");
    assert_eq!(body["error"]["upstream_status"], 503);
    assert_eq!(
        body["error"]["message"],
        "Could Not Retrieve Pokemon. Error: GraphQL Fetch Failed: 503"
    );
}

#[tokio::test]
async fn graphql_errors_return_502_with_all_messages() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{ "message": "first" }, { "message": "second" }]
        })))
        .mount(&upstream)
        .await;
    let addr = spawn_app(&upstream).await;

    let (status, body) = get_json(addr, "/pokemon/details/pikachu").await;
    assert_eq!(status, 502);
    assert_eq!(body["error"]["code"], "upstream_graphql");
    assert_eq!(
        body["error"]["message"],
        "Could Not Retrieve Pokemon. Error: first; second"
    );
    assert!(body["error"].get("upstream_status").is_none());
}

#[tokio::test]
async fn healthz_reports_ok() {
    let upstream = MockServer::start().await;
    let addr = spawn_app(&upstream).await;
    let (status, body) = get_json(addr, "/healthz").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn lookup_maps_every_returned_species() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "species": [
                { "name": "nidoran-f", "flavorText": [] },
                { "name": "nidoran-m", "flavorText": [{ "flavor_text": "Stiffens its ears." }] }
            ] }
        })))
        .mount(&upstream)
        .await;
    let client = GraphqlClient::new(format!("{}/v1beta2", upstream.uri()));

    let lookup = lookup_details(&client, "NIDORAN").await.expect("lookup");
    match lookup {
        DetailsLookup::Found(list) => {
            let names: Vec<&str> = list.iter().map(|s| s.name.as_str()).collect();
            assert_eq!(names, vec!["nidoran-f", "nidoran-m"]);
            assert!(list[0].flavor_text.is_empty());
        }
        other => panic!("expected found, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_only_reports_graphql_failure_as_one_line() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{ "message": "first" }, { "message": "second" }]
        })))
        .mount(&upstream)
        .await;
    let client = GraphqlClient::new(format!("{}/v1beta2", upstream.uri()));

    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = fetch_only(&client, "Charizard", &mut out, &mut err)
        .await
        .expect("write");
    assert_eq!(code, 1);
    assert!(out.is_empty());
    let err = String::from_utf8(err).expect("utf8");
    assert_eq!(
        err.lines().next(),
        Some("Could Not Retrieve Pokemon. Error: first; second")
    );
    assert!(!err.contains("GraphqlError {"));
}

#[tokio::test]
async fn fetch_only_prints_summary_and_status() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(species_response("charizard", "Drawn to power..."))
        .mount(&upstream)
        .await;
    let client = GraphqlClient::new(format!("{}/v1beta2", upstream.uri()));

    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = fetch_only(&client, "Charizard", &mut out, &mut err)
        .await
        .expect("write");
    assert_eq!(code, 0);
    let body: Value = serde_json::from_slice(&out).expect("json");
    assert_eq!(body[0]["name"], "charizard");
    assert_eq!(String::from_utf8(err).expect("utf8"), "status: 200\n");
}
