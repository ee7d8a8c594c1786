mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{request, send, test_app, TEST_TOKEN};

use makeapi_gateway::form::{FormMode, ItemForm};
use makeapi_gateway::model::{EndpointField, FieldKind};

async fn create_endpoint(app: &axum::Router, title: &str) -> Result<String> {
    let body = json!({
        "title": title,
        "campos": [
            { "title": "nome", "tipo": "string", "mult": false },
            { "title": "preco", "tipo": "number", "mult": false }
        ]
    });
    let (status, created) = send(
        app,
        request("POST", "/api/endpoints", Some(body), Some(TEST_TOKEN)),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    Ok(created["data"]["id"].as_str().unwrap().to_string())
}

#[tokio::test]
async fn create_item_requires_cookie_and_data_object() -> Result<()> {
    let (app, _) = test_app();
    let id = create_endpoint(&app, "Produtos").await?;

    let (status, _) = send(
        &app,
        request(
            "POST",
            &format!("/api/endpoints/{id}/items"),
            Some(json!({ "data": { "nome": "Caneta" } })),
            None,
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        request(
            "POST",
            &format!("/api/endpoints/{id}/items"),
            Some(json!({ "data": "not-an-object" })),
            Some(TEST_TOKEN),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    Ok(())
}

#[tokio::test]
async fn produtos_scenario_stores_numeric_preco_via_the_form_layer() -> Result<()> {
    let (app, _) = test_app();
    let id = create_endpoint(&app, "Produtos").await?;

    // The form coerces number inputs on change; "3.5" becomes 3.5 before
    // submission, and the submit payload covers every schema field.
    let campos = vec![
        EndpointField::new("nome", FieldKind::String),
        EndpointField::new("preco", FieldKind::Number),
    ];
    let mut form = ItemForm::new(FormMode::Create, &campos, None);
    form.set_input("nome", "Caneta");
    form.set_input("preco", "3.5");

    let (status, created) = send(
        &app,
        request(
            "POST",
            &format!("/api/endpoints/{id}/items"),
            Some(json!({ "data": form.values() })),
            Some(TEST_TOKEN),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let item_id = created["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["data"]["data"]["preco"], json!(3.5));

    // Fetch it back and reconcile the stored payload against the schema.
    let (status, fetched) = send(
        &app,
        request(
            "GET",
            &format!("/api/endpoints/{id}/items/{item_id}"),
            None,
            None,
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let edit = ItemForm::new(FormMode::Edit, &campos, Some(&fetched["data"]));
    assert_eq!(edit.value("nome"), Some(&json!("Caneta")));
    assert_eq!(edit.value("preco"), Some(&json!(3.5)));
    Ok(())
}

#[tokio::test]
async fn item_fetch_with_mismatched_endpoint_is_not_found() -> Result<()> {
    let (app, _) = test_app();
    let produtos = create_endpoint(&app, "Produtos").await?;
    let clientes = create_endpoint(&app, "Clientes").await?;

    let (_, created) = send(
        &app,
        request(
            "POST",
            &format!("/api/endpoints/{produtos}/items"),
            Some(json!({ "data": { "nome": "Caneta" } })),
            Some(TEST_TOKEN),
        ),
    )
    .await?;
    let item_id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        request(
            "GET",
            &format!("/api/endpoints/{clientes}/items/{item_id}"),
            None,
            None,
        ),
    )
    .await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    // the item's data must not leak through the mismatch response
    assert!(body.get("data").is_none());
    Ok(())
}

#[tokio::test]
async fn update_accepts_values_or_data_and_overwrites_fully() -> Result<()> {
    let (app, _) = test_app();
    let id = create_endpoint(&app, "Produtos").await?;

    let (_, created) = send(
        &app,
        request(
            "POST",
            &format!("/api/endpoints/{id}/items"),
            Some(json!({ "data": { "nome": "Caneta", "preco": 3.5 } })),
            Some(TEST_TOKEN),
        ),
    )
    .await?;
    let item_id = created["data"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/endpoints/{id}/items/{item_id}");

    // `{values}` body
    let (status, updated) = send(
        &app,
        request(
            "PUT",
            &uri,
            Some(json!({ "values": { "nome": "Lapis", "preco": 2 } })),
            Some(TEST_TOKEN),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["data"]["nome"], "Lapis");

    // `{data}` body, and the submit is a full overwrite: preco disappears
    let (status, updated) = send(
        &app,
        request(
            "PUT",
            &uri,
            Some(json!({ "data": { "nome": "Borracha" } })),
            Some(TEST_TOKEN),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["data"]["nome"], "Borracha");
    assert!(updated["data"]["data"].get("preco").is_none());

    // neither shape present
    let (status, _) = send(
        &app,
        request("PUT", &uri, Some(json!({ "nope": 1 })), Some(TEST_TOKEN)),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn update_against_the_wrong_endpoint_is_not_found() -> Result<()> {
    let (app, _) = test_app();
    let produtos = create_endpoint(&app, "Produtos").await?;
    let clientes = create_endpoint(&app, "Clientes").await?;

    let (_, created) = send(
        &app,
        request(
            "POST",
            &format!("/api/endpoints/{produtos}/items"),
            Some(json!({ "data": { "nome": "Caneta" } })),
            Some(TEST_TOKEN),
        ),
    )
    .await?;
    let item_id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        request(
            "PUT",
            &format!("/api/endpoints/{clientes}/items/{item_id}"),
            Some(json!({ "values": { "nome": "Hijack" } })),
            Some(TEST_TOKEN),
        ),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_item_requires_cookie_and_removes_it() -> Result<()> {
    let (app, _) = test_app();
    let id = create_endpoint(&app, "Produtos").await?;

    let (_, created) = send(
        &app,
        request(
            "POST",
            &format!("/api/endpoints/{id}/items"),
            Some(json!({ "data": { "nome": "Caneta" } })),
            Some(TEST_TOKEN),
        ),
    )
    .await?;
    let item_id = created["data"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/endpoints/{id}/items/{item_id}");

    let (status, _) = send(&app, request("DELETE", &uri, None, None)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, request("DELETE", &uri, None, Some(TEST_TOKEN))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], Value::Null);

    let (status, _) = send(&app, request("GET", &uri, None, None)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
