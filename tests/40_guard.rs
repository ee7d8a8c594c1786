mod common;

use anyhow::Result;
use axum::http::{header, StatusCode};

use common::{request, send, send_raw, test_app, TEST_TOKEN};

#[tokio::test]
async fn protected_page_redirects_anonymous_visitors_to_login() -> Result<()> {
    let (app, _) = test_app();

    let response = send_raw(&app, request("GET", "/home", None, None)).await?;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    let location = response.headers()[header::LOCATION].to_str()?;
    assert_eq!(location, "/login?next=%2Fhome");
    Ok(())
}

#[tokio::test]
async fn nested_protected_page_keeps_its_next_path() -> Result<()> {
    let (app, _) = test_app();

    let response = send_raw(&app, request("GET", "/create", None, None)).await?;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers()[header::LOCATION].to_str()?,
        "/login?next=%2Fcreate"
    );
    Ok(())
}

#[tokio::test]
async fn invalid_session_is_treated_as_anonymous() -> Result<()> {
    let (app, _) = test_app();

    let response = send_raw(&app, request("GET", "/home", None, Some("forged"))).await?;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    Ok(())
}

#[tokio::test]
async fn protected_page_renders_for_a_valid_session() -> Result<()> {
    let (app, _) = test_app();

    let response = send_raw(&app, request("GET", "/home", None, Some(TEST_TOKEN))).await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn login_page_redirects_authenticated_visitors_home() -> Result<()> {
    let (app, _) = test_app();

    let response = send_raw(&app, request("GET", "/login", None, Some(TEST_TOKEN))).await?;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION].to_str()?, "/home");

    let anonymous = send_raw(&app, request("GET", "/login", None, None)).await?;
    assert_eq!(anonymous.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn api_and_service_paths_bypass_the_guard() -> Result<()> {
    let (app, _) = test_app();

    let (status, _) = send(&app, request("GET", "/api/endpoints", None, None)).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, request("GET", "/health", None, None)).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, request("GET", "/", None, None)).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}
