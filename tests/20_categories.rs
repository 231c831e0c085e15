mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn education_levels_in_priority_order() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::get(format!("{}/categories/education/levels", server.base_url)).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["levels"], json!(["博士研究生", "硕士研究生", "本科", "专科"]));
    Ok(())
}

#[tokio::test]
async fn student_status_accepts_snake_case_slug() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::get(format!("{}/categories/student_status/levels", server.base_url)).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["category"], "student-status");
    Ok(())
}

#[tokio::test]
async fn unknown_category_returns_error_envelope() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::get(format!("{}/categories/diploma/levels", server.base_url)).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "NOT_FOUND");
    Ok(())
}
