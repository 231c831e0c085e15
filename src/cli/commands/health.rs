use anyhow::Context;
use serde_json::Value;

use crate::cli::utils::{output_error, output_value};
use crate::cli::OutputFormat;

pub async fn handle(url: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let endpoint = format!("{}/health", url.trim_end_matches('/'));
    let response = reqwest::get(&endpoint)
        .await
        .with_context(|| format!("failed to reach {}", endpoint))?;

    let status = response.status();
    let body: Value = response.json().await.context("health response is not JSON")?;

    if status.is_success() {
        match output_format {
            OutputFormat::Json => output_value(&body),
            OutputFormat::Text => {
                println!("✓ {} is healthy", url);
                Ok(())
            }
        }
    } else {
        let message = body["error"].as_str().unwrap_or("unhealthy");
        output_error(&output_format, &format!("{} ({}): {}", url, status, message), Some("UNHEALTHY"))?;
        anyhow::bail!("server reported {}", status)
    }
}
