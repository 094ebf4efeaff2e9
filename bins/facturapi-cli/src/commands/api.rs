//! Raw API access commands

use anyhow::Result;
use facturapi_client::{ApiResponse, FacturapiClient, QueryParams, RequestOptions};

/// Parse a `key=value` query parameter
pub fn parse_param(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{s}'")),
    }
}

/// GET `path` and print the body
pub async fn get(client: &FacturapiClient, path: &str, params: &[(String, String)]) -> Result<()> {
    let query = params
        .iter()
        .fold(QueryParams::new(), |acc, (key, value)| acc.with(key, value));

    match client.get(path, RequestOptions::new().query(query)).await? {
        ApiResponse::Json(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        ApiResponse::Text(text) => println!("{text}"),
        ApiResponse::Binary(body) => anyhow::bail!(
            "response is binary ({}); use the download command",
            body.content_type().unwrap_or("unknown type")
        ),
    }
    Ok(())
}

/// Validate an RFC and print the SAT answer
pub async fn validate_tax_id(client: &FacturapiClient, tax_id: &str) -> Result<()> {
    let result = client.tools().validate_tax_id(tax_id).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
