//! Webhook signature commands

use anyhow::{Context, Result};
use facturapi_client::WebhookVerifier;
use facturapi_crypto::hmac_sha256_hex;
use owo_colors::OwoColorize;
use std::path::Path;

/// Raw webhook body from a file or an inline argument
pub fn read_payload(file: Option<&Path>, payload: Option<&str>) -> Result<Vec<u8>> {
    match (file, payload) {
        (Some(path), _) => {
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        (None, Some(text)) => Ok(text.as_bytes().to_vec()),
        (None, None) => anyhow::bail!("either --file or --payload is required"),
    }
}

/// Print the hex signature of `body`
pub fn sign(secret: &str, body: &[u8]) -> Result<()> {
    println!("{}", hmac_sha256_hex(secret.as_bytes(), body));
    Ok(())
}

/// Verify `body` and print the event it carries
pub async fn verify(secret: &str, signature: &str, body: Vec<u8>) -> Result<()> {
    let event = WebhookVerifier::local()
        .verify(secret, signature.trim(), body)
        .await?;

    eprintln!("{} {}", "✓".green(), "Signature valid".green().bold());
    println!("{}", serde_json::to_string_pretty(&event)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_payload_inline() {
        assert_eq!(read_payload(None, Some("{}")).unwrap(), b"{}");
    }

    #[test]
    fn test_read_payload_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"type\":\"x\"}").unwrap();
        let body = read_payload(Some(file.path()), None).unwrap();
        assert_eq!(body, b"{\"type\":\"x\"}");
    }

    #[test]
    fn test_read_payload_missing() {
        assert!(read_payload(None, None).is_err());
    }
}
