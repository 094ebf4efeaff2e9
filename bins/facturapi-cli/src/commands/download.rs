//! Document download command

use anyhow::{Context, Result};
use clap::ValueEnum;
use facturapi_client::{BinaryBody, FacturapiClient};
use owo_colors::OwoColorize;
use std::path::Path;

/// Document family to download from
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocumentKind {
    Invoice,
    Receipt,
    Retention,
}

/// File format of the download
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FileFormat {
    Pdf,
    Xml,
    Zip,
}

/// Stream a document to `output`
pub async fn run(
    client: &FacturapiClient,
    kind: DocumentKind,
    id: &str,
    format: FileFormat,
    output: &Path,
) -> Result<()> {
    let body = fetch(client, kind, id, format).await?;

    let mut file = tokio::fs::File::create(output)
        .await
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let written = body.write_to(&mut file).await?;

    tracing::debug!(bytes = written, path = %output.display(), "Download written");
    eprintln!(
        "{} Saved {} bytes to {}",
        "✓".green(),
        written,
        output.display().bold()
    );
    Ok(())
}

async fn fetch(
    client: &FacturapiClient,
    kind: DocumentKind,
    id: &str,
    format: FileFormat,
) -> Result<BinaryBody> {
    let body = match (kind, format) {
        (DocumentKind::Invoice, FileFormat::Pdf) => client.invoices().download_pdf(id).await?,
        (DocumentKind::Invoice, FileFormat::Xml) => client.invoices().download_xml(id).await?,
        (DocumentKind::Invoice, FileFormat::Zip) => client.invoices().download_zip(id).await?,
        (DocumentKind::Retention, FileFormat::Pdf) => client.retentions().download_pdf(id).await?,
        (DocumentKind::Retention, FileFormat::Xml) => client.retentions().download_xml(id).await?,
        (DocumentKind::Retention, FileFormat::Zip) => client.retentions().download_zip(id).await?,
        (DocumentKind::Receipt, FileFormat::Pdf) => client.receipts().download_pdf(id).await?,
        (DocumentKind::Receipt, other) => {
            anyhow::bail!("receipts are only available as PDF, not {other:?}")
        }
    };
    Ok(body)
}
