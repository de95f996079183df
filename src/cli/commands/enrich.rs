//! Offline enrichment command.

use std::path::Path;

use console::style;
use tokio::io::AsyncReadExt;

use crate::enrich::{enrich_body, TracingObserver};

/// Read a request envelope from `file` (or stdin) and print the response.
pub async fn cmd_enrich(file: Option<&Path>, pretty: bool) -> anyhow::Result<()> {
    let body = match file {
        Some(path) => tokio::fs::read(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?,
        None => {
            let mut buf = Vec::new();
            tokio::io::stdin().read_to_end(&mut buf).await?;
            buf
        }
    };

    let (response, failure) = match enrich_body(&body, &TracingObserver) {
        Ok(response) => (response, None),
        Err(e) => (e.to_response(), Some(e)),
    };

    let json = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", json);

    if let Some(e) = failure {
        eprintln!("{} {}", style("✗").red(), e);
        anyhow::bail!("request rejected");
    }
    Ok(())
}
