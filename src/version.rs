use anyhow::{Context, Result};

use crate::ui::prelude::*;

/// Plain-text endpoint publishing the latest released version string.
const LATEST_VERSION_URL: &str = "https://release.pandora-kb.io/kbctl/version.txt";

/// Print the built version; with `--check`, also fetch the latest release
/// string and compare. A failed check is reported but never fatal.
pub async fn handle_version(check: bool) -> Result<()> {
    let current = env!("CARGO_PKG_VERSION");
    emit(
        Level::Info,
        "version.current",
        &format!("kbctl {current}"),
        None,
    );

    if !check {
        return Ok(());
    }

    match fetch_latest_version().await {
        Ok(latest) if latest == current => {
            emit(Level::Success, "version.check", "Up to date.", None);
        }
        Ok(latest) => {
            emit(
                Level::Warn,
                "version.check",
                &format!("Update available: {latest} (installed: {current})"),
                None,
            );
        }
        Err(err) => {
            emit(
                Level::Warn,
                "version.check",
                &format!("Version check failed: {err:#}"),
                None,
            );
        }
    }

    Ok(())
}

async fn fetch_latest_version() -> Result<String> {
    let client = reqwest::Client::builder()
        .user_agent(format!("kbctl/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building HTTP client")?;

    let response = client
        .get(LATEST_VERSION_URL)
        .send()
        .await
        .context("fetching latest version")?;

    if !response.status().is_success() {
        anyhow::bail!("release endpoint returned {}", response.status());
    }

    let body = response.text().await.context("reading version body")?;
    Ok(body.trim().to_string())
}
