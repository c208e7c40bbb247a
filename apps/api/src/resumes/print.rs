//! HTML → PDF through a headless Chromium process.

use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::AppError;

const PRINT_TIMEOUT: Duration = Duration::from_secs(60);

/// Prints `html` to PDF with the browser at `chrome_bin`. Temp files are removed
/// when this returns.
pub async fn print_pdf(chrome_bin: &str, html: &str) -> Result<Vec<u8>, AppError> {
    let dir = tempfile::tempdir()
        .map_err(|e| AppError::Render(format!("Failed to create temp dir: {e}")))?;
    let html_path = dir.path().join("resume.html");
    let pdf_path = dir.path().join("resume.pdf");

    tokio::fs::write(&html_path, html)
        .await
        .map_err(|e| AppError::Render(format!("Failed to write HTML: {e}")))?;

    let args = chrome_args(
        &pdf_path.to_string_lossy(),
        &format!("file://{}", html_path.display()),
    );
    debug!("Running {chrome_bin} {}", args.join(" "));

    let output = tokio::time::timeout(
        PRINT_TIMEOUT,
        Command::new(chrome_bin).args(&args).kill_on_drop(true).output(),
    )
    .await
    .map_err(|_| AppError::Render(format!("{chrome_bin} timed out after {PRINT_TIMEOUT:?}")))?
    .map_err(|e| AppError::Render(format!("Failed to launch {chrome_bin}: {e}")))?;

    if !output.status.success() {
        return Err(AppError::Render(format!(
            "{chrome_bin} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let pdf = tokio::fs::read(&pdf_path)
        .await
        .map_err(|e| AppError::Render(format!("Browser produced no PDF: {e}")))?;
    info!("Printed resume PDF ({} bytes)", pdf.len());
    Ok(pdf)
}

fn chrome_args(pdf_path: &str, url: &str) -> Vec<String> {
    vec![
        "--headless".to_string(),
        "--disable-gpu".to_string(),
        "--no-sandbox".to_string(),
        "--no-pdf-header-footer".to_string(),
        format!("--print-to-pdf={pdf_path}"),
        url.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chrome_args_end_with_target_url() {
        let args = chrome_args("/tmp/x/resume.pdf", "file:///tmp/x/resume.html");
        assert_eq!(args[0], "--headless");
        assert!(args.contains(&"--print-to-pdf=/tmp/x/resume.pdf".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("file:///tmp/x/resume.html"));
    }

    #[tokio::test]
    async fn test_missing_browser_is_render_error() {
        let err = print_pdf("/nonexistent/chromium-for-tests", "<p>x</p>")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Render(_)));
    }
}
