//! Saving an open report under its computed file name.

use super::resources::PdfHandle;

/// Trigger a download of `handle` as `filename`.
///
/// Web: a transient anchor pointing at the handle's URL is clicked and
/// removed. The URL itself stays alive; the handle's owner revokes it.
/// Desktop: the PDF is copied into the user's export directory and the
/// resulting path is returned.
pub fn save_report(handle: &PdfHandle, filename: &str) -> Result<Option<String>, String> {
    if handle.is_revoked() {
        return Err("This report has been closed; open it again to download".to_string());
    }

    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::HtmlAnchorElement;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("Document unavailable")?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| "Unable to create anchor")?
            .dyn_into()
            .map_err(|_| "Anchor cast failed")?;
        anchor.set_href(handle.url());
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or("Missing body")?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();

        tracing::info!(%filename, "report download started");
        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let dir = desktop_export_dir()?;
        save_report_in(&dir, handle, filename).map(Some)
    }
}

/// Copy the report's bytes into `dir` and return the written path.
#[cfg(not(target_arch = "wasm32"))]
pub fn save_report_in(
    dir: &std::path::Path,
    handle: &PdfHandle,
    filename: &str,
) -> Result<String, String> {
    use std::fs;

    if handle.is_revoked() {
        return Err("This report has been closed; open it again to download".to_string());
    }
    let bytes = handle
        .bytes()
        .ok_or_else(|| format!("Report is hosted remotely: {}", handle.url()))?;
    fs::create_dir_all(dir).map_err(|err| err.to_string())?;
    let path = dir.join(sanitize_filename(filename));
    fs::write(&path, bytes).map_err(|err| err.to_string())?;

    let saved = path.to_string_lossy().to_string();
    tracing::info!(path = %saved, "report saved");
    Ok(saved)
}

#[cfg(not(target_arch = "wasm32"))]
fn desktop_export_dir() -> Result<std::path::PathBuf, String> {
    let dirs = directories::ProjectDirs::from("com", "SalesPulse", "SalesPulse")
        .ok_or("Unable to determine export directory")?;
    Ok(dirs.data_dir().join("reports"))
}

/// Keep only the final path component so a crafted CSV name cannot escape
/// the export directory.
#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
fn sanitize_filename(filename: &str) -> String {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if name.is_empty() || name == "." || name == ".." {
        super::presentation::FALLBACK_REPORT_NAME.to_string()
    } else {
        name.to_string()
    }
}
