//! Getting files in and out of the app: dropped batch lists and CSV downloads.

use anyhow::{Context, Result, bail};
use eframe::egui::DroppedFile;

use crate::export::CsvDocument;

/// Name and text content of a dropped file. Browsers hand over bytes, desktops a path.
pub(crate) fn read_dropped_file(file: &DroppedFile) -> Result<(String, String)> {
    if let Some(bytes) = &file.bytes {
        let text = String::from_utf8_lossy(bytes).into_owned();
        return Ok((file.name.clone(), text));
    }

    #[cfg(not(target_arch = "wasm32"))]
    if let Some(path) = &file.path {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.name.clone());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return Ok((name, text));
    }

    bail!("Dropped file {:?} has no readable content", file.name)
}

/// Write the CSV next to the working directory. Returns where it went.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn save_csv(document: &CsvDocument) -> Result<String> {
    let path = std::env::current_dir()
        .context("No working directory")?
        .join(&document.file_name);
    std::fs::write(&path, document.content.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Exported {}", path.display());
    Ok(path.display().to_string())
}

/// Hand the CSV to the browser as a download.
#[cfg(target_arch = "wasm32")]
pub(crate) fn save_csv(document: &CsvDocument) -> Result<String> {
    use wasm_bindgen::JsCast;

    let js_err = |e: wasm_bindgen::JsValue| anyhow::anyhow!("{:?}", e);

    let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(&document.content));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/csv;charset=utf-8;");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_err)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

    let document_el = web_sys::window()
        .and_then(|w| w.document())
        .context("No browser document")?;
    let anchor = document_el
        .create_element("a")
        .map_err(js_err)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| anyhow::anyhow!("Created element is not an anchor"))?;
    anchor.set_href(&url);
    anchor.set_download(&document.file_name);
    anchor.click();
    web_sys::Url::revoke_object_url(&url).map_err(js_err)?;

    Ok(document.file_name.clone())
}
