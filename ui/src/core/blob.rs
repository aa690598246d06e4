//! Platform blob backends behind [`super::resources::BlobBackend`].

#[cfg(not(target_arch = "wasm32"))]
use std::{cell::RefCell, collections::HashMap, rc::Rc};

use super::resources::BlobBackend;

#[cfg(target_arch = "wasm32")]
pub type PlatformBackend = ObjectUrlBackend;

#[cfg(not(target_arch = "wasm32"))]
pub type PlatformBackend = ReportShelf;

/// Browser object URLs (`blob:` scheme).
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct ObjectUrlBackend;

#[cfg(target_arch = "wasm32")]
impl BlobBackend for ObjectUrlBackend {
    fn create_url(&self, bytes: &[u8], mime: &str) -> Result<String, String> {
        use web_sys::{Blob, BlobPropertyBag, Url};

        let array = js_sys::Uint8Array::from(bytes);
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| "Failed to create blob".to_string())?;
        Url::create_object_url_with_blob(&blob).map_err(|_| "Unable to create report URL".to_string())
    }

    fn revoke_url(&self, url: &str) {
        web_sys::Url::revoke_object_url(url).ok();
    }
}

/// Path prefix under which the desktop launcher serves reports from a
/// [`ReportShelf`] through the webview's own protocol.
#[cfg(not(target_arch = "wasm32"))]
pub const REPORT_ROUTE: &str = "reports";

/// Report bytes kept in memory and addressed by a root-relative
/// `/reports/<id>.pdf` URL, which resolves against the webview origin on
/// every desktop platform. Revoking forgets the bytes.
///
/// Clones share one shelf: the launcher keeps a clone to answer requests.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Default)]
pub struct ReportShelf {
    reports: Rc<RefCell<HashMap<String, Rc<[u8]>>>>,
}

#[cfg(not(target_arch = "wasm32"))]
impl ReportShelf {
    /// Bytes for a request path such as `/reports/<id>.pdf`.
    pub fn lookup(&self, path: &str) -> Option<Rc<[u8]>> {
        let id = report_id(path)?;
        self.reports.borrow().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.reports.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.borrow().is_empty()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn report_id(path: &str) -> Option<&str> {
    let path = path.split(['?', '#']).next()?;
    let rest = path.trim_start_matches('/').strip_prefix(REPORT_ROUTE)?;
    let id = rest.strip_prefix('/')?.strip_suffix(".pdf")?;
    (!id.is_empty() && !id.contains('/')).then_some(id)
}

#[cfg(not(target_arch = "wasm32"))]
impl BlobBackend for ReportShelf {
    fn create_url(&self, bytes: &[u8], _mime: &str) -> Result<String, String> {
        let id = uuid::Uuid::new_v4().simple().to_string();
        let url = format!("/{REPORT_ROUTE}/{id}.pdf");
        self.reports.borrow_mut().insert(id, Rc::from(bytes));
        Ok(url)
    }

    fn revoke_url(&self, url: &str) {
        let removed = report_id(url).and_then(|id| self.reports.borrow_mut().remove(id));
        if removed.is_none() {
            tracing::warn!(%url, "revoked report was not on the shelf");
        }
    }
}
