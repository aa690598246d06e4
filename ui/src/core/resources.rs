//! Revocable handles for report PDFs.
//!
//! A [`PdfHandle`] is a locally created URL (an object URL on the web, a
//! cached file on desktop) that lets the viewer preview and download a report
//! without fetching it again. Each URL is released exactly once: explicitly
//! through [`PdfHandle::revoke`], or when the last clone of the handle is
//! dropped. Revoking an already revoked handle does nothing.
//!
//! The bytes stay in memory for the session so a report re-opened from the
//! history list can be reissued under a fresh URL after its first one was
//! revoked.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub const PDF_MIME: &str = "application/pdf";

/// Platform hook that turns bytes into a URL and takes it back.
pub trait BlobBackend {
    fn create_url(&self, bytes: &[u8], mime: &str) -> Result<String, String>;
    fn revoke_url(&self, url: &str);
}

struct HandleInner {
    id: u64,
    url: String,
    bytes: Option<Rc<[u8]>>,
    revoked: Cell<bool>,
    /// `None` for links to remotely hosted PDFs; nothing local to release.
    backend: Option<Rc<dyn BlobBackend>>,
}

impl HandleInner {
    fn release(&self) -> bool {
        if self.revoked.replace(true) {
            return false;
        }
        if let Some(backend) = &self.backend {
            backend.revoke_url(&self.url);
        }
        tracing::debug!(handle = self.id, "pdf handle released");
        true
    }
}

impl Drop for HandleInner {
    fn drop(&mut self) {
        self.release();
    }
}

/// Shared, revocable reference to a report PDF. Clones point at the same URL.
#[derive(Clone)]
pub struct PdfHandle(Rc<HandleInner>);

impl PdfHandle {
    pub fn id(&self) -> u64 {
        self.0.id
    }

    pub fn url(&self) -> &str {
        &self.0.url
    }

    /// In-memory copy of the PDF, absent for remotely hosted reports.
    pub fn bytes(&self) -> Option<&[u8]> {
        self.0.bytes.as_deref()
    }

    pub fn is_revoked(&self) -> bool {
        self.0.revoked.get()
    }

    /// Whether revoking this handle frees something held by the platform.
    pub fn is_local(&self) -> bool {
        self.0.backend.is_some()
    }

    /// Release the URL. Returns `true` only for the call that actually released it.
    pub fn revoke(&self) -> bool {
        self.0.release()
    }
}

impl PartialEq for PdfHandle {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for PdfHandle {}

impl fmt::Debug for PdfHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PdfHandle")
            .field("id", &self.0.id)
            .field("url", &self.0.url)
            .field("revoked", &self.0.revoked.get())
            .finish()
    }
}

/// Allocates [`PdfHandle`]s against one backend.
#[derive(Clone)]
pub struct ResourceStore {
    backend: Rc<dyn BlobBackend>,
    next_id: Rc<Cell<u64>>,
}

impl ResourceStore {
    pub fn new(backend: Rc<dyn BlobBackend>) -> Self {
        Self {
            backend,
            next_id: Rc::new(Cell::new(1)),
        }
    }

    /// Object URLs in the browser, an in-memory [`ReportShelf`](super::blob::ReportShelf) on desktop.
    pub fn platform_default() -> Self {
        Self::new(Rc::new(super::blob::PlatformBackend::default()))
    }

    fn allocate_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    pub fn materialize_pdf(&self, bytes: Vec<u8>) -> Result<PdfHandle, String> {
        self.materialize_shared(Rc::from(bytes))
    }

    fn materialize_shared(&self, bytes: Rc<[u8]>) -> Result<PdfHandle, String> {
        let url = self.backend.create_url(&bytes, PDF_MIME)?;
        let id = self.allocate_id();
        tracing::debug!(handle = id, bytes = bytes.len(), "pdf handle allocated");
        Ok(PdfHandle(Rc::new(HandleInner {
            id,
            url,
            bytes: Some(bytes),
            revoked: Cell::new(false),
            backend: Some(self.backend.clone()),
        })))
    }

    /// Wrap a link to a PDF hosted elsewhere.
    pub fn adopt_link(&self, url: String) -> PdfHandle {
        PdfHandle(Rc::new(HandleInner {
            id: self.allocate_id(),
            url,
            bytes: None,
            revoked: Cell::new(false),
            backend: None,
        }))
    }

    /// A live handle for the same report: `handle` itself while it is still
    /// valid, otherwise a new URL over the retained bytes.
    pub fn reissue(&self, handle: &PdfHandle) -> Result<PdfHandle, String> {
        if !handle.is_revoked() {
            return Ok(handle.clone());
        }
        match &handle.0.bytes {
            Some(bytes) => self.materialize_shared(bytes.clone()),
            None => Ok(self.adopt_link(handle.url().to_string())),
        }
    }
}

impl fmt::Debug for ResourceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceStore")
            .field("next_id", &self.next_id.get())
            .finish_non_exhaustive()
    }
}

/// Keeps blobs in memory and counts every revocation. Used by tests and
/// anywhere a real platform URL is not needed.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    created: RefCell<Vec<String>>,
    revocations: RefCell<HashMap<String, usize>>,
    fail_next: Cell<bool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created(&self) -> Vec<String> {
        self.created.borrow().clone()
    }

    pub fn revocations(&self, url: &str) -> usize {
        self.revocations.borrow().get(url).copied().unwrap_or(0)
    }

    pub fn live_urls(&self) -> Vec<String> {
        let revoked = self.revocations.borrow();
        self.created
            .borrow()
            .iter()
            .filter(|url| !revoked.contains_key(*url))
            .cloned()
            .collect()
    }

    /// Make the next `create_url` call fail.
    pub fn fail_next_create(&self) {
        self.fail_next.set(true);
    }
}

impl BlobBackend for MemoryBackend {
    fn create_url(&self, bytes: &[u8], _mime: &str) -> Result<String, String> {
        if self.fail_next.replace(false) {
            return Err("Failed to create blob".to_string());
        }
        let mut created = self.created.borrow_mut();
        let url = format!("blob:memory/{}-{}", created.len() + 1, bytes.len());
        created.push(url.clone());
        Ok(url)
    }

    fn revoke_url(&self, url: &str) {
        *self
            .revocations
            .borrow_mut()
            .entry(url.to_string())
            .or_insert(0) += 1;
    }
}
