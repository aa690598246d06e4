//! Upload surface views and the pipeline that feeds the webhook.

mod expected_format;
pub use expected_format::ExpectedFormat;

mod uploader;
pub use uploader::FileUploader;

use std::rc::Rc;

use api::CsvUpload;
use dioxus::prelude::*;
use futures_util::StreamExt;

use crate::core::gateway::HttpGateway;
use crate::core::session::SessionMachine;
use crate::core::surface;

/// Work for the upload coroutine owned by the workspace root.
#[derive(Debug, Clone)]
pub enum UploadCommand {
    Submit(CsvUpload),
}

/// Spawn the coroutine that runs accepted uploads through the gateway and
/// feeds results back into the session. Lives at the root so switching tabs
/// never cancels an upload in flight.
pub fn use_upload_pipeline(
    session: Signal<SessionMachine>,
    gateway: Rc<HttpGateway>,
) -> Coroutine<UploadCommand> {
    use_coroutine(move |mut rx: UnboundedReceiver<UploadCommand>| {
        let gateway = gateway.clone();
        let mut session_signal = session;
        async move {
            while let Some(command) = rx.next().await {
                match command {
                    UploadCommand::Submit(upload) => {
                        let result = gateway.submit(&upload).await;
                        if let Err(err) = session_signal.write().complete_upload(result) {
                            tracing::warn!(error = %err, "upload result discarded");
                        }
                    }
                }
            }
        }
    })
}

/// Upload entry point used by the surface: validate, start the upload in the
/// session and queue it. Returns whether the file was taken.
pub(crate) fn submit_file(
    mut session: Signal<SessionMachine>,
    uploads: Coroutine<UploadCommand>,
    upload: CsvUpload,
) -> bool {
    let status = session.read().state().upload_status;
    let mut started = false;
    surface::offer_file(upload, status, |upload| {
        if session.write().begin_upload(&upload.filename).is_ok() {
            uploads.send(UploadCommand::Submit(upload));
            started = true;
        }
    });
    started
}
