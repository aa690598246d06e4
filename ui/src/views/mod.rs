mod process;
mod report;
mod upload;
mod workspace;

pub use process::ProcessPage;
pub use report::ReportPage;
pub use upload::UploadPage;
pub use workspace::Workspace;
