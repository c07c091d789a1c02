//! Report processors - transition actions

mod deliver_report;
mod generate_report;
mod render_report;

pub use deliver_report::DeliverReportProcessor;
pub use generate_report::GenerateReportProcessor;
pub use render_report::RenderReportHtmlProcessor;
