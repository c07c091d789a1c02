//! Report criteria - transition guards

mod report_content;
mod report_retry;
mod report_statistics;
mod valid_report_period;

pub use report_content::ReportContentCriterion;
pub use report_retry::ReportRetryCriterion;
pub use report_statistics::ReportStatisticsCriterion;
pub use valid_report_period::ValidReportPeriodCriterion;
