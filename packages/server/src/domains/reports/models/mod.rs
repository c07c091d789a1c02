mod performance_report;

pub use performance_report::{
    states, CategoryStats, PerformanceReport, ReportStatistics, ReportStatus,
    RestockRecommendation, RestockUrgency,
};
