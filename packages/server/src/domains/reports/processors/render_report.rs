//! Report rendering - statistics to a self-contained HTML document.

use async_trait::async_trait;
use tracing::info;
use turnstile::{ProcessContext, ProcessError, ProcessOutcome, Processor};

use crate::domains::reports::models::PerformanceReport;
use crate::kernel::ServerDeps;

pub struct RenderReportHtmlProcessor;

#[async_trait]
impl Processor<PerformanceReport, ServerDeps> for RenderReportHtmlProcessor {
    fn name(&self) -> &'static str {
        "RenderReportHtmlProcessor"
    }

    async fn process(
        &self,
        mut report: PerformanceReport,
        _ctx: &ProcessContext<'_, ServerDeps>,
    ) -> Result<ProcessOutcome<PerformanceReport>, ProcessError> {
        let stats = report.statistics.as_ref().ok_or_else(|| {
            ProcessError::Precondition("report has no statistics to render".to_string())
        })?;

        let mut html = String::new();
        html.push_str("<html><body>");
        html.push_str(&format!("<h1>{}</h1>", report.title));
        html.push_str(&format!(
            "<p>Period: {} to {}</p>",
            report.report_period_start, report.report_period_end
        ));
        html.push_str(&format!("<p>{}</p>", stats.trend_summary));

        html.push_str("<h2>Categories</h2><table>");
        html.push_str("<tr><th>Category</th><th>Pets</th><th>Available</th><th>Sold</th><th>Revenue</th></tr>");
        for c in &stats.categories {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td></tr>",
                c.category, c.pet_count, c.available_pets, c.units_sold, c.revenue
            ));
        }
        html.push_str("</table>");

        if !stats.top_performers.is_empty() {
            html.push_str("<h2>Top performers</h2><ol>");
            for c in &stats.top_performers {
                html.push_str(&format!("<li>{} ({} sold)</li>", c.category, c.units_sold));
            }
            html.push_str("</ol>");
        }

        if !stats.restock.is_empty() {
            html.push_str("<h2>Restock</h2><ul>");
            for r in &stats.restock {
                html.push_str(&format!(
                    "<li>{:?}: {} ({} available)</li>",
                    r.urgency, r.category, r.available
                ));
            }
            html.push_str("</ul>");
        }

        if !stats.recommendations.is_empty() {
            html.push_str("<h2>Recommendations</h2><ul>");
            for recommendation in &stats.recommendations {
                html.push_str(&format!("<li>{}</li>", recommendation));
            }
            html.push_str("</ul>");
        }
        html.push_str("</body></html>");

        info!(report_id = %report.id, chars = html.chars().count(), "Report rendered");
        report.html_body = Some(html);
        Ok(ProcessOutcome::new(report))
    }
}
