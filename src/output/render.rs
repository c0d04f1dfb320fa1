use crate::crawler::CrawlReport;
use crate::output::OutputResult;

/// Renders a report as pretty-printed JSON
///
/// # Example
///
/// ```
/// use link_sleuth::crawler::CrawlReport;
/// use link_sleuth::output::render_json;
///
/// let json = render_json(&CrawlReport::DeadLinks(vec![])).unwrap();
/// assert_eq!(json, r#"{
///   "deadLinks": []
/// }"#);
/// ```
pub fn render_json(report: &CrawlReport) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Renders a report as a human-readable listing
pub fn render_text(report: &CrawlReport) -> String {
    let mut out = String::new();

    match report {
        CrawlReport::Search(matches) => {
            out.push_str(&format!("{} search match(es)\n", matches.len()));
            for m in matches {
                out.push_str(&format!(
                    "\n  [depth {}] {}\n    {}\n",
                    m.depth, m.page_url, m.match_text
                ));
            }
        }
        CrawlReport::DeadLinks(links) => {
            out.push_str(&format!("{} dead link(s)\n", links.len()));
            for link in links {
                out.push_str(&format!(
                    "\n  [{}] {}\n    found on {} (depth {})\n",
                    link.status, link.broken_url, link.source_url, link.depth
                ));
            }
        }
    }

    out
}
