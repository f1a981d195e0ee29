use std::path::Path;

use super::chart::ChartSpec;
use super::table::{HEADINGS, escape_html};
use super::{AUTHORIZE_LABEL, DashboardView};

/// In-memory dashboard document. Renders to a standalone HTML page that pulls
/// Chart.js from a CDN.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    pub authorize_visible: bool,
    pub authorize_label: String,
    pub signout_visible: bool,
    pub error_message: Option<String>,
    pub table_body: String,
    pub chart: Option<ChartSpec>,
}

impl Default for HtmlPage {
    fn default() -> Self {
        Self {
            authorize_visible: false,
            authorize_label: AUTHORIZE_LABEL.to_string(),
            signout_visible: false,
            error_message: None,
            table_body: String::new(),
            chart: None,
        }
    }
}

impl HtmlPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_html(&self) -> String {
        let display = |visible: bool| if visible { "inline-block" } else { "none" };
        let headings: String = HEADINGS.iter().map(|h| format!("<th>{h}</th>")).collect();
        let error = self
            .error_message
            .as_deref()
            .map(escape_html)
            .unwrap_or_default();
        let chart = match &self.chart {
            // `</` cannot appear inside a script element.
            Some(chart) => chart.to_config().to_string().replace("</", "<\\/"),
            None => "null".to_string(),
        };

        let authorize_display = display(self.authorize_visible);
        let authorize_label = escape_html(&self.authorize_label);
        let signout_display = display(self.signout_visible);
        let table_body = &self.table_body;

        // Filled in one pass: inserted text is never scanned again.
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Production dashboard</title>
<script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
</head>
<body>
<button id="authorize_button" style="display: {authorize_display}">{authorize_label}</button>
<button id="signout_button" style="display: {signout_display}">Sign out</button>
<p id="error-message">{error}</p>
<div id="content">
<table id="operatorTable">
<thead><tr>{headings}</tr></thead>
<tbody>
{table_body}</tbody>
</table>
<canvas id="productivityChart"></canvas>
</div>
<script>
const CHART = {chart};
if (CHART) {{
  new Chart(document.getElementById('productivityChart').getContext('2d'), CHART);
}}
</script>
</body>
</html>
"#
        )
    }

    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_html())
    }
}

impl DashboardView for HtmlPage {
    fn enable_authorize(&mut self) {
        self.authorize_visible = true;
    }

    fn set_authorize_label(&mut self, label: &str) {
        self.authorize_label = label.to_string();
    }

    fn set_signout_visible(&mut self, visible: bool) {
        self.signout_visible = visible;
    }

    fn show_error(&mut self, message: &str) {
        self.error_message = Some(message.to_string());
    }

    fn set_table_body(&mut self, body: String) {
        self.table_body = body;
    }

    fn draw_chart(&mut self, chart: ChartSpec) {
        self.chart = Some(chart);
    }

    fn clear_content(&mut self) {
        self.table_body.clear();
        self.chart = None;
    }
}
