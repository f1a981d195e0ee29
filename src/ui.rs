//! Terminal side of the dashboard: spinners and colored status lines.
//!
//! [`TerminalView`] is the [`DashboardView`] the binary uses. It keeps an
//! [`HtmlPage`] up to date, rewrites the page file after every change and
//! echoes affordance changes to the terminal. [`Activity`] is the spinner
//! shown while the clients initialize.

use std::path::{Path, PathBuf};

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use crate::dashboard::{ChartSpec, DashboardView, HtmlPage};
use crate::session::{AuthOutcome, LoadOutcome, SessionState};

/// Spinner for a single long-running step.
pub struct Activity {
    pb: ProgressBar,
    green: Style,
    red: Style,
}

impl Activity {
    pub fn start(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Self {
            pb,
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
        }
    }

    pub fn succeed(self, message: &str) {
        self.pb.finish_and_clear();
        println!("  {} {message}", self.green.apply_to("✓"));
    }

    pub fn fail(self, message: &str) {
        self.pb.finish_and_clear();
        println!("  {} {message}", self.red.apply_to("✗"));
    }
}

/// Dashboard view backed by an HTML file on disk.
pub struct TerminalView {
    page: HtmlPage,
    out: PathBuf,
    green: Style,
    red: Style,
    yellow: Style,
    dim: Style,
}

impl TerminalView {
    pub fn new(out: PathBuf) -> Self {
        Self {
            page: HtmlPage::new(),
            out,
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
            dim: Style::new().dim(),
        }
    }

    pub fn page(&self) -> &HtmlPage {
        &self.page
    }

    pub fn out(&self) -> &Path {
        &self.out
    }

    /// Lists the actions currently available.
    pub fn print_menu(&self, state: SessionState) {
        let mut actions = Vec::new();
        if self.page.authorize_visible {
            actions.push(format!("[a] {}", self.page.authorize_label));
        }
        if self.page.signout_visible {
            actions.push("[s] Sign out".to_string());
        }
        actions.push("[q] Quit".to_string());
        println!(
            "{} {}",
            self.dim.apply_to(format!("({state})")),
            actions.join("  ")
        );
    }

    pub fn report(&self, outcome: &AuthOutcome) {
        match outcome {
            AuthOutcome::Authorized(LoadOutcome::Rendered {
                rows,
                charted,
                loaded_at,
            }) => {
                let chart = if *charted { "with chart" } else { "no chart" };
                println!(
                    "  {} {rows} rows loaded at {} ({chart}) → {}",
                    self.green.apply_to("✓"),
                    loaded_at.format("%H:%M:%S"),
                    self.out.display()
                );
            }
            AuthOutcome::Authorized(LoadOutcome::Failed(err)) => {
                println!("  {} Load failed: {err}", self.red.apply_to("✗"));
            }
            AuthOutcome::Denied(_) => {}
            AuthOutcome::Stale => {
                println!("  {} Superseded authorization ignored", self.yellow.apply_to("↻"));
            }
        }
    }

    fn flush(&self) {
        if let Err(e) = self.page.write_to(&self.out) {
            warn!(path = %self.out.display(), error = %e, "failed to write dashboard page");
        }
    }
}

impl DashboardView for TerminalView {
    fn enable_authorize(&mut self) {
        self.page.enable_authorize();
        println!("  {} Ready to authorize", self.green.apply_to("●"));
        self.flush();
    }

    fn set_authorize_label(&mut self, label: &str) {
        self.page.set_authorize_label(label);
        self.flush();
    }

    fn set_signout_visible(&mut self, visible: bool) {
        self.page.set_signout_visible(visible);
        self.flush();
    }

    fn show_error(&mut self, message: &str) {
        self.page.show_error(message);
        println!("  {} {message}", self.red.apply_to("✗"));
        self.flush();
    }

    fn set_table_body(&mut self, body: String) {
        self.page.set_table_body(body);
        self.flush();
    }

    fn draw_chart(&mut self, chart: ChartSpec) {
        self.page.draw_chart(chart);
        self.flush();
    }

    fn clear_content(&mut self) {
        self.page.clear_content();
        println!("  {} Content cleared", self.yellow.apply_to("○"));
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_change_rewrites_the_page() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("dashboard.html");
        let mut view = TerminalView::new(out.clone());

        view.enable_authorize();
        let html = std::fs::read_to_string(&out).unwrap();
        assert!(html.contains(r#"<button id="authorize_button" style="display: inline-block">"#));

        view.set_table_body("<tr><td>Ana</td></tr>\n".into());
        let html = std::fs::read_to_string(&out).unwrap();
        assert!(html.contains("<tr><td>Ana</td></tr>"));
        assert_eq!(view.page().table_body, "<tr><td>Ana</td></tr>\n");
    }

    #[test]
    fn unwritable_path_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let mut view = TerminalView::new(dir.path().join("missing").join("dashboard.html"));
        view.show_error("boom");
        assert_eq!(view.page().error_message.as_deref(), Some("boom"));
    }
}
