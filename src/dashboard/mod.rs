//! The rendering target: UI affordances, the data table and the chart.
//!
//! [`DashboardView`] is everything the session controller may change on
//! screen. [`HtmlPage`] is the in-memory document behind it.

pub mod chart;
pub mod page;
pub mod table;

pub use chart::ChartSpec;
pub use page::HtmlPage;

/// Label of the authorize control before the first successful authorization.
pub const AUTHORIZE_LABEL: &str = "Authorize";
/// Label of the authorize control once a session exists.
pub const REFRESH_LABEL: &str = "Refresh";

pub trait DashboardView {
    /// Both clients are up: show the authorize control.
    fn enable_authorize(&mut self);
    fn set_authorize_label(&mut self, label: &str);
    fn set_signout_visible(&mut self, visible: bool);
    /// Writes the dedicated error element.
    fn show_error(&mut self, message: &str);
    /// Replaces the table body markup.
    fn set_table_body(&mut self, body: String);
    fn draw_chart(&mut self, chart: ChartSpec);
    /// Clears the table body and the chart.
    fn clear_content(&mut self);
}
