use crate::sheets::{Dataset, Row};

/// Column headings, in row field order.
pub const HEADINGS: [&str; Row::WIDTH] = [
    "Period",
    "Name",
    "Process",
    "Produced",
    "Expected",
    "Yield",
    "Absenteeism",
];

/// One `<tr>` per data row, seven cells each.
pub fn render_rows(dataset: &Dataset) -> String {
    dataset.rows.iter().map(render_row).collect()
}

fn render_row(row: &Row) -> String {
    let cells: String = row
        .cells()
        .iter()
        .map(|cell| format!("<td>{}</td>", escape_html(&cell.to_string())))
        .collect();
    format!("<tr>{cells}</tr>\n")
}

/// The single row that replaces the table body when a load fails.
pub fn render_error(message: &str) -> String {
    format!(
        "<tr><td colspan=\"{}\">Error: {}</td></tr>\n",
        Row::WIDTH,
        escape_html(message)
    )
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
