//! Server-rendered HTML for the dashboard.
//!
//! Plain string templates, one page per handler outcome. All user input
//! lands in the markup HTML-escaped, and the chart is an inline SVG, so
//! the dashboard ships no scripts.

use crate::routes::FetchParams;
use chrono::NaiveDate;
use macrolab_core::catalog;
use macrolab_core::MergedTable;

/// Rows shown in the results preview; the full table goes to the CSV.
const PREVIEW_ROWS: usize = 10;

const CSS: &str = "body{font-family:system-ui,sans-serif;margin:2rem auto;max-width:52rem;\
padding:0 1rem;color:#222}\
h1 a{color:inherit;text-decoration:none}\
fieldset{border:1px solid #ccc;margin-bottom:1rem}\
label.row{display:block}\
.desc{color:#666;font-size:0.9em}\
table{border-collapse:collapse;margin:1rem 0}\
th,td{border:1px solid #ccc;padding:0.25rem 0.6rem;text-align:right}\
th:first-child,td:first-child{text-align:left}\
.error{background:#fdd;border:1px solid #c66;padding:0.8rem}\
.notice{background:#ffd;border:1px solid #cc6;padding:0.8rem}\
.note{color:#666}\
svg{background:#fafafa;border:1px solid #ddd}\
button{padding:0.4rem 1.2rem}";

/// Escape text for HTML body and attribute positions.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Normalize a user-supplied download name into a safe `*.csv` filename.
///
/// Quotes, backslashes, and control characters would corrupt the
/// Content-Disposition header, so they are dropped rather than escaped.
pub fn ensure_csv_name(name: &str) -> String {
    let mut clean: String = name
        .chars()
        .filter(|c| !matches!(c, '"' | '\\') && !c.is_ascii_control())
        .collect();
    clean = clean.trim().to_string();
    if clean.is_empty() {
        return "econ_data.csv".to_string();
    }
    if !clean.ends_with(".csv") {
        clean.push_str(".csv");
    }
    clean
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} · MacroLab</title>\n<style>{CSS}</style></head>\n\
         <body>\n<h1><a href=\"/\">MacroLab</a></h1>\n{body}\n</body></html>\n"
    )
}

/// The landing form: catalog checkboxes, free-text codes, date range,
/// filename, and a key field when no environment key is set.
pub fn index_page(env_key_set: bool, today: NaiveDate) -> String {
    let mut body = String::from("<form action=\"/fetch\" method=\"get\">\n");

    body.push_str("<fieldset><legend>Series</legend>\n");
    for entry in catalog::FRED_SERIES {
        let checked = if entry.preselected { " checked" } else { "" };
        body.push_str(&format!(
            "<label class=\"row\"><input type=\"checkbox\" name=\"series\" \
             value=\"{id}\"{checked}> {id} <span class=\"desc\">{desc}</span></label>\n",
            id = entry.id,
            desc = entry.description,
        ));
    }
    body.push_str(
        "<label>Extra FRED codes, comma separated \
         <input type=\"text\" name=\"extra\" placeholder=\"HOUST, RSAFS\"></label>\n",
    );
    body.push_str("</fieldset>\n");

    body.push_str(&format!(
        "<fieldset><legend>Date range</legend>\n\
         <label>Start <input type=\"date\" name=\"start\" value=\"{}\"></label>\n\
         <label>End <input type=\"date\" name=\"end\" value=\"{}\"></label>\n\
         </fieldset>\n",
        FetchParams::default_start(),
        today,
    ));

    body.push_str("<fieldset><legend>Output</legend>\n");
    body.push_str(
        "<label>Filename <input type=\"text\" name=\"filename\" value=\"econ_data.csv\"></label>\n",
    );
    if env_key_set {
        body.push_str("<p class=\"note\">Using the FRED API key from the environment.</p>\n");
    } else {
        body.push_str("<label>FRED API key <input type=\"password\" name=\"key\"></label>\n");
    }
    body.push_str("</fieldset>\n");

    body.push_str("<button type=\"submit\">Fetch data</button>\n</form>");
    page("Economic series", &body)
}

/// The results page: summary, chart of the first series, preview rows,
/// and a download form that echoes the query.
pub fn results_page(params: &FetchParams, table: &MergedTable) -> String {
    let span = match table.date_span() {
        Some((first, last)) => format!(", {first} to {last}"),
        None => String::new(),
    };
    let mut body = format!(
        "<h2>Results</h2>\n<p>{} series, {} rows{span}</p>\n",
        table.columns.len(),
        table.rows.len(),
    );

    if let Some(first) = table.columns.first() {
        body.push_str(&format!("<h3>{}</h3>\n", escape_html(first)));
        body.push_str(&line_chart_svg(first, &table.column_points(0)));
        body.push('\n');
    }

    body.push_str(&preview_table(table));

    body.push_str("<form action=\"/export.csv\" method=\"get\">\n");
    body.push_str(&hidden_inputs(params));
    body.push_str("<button type=\"submit\">Download CSV</button>\n</form>\n");
    body.push_str("<p><a href=\"/\">New query</a></p>");

    page("Results", &body)
}

pub fn error_page(message: &str) -> String {
    page(
        "Error",
        &format!(
            "<div class=\"error\">{}</div>\n<p><a href=\"/\">Back</a></p>",
            escape_html(message)
        ),
    )
}

pub fn notice_page(message: &str) -> String {
    page(
        "Notice",
        &format!(
            "<div class=\"notice\">{}</div>\n<p><a href=\"/\">Back</a></p>",
            escape_html(message)
        ),
    )
}

fn preview_table(table: &MergedTable) -> String {
    let mut html = String::from("<table><thead><tr><th>date</th>");
    for col in &table.columns {
        html.push_str(&format!("<th>{}</th>", escape_html(col)));
    }
    html.push_str("</tr></thead><tbody>\n");

    for row in table.rows.iter().take(PREVIEW_ROWS) {
        html.push_str(&format!("<tr><td>{}</td>", row.date));
        for value in &row.values {
            match value {
                Some(v) => html.push_str(&format!("<td>{v}</td>")),
                None => html.push_str("<td></td>"),
            }
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody></table>\n");

    if table.rows.len() > PREVIEW_ROWS {
        html.push_str(&format!(
            "<p class=\"note\">Showing the first {PREVIEW_ROWS} of {} rows; \
             the CSV has them all.</p>\n",
            table.rows.len()
        ));
    }
    html
}

fn hidden_inputs(params: &FetchParams) -> String {
    let mut html = String::new();
    for id in &params.series {
        html.push_str(&format!(
            "<input type=\"hidden\" name=\"series\" value=\"{}\">\n",
            escape_html(id)
        ));
    }
    html.push_str(&format!(
        "<input type=\"hidden\" name=\"start\" value=\"{}\">\n",
        params.start
    ));
    html.push_str(&format!(
        "<input type=\"hidden\" name=\"end\" value=\"{}\">\n",
        params.end
    ));
    html.push_str(&format!(
        "<input type=\"hidden\" name=\"filename\" value=\"{}\">\n",
        escape_html(&params.filename)
    ));
    // Only a key the user typed is echoed; an environment key never
    // leaves the server.
    if let Some(key) = &params.key {
        html.push_str(&format!(
            "<input type=\"hidden\" name=\"key\" value=\"{}\">\n",
            escape_html(key)
        ));
    }
    html
}

/// Inline SVG polyline of one series. Dates map to x by calendar day, so
/// irregular series keep their real spacing.
pub fn line_chart_svg(name: &str, points: &[(NaiveDate, f64)]) -> String {
    const W: f64 = 640.0;
    const H: f64 = 240.0;
    const PAD: f64 = 12.0;

    if points.len() < 2 {
        return format!(
            "<p class=\"note\">Not enough {} observations to chart.</p>",
            escape_html(name)
        );
    }

    let first_date = points[0].0;
    let last_date = points[points.len() - 1].0;
    let span_days = (last_date - first_date).num_days().max(1) as f64;

    let min = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    // A flat series still needs a nonzero value span to land on the canvas
    let spread = if max > min { max - min } else { 1.0 };

    let mut coords = String::new();
    for (date, value) in points {
        let x = PAD + (*date - first_date).num_days() as f64 / span_days * (W - 2.0 * PAD);
        let y = H - PAD - (value - min) / spread * (H - 2.0 * PAD);
        coords.push_str(&format!("{x:.1},{y:.1} "));
    }

    format!(
        "<svg viewBox=\"0 0 {W} {H}\" width=\"{W}\" height=\"{H}\" role=\"img\">\n\
         <polyline points=\"{}\" fill=\"none\" stroke=\"#2563eb\" stroke-width=\"1.5\"/>\n\
         <text x=\"{PAD}\" y=\"{text_top}\" font-size=\"11\" fill=\"#666\">{max}</text>\n\
         <text x=\"{PAD}\" y=\"{text_bottom}\" font-size=\"11\" fill=\"#666\">{min}</text>\n\
         <text x=\"{right}\" y=\"{text_bottom}\" font-size=\"11\" fill=\"#666\" \
         text-anchor=\"end\">{first_date} to {last_date}</text>\n\
         </svg>",
        coords.trim_end(),
        text_top = PAD + 4.0,
        text_bottom = H - 2.0,
        right = W - PAD,
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
