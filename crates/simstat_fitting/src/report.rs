//! Plain-text and HTML report channels.
//!
//! Fitter and decomposer write every step twice: once as plain text and
//! once as an HTML fragment. Numbers are rendered with [`format_number`]
//! and [`format_percent`].

/// Accumulated report text on both channels.
///
/// # Examples
///
/// ```rust
/// use simstat_fitting::Report;
///
/// let mut report = Report::new();
/// report.heading("Best fit for");
/// report.line("1. Normal", "<u>Normal</u>");
/// assert_eq!(report.plain(), "Best fit for\n1. Normal\n");
/// assert_eq!(report.html(), "<h3>Best fit for</h3>\n<u>Normal</u><br>\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    plain: String,
    html: String,
}

impl Report {
    /// Empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain-text channel.
    #[inline]
    pub fn plain(&self) -> &str {
        &self.plain
    }

    /// HTML channel.
    #[inline]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.plain.is_empty() && self.html.is_empty()
    }

    /// Discards both channels.
    pub fn clear(&mut self) {
        self.plain.clear();
        self.html.clear();
    }

    /// Section heading.
    pub fn heading(&mut self, text: &str) {
        self.plain.push_str(text);
        self.plain.push('\n');
        self.html.push_str("<h3>");
        self.html.push_str(text);
        self.html.push_str("</h3>\n");
    }

    /// One line, given separately per channel.
    pub fn line(&mut self, plain: &str, html: &str) {
        self.plain.push_str(plain);
        self.plain.push('\n');
        self.html.push_str(html);
        self.html.push_str("<br>\n");
    }

    /// Raw text appended to each channel without terminators.
    pub fn raw(&mut self, plain: &str, html: &str) {
        self.plain.push_str(plain);
        self.html.push_str(html);
    }

    /// Error message, emphasised on the HTML channel.
    pub fn error(&mut self, message: &str) {
        self.plain.push_str(message);
        self.plain.push('\n');
        self.html.push_str("<p><b>");
        self.html.push_str(message);
        self.html.push_str("</b></p>\n");
    }
}

/// `value` with at most `digits` decimals, trailing zeros removed.
///
/// Magnitudes below 1e-15 print as `"0"`, as does anything that rounds to
/// zero at the requested precision.
///
/// # Examples
///
/// ```rust
/// use simstat_fitting::report::format_number;
///
/// assert_eq!(format_number(3.14159, 3), "3.142");
/// assert_eq!(format_number(2.5, 3), "2.5");
/// assert_eq!(format_number(42.0, 3), "42");
/// assert_eq!(format_number(-0.0004, 3), "0");
/// ```
pub fn format_number(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }
    if value.abs() < 1e-15 {
        return "0".to_string();
    }
    let mut text = format!("{:.*}", digits, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

/// `value` as a percentage with one decimal, e.g. `"12.5%"`.
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_number(value * 100.0, 1))
}
