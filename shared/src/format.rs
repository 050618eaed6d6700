//! Display formatting: currency, pt-BR dates, chart colors.

use chrono::{Datelike, NaiveDate};
use std::fmt;

const MONTHS_LONG: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho",
    "julho", "agosto", "setembro", "outubro", "novembro", "dezembro",
];

const MONTHS_SHORT: [&str; 12] = [
    "jan.", "fev.", "mar.", "abr.", "mai.", "jun.",
    "jul.", "ago.", "set.", "out.", "nov.", "dez.",
];

/// Maximum characters kept on a category axis label
pub const AXIS_LABEL_MAX_CHARS: usize = 15;

/// Format an amount as "R$ 1234.56"
pub fn format_currency(value: f64) -> String {
    format!("R$ {:.2}", value)
}

/// Parse a "YYYY-MM-DD" date, tolerating a trailing time part
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.trim().split('T').next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Format an ISO date as "dd/mm/yyyy"; empty input renders as "-"
pub fn format_date(value: &str) -> String {
    if value.trim().is_empty() {
        return "-".to_string();
    }
    match parse_iso_date(value) {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => value.to_string(),
    }
}

/// Optional date variant used by table cells
pub fn format_optional_date(value: Option<&str>) -> String {
    value.map(format_date).unwrap_or_else(|| "-".to_string())
}

/// Format a "YYYY-MM" key as "jan. de 2024"; unparseable keys pass through
pub fn format_month_year(key: &str) -> String {
    let mut parts = key.trim().splitn(2, '-');
    let year = parts.next().and_then(|y| y.parse::<i32>().ok());
    let month = parts.next().and_then(|m| m.parse::<usize>().ok());
    match (year, month) {
        (Some(year), Some(month)) if (1..=12).contains(&month) => {
            format!("{} de {}", MONTHS_SHORT[month - 1], year)
        }
        _ => key.to_string(),
    }
}

/// Format a date's month as "outubro de 2026"
pub fn format_month_long(date: NaiveDate) -> String {
    format!("{} de {}", MONTHS_LONG[date.month0() as usize], date.year())
}

/// Cut labels longer than [`AXIS_LABEL_MAX_CHARS`] and append "..."
pub fn truncate_label(label: &str) -> String {
    if label.chars().count() > AXIS_LABEL_MAX_CHARS {
        let head: String = label.chars().take(AXIS_LABEL_MAX_CHARS).collect();
        format!("{}...", head)
    } else {
        label.to_string()
    }
}

/// Strip display decoration ("R$", "dia(s)", spaces, pt-BR separators) from a
/// calculated field and return the bare number, if there is one.
pub fn strip_numeric_display(display: &str) -> Option<String> {
    let mut cleaned: String = display
        .replace("R$", "")
        .replace("dia(s)", "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.contains(',') {
        cleaned = cleaned.replace('.', "").replace(',', ".");
    }
    cleaned.parse::<f64>().ok().map(|_| cleaned)
}

/// An RGBA color usable by both CSS and the canvas renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Same color at full opacity, used for borders
    pub fn opaque(self) -> Self {
        self.with_alpha(1.0)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// Fixed chart palette
pub const PALETTE: [Rgba; 10] = [
    Rgba::new(255, 99, 132, 0.6),
    Rgba::new(54, 162, 235, 0.6),
    Rgba::new(255, 206, 86, 0.6),
    Rgba::new(75, 192, 192, 0.6),
    Rgba::new(153, 102, 255, 0.6),
    Rgba::new(255, 159, 64, 0.6),
    Rgba::new(199, 199, 199, 0.6),
    Rgba::new(83, 102, 255, 0.6),
    Rgba::new(40, 159, 64, 0.6),
    Rgba::new(210, 105, 30, 0.6),
];

/// `count` colors drawn cyclically from [`PALETTE`]
pub fn palette_colors(count: usize) -> Vec<Rgba> {
    (0..count).map(|i| PALETTE[i % PALETTE.len()]).collect()
}
