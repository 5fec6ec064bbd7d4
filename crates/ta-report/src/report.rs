//! Indicator report rendering.

use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};
use ta_core::{Series, SeriesError, TaError};
use tracing::info;

const DATE_WIDTH: usize = 12;
const VALUE_WIDTH: usize = 16;

/// Output format of a rendered report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Named columns sharing one index.
#[derive(Debug, Clone)]
pub struct Section {
    name: String,
    columns: Vec<(String, Series)>,
}

impl Section {
    /// Build a section. Every column must share the first column's index.
    pub fn new(
        name: impl Into<String>,
        columns: Vec<(String, Series)>,
    ) -> Result<Self, SeriesError> {
        if let Some((_, first)) = columns.first() {
            for (_, column) in &columns[1..] {
                if column.len() != first.len() {
                    return Err(SeriesError::LengthMismatch {
                        index: first.len(),
                        values: column.len(),
                    });
                }
                if column.index() != first.index() {
                    return Err(SeriesError::IndexMismatch);
                }
            }
        }

        Ok(Self {
            name: name.into(),
            columns,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    fn index(&self) -> &[i64] {
        self.columns
            .first()
            .map(|(_, series)| series.index())
            .unwrap_or(&[])
    }

    /// Positions of the trailing `tail` rows.
    fn tail_range(&self, tail: usize) -> std::ops::Range<usize> {
        let len = self.index().len();
        len.saturating_sub(tail)..len
    }

    fn row(&self, i: usize) -> Vec<Option<f64>> {
        self.columns.iter().map(|(_, series)| series.get(i)).collect()
    }
}

#[derive(Serialize)]
struct ReportJson<'a> {
    title: &'a str,
    sections: Vec<SectionJson<'a>>,
}

#[derive(Serialize)]
struct SectionJson<'a> {
    name: &'a str,
    columns: Vec<&'a str>,
    rows: Vec<RowJson>,
}

#[derive(Serialize)]
struct RowJson {
    timestamp: i64,
    date: String,
    values: Vec<Option<JsonCell>>,
}

/// A defined JSON value. JSON has no infinities, so those are spelled out.
#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
enum JsonCell {
    Number(f64),
    Text(&'static str),
}

impl From<f64> for JsonCell {
    fn from(value: f64) -> Self {
        if value == f64::INFINITY {
            JsonCell::Text("inf")
        } else if value == f64::NEG_INFINITY {
            JsonCell::Text("-inf")
        } else {
            JsonCell::Number(value)
        }
    }
}

/// A titled set of sections rendered over their trailing rows.
#[derive(Debug, Clone)]
pub struct Report {
    title: String,
    sections: Vec<Section>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Append a section.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Append a section built from named columns.
    pub fn section(
        self,
        name: &str,
        columns: Vec<(&str, Series)>,
    ) -> Result<Self, SeriesError> {
        let columns = columns
            .into_iter()
            .map(|(column, series)| (column.to_string(), series))
            .collect();
        Ok(self.with_section(Section::new(name, columns)?))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Plain text table per section: a date column then one column per
    /// series, values to 6 decimals and `NaN` where undefined.
    pub fn render_text(&self, tail: usize) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);

        for section in &self.sections {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", section.name);

            let mut header = format!("{:<DATE_WIDTH$}", "date");
            for name in section.column_names() {
                let _ = write!(header, "{:>VALUE_WIDTH$}", name);
            }
            let _ = writeln!(out, "{}", header.trim_end());

            for i in section.tail_range(tail) {
                let _ = write!(out, "{:<DATE_WIDTH$}", format_date(section.index()[i]));
                for value in section.row(i) {
                    let _ = write!(out, "{:>VALUE_WIDTH$}", format_value(value));
                }
                let _ = writeln!(out);
            }
        }

        out
    }

    /// JSON document with the trailing `tail` rows of every section.
    /// Undefined values are `null`; infinities are the strings `"inf"` and
    /// `"-inf"`.
    pub fn to_json(&self, tail: usize) -> Result<String, TaError> {
        let doc = ReportJson {
            title: &self.title,
            sections: self
                .sections
                .iter()
                .map(|section| SectionJson {
                    name: section.name(),
                    columns: section.column_names(),
                    rows: section
                        .tail_range(tail)
                        .map(|i| RowJson {
                            timestamp: section.index()[i],
                            date: format_date(section.index()[i]),
                            values: section
                                .row(i)
                                .into_iter()
                                .map(|v| v.map(JsonCell::from))
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        };

        serde_json::to_string_pretty(&doc).map_err(|e| TaError::Serialization(e.to_string()))
    }

    pub fn render(&self, format: OutputFormat, tail: usize) -> Result<String, TaError> {
        match format {
            OutputFormat::Text => Ok(self.render_text(tail)),
            OutputFormat::Json => self.to_json(tail),
        }
    }

    /// Render and write the report to `path`.
    pub fn save(&self, path: &Path, format: OutputFormat, tail: usize) -> Result<(), TaError> {
        let rendered = self.render(format, tail)?;
        std::fs::write(path, rendered)?;
        info!(path = %path.display(), ?format, "Saved report");
        Ok(())
    }
}

/// `YYYY-MM-DD` of a millisecond timestamp, or the raw number when it is out
/// of chrono's range.
fn format_date(timestamp_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.6}", v),
        None => "NaN".to_string(),
    }
}
