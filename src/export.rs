//! Chart export: PNG raster, CSV, and JSON
//!
//! CSV carries a `Label,<series label>...` header followed by one row per
//! label with the per-series values. JSON is the chart's own
//! `{labels, datasets:[{label, data}]}` shape. Both round-trip through the
//! matching `from_*` parsers. PNG rendering goes through plotters with the
//! shared series palette.

use crate::chart::{series_color, Chart, ChartKind};
use crate::dataset::{ChartData, Series};
use plotters::element::Pie;
use plotters::prelude::*;
use std::path::Path;

/// Error type for export and re-import operations
#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    /// Export requested while no chart is rendered
    NoChart,
    /// Output extension is not one of png/csv/json
    UnknownFormat(String),
    /// Raster backend failure
    Render(String),
    /// CSV/JSON re-import failure
    Parse(String),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "IO error: {}", e),
            ExportError::NoChart => write!(f, "no chart to export"),
            ExportError::UnknownFormat(ext) => {
                write!(f, "unsupported export format '{}' (expected png, csv, or json)", ext)
            }
            ExportError::Render(msg) => write!(f, "chart rendering failed: {}", msg),
            ExportError::Parse(msg) => write!(f, "could not parse chart data: {}", msg),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;

// =============================================================================
// Formats
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Csv,
    Json,
}

impl ExportFormat {
    /// Infer the format from an output path's extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "png" => Ok(ExportFormat::Png),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Write `chart` to `path` in the format its extension names
pub fn export_chart(chart: &Chart, path: &Path) -> Result<ExportFormat> {
    let format = ExportFormat::from_path(path)?;
    match format {
        ExportFormat::Png => write_png(chart, path)?,
        ExportFormat::Csv => std::fs::write(path, to_csv(&chart.data))?,
        ExportFormat::Json => std::fs::write(path, to_json(&chart.data))?,
    }
    Ok(format)
}

/// Timestamped default filename for the export dialog
pub fn default_export_name(chart: &Chart, format: ExportFormat) -> String {
    let slug: String = chart
        .title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    format!("{}-{}.{}", slug, stamp, format.extension())
}

// =============================================================================
// CSV
// =============================================================================

/// Serialize chart data as CSV: `Label,<series>...` then one row per label
pub fn to_csv(data: &ChartData) -> String {
    let mut out = String::from("Label");
    for series in &data.datasets {
        out.push(',');
        out.push_str(&escape_csv(&series.label));
    }
    out.push('\n');

    for (i, label) in data.labels.iter().enumerate() {
        out.push_str(&escape_csv(label));
        for series in &data.datasets {
            out.push(',');
            out.push_str(&format_number(series.data.get(i).copied().unwrap_or(0.0)));
        }
        out.push('\n');
    }
    out
}

/// Re-import CSV produced by [`to_csv`]
pub fn from_csv(text: &str) -> Result<ChartData> {
    let mut records = parse_csv_records(text)?;
    if records.is_empty() {
        return Err(ExportError::Parse("empty CSV".to_string()));
    }
    let header = records.remove(0);
    if header.first().map(String::as_str) != Some("Label") {
        return Err(ExportError::Parse(
            "first header column must be 'Label'".to_string(),
        ));
    }
    let series_labels = &header[1..];

    let mut labels = Vec::with_capacity(records.len());
    let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(records.len()); series_labels.len()];
    for (row_idx, record) in records.iter().enumerate() {
        if record.len() != header.len() {
            return Err(ExportError::Parse(format!(
                "row {} has {} fields, expected {}",
                row_idx + 2,
                record.len(),
                header.len()
            )));
        }
        labels.push(record[0].clone());
        for (col, value) in record[1..].iter().enumerate() {
            let parsed: f64 = value.trim().parse().map_err(|_| {
                ExportError::Parse(format!("row {}: '{}' is not a number", row_idx + 2, value))
            })?;
            columns[col].push(parsed);
        }
    }

    Ok(ChartData {
        labels,
        datasets: series_labels
            .iter()
            .zip(columns)
            .map(|(label, data)| Series {
                label: label.clone(),
                data,
            })
            .collect(),
    })
}

/// Quote a field when it contains the delimiter, a quote, or a newline
fn escape_csv(field: &str) -> String {
    if field.contains(|c| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Vote counts are integers; keep them that way in the CSV
fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

/// Minimal RFC-4180 record parser (quotes, doubled quotes, embedded newlines)
fn parse_csv_records(text: &str) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => record.push(std::mem::take(&mut field)),
                '\r' => {}
                '\n' => {
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                }
                _ => field.push(c),
            }
        }
    }
    if in_quotes {
        return Err(ExportError::Parse("unterminated quoted field".to_string()));
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    Ok(records)
}

// =============================================================================
// JSON
// =============================================================================

/// Serialize chart data as `{labels, datasets:[{label, data}]}`
pub fn to_json(data: &ChartData) -> String {
    // ChartData's serde derives emit exactly the export shape
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

/// Re-import JSON produced by [`to_json`]
pub fn from_json(text: &str) -> Result<ChartData> {
    serde_json::from_str(text).map_err(|e| ExportError::Parse(e.to_string()))
}

// =============================================================================
// PNG
// =============================================================================

/// Render `chart` to a PNG at `path`
pub fn write_png(chart: &Chart, path: &Path) -> Result<()> {
    let (width, height): (u32, u32) = match chart.kind {
        ChartKind::Pie => (700, 500),
        _ => (900, 500),
    };
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    match chart.kind {
        ChartKind::Bar | ChartKind::GroupedBar => draw_bars(&root, chart)?,
        ChartKind::Pie => draw_pie(&root, chart, (width, height))?,
    }

    root.present().map_err(render_err)?;
    Ok(())
}

fn draw_bars<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    chart: &Chart,
) -> Result<()> {
    let data = &chart.data;
    let n = data.labels.len() as f64;
    let y_max = (data.max_value() * 1.1).max(1.0);

    let mut builder = ChartBuilder::on(root)
        .caption(&chart.title, ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(56)
        .build_cartesian_2d(0f64..n, 0f64..y_max)
        .map_err(render_err)?;

    let labels = data.labels.clone();
    builder
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(data.labels.len())
        .x_label_formatter(&move |x| {
            labels
                .get(x.floor() as usize)
                .cloned()
                .unwrap_or_default()
        })
        .y_desc("Votes")
        .draw()
        .map_err(render_err)?;

    let series_count = data.datasets.len().max(1);
    let slot = 0.8 / series_count as f64;
    for (s_idx, series) in data.datasets.iter().enumerate() {
        let (r, g, b) = series_color(s_idx);
        let color = RGBColor(r, g, b);
        builder
            .draw_series(series.data.iter().enumerate().map(|(i, &v)| {
                let x0 = i as f64 + 0.1 + s_idx as f64 * slot;
                let x1 = x0 + slot * 0.9;
                Rectangle::new([(x0, 0.0), (x1, v)], color.filled())
            }))
            .map_err(render_err)?
            .label(series.label.clone())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    // The single-series bar chart hides its legend; comparison shows one
    if chart.kind == ChartKind::GroupedBar {
        builder
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()
            .map_err(render_err)?;
    }
    Ok(())
}

fn draw_pie<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    chart: &Chart,
    (width, height): (u32, u32),
) -> Result<()> {
    let data = &chart.data;
    let sizes: Vec<f64> = data
        .datasets
        .first()
        .map(|s| s.data.clone())
        .unwrap_or_default();
    if sizes.iter().sum::<f64>() <= 0.0 {
        return Err(ExportError::Render("no votes to draw".to_string()));
    }

    let root = root
        .titled(&chart.title, ("sans-serif", 24))
        .map_err(render_err)?;

    let colors: Vec<RGBColor> = (0..data.labels.len())
        .map(|i| {
            let (r, g, b) = series_color(i);
            RGBColor(r, g, b)
        })
        .collect();
    let labels = data.labels.clone();
    let center = ((width / 2) as i32, (height / 2) as i32);
    let radius = f64::from(width.min(height)) * 0.32;

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.label_style(("sans-serif", 16).into_font().color(&BLACK));
    root.draw(&pie).map_err(render_err)?;
    Ok(())
}

fn render_err<E: std::fmt::Display>(e: E) -> ExportError {
    ExportError::Render(e.to_string())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{merge_comparison, ChartData, ChartDataset};

    fn sample_data() -> ChartData {
        merge_comparison(&[
            (
                "Horror".to_string(),
                ChartDataset::new(vec!["Alien".into(), "The Thing".into()], vec![5.0, 3.0])
                    .unwrap(),
            ),
            (
                "Drama".to_string(),
                ChartDataset::new(vec!["Heat".into()], vec![7.0]).unwrap(),
            ),
        ])
    }

    // --- Format Tests ---

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("out.png")).unwrap(), ExportFormat::Png);
        assert_eq!(ExportFormat::from_path(Path::new("out.CSV")).unwrap(), ExportFormat::Csv);
        assert_eq!(
            ExportFormat::from_path(Path::new("dir/out.json")).unwrap(),
            ExportFormat::Json
        );
        assert!(ExportFormat::from_path(Path::new("out.svg")).is_err());
        assert!(ExportFormat::from_path(Path::new("noextension")).is_err());
    }

    #[test]
    fn test_default_export_name_slug() {
        let chart = Chart::new(ChartKind::Pie, "Genre Distribution by Votes", sample_data());
        let name = default_export_name(&chart, ExportFormat::Csv);
        assert!(name.starts_with("genre-distribution-by-votes-"));
        assert!(name.ends_with(".csv"));
    }

    // --- CSV Tests ---

    #[test]
    fn test_csv_header_and_rows() {
        let csv = to_csv(&sample_data());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Label,Horror,Drama");
        // Union order: Alien, Heat, The Thing
        assert_eq!(lines[1], "Alien,5,0");
        assert_eq!(lines[2], "Heat,0,7");
        assert_eq!(lines[3], "The Thing,3,0");
    }

    #[test]
    fn test_csv_round_trip() {
        let data = sample_data();
        let parsed = from_csv(&to_csv(&data)).unwrap();
        assert_eq!(parsed, data);
    }

    #[test]
    fn test_csv_round_trip_with_tricky_labels() {
        let ds = ChartDataset::new(
            vec!["Crouching Tiger, Hidden Dragon".into(), "The \"Movie\"".into()],
            vec![4.0, 2.5],
        )
        .unwrap();
        let data = ChartData::single("Number of Votes", ds);
        let csv = to_csv(&data);
        assert!(csv.contains("\"Crouching Tiger, Hidden Dragon\""));
        assert_eq!(from_csv(&csv).unwrap(), data);
    }

    #[test]
    fn test_csv_rejects_garbage() {
        assert!(from_csv("").is_err());
        assert!(from_csv("Title,Votes\nHeat,3\n").is_err()); // wrong header
        assert!(from_csv("Label,Votes\nHeat,many\n").is_err()); // not a number
        assert!(from_csv("Label,Votes\nHeat\n").is_err()); // short row
    }

    // --- JSON Tests ---

    #[test]
    fn test_json_shape() {
        let json = to_json(&sample_data());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("labels").is_some());
        assert_eq!(value["datasets"][0]["label"], "Horror");
        assert!(value["datasets"][0]["data"].is_array());
    }

    #[test]
    fn test_json_round_trip() {
        let data = sample_data();
        let parsed = from_json(&to_json(&data)).unwrap();
        assert_eq!(parsed.labels, data.labels);
        for (a, b) in parsed.datasets.iter().zip(&data.datasets) {
            assert_eq!(a.label, b.label);
            assert_eq!(a.data, b.data);
        }
    }

    // --- PNG Tests ---

    #[test]
    fn test_png_bar_smoke() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bar.png");
        let ds = ChartDataset::new(vec!["Heat".into(), "Alien".into()], vec![12.0, 7.0]).unwrap();
        let chart = Chart::new(ChartKind::Bar, "Top Films", ChartData::single("Votes", ds));

        write_png(&chart, &path).unwrap();
        let meta = std::fs::metadata(&path).unwrap();
        assert!(meta.len() > 0);
    }

    #[test]
    fn test_png_pie_smoke() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pie.png");
        let ds = ChartDataset::new(vec!["Horror".into(), "Drama".into()], vec![9.0, 4.0]).unwrap();
        let chart =
            Chart::new(ChartKind::Pie, "Genre Distribution", ChartData::single("Votes", ds));

        write_png(&chart, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_png_pie_rejects_zero_total() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zero.png");
        let ds = ChartDataset::new(vec!["Horror".into()], vec![0.0]).unwrap();
        let chart = Chart::new(ChartKind::Pie, "Empty", ChartData::single("Votes", ds));
        assert!(matches!(write_png(&chart, &path), Err(ExportError::Render(_))));
    }

    #[test]
    fn test_export_chart_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let chart = Chart::new(ChartKind::GroupedBar, "Comparison", sample_data());

        let csv_path = dir.path().join("out.csv");
        assert_eq!(export_chart(&chart, &csv_path).unwrap(), ExportFormat::Csv);
        assert_eq!(
            from_csv(&std::fs::read_to_string(&csv_path).unwrap()).unwrap(),
            chart.data
        );

        let json_path = dir.path().join("out.json");
        assert_eq!(export_chart(&chart, &json_path).unwrap(), ExportFormat::Json);
    }
}
