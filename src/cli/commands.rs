//! Command implementations for the PROFFAST viewer CLI
//!
//! The terminal shell is a render collaborator over [`DashboardSession`]:
//! it loads one file, applies the requested selection and bounds, and
//! renders the resulting view as text, JSON or CSV.

use crate::app::models::{AxisCatalog, BoundSource, ColumnId, XAxisKind, XValue};
use crate::app::session::{DashboardSession, DashboardView, PlotState, PlotView};
use crate::cli::args::{Args, ColumnsArgs, Commands, InspectArgs, OutputFormat, SharedArgs};
use crate::config::{Config, DisplayOptions};
use crate::constants::{INDEX_LABEL, UNDEFINED_STAT_DISPLAY};
use crate::Error;
use anyhow::{Context, Result};
use colored::*;
use tracing::{debug, info};

/// Main command runner for the PROFFAST viewer
pub async fn run(args: Args) -> Result<()> {
    let Some(command) = args.command else {
        return Ok(());
    };

    let shared = command.shared();
    setup_logging(shared)?;
    debug!("Command line arguments: {:?}", command);

    let config = Config::load_layered(shared.config_file.as_deref())
        .context("Failed to load configuration")?;
    debug!("Loaded configuration: {:?}", config);

    let report = match &command {
        Commands::Inspect(inspect) => inspect_report(inspect, config).await?,
        Commands::Columns(columns) => columns_report(columns, config).await?,
    };

    println!("{}", report.trim_end());
    Ok(())
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &SharedArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("proffast_viewer={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Read the input file and load it into a fresh session
async fn load_session(args: &SharedArgs, config: Config) -> Result<DashboardSession> {
    let buffer = tokio::fs::read(&args.file)
        .await
        .map_err(|e| Error::io(format!("Failed to read {}", args.file.display()), e))?;
    info!("Read {} bytes from {}", buffer.len(), args.file.display());

    let mut session = DashboardSession::new(config);
    session
        .load(&buffer, args.display_name())
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    Ok(session)
}

/// Build the inspect report for the requested output format
pub async fn inspect_report(args: &InspectArgs, mut config: Config) -> Result<String> {
    args.validate()?;
    if let Some(preview_points) = args.preview_points {
        config.display.preview_points = preview_points;
    }
    let display = config.display;

    let mut session = load_session(&args.shared, config).await?;

    let (x, y) = (args.x_selection(), args.y_selection());
    if x.is_some() || y.is_some() {
        session
            .select_axes(x, y)
            .context("Axis selection rejected")?;
    }
    session.set_bounds(args.bounds());

    let view = session
        .view()
        .context("Session has no document after a successful load")?;

    match args.shared.output_format {
        OutputFormat::Human => Ok(render_human(&view, &display)),
        OutputFormat::Json => render_json(&view),
        OutputFormat::Csv => render_series_csv(&view),
    }
}

/// Build the columns report for the requested output format
pub async fn columns_report(args: &ColumnsArgs, config: Config) -> Result<String> {
    args.shared.validate()?;
    let session = load_session(&args.shared, config).await?;
    let document = session
        .document()
        .context("Session has no document after a successful load")?;
    let catalog = document.catalog();

    match args.shared.output_format {
        OutputFormat::Human => Ok(render_catalog_human(document.filename(), catalog)),
        OutputFormat::Json => serde_json::to_string_pretty(catalog)
            .context("Failed to serialize axis catalog"),
        OutputFormat::Csv => render_catalog_csv(catalog),
    }
}

/// Render a statistic, or the placeholder when it is undefined
pub fn format_stat(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => UNDEFINED_STAT_DISPLAY.to_string(),
    }
}

fn kind_label(kind: XAxisKind) -> &'static str {
    match kind {
        XAxisKind::Index => "row index",
        XAxisKind::Numeric => "numeric",
        XAxisKind::DateTime => "date-time",
        XAxisKind::TimeOfDay => "time of day",
        XAxisKind::Text => "text",
    }
}

fn source_label(source: BoundSource) -> ColoredString {
    match source {
        BoundSource::User => "user".yellow(),
        BoundSource::Suggested => "auto".dimmed(),
    }
}

fn axis_label(column: &ColumnId) -> String {
    match column {
        ColumnId::Index => INDEX_LABEL.to_string(),
        ColumnId::Column(name) => name.clone(),
    }
}

/// Generate human-readable inspect report
pub fn render_human(view: &DashboardView<'_>, display: &DisplayOptions) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\n📄 {} ({} records)\n",
        view.filename.bold(),
        view.record_count
    ));
    out.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    out.push_str("🌍 Site Metadata:\n");
    out.push_str(&format!("   • Ground temperature: {}\n", view.metadata.temperature));
    out.push_str(&format!("   • Latitude: {}\n", view.metadata.latitude));
    out.push_str(&format!("   • Longitude: {}\n", view.metadata.longitude));
    out.push('\n');

    let target_y = view
        .selection
        .y
        .as_ref()
        .map(axis_label)
        .unwrap_or_else(|| "none".to_string());
    out.push_str("📈 Axes:\n");
    out.push_str(&format!("   • X: {}\n", axis_label(&view.selection.x)));
    out.push_str(&format!("   • Target Y: {}\n", target_y.bright_green()));
    out.push('\n');

    match view.plot {
        PlotState::Ready(plot) => render_plot(&mut out, plot, display),
        PlotState::NoSeries => {
            out.push_str(&format!("{}\n", "No Y column available; nothing to plot".yellow()));
        }
        PlotState::Failed(error) => {
            out.push_str(&format!("⚠️  {}\n", error.message.red()));
        }
    }

    out
}

fn render_plot(out: &mut String, plot: &PlotView, display: &DisplayOptions) {
    let precision = display.precision;
    let stats = &plot.stats;
    let series = &plot.series;

    out.push_str(&format!("📊 Statistics ({}):\n", series.y_label));
    out.push_str(&format!("   • Count: {}\n", stats.count));
    out.push_str(&format!("   • Mean: {}\n", format_stat(stats.mean, precision)));
    out.push_str(&format!("   • Std: {}\n", format_stat(stats.std, precision)));
    out.push_str(&format!("   • Min: {}\n", format_stat(stats.min, precision)));
    out.push_str(&format!("   • Max: {}\n", format_stat(stats.max, precision)));
    if series.dropped_rows > 0 {
        out.push_str(&format!(
            "   • Rows without a finite {}: {}\n",
            series.y_label,
            series.dropped_rows.to_string().yellow()
        ));
    }
    out.push('\n');

    let ranges = &plot.ranges;
    out.push_str("📐 Axis Ranges:\n");
    out.push_str(&format!(
        "   • {} ({}): {} .. {}\n",
        series.x_label,
        kind_label(series.x_kind),
        ranges
            .x_min
            .as_ref()
            .map(|b| format!("{} [{}]", b.value, source_label(b.source)))
            .unwrap_or_else(|| UNDEFINED_STAT_DISPLAY.to_string()),
        ranges
            .x_max
            .as_ref()
            .map(|b| format!("{} [{}]", b.value, source_label(b.source)))
            .unwrap_or_else(|| UNDEFINED_STAT_DISPLAY.to_string()),
    ));
    out.push_str(&format!(
        "   • {}: {} .. {}\n",
        series.y_label,
        ranges
            .y_min
            .as_ref()
            .map(|b| format!("{} [{}]", format_stat(Some(b.value), precision), source_label(b.source)))
            .unwrap_or_else(|| UNDEFINED_STAT_DISPLAY.to_string()),
        ranges
            .y_max
            .as_ref()
            .map(|b| format!("{} [{}]", format_stat(Some(b.value), precision), source_label(b.source)))
            .unwrap_or_else(|| UNDEFINED_STAT_DISPLAY.to_string()),
    ));

    if display.preview_points == 0 || series.is_empty() {
        return;
    }

    out.push('\n');
    out.push_str("🔎 Series Preview:\n");
    out.push_str(&format!("   {:<26} | {}\n", series.x_label, series.y_label));
    for point in series.points.iter().take(display.preview_points) {
        out.push_str(&format!(
            "   {:<26} | {}\n",
            point.x.to_string(),
            format_stat(Some(point.y), precision)
        ));
    }
    if series.len() > display.preview_points {
        out.push_str(&format!(
            "   ... and {} more points (use --output-format csv for the full series)\n",
            series.len() - display.preview_points
        ));
    }
}

/// Generate JSON report of the whole view
pub fn render_json(view: &DashboardView<'_>) -> Result<String> {
    serde_json::to_string_pretty(view).context("Failed to serialize dashboard view")
}

/// Export the plotted series as `x,y` CSV
pub fn render_series_csv(view: &DashboardView<'_>) -> Result<String> {
    let plot = match view.plot {
        PlotState::Ready(plot) => plot,
        PlotState::NoSeries => anyhow::bail!("No series to export: the file has no Y column"),
        PlotState::Failed(error) => anyhow::bail!("No series to export: {}", error.message),
    };

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([&plot.series.x_label, &plot.series.y_label])?;
    for point in &plot.series.points {
        let x = match &point.x {
            XValue::Missing => String::new(),
            other => other.to_string(),
        };
        writer.write_record([x, point.y.to_string()])?;
    }

    let bytes = writer.into_inner().context("Failed to flush CSV output")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

/// Generate human-readable column listing
pub fn render_catalog_human(filename: &str, catalog: &AxisCatalog) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n📄 {}\n", filename.bold()));
    out.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    out.push_str(&format!("{}\n", "X-axis options:".bright_green().bold()));
    for (i, column) in catalog.x_options.iter().enumerate() {
        let marker = if *column == catalog.default_x { " (default)" } else { "" };
        out.push_str(&format!(
            "  {}. {}{}\n",
            (i + 1).to_string().bright_yellow().bold(),
            column,
            marker.cyan()
        ));
    }

    out.push('\n');
    out.push_str(&format!("{}\n", "Y-axis options:".bright_green().bold()));
    if catalog.y_options.is_empty() {
        out.push_str(&format!("  {}\n", "none".dimmed()));
    }
    for (i, column) in catalog.y_options.iter().enumerate() {
        let marker = if Some(column) == catalog.default_y.as_ref() {
            " (default)"
        } else {
            ""
        };
        out.push_str(&format!(
            "  {}. {}{}\n",
            (i + 1).to_string().bright_yellow().bold(),
            column,
            marker.cyan()
        ));
    }

    out
}

/// Generate CSV column listing
pub fn render_catalog_csv(catalog: &AxisCatalog) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["axis", "column", "default"])?;

    for column in &catalog.x_options {
        let is_default = *column == catalog.default_x;
        writer.write_record(["x", column.as_str(), &is_default.to_string()])?;
    }
    for column in &catalog.y_options {
        let is_default = Some(column) == catalog.default_y.as_ref();
        writer.write_record(["y", column.as_str(), &is_default.to_string()])?;
    }

    let bytes = writer.into_inner().context("Failed to flush CSV output")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}
