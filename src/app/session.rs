//! Per-session document context
//!
//! A [`DashboardSession`] holds at most one uploaded document and everything
//! derived from it. A successful upload replaces the whole document at once,
//! so a series from one file is never shown next to another file's metadata.
//! Every mutation bumps a [`Revision`]; a shell that evaluates edits off the
//! interaction path can compare revisions and discard stale results.

use crate::app::models::{
    AppliedRanges, AxisBounds, AxisCatalog, AxisRangeHint, ColumnId, FileMetadata, PlotSeries,
    RawTable, SummaryStats,
};
use crate::app::services::axis_resolver::resolve_axes_with;
use crate::app::services::metadata_extractor::extract_metadata_with;
use crate::app::services::range_advisor::{advise_ranges_with, apply_bounds};
use crate::app::services::series_builder::build_series;
use crate::app::services::stats_engine::compute_stats;
use crate::app::services::table_parser::TableParser;
use crate::config::Config;
use crate::{Error, ErrorKind, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Monotonic stamp of the session state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Revision(u64);

impl Revision {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Displayable copy of an [`Error`] for the error panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionError {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&Error> for SessionError {
    fn from(error: &Error) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Resolved axis columns currently plotted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSelection {
    pub x: ColumnId,
    /// `None` when the table offers no Y column
    pub y: Option<ColumnId>,
}

/// Chart inputs derived from the current selection and bounds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotView {
    pub series: PlotSeries,
    pub stats: SummaryStats,
    pub hint: AxisRangeHint,
    pub ranges: AppliedRanges,
}

/// State of the chart panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PlotState {
    Ready(PlotView),
    /// No Y column could be resolved; nothing to plot
    NoSeries,
    Failed(SessionError),
}

/// An uploaded file and everything derived from it
#[derive(Debug, Clone)]
pub struct Document {
    filename: String,
    table: RawTable,
    metadata: FileMetadata,
    catalog: AxisCatalog,
    selection: AxisSelection,
    bounds: AxisBounds,
    plot: PlotState,
}

impl Document {
    /// Filename as supplied by the upload, never interpreted
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn table(&self) -> &RawTable {
        &self.table
    }

    pub fn metadata(&self) -> &FileMetadata {
        &self.metadata
    }

    pub fn catalog(&self) -> &AxisCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &AxisSelection {
        &self.selection
    }

    pub fn bounds(&self) -> &AxisBounds {
        &self.bounds
    }

    pub fn plot(&self) -> &PlotState {
        &self.plot
    }
}

/// Serializable snapshot handed to a render collaborator
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView<'a> {
    pub revision: Revision,
    pub filename: &'a str,
    pub record_count: usize,
    pub metadata: &'a FileMetadata,
    pub catalog: &'a AxisCatalog,
    pub selection: &'a AxisSelection,
    pub bounds: &'a AxisBounds,
    pub plot: &'a PlotState,
}

/// Explicit session context replacing process-wide dashboard state
#[derive(Debug, Default)]
pub struct DashboardSession {
    config: Config,
    parser: TableParser,
    document: Option<Document>,
    last_error: Option<SessionError>,
    revision: Revision,
}

impl DashboardSession {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            parser: TableParser::new(),
            document: None,
            last_error: None,
            revision: Revision::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Error from the most recent failed upload, cleared by a successful one
    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// Whether a result computed at `revision` still reflects the session
    pub fn is_current(&self, revision: Revision) -> bool {
        self.revision == revision
    }

    /// Parse an upload and replace the document
    ///
    /// On failure the previous document is discarded and the session shows
    /// an explicit empty state with the error retained for display.
    pub fn load(&mut self, buffer: &[u8], filename: impl Into<String>) -> Result<Revision> {
        let filename = filename.into();
        self.revision = self.revision.next();

        let table = match self.parser.parse(buffer) {
            Ok(table) => table,
            Err(error) => {
                warn!("Failed to parse {}: {}", filename, error);
                self.document = None;
                self.last_error = Some(SessionError::from(&error));
                return Err(error);
            }
        };

        let metadata = extract_metadata_with(&table, &self.config.metadata);
        let catalog = resolve_axes_with(&table, &self.config.axes);
        let selection = AxisSelection {
            x: catalog.default_x.clone(),
            y: catalog.default_y.clone(),
        };
        let bounds = AxisBounds::default();
        let plot = match derive_plot(&table, &selection, &bounds, &self.config) {
            Ok(plot) => plot.map_or(PlotState::NoSeries, PlotState::Ready),
            Err(error) => PlotState::Failed(SessionError::from(&error)),
        };

        info!(
            "Loaded {}: {} rows, {} columns",
            filename,
            table.row_count(),
            table.column_count()
        );

        self.document = Some(Document {
            filename,
            table,
            metadata,
            catalog,
            selection,
            bounds,
            plot,
        });
        self.last_error = None;
        Ok(self.revision)
    }

    /// Change the plotted columns; `None` selects the heuristic default
    ///
    /// An unknown column keeps the document and records the failure as the
    /// plot state.
    pub fn select_axes(&mut self, x: Option<ColumnId>, y: Option<ColumnId>) -> Result<Revision> {
        let Some(document) = self.document.as_mut() else {
            return match x.or(y) {
                Some(column) => Err(Error::unknown_column(column.as_str())),
                None => Ok(self.revision),
            };
        };

        self.revision = self.revision.next();
        document.selection = AxisSelection {
            x: x.unwrap_or_else(|| document.catalog.default_x.clone()),
            y: y.or_else(|| document.catalog.default_y.clone()),
        };
        debug!(
            "Selected axes x={}, y={:?}",
            document.selection.x, document.selection.y
        );

        match derive_plot(
            &document.table,
            &document.selection,
            &document.bounds,
            &self.config,
        ) {
            Ok(plot) => {
                document.plot = plot.map_or(PlotState::NoSeries, PlotState::Ready);
                Ok(self.revision)
            }
            Err(error) => {
                warn!("Axis selection rejected: {}", error);
                document.plot = PlotState::Failed(SessionError::from(&error));
                Err(error)
            }
        }
    }

    /// Replace the user-entered axis bounds
    pub fn set_bounds(&mut self, bounds: AxisBounds) -> Revision {
        let Some(document) = self.document.as_mut() else {
            return self.revision;
        };

        self.revision = self.revision.next();
        document.bounds = bounds;
        if let PlotState::Ready(view) = &mut document.plot {
            view.ranges = apply_bounds(&view.hint, &document.bounds);
        }
        self.revision
    }

    /// Snapshot of the current document for rendering
    pub fn view(&self) -> Option<DashboardView<'_>> {
        self.document.as_ref().map(|document| DashboardView {
            revision: self.revision,
            filename: &document.filename,
            record_count: document.table.row_count(),
            metadata: &document.metadata,
            catalog: &document.catalog,
            selection: &document.selection,
            bounds: &document.bounds,
            plot: &document.plot,
        })
    }
}

/// Derive chart inputs; `Ok(None)` when no Y column is selected
fn derive_plot(
    table: &RawTable,
    selection: &AxisSelection,
    bounds: &AxisBounds,
    config: &Config,
) -> Result<Option<PlotView>> {
    let Some(y) = &selection.y else {
        debug!("No Y column available, skipping series");
        return Ok(None);
    };

    let series = build_series(table, &selection.x, y)?;
    let stats = compute_stats(&series);
    let hint = advise_ranges_with(&series, &config.ranges);
    let ranges = apply_bounds(&hint, bounds);

    Ok(Some(PlotView {
        series,
        stats,
        hint,
        ranges,
    }))
}
