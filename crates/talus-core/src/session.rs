//! Analysis session management
//!
//! A session is the explicit context object the calling layer (UI, CLI)
//! owns: input configuration, the prepared sample, the latest fit and
//! table results, and the figures rendered from them. It replaces the
//! implicit string-keyed UI state of earlier tooling. The analysis
//! functions themselves stay pure; the session only stores their latest
//! outputs, so sessions never share state and any step can be re-run
//! deterministically.

use crate::error::TalusResult;
use crate::sample::{AdmissionPolicy, PrepReport, Sample};
use crate::table::ComparisonTable;
use crate::units::Density;
use serde::{Deserialize, Serialize};
use talus_fit::{fit_all, Family, FittedModel};
use talus_stats::{StatsError, DISPLAY_LADDER};

/// Unit of the raw input values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputUnit {
    /// Block volumes in m³
    VolumeM3,
    /// Block masses in tonnes; a density is required
    MassT,
    /// Per-block edge lengths in centimeters
    EdgesCm,
}

/// An interactive block-size analysis session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSession {
    /// Unique session identifier
    pub id: String,

    /// Session name
    pub name: String,

    /// Unit of the raw input
    pub input_unit: InputUnit,

    /// Density used for mass input
    pub density: Density,

    /// Admissibility rule for raw values
    pub policy: AdmissionPolicy,

    /// Families selected for fitting
    pub selection: Vec<Family>,

    /// The prepared sample, once ingestion ran.
    ///
    /// Derived state is in-memory only: a saved session keeps its input
    /// configuration and re-runs ingestion and fitting after loading.
    #[serde(skip)]
    pub sample: Option<Sample>,

    /// Admission counts from the last ingestion
    #[serde(skip)]
    pub report: Option<PrepReport>,

    /// Successfully fitted models from the last fit run
    #[serde(skip)]
    pub models: Vec<FittedModel>,

    /// Display messages for families whose fit failed
    #[serde(skip)]
    pub fit_failures: Vec<String>,

    /// The latest comparison table
    #[serde(skip)]
    pub table: Option<ComparisonTable>,

    /// Figures rendered from this session
    #[serde(skip)]
    pub figures: Vec<SessionFigure>,

    /// Session creation timestamp
    pub created_at: String,

    /// Session modification timestamp
    pub modified_at: String,
}

impl AnalysisSession {
    /// Create a new session with the canonical defaults: volume input,
    /// typical rock density, inclusive zero policy, all families selected
    pub fn new(name: impl Into<String>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            input_unit: InputUnit::VolumeM3,
            density: Density::default(),
            policy: AdmissionPolicy::default(),
            selection: Family::ALL.to_vec(),
            sample: None,
            report: None,
            models: Vec::new(),
            fit_failures: Vec::new(),
            table: None,
            figures: Vec::new(),
            created_at: now.clone(),
            modified_at: now,
        }
    }

    /// Ingest raw block volumes (m³)
    pub fn ingest_volumes(&mut self, volumes: &[f64]) -> PrepReport {
        self.input_unit = InputUnit::VolumeM3;
        let prepared = Sample::from_volumes(volumes, self.policy);
        self.store_sample(prepared.sample, prepared.report);
        prepared.report
    }

    /// Ingest block masses (t), converting via the session density
    pub fn ingest_masses(&mut self, masses_t: &[f64]) -> TalusResult<PrepReport> {
        self.input_unit = InputUnit::MassT;
        let prepared = Sample::from_masses(masses_t, self.density.value(), self.policy)?;
        self.store_sample(prepared.sample, prepared.report);
        Ok(prepared.report)
    }

    /// Ingest manually entered per-block edge lengths (cm)
    pub fn ingest_edge_blocks(&mut self, blocks: &[[f64; 3]]) -> PrepReport {
        self.input_unit = InputUnit::EdgesCm;
        let prepared = Sample::from_edges_cm(blocks, self.policy);
        self.store_sample(prepared.sample, prepared.report);
        prepared.report
    }

    fn store_sample(&mut self, sample: Sample, report: PrepReport) {
        self.sample = Some(sample);
        self.report = Some(report);
        // Results derived from the previous sample are stale
        self.models.clear();
        self.fit_failures.clear();
        self.table = None;
        self.touch();
    }

    /// Fit the selected families to the current sample.
    ///
    /// Failures are recorded per family and do not block the others;
    /// the successfully fitted models are returned.
    pub fn run_fit(&mut self) -> TalusResult<&[FittedModel]> {
        let sample = self.require_sample()?;
        let outcome = fit_all(sample.sizes(), &self.selection);
        self.models = outcome.models().to_vec();
        self.fit_failures = outcome.failures().iter().map(|e| e.to_string()).collect();
        self.table = None;
        self.touch();
        Ok(&self.models)
    }

    /// Build (and store) the display-ladder comparison table from the
    /// current sample and fitted models
    pub fn build_table(&mut self) -> TalusResult<&ComparisonTable> {
        let sample = self.require_sample()?;
        let table = ComparisonTable::build(sample, &self.models, &DISPLAY_LADDER)?;
        self.touch();
        Ok(self.table.insert(table))
    }

    /// Register a rendered figure with the session
    pub fn add_figure(&mut self, figure: SessionFigure) {
        self.figures.push(figure);
        self.touch();
    }

    /// Save the session's input configuration as pretty-printed JSON.
    ///
    /// Only identity and configuration are written (unit, density,
    /// policy, family selection). Samples, fitted models, and tables
    /// never leave a session's in-memory state; a loaded session
    /// re-ingests and refits, which reproduces identical results.
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> TalusResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a previously saved session configuration
    pub fn load_from(path: impl AsRef<std::path::Path>) -> TalusResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// The current sample, or `EmptySample` when none was ingested yet
    fn require_sample(&self) -> Result<&Sample, StatsError> {
        self.sample.as_ref().ok_or(StatsError::EmptySample)
    }

    fn touch(&mut self) {
        self.modified_at = chrono::Utc::now().to_rfc3339();
    }
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new("Untitled Analysis")
    }
}

/// A figure rendered from a session's data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFigure {
    /// Unique figure identifier
    pub id: String,

    /// Figure title
    pub title: String,

    /// Output path of the rendered file
    pub path: String,

    /// Creation timestamp
    pub created_at: String,
}

impl SessionFigure {
    /// Record a rendered figure
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            path: path.into(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
