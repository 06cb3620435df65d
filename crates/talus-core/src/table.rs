//! Percentile comparison table
//!
//! One column per data source: the empirical sample plus each
//! successfully fitted family. Empirical values come straight from the
//! sample's order statistics; model values from quantile-function
//! evaluation. Volume columns are the element-wise cube of the
//! linear-size columns, a display transform rather than a separate fit.
//!
//! A family whose fit failed simply has no column; a placeholder value
//! could be mistaken for a real percentile.

use crate::error::TalusResult;
use crate::sample::Sample;
use crate::units;
use serde::{Deserialize, Serialize};
use talus_fit::FittedModel;
use talus_stats::percentiles_of_sorted;

/// Name of the empirical column
pub const EMPIRICAL_SOURCE: &str = "empirical";

/// One data source's percentile values, in linear size and volume units
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableColumn {
    /// Source name: "empirical" or a family name
    pub source: String,
    /// Linear size (m) at each table level
    pub sizes_m: Vec<f64>,
    /// Volume (m³) at each table level: element-wise cube of `sizes_m`
    pub volumes_m3: Vec<f64>,
}

impl TableColumn {
    fn new(source: impl Into<String>, sizes_m: Vec<f64>) -> Self {
        let volumes_m3 = sizes_m
            .iter()
            .copied()
            .map(units::volume_from_linear_size)
            .collect();
        Self {
            source: source.into(),
            sizes_m,
            volumes_m3,
        }
    }
}

/// A side-by-side percentile comparison across sources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonTable {
    /// Percentile levels, one table row each
    pub levels: Vec<f64>,
    /// Columns in display order: empirical first, then fitted families
    pub columns: Vec<TableColumn>,
}

impl ComparisonTable {
    /// Assemble the table for a sample and the successfully fitted models.
    ///
    /// Fails with `EmptySample` when nothing was admitted and with a
    /// level error when a requested level leaves [0, 100]; in both
    /// cases no partial table is produced.
    pub fn build(
        sample: &Sample,
        models: &[FittedModel],
        levels: &[f64],
    ) -> TalusResult<Self> {
        let sorted = sample.require_non_empty()?;
        let mut columns =
            vec![TableColumn::new(EMPIRICAL_SOURCE, percentiles_of_sorted(sorted, levels)?)];

        for model in models {
            let sizes = levels.iter().map(|&level| model.quantile(level / 100.0)).collect();
            columns.push(TableColumn::new(model.family().name(), sizes));
        }

        Ok(Self {
            levels: levels.to_vec(),
            columns,
        })
    }

    /// Whether a level belongs to the emphasized 95th-98th headline range
    pub fn is_headline(level: f64) -> bool {
        (95.0..=98.0).contains(&level)
    }

    /// Look up a column by source name
    pub fn column(&self, source: &str) -> Option<&TableColumn> {
        self.columns.iter().find(|c| c.source == source)
    }

    /// Render the volume-unit table as aligned text.
    ///
    /// Headline rows (95th-98th percentile) are marked, since they drive
    /// the downstream block-size design values.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{:>12}", "percentile"));
        for column in &self.columns {
            out.push_str(&format!("  {:>24}", format!("{} (m³)", column.source)));
        }
        out.push('\n');

        for (row, &level) in self.levels.iter().enumerate() {
            let marker = if Self::is_headline(level) { '*' } else { ' ' };
            out.push_str(&format!("{marker}{level:>11.0}"));
            for column in &self.columns {
                let value = column.volumes_m3[row];
                if value.is_finite() {
                    out.push_str(&format!("  {value:>24.2}"));
                } else {
                    out.push_str(&format!("  {:>24}", "inf"));
                }
            }
            out.push('\n');
        }
        out
    }
}
