//! Chart rendering to PNG files
//!
//! Three chart layouts are provided:
//!
//! - [`render_sample_histograms`]: side-by-side histograms of the raw
//!   volumes and the derived linear sizes
//! - [`render_distribution_panels`]: empirical density, ECDF, and
//!   log-scale ECDF of the linear sizes
//! - [`render_fit_overlays`]: fitted model curves drawn over the
//!   empirical density and CDF
//!
//! All layouts validate their input before touching the backend, so an
//! empty sample never leaves a truncated file on disk.

use crate::error::{PlotError, PlotResult};
use crate::figure::FigureHandle;
use crate::style::{family_color, PLOT_HEIGHT, PLOT_WIDTH, SIZE_FILL, VOLUME_FILL};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use talus_core::Sample;
use talus_fit::FittedModel;
use talus_stats::{percentiles_of_sorted, Ecdf, Histogram, DEFAULT_BINS, FULL_LADDER};

type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Render side-by-side histograms of the raw volumes (m³) and the
/// derived linear sizes (m).
pub fn render_sample_histograms(sample: &Sample, output_path: &Path) -> PlotResult<FigureHandle> {
    if sample.is_empty() {
        return Err(PlotError::InvalidData("sample is empty".to_string()));
    }

    let volumes = sample.volumes();
    let volume_hist = Histogram::from_sorted(&volumes, DEFAULT_BINS);
    let size_hist = Histogram::from_sorted(sample.sizes(), DEFAULT_BINS);

    let root = BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let panels = root.split_evenly((1, 2));
    draw_count_panel(
        &panels[0],
        &volume_hist,
        "Block volumes",
        "Volume (m³)",
        VOLUME_FILL,
    )?;
    draw_count_panel(
        &panels[1],
        &size_hist,
        "Block edge lengths",
        "Edge length (m)",
        SIZE_FILL,
    )?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    tracing::debug!(path = %output_path.display(), "rendered sample histograms");
    Ok(FigureHandle::new(
        output_path,
        "Block volumes and edge lengths",
        vec!["volumes".to_string(), "edge lengths".to_string()],
    ))
}

/// Render the empirical distribution of the linear sizes as three
/// panels: density histogram, ECDF, and ECDF with a logarithmic size
/// axis. The log panel is left empty when the sample has no positive
/// values.
pub fn render_distribution_panels(sample: &Sample, output_path: &Path) -> PlotResult<FigureHandle> {
    if sample.is_empty() {
        return Err(PlotError::InvalidData("sample is empty".to_string()));
    }

    let sizes = sample.sizes();
    let histogram = Histogram::from_sorted(sizes, DEFAULT_BINS);
    let ecdf = Ecdf::from_sorted(sizes);

    let root = BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let panels = root.split_evenly((1, 3));
    draw_density_panel(&panels[0], &histogram, &[], 0)?;
    draw_cdf_panel(&panels[1], &ecdf, &[], 0)?;
    draw_log_cdf_panel(&panels[2], &ecdf)?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    tracing::debug!(path = %output_path.display(), "rendered distribution panels");
    Ok(FigureHandle::new(
        output_path,
        "Empirical size distribution",
        vec![
            "density".to_string(),
            "cdf".to_string(),
            "log cdf".to_string(),
        ],
    ))
}

/// Render fitted model curves over the empirical density and CDF of
/// the linear sizes. Each family keeps its fixed line color and is
/// named in the legend.
pub fn render_fit_overlays(
    sample: &Sample,
    models: &[FittedModel],
    output_path: &Path,
) -> PlotResult<FigureHandle> {
    if sample.is_empty() {
        return Err(PlotError::InvalidData("sample is empty".to_string()));
    }
    if models.is_empty() {
        return Err(PlotError::InvalidData(
            "no fitted models to overlay".to_string(),
        ));
    }

    let sizes = sample.sizes();
    let histogram = Histogram::from_sorted(sizes, DEFAULT_BINS);
    let ecdf = Ecdf::from_sorted(sizes);
    let curve_points = curve_resolution(sample);

    let root = BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let panels = root.split_evenly((1, 2));
    draw_density_panel(&panels[0], &histogram, models, curve_points)?;
    draw_cdf_panel(&panels[1], &ecdf, models, curve_points)?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    tracing::debug!(
        path = %output_path.display(),
        models = models.len(),
        "rendered fit overlays"
    );
    let mut series = vec!["empirical".to_string()];
    series.extend(models.iter().map(|m| m.family().to_string()));
    Ok(FigureHandle::new(output_path, "Fitted distributions", series))
}

/// Histogram panel with raw counts on the y-axis
fn draw_count_panel(
    area: &Panel,
    histogram: &Histogram,
    title: &str,
    x_label: &str,
    fill: RGBColor,
) -> PlotResult<()> {
    let (x_min, x_max) = bin_range(histogram);
    let y_max = (histogram.max_count() as f64 * 1.1).max(1.0);

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 30))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc("Count")
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(histogram.bins.iter().map(|bin| {
            Rectangle::new(
                [(bin.start, 0.0), (bin.end, bin.count as f64)],
                fill.filled(),
            )
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

/// Density histogram with optional fitted probability-density curves
fn draw_density_panel(
    area: &Panel,
    histogram: &Histogram,
    models: &[FittedModel],
    curve_points: usize,
) -> PlotResult<()> {
    let (x_min, x_max) = bin_range(histogram);
    let hist_max = histogram
        .density_series()
        .into_iter()
        .map(|(_, d)| d)
        .fold(0.0_f64, f64::max);
    let y_max = (hist_max * 1.3).max(1e-6);

    let mut chart = ChartBuilder::on(area)
        .caption("Density", ("sans-serif", 30))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Edge length (m)")
        .y_desc("Probability density")
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let n = histogram.total as f64;
    chart
        .draw_series(histogram.bins.iter().map(|bin| {
            let density = bin.count as f64 / (n * bin.width());
            Rectangle::new(
                [(bin.start, 0.0), (bin.end, density)],
                SIZE_FILL.mix(0.6).filled(),
            )
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    for model in models {
        let color = family_color(model.family());
        let curve = clip_curve(model.density_curve(curve_points), x_min, x_max);
        chart
            .draw_series(LineSeries::new(curve, color.stroke_width(2)))
            .map_err(|e| PlotError::Drawing(e.to_string()))?
            .label(model.family().to_string())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    if !models.is_empty() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    Ok(())
}

/// ECDF step plot with percentile markers and optional fitted CDF curves
fn draw_cdf_panel(
    area: &Panel,
    ecdf: &Ecdf,
    models: &[FittedModel],
    curve_points: usize,
) -> PlotResult<()> {
    let points = ecdf.plot_points();
    let (x_min, x_max) = series_range(&points)?;

    let mut chart = ChartBuilder::on(area)
        .caption("Cumulative distribution", ("sans-serif", 30))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..1.05)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Edge length (m)")
        .y_desc("Fraction of blocks")
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(points, BLACK.stroke_width(2)))
        .map_err(|e| PlotError::Drawing(e.to_string()))?
        .label("empirical")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK));

    let markers = ladder_markers(ecdf.values())?;
    chart
        .draw_series(
            markers
                .into_iter()
                .map(|(x, y)| Circle::new((x, y), 3, BLACK.filled())),
        )
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    for model in models {
        let color = family_color(model.family());
        let curve = clip_curve(model.cdf_curve(curve_points), x_min, x_max);
        chart
            .draw_series(LineSeries::new(curve, color.stroke_width(2)))
            .map_err(|e| PlotError::Drawing(e.to_string()))?
            .label(model.family().to_string())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

/// ECDF step plot with a logarithmic size axis. Zero-size blocks cannot
/// appear on a log axis, so the plot starts at the smallest positive
/// value; a sample with no positive values leaves the panel empty.
fn draw_log_cdf_panel(area: &Panel, ecdf: &Ecdf) -> PlotResult<()> {
    let points: Vec<(f64, f64)> = ecdf
        .plot_points()
        .into_iter()
        .filter(|&(x, _)| x > 0.0)
        .collect();
    if points.len() < 2 {
        return Ok(());
    }

    let (x_min, x_max) = series_range(&points)?;
    let x_max = if x_max > x_min { x_max } else { x_min * 10.0 };

    let mut chart = ChartBuilder::on(area)
        .caption("Cumulative distribution (log)", ("sans-serif", 30))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((x_min..x_max).log_scale(), 0.0..1.05)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Edge length (m)")
        .y_desc("Fraction of blocks")
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(points, BLACK.stroke_width(2)))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

/// Number of evaluation points for fitted curves, one per sample value
fn curve_resolution(sample: &Sample) -> usize {
    sample.len()
}

/// Empirical percentiles over the fine ladder, as (value, fraction)
/// points on the CDF
fn ladder_markers(sorted: &[f64]) -> PlotResult<Vec<(f64, f64)>> {
    let values = percentiles_of_sorted(sorted, &FULL_LADDER)
        .map_err(|e| PlotError::InvalidData(e.to_string()))?;
    Ok(values
        .into_iter()
        .zip(FULL_LADDER.iter().copied())
        .map(|(value, level)| (value, level / 100.0))
        .collect())
}

/// Full x-extent of a histogram's bins
fn bin_range(histogram: &Histogram) -> (f64, f64) {
    let x_min = histogram.bins.first().map_or(0.0, |b| b.start);
    let x_max = histogram.bins.last().map_or(1.0, |b| b.end);
    (x_min, x_max)
}

/// Padded x-extent of a point series
fn series_range(points: &[(f64, f64)]) -> PlotResult<(f64, f64)> {
    let first = points
        .first()
        .ok_or_else(|| PlotError::InvalidData("series is empty".to_string()))?;
    let last = points
        .last()
        .ok_or_else(|| PlotError::InvalidData("series is empty".to_string()))?;
    let pad = ((last.0 - first.0) * 0.05).max(0.05);
    Ok((first.0 - pad, last.0 + pad))
}

/// Keep only the finite curve points inside the chart's x-range
fn clip_curve(curve: Vec<(f64, f64)>, x_min: f64, x_max: f64) -> Vec<(f64, f64)> {
    curve
        .into_iter()
        .filter(|&(x, y)| x.is_finite() && y.is_finite() && x >= x_min && x <= x_max)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use talus_core::AdmissionPolicy;
    use talus_fit::{fit, Family};

    fn cube_sample() -> Sample {
        let volumes: Vec<f64> = (1..=20).map(|i| f64::from(i).powi(3)).collect();
        Sample::from_volumes(&volumes, AdmissionPolicy::default()).sample
    }

    #[test]
    fn test_empty_sample_is_rejected_before_rendering() {
        let empty = Sample::from_volumes(&[], AdmissionPolicy::default()).sample;
        let path = Path::new("/nonexistent/should-not-be-created.png");

        assert!(matches!(
            render_sample_histograms(&empty, path),
            Err(PlotError::InvalidData(_))
        ));
        assert!(matches!(
            render_distribution_panels(&empty, path),
            Err(PlotError::InvalidData(_))
        ));
        assert!(matches!(
            render_fit_overlays(&empty, &[], path),
            Err(PlotError::InvalidData(_))
        ));
    }

    #[test]
    fn test_overlay_requires_models() {
        let sample = cube_sample();
        let path = Path::new("/nonexistent/should-not-be-created.png");
        assert!(matches!(
            render_fit_overlays(&sample, &[], path),
            Err(PlotError::InvalidData(_))
        ));
    }

    #[test]
    fn test_clip_curve_drops_infinite_and_out_of_range_points() {
        let curve = vec![
            (0.5, 1.0),
            (1.0, f64::INFINITY),
            (1.5, 0.8),
            (9.0, 0.1),
            (f64::NAN, 0.2),
        ];
        let clipped = clip_curve(curve, 1.0, 5.0);
        assert_eq!(clipped, vec![(1.5, 0.8)]);
    }

    #[test]
    fn test_overlay_curves_have_one_point_per_sample_value() {
        let sample = cube_sample();
        let model = fit(Family::Exponential, sample.sizes()).unwrap();
        let n = curve_resolution(&sample);
        assert_eq!(n, sample.len());
        assert_eq!(model.density_curve(n).len(), sample.len());
        assert_eq!(model.cdf_curve(n).len(), sample.len());
    }

    #[test]
    fn test_ladder_markers_trace_the_empirical_cdf() {
        let sample = cube_sample();
        let markers = ladder_markers(sample.sizes()).unwrap();
        assert_eq!(markers.len(), FULL_LADDER.len());
        assert!(markers
            .windows(2)
            .all(|w| w[0].0 <= w[1].0 && w[0].1 < w[1].1));
        let last = markers.last().unwrap();
        assert_eq!(*last, (20.0, 1.0));
    }

    #[test]
    fn test_ladder_markers_reject_empty_input() {
        assert!(ladder_markers(&[]).is_err());
    }

    #[test]
    fn test_series_range_pads_both_sides() {
        let points = vec![(1.0, 0.0), (11.0, 1.0)];
        let (lo, hi) = series_range(&points).unwrap();
        assert!(lo < 1.0);
        assert!(hi > 11.0);
    }

    #[test]
    #[ignore = "font rendering not available in every test environment"]
    fn test_render_sample_histograms_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("histograms.png");
        let sample = cube_sample();

        let handle = render_sample_histograms(&sample, &path).unwrap();
        assert!(path.exists());
        assert_eq!(handle.path, path);
        assert_eq!(handle.series.len(), 2);
    }

    #[test]
    #[ignore = "font rendering not available in every test environment"]
    fn test_render_fit_overlays_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overlays.png");
        let sample = cube_sample();
        let model = fit(Family::Exponential, sample.sizes()).unwrap();

        let handle = render_fit_overlays(&sample, &[model], &path).unwrap();
        assert!(path.exists());
        assert_eq!(handle.series, vec!["empirical", "exponential"]);
    }

    #[test]
    #[ignore = "font rendering not available in every test environment"]
    fn test_render_distribution_panels_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("distribution.png");
        let sample = cube_sample();

        render_distribution_panels(&sample, &path).unwrap();
        assert!(path.exists());
    }
}
