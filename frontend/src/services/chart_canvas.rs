//! plotters-based chart backend drawing on `<canvas>` elements.

use anyhow::{anyhow, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use shared::charts::{ChartBackend, ChartConfig, ChartHandle, ChartKind};
use shared::format::Rgba;
use shared::ChartError;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::services::logging::Logger;

const COMPONENT: &str = "chart-canvas";
const FONT: &str = "sans-serif";
const LEGEND_ROW_HEIGHT: u32 = 20;
const LEGEND_COLUMN_WIDTH: i32 = 170;

type Area = DrawingArea<CanvasBackend, Shift>;

trait DrawResult<T> {
    fn drawing(self, step: &str) -> Result<T>;
}

impl<T, E: std::fmt::Debug> DrawResult<T> for std::result::Result<T, E> {
    fn drawing(self, step: &str) -> Result<T> {
        self.map_err(|e| anyhow!("{}: {:?}", step, e))
    }
}

/// Draws charts straight onto the canvas with the matching element id
#[derive(Debug, Default)]
pub struct CanvasChartBackend;

/// A chart currently painted on a canvas
#[derive(Debug)]
pub struct CanvasChart {
    canvas_id: String,
}

impl ChartHandle for CanvasChart {
    fn destroy(self) {
        // The canvas may already be gone when its slot switched to the placeholder
        if let Some(canvas) = find_canvas(&self.canvas_id) {
            let context = canvas
                .get_context("2d")
                .ok()
                .flatten()
                .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
            if let Some(context) = context {
                context.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
            }
        }
        Logger::debug_with_component(COMPONENT, &format!("destroyed chart on {}", self.canvas_id));
    }
}

impl ChartBackend for CanvasChartBackend {
    type Handle = CanvasChart;

    fn create(&mut self, canvas_id: &str, config: &ChartConfig) -> Result<CanvasChart, ChartError> {
        let canvas =
            find_canvas(canvas_id).ok_or_else(|| ChartError::CanvasNotFound(canvas_id.to_string()))?;

        draw(canvas, config).map_err(|e| ChartError::Drawing {
            canvas: canvas_id.to_string(),
            reason: format!("{:#}", e),
        })?;

        Logger::debug_with_component(COMPONENT, &format!("created {:?} chart on {}", config.kind, canvas_id));
        Ok(CanvasChart {
            canvas_id: canvas_id.to_string(),
        })
    }
}

fn find_canvas(id: &str) -> Option<HtmlCanvasElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlCanvasElement>()
        .ok()
}

/// Solid color equivalent to `c` painted over white
fn over_white(c: Rgba) -> RGBColor {
    let blend = |channel: u8| (channel as f64 * c.a + 255.0 * (1.0 - c.a)).round() as u8;
    RGBColor(blend(c.r), blend(c.g), blend(c.b))
}

fn rgba(c: Rgba) -> RGBAColor {
    RGBAColor(c.r, c.g, c.b, c.a)
}

fn draw(canvas: HtmlCanvasElement, config: &ChartConfig) -> Result<()> {
    let backend = CanvasBackend::with_canvas_object(canvas)
        .ok_or_else(|| anyhow!("canvas has no 2d context"))?;
    let root = backend.into_drawing_area();
    root.fill(&WHITE).drawing("clear")?;
    let area = root.titled(&config.title, (FONT, 16)).drawing("title")?;

    match config.kind {
        ChartKind::Pie | ChartKind::Doughnut => draw_pie(&area, config)?,
        ChartKind::Bar => draw_columns(&area, config)?,
        ChartKind::HorizontalBar => draw_horizontal_bars(&area, config)?,
        ChartKind::Line => draw_lines(&area, config)?,
    }

    root.present().drawing("present")?;
    Ok(())
}

fn draw_pie(area: &Area, config: &ChartConfig) -> Result<()> {
    let dataset = config
        .datasets
        .first()
        .ok_or_else(|| anyhow!("pie chart without dataset"))?;
    let colors: Vec<RGBColor> = dataset.background.iter().map(|c| over_white(*c)).collect();

    let (width, height) = area.dim_in_pixel();
    let legend_rows = if config.show_legend {
        let per_row = (width as i32 / LEGEND_COLUMN_WIDTH).max(1) as usize;
        (config.labels.len() + per_row - 1) / per_row
    } else {
        0
    };
    let legend_height = (legend_rows as u32 * LEGEND_ROW_HEIGHT).min(height / 2);
    let (pie_area, legend_area) = area.split_vertically(height - legend_height);

    let (pie_width, pie_height) = pie_area.dim_in_pixel();
    let center = (pie_width as i32 / 2, pie_height as i32 / 2);
    let radius = pie_width.min(pie_height) as f64 * 0.38;

    let mut pie = Pie::new(&center, &radius, &dataset.values, &colors, &config.labels);
    pie.label_style((FONT, 12).into_font().color(&BLACK));
    pie.percentages((FONT, 11).into_font().color(&BLACK));
    if config.kind == ChartKind::Doughnut {
        pie.donut_hole(radius * 0.5);
    }
    pie_area.draw(&pie).drawing("pie")?;

    if config.show_legend {
        draw_legend(&legend_area, &config.labels, &colors)?;
    }
    Ok(())
}

/// Colored squares with their labels, wrapped into rows
fn draw_legend(area: &Area, labels: &[String], colors: &[RGBColor]) -> Result<()> {
    let (width, _) = area.dim_in_pixel();
    let per_row = (width as i32 / LEGEND_COLUMN_WIDTH).max(1);
    for (i, (label, color)) in labels.iter().zip(colors).enumerate() {
        let i = i as i32;
        let x = (i % per_row) * LEGEND_COLUMN_WIDTH + 10;
        let y = (i / per_row) * LEGEND_ROW_HEIGHT as i32 + 4;
        area.draw(&Rectangle::new([(x, y), (x + 12, y + 12)], color.filled()))
            .drawing("legend swatch")?;
        area.draw(&Text::new(label.clone(), (x + 18, y), (FONT, 12)))
            .drawing("legend label")?;
    }
    Ok(())
}

fn segment_label(labels: &[String], value: &SegmentValue<i32>) -> String {
    match value {
        SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
        _ => String::new(),
    }
}

fn draw_columns(area: &Area, config: &ChartConfig) -> Result<()> {
    let dataset = config
        .datasets
        .first()
        .ok_or_else(|| anyhow!("bar chart without dataset"))?;
    let labels = config.axis_labels();
    let count = labels.len() as i32;
    let y_max = config.max_value().max(1.0) * 1.1;

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d((0..count).into_segmented(), 0.0..y_max)
        .drawing("bar axes")?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|v| segment_label(&labels, v))
        .y_label_formatter(&|v| format!("R$ {:.0}", v))
        .label_style((FONT, 11))
        .draw()
        .drawing("bar mesh")?;

    chart
        .draw_series(dataset.values.iter().enumerate().map(|(i, value)| {
            let i = i as i32;
            let color = over_white(dataset.background[i as usize % dataset.background.len()]);
            let mut bar = Rectangle::new(
                [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), *value)],
                color.filled(),
            );
            bar.set_margin(0, 0, 6, 6);
            bar
        }))
        .drawing("bars")?;
    Ok(())
}

fn draw_horizontal_bars(area: &Area, config: &ChartConfig) -> Result<()> {
    let dataset = config
        .datasets
        .first()
        .ok_or_else(|| anyhow!("bar chart without dataset"))?;
    let labels = config.axis_labels();
    let count = labels.len() as i32;
    let x_max = config.max_value().max(1.0) * 1.1;

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(110)
        .build_cartesian_2d(0.0..x_max, (0..count).into_segmented())
        .drawing("bar axes")?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(labels.len())
        .y_label_formatter(&|v| segment_label(&labels, v))
        .x_label_formatter(&|v| format!("R$ {:.0}", v))
        .label_style((FONT, 11))
        .draw()
        .drawing("bar mesh")?;

    chart
        .draw_series(dataset.values.iter().enumerate().map(|(i, value)| {
            let i = i as i32;
            let color = over_white(dataset.background[i as usize % dataset.background.len()]);
            let mut bar = Rectangle::new(
                [(0.0, SegmentValue::Exact(i)), (*value, SegmentValue::Exact(i + 1))],
                color.filled(),
            );
            bar.set_margin(4, 4, 0, 0);
            bar
        }))
        .drawing("bars")?;
    Ok(())
}

fn draw_lines(area: &Area, config: &ChartConfig) -> Result<()> {
    let labels = &config.labels;
    let count = labels.len().max(1) as i32;
    let y_max = config.max_value().max(1.0) * 1.1;

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(80)
        .build_cartesian_2d(0..count, 0.0..y_max)
        .drawing("line axes")?;

    let month_label = |x: &i32| labels.get(*x as usize).cloned().unwrap_or_default();
    let amount_label = |v: &f64| format!("R$ {:.0}", v);
    let mut mesh = chart.configure_mesh();
    mesh.x_labels(labels.len())
        .x_label_formatter(&month_label)
        .y_label_formatter(&amount_label)
        .label_style((FONT, 11));
    if let Some(title) = &config.x_axis_title {
        mesh.x_desc(title.as_str());
    }
    if let Some(title) = &config.y_axis_title {
        mesh.y_desc(title.as_str());
    }
    mesh.draw().drawing("line mesh")?;

    for dataset in &config.datasets {
        let stroke_color = dataset.border.first().copied().map(rgba).unwrap_or(BLACK.to_rgba());
        let fill_color = dataset.background.first().copied().map(rgba).unwrap_or(TRANSPARENT);
        let stroke = ShapeStyle::from(stroke_color).stroke_width(dataset.border_width);
        let points: Vec<(i32, f64)> = dataset
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as i32, *v))
            .collect();

        let series = if dataset.fill {
            chart
                .draw_series(AreaSeries::new(points.clone(), 0.0, fill_color).border_style(stroke))
                .drawing("area")?
        } else {
            chart
                .draw_series(LineSeries::new(points.clone(), stroke))
                .drawing("line")?
        };
        series
            .label(dataset.label.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], stroke));

        chart
            .draw_series(points.iter().map(|p| Circle::new(*p, 3, stroke_color.filled())))
            .drawing("points")?;
    }

    if config.show_legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .drawing("legend")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::charts::ChartSlot;
    use shared::AnalysisResult;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[test]
    fn test_over_white_blends() {
        assert_eq!(over_white(Rgba::new(255, 0, 0, 1.0)), RGBColor(255, 0, 0));
        assert_eq!(over_white(Rgba::new(0, 0, 0, 0.0)), RGBColor(255, 255, 255));
        assert_eq!(over_white(Rgba::new(0, 0, 0, 0.6)), RGBColor(102, 102, 102));
    }

    #[wasm_bindgen_test]
    fn test_missing_canvas_is_reported() {
        let mut backend = CanvasChartBackend;
        let mut analysis = AnalysisResult::default();
        analysis.gastos.por_tipo.insert("Combustivel".to_string(), 180.0);
        let config = ChartSlot::ByType.config(&analysis).unwrap();
        let err = backend.create("no-such-canvas", &config).unwrap_err();
        assert_eq!(err, ChartError::CanvasNotFound("no-such-canvas".to_string()));
    }
}
