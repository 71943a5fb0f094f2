use super::ChartDraw;
use super::util::{contiguous_runs, left_label_area_px, value_bounds, year_bounds};
use crate::format::format_number;
use anyhow::{Result, anyhow};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;

pub(super) struct LineData {
    pub label: String,
    pub color: RGBAColor,
    pub points: Vec<(i32, Option<f64>)>,
}

/// Multi-series line chart over a year axis.
pub(super) struct LineChart {
    pub title: String,
    pub y_desc: String,
    /// First and last year on the x axis.
    pub years: (i32, i32),
    pub lines: Vec<LineData>,
    pub locale: String,
    /// Draw a faint horizontal line at zero when it is inside the y range.
    pub zero_line: bool,
}

impl ChartDraw for LineChart {
    fn draw<DB: DrawingBackend>(&self, root: DrawingArea<DB, Shift>) -> Result<()> {
        const MARGIN: u32 = 16;
        root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

        let (x_min, x_max) = year_bounds(self.years.0, self.years.1);
        let (y_min, y_max) = value_bounds(
            self.lines
                .iter()
                .flat_map(|l| l.points.iter().filter_map(|(_, v)| *v)),
            false,
        );
        let left_px = left_label_area_px(y_min, y_max, &self.locale, 12);

        let mut chart = ChartBuilder::on(&root)
            .margin(MARGIN)
            .caption(&self.title, (FontFamily::SansSerif, 22))
            .set_label_area_size(LabelAreaPosition::Left, left_px)
            .set_label_area_size(LabelAreaPosition::Bottom, 48)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| anyhow!("{:?}", e))?;

        let locale = self.locale.as_str();
        let x_label_fmt = |x: &f64| (x.round() as i32).to_string();
        let y_label_fmt = |v: &f64| format_number(*v, locale);
        let x_label_count = ((self.years.1 - self.years.0 + 1).max(1) as usize).min(12);

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc(self.y_desc.as_str())
            .x_labels(x_label_count)
            .y_labels(10)
            .x_label_formatter(&x_label_fmt)
            .y_label_formatter(&y_label_fmt)
            .label_style((FontFamily::SansSerif, 12))
            .axis_desc_style((FontFamily::SansSerif, 14))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;

        if self.zero_line && y_min < 0.0 && y_max > 0.0 {
            chart
                .draw_series(LineSeries::new(
                    vec![(x_min, 0.0), (x_max, 0.0)],
                    BLACK.mix(0.3).stroke_width(1),
                ))
                .map_err(|e| anyhow!("{:?}", e))?;
        }

        for line in &self.lines {
            let color = line.color;
            let style = ShapeStyle {
                color,
                filled: false,
                stroke_width: 2,
            };

            // Empty series carrying the legend entry, so countries without data still show up.
            chart
                .draw_series(LineSeries::new(std::iter::empty::<(f64, f64)>(), style))
                .map_err(|e| anyhow!("{:?}", e))?
                .label(line.label.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], color.stroke_width(2)));

            for run in contiguous_runs(&line.points) {
                chart
                    .draw_series(LineSeries::new(run.clone(), style))
                    .map_err(|e| anyhow!("{:?}", e))?;
                chart
                    .draw_series(run.iter().map(|&(x, y)| Circle::new((x, y), 3, color.filled())))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
        }

        chart
            .configure_series_labels()
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.85))
            .label_font((FontFamily::SansSerif, 13))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;

        root.present().map_err(|e| anyhow!("{:?}", e))?;
        Ok(())
    }
}
