use super::ChartDraw;
use super::util::{left_label_area_px, value_bounds};
use crate::format::format_number;
use anyhow::{Result, anyhow};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

pub(super) struct BarData {
    pub label: String,
    pub color: RGBAColor,
    pub value: f64,
    /// Text printed above the bar.
    pub annotation: String,
}

/// One bar per category, centered on integer x positions.
pub(super) struct BarChart {
    pub title: String,
    pub y_desc: String,
    pub bars: Vec<BarData>,
    pub locale: String,
}

impl ChartDraw for BarChart {
    fn draw<DB: DrawingBackend>(&self, root: DrawingArea<DB, Shift>) -> Result<()> {
        const MARGIN: u32 = 16;
        const BAR_WIDTH: f64 = 0.7;
        root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

        let n = self.bars.len();
        let x_min = -0.5f64;
        let x_max = n as f64 - 0.5;
        let (y_min, y_max) = value_bounds(self.bars.iter().map(|b| b.value), true);
        let left_px = left_label_area_px(y_min, y_max, &self.locale, 12);

        let mut chart = ChartBuilder::on(&root)
            .margin(MARGIN)
            .caption(&self.title, (FontFamily::SansSerif, 22))
            .set_label_area_size(LabelAreaPosition::Left, left_px)
            .set_label_area_size(LabelAreaPosition::Bottom, 48)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| anyhow!("{:?}", e))?;

        let labels: Vec<&str> = self.bars.iter().map(|b| b.label.as_str()).collect();
        let x_label_fmt = |x: &f64| {
            let i = x.round();
            if (x - i).abs() < 1e-6 && i >= 0.0 && (i as usize) < labels.len() {
                labels[i as usize].to_string()
            } else {
                String::new()
            }
        };
        let locale = self.locale.as_str();
        let y_label_fmt = |v: &f64| format_number(*v, locale);

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Country")
            .y_desc(self.y_desc.as_str())
            .x_labels(n)
            .y_labels(10)
            .x_label_formatter(&x_label_fmt)
            .y_label_formatter(&y_label_fmt)
            .label_style((FontFamily::SansSerif, 12))
            .axis_desc_style((FontFamily::SansSerif, 14))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;

        chart
            .draw_series(self.bars.iter().enumerate().map(|(i, b)| {
                let x0 = i as f64 - BAR_WIDTH / 2.0;
                let x1 = i as f64 + BAR_WIDTH / 2.0;
                let (y0, y1) = (0.0f64.min(b.value), 0.0f64.max(b.value));
                Rectangle::new([(x0, y0), (x1, y1)], b.color.filled())
            }))
            .map_err(|e| anyhow!("{:?}", e))?;

        let annotation_style = TextStyle::from((FontFamily::SansSerif, 12).into_font())
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart
            .draw_series(self.bars.iter().enumerate().map(|(i, b)| {
                Text::new(
                    b.annotation.clone(),
                    (i as f64, b.value.max(0.0)),
                    annotation_style.clone(),
                )
            }))
            .map_err(|e| anyhow!("{:?}", e))?;

        root.present().map_err(|e| anyhow!("{:?}", e))?;
        Ok(())
    }
}
