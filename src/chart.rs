//! SVG rendering for multi-panel bar charts
//!
//! Builds the combined analysis figure as a single SVG document: a fixed
//! grid of panels, each holding either a bar plot or a "No data available"
//! placeholder.

use std::fs;
use std::io;
use std::path::Path;

const PANEL_WIDTH: f64 = 360.0;
const PANEL_HEIGHT: f64 = 280.0;
const TITLE_BAND: f64 = 44.0;

// Per-panel plot margins, leaving room for the axis labels.
const MARGIN_LEFT: f64 = 48.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 36.0;
const MARGIN_BOTTOM: f64 = 44.0;

/// A single bar: an x position (sample value or bucket midpoint) and its count
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub count: u64,
}

#[derive(Debug, Clone)]
enum PanelBody {
    Bars {
        xlabel: String,
        ylabel: String,
        color: &'static str,
        bars: Vec<Bar>,
    },
    Placeholder,
}

#[derive(Debug, Clone)]
struct Panel {
    title: String,
    body: PanelBody,
}

/// Multi-panel bar chart laid out on a fixed row/column grid
#[derive(Debug)]
pub struct ChartGrid {
    title: String,
    rows: usize,
    cols: usize,
    panels: Vec<Option<Panel>>,
}

impl ChartGrid {
    pub fn new(title: &str, rows: usize, cols: usize) -> Self {
        Self {
            title: title.to_string(),
            rows,
            cols,
            panels: vec![None; rows * cols],
        }
    }

    /// Place a bar plot at the given grid cell. An empty bar list renders
    /// as a placeholder.
    pub fn set_bar_panel(
        &mut self,
        row: usize,
        col: usize,
        title: &str,
        xlabel: &str,
        ylabel: &str,
        color: &'static str,
        bars: Vec<Bar>,
    ) {
        let body = if bars.is_empty() {
            PanelBody::Placeholder
        } else {
            PanelBody::Bars {
                xlabel: xlabel.to_string(),
                ylabel: ylabel.to_string(),
                color,
                bars,
            }
        };
        self.panels[row * self.cols + col] = Some(Panel {
            title: title.to_string(),
            body,
        });
    }

    /// Place a "No data available" panel at the given grid cell.
    pub fn set_placeholder(&mut self, row: usize, col: usize, title: &str) {
        self.panels[row * self.cols + col] = Some(Panel {
            title: title.to_string(),
            body: PanelBody::Placeholder,
        });
    }

    /// Escape XML special characters in text content
    fn escape_xml(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;")
    }

    /// Compact tick label: integers stay integral, everything else keeps
    /// one decimal.
    fn format_tick(value: f64) -> String {
        if (value - value.round()).abs() < 1e-9 {
            format!("{}", value.round() as i64)
        } else {
            format!("{value:.1}")
        }
    }

    /// Generate the complete SVG document
    pub fn to_svg(&self) -> String {
        let width = self.cols as f64 * PANEL_WIDTH;
        let height = TITLE_BAND + self.rows as f64 * PANEL_HEIGHT;

        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.0}\" height=\"{height:.0}\" \
             viewBox=\"0 0 {width:.0} {height:.0}\" font-family=\"sans-serif\">\n"
        ));
        svg.push_str(&format!(
            "  <rect x=\"0\" y=\"0\" width=\"{width:.0}\" height=\"{height:.0}\" fill=\"#f5f5f5\"/>\n"
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"28\" font-size=\"18\" font-weight=\"bold\" fill=\"#333\" \
             text-anchor=\"middle\">{}</text>\n",
            width / 2.0,
            Self::escape_xml(&self.title)
        ));

        for row in 0..self.rows {
            for col in 0..self.cols {
                if let Some(panel) = &self.panels[row * self.cols + col] {
                    let origin_x = col as f64 * PANEL_WIDTH;
                    let origin_y = TITLE_BAND + row as f64 * PANEL_HEIGHT;
                    self.render_panel(&mut svg, panel, origin_x, origin_y);
                }
            }
        }

        svg.push_str("</svg>\n");
        svg
    }

    fn render_panel(&self, svg: &mut String, panel: &Panel, origin_x: f64, origin_y: f64) {
        svg.push_str(&format!(
            "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"white\" \
             stroke=\"#ddd\"/>\n",
            origin_x + 6.0,
            origin_y + 6.0,
            PANEL_WIDTH - 12.0,
            PANEL_HEIGHT - 12.0
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"13\" font-weight=\"bold\" fill=\"#333\" \
             text-anchor=\"middle\">{}</text>\n",
            origin_x + PANEL_WIDTH / 2.0,
            origin_y + 26.0,
            Self::escape_xml(&panel.title)
        ));

        match &panel.body {
            PanelBody::Placeholder => {
                svg.push_str(&format!(
                    "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" fill=\"#888\" \
                     text-anchor=\"middle\">No data available</text>\n",
                    origin_x + PANEL_WIDTH / 2.0,
                    origin_y + PANEL_HEIGHT / 2.0
                ));
            }
            PanelBody::Bars {
                xlabel,
                ylabel,
                color,
                bars,
            } => {
                self.render_bars(svg, origin_x, origin_y, xlabel, ylabel, color, bars);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_bars(
        &self,
        svg: &mut String,
        origin_x: f64,
        origin_y: f64,
        xlabel: &str,
        ylabel: &str,
        color: &str,
        bars: &[Bar],
    ) {
        let plot_x = origin_x + MARGIN_LEFT;
        let plot_y = origin_y + MARGIN_TOP;
        let plot_w = PANEL_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_h = PANEL_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

        let max_count = bars.iter().map(|b| b.count).max().unwrap_or(1).max(1);

        // axes
        svg.push_str(&format!(
            "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#333\"/>\n",
            plot_x,
            plot_y + plot_h,
            plot_x + plot_w,
            plot_y + plot_h
        ));
        svg.push_str(&format!(
            "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#333\"/>\n",
            plot_x,
            plot_y,
            plot_x,
            plot_y + plot_h
        ));

        let slot = plot_w / bars.len() as f64;
        let bar_width = slot * 0.8;
        for (i, bar) in bars.iter().enumerate() {
            let bar_height = plot_h * bar.count as f64 / max_count as f64;
            svg.push_str(&format!(
                "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\" \
                 fill-opacity=\"0.7\"/>\n",
                plot_x + i as f64 * slot + slot * 0.1,
                plot_y + plot_h - bar_height,
                bar_width,
                bar_height,
                color
            ));
        }

        // y ticks: zero and the tallest count
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\" fill=\"#555\" \
             text-anchor=\"end\">0</text>\n",
            plot_x - 6.0,
            plot_y + plot_h + 4.0
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\" fill=\"#555\" \
             text-anchor=\"end\">{max_count}</text>\n",
            plot_x - 6.0,
            plot_y + 8.0
        ));

        // x ticks: first and last bar positions
        if let (Some(first), Some(last)) = (bars.first(), bars.last()) {
            svg.push_str(&format!(
                "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\" fill=\"#555\" \
                 text-anchor=\"middle\">{}</text>\n",
                plot_x + slot * 0.5,
                plot_y + plot_h + 16.0,
                Self::format_tick(first.x)
            ));
            if bars.len() > 1 {
                svg.push_str(&format!(
                    "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"10\" fill=\"#555\" \
                     text-anchor=\"middle\">{}</text>\n",
                    plot_x + (bars.len() as f64 - 0.5) * slot,
                    plot_y + plot_h + 16.0,
                    Self::format_tick(last.x)
                ));
            }
        }

        // axis labels
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\" fill=\"#555\" \
             text-anchor=\"middle\">{}</text>\n",
            plot_x + plot_w / 2.0,
            origin_y + PANEL_HEIGHT - 12.0,
            Self::escape_xml(xlabel)
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\" fill=\"#555\" text-anchor=\"middle\" \
             transform=\"rotate(-90 {:.1} {:.1})\">{}</text>\n",
            origin_x + 16.0,
            plot_y + plot_h / 2.0,
            origin_x + 16.0,
            plot_y + plot_h / 2.0,
            Self::escape_xml(ylabel)
        ));
    }

    /// Write the SVG document to disk.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_svg())
    }
}
