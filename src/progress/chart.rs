//! SVG lollipop chart of progress statuses by goal.
//!
//! Each goal gets a gray connector spanning its lowest to highest level and
//! one circle per status, sized by the number of indicators in that status.

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::level::status_level;
use super::types::GoalStatusCount;

const GOALS: std::ops::RangeInclusive<u8> = 1..=17;

const CONNECTOR_COLOUR: &str = "#898989";
const GRID_COLOUR: &str = "#CCCCCC";
const FONT_FAMILY: &str = "'Helvetica Neue', Helvetica, Arial, sans-serif";
const FONT_SIZE: f64 = 13.0;
const LINE_HEIGHT: f64 = 16.0;
const ICON_SIZE: f64 = 40.0;
const LEGEND_GAP: f64 = 14.0;

/// Pixels per typographic point at 100 dpi.
const PX_PER_PT: f64 = 100.0 / 72.0;

/// Level tick labels, top level first.
const LEVEL_LABELS: [(u8, &[&str]); 5] = [
    (4, &["Target achieved"]),
    (3, &["On track"]),
    (2, &["Progress made,", "but acceleration", "needed"]),
    (1, &["Limited progress"]),
    (0, &["Deterioration"]),
];

/// Chart orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Layout {
    /// Tall chart: goals run down the page, levels across the top.
    #[default]
    Vertical,
    /// Wide chart: goals run across the page, levels up the left side.
    Horizontal,
}

#[derive(Debug, Clone, Default)]
pub struct ChartOptions {
    pub layout: Layout,
    /// Directory with `E-WEB-Goal-NN.png` icons. Goal numbers are drawn when unset.
    pub icons_dir: Option<PathBuf>,
}

/// Radius in pixels of the marker for `n` indicators.
///
/// The marker area is `60 * n^1.65` square points.
pub fn marker_radius(n: usize) -> f64 {
    let area = 60.0 * (n as f64).powf(1.65);
    area.sqrt() / 2.0 * PX_PER_PT
}

/// Maps data coordinates onto the plot area of the canvas.
#[derive(Debug, Clone, Copy)]
struct Frame {
    width: f64,
    height: f64,
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
    /// Data values at the left and right edges.
    x_range: (f64, f64),
    /// Data values at the top and bottom edges.
    y_range: (f64, f64),
}

impl Frame {
    fn x(&self, v: f64) -> f64 {
        let (x0, x1) = self.x_range;
        self.left + (v - x0) / (x1 - x0) * (self.right - self.left)
    }

    fn y(&self, v: f64) -> f64 {
        let (y0, y1) = self.y_range;
        self.top + (v - y0) / (y1 - y0) * (self.bottom - self.top)
    }
}

impl Layout {
    fn frame(self, legend_height: f64) -> Frame {
        match self {
            Self::Vertical => Frame {
                width: 800.0,
                height: 1300.0,
                left: 50.0,
                top: 20.0 + legend_height + 3.0 * LINE_HEIGHT + 16.0,
                right: 780.0,
                bottom: 1280.0,
                x_range: (-0.75, 4.25),
                y_range: (0.5, 17.5),
            },
            Self::Horizontal => Frame {
                width: 1500.0,
                height: 800.0,
                left: 190.0,
                top: 20.0,
                right: 1480.0,
                bottom: 780.0 - legend_height,
                x_range: (0.5, 17.5),
                y_range: (5.0, -0.5),
            },
        }
    }

    /// Pixel position of a goal at a level.
    fn point(self, frame: &Frame, goal: f64, level: f64) -> (f64, f64) {
        match self {
            Self::Vertical => (frame.x(level), frame.y(goal)),
            Self::Horizontal => (frame.x(goal), frame.y(level)),
        }
    }

    /// Level at which the goal icons sit.
    fn icon_level(self) -> f64 {
        match self {
            Self::Vertical => -0.75,
            Self::Horizontal => 4.5,
        }
    }

    /// Horizontal anchor of the legend as a fraction of the canvas width.
    fn legend_anchor(self) -> f64 {
        match self {
            Self::Vertical => 0.6,
            Self::Horizontal => 0.55,
        }
    }
}

/// Minimal SVG document builder.
struct Svg {
    body: String,
}

impl Svg {
    fn new(width: f64, height: f64) -> Self {
        let mut body = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
             viewBox=\"0 0 {width} {height}\" font-family=\"{FONT_FAMILY}\" font-size=\"{FONT_SIZE}\">\n"
        );
        body.push_str(&format!(
            "<rect width=\"{width}\" height=\"{height}\" fill=\"white\"/>\n"
        ));
        Self { body }
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &str, dash: Option<&str>) {
        let dash = dash
            .map(|d| format!(" stroke-dasharray=\"{d}\""))
            .unwrap_or_default();
        self.body.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{stroke}\" stroke-width=\"1\"{dash}/>\n",
            from.0, from.1, to.0, to.1
        ));
    }

    fn circle(&mut self, class: &str, centre: (f64, f64), r: f64, fill: &str) {
        self.body.push_str(&format!(
            "<circle class=\"{class}\" cx=\"{:.2}\" cy=\"{:.2}\" r=\"{r:.2}\" fill=\"{fill}\" stroke=\"white\" stroke-width=\"1\"/>\n",
            centre.0, centre.1
        ));
    }

    /// Writes one line of text per entry of `lines`, the first at `y`.
    fn text(&mut self, x: f64, y: f64, lines: &[&str], anchor: &str) {
        self.body
            .push_str(&format!("<text text-anchor=\"{anchor}\" fill=\"black\">"));
        for (i, line) in lines.iter().enumerate() {
            self.body.push_str(&format!(
                "<tspan x=\"{x:.2}\" y=\"{:.2}\">{}</tspan>",
                y + i as f64 * LINE_HEIGHT,
                escape_xml(line)
            ));
        }
        self.body.push_str("</text>\n");
    }

    fn goal_badge(&mut self, goal: u8, centre: (f64, f64)) {
        let half = ICON_SIZE / 2.0;
        self.body.push_str(&format!(
            "<rect class=\"goal\" x=\"{:.2}\" y=\"{:.2}\" width=\"{ICON_SIZE}\" height=\"{ICON_SIZE}\" rx=\"4\" fill=\"{CONNECTOR_COLOUR}\"/>\n",
            centre.0 - half,
            centre.1 - half
        ));
        self.body.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" fill=\"white\" font-weight=\"bold\" font-size=\"16\">{goal}</text>\n",
            centre.0,
            centre.1 + 6.0
        ));
    }

    fn image(&mut self, href: &Path, centre: (f64, f64)) {
        let half = ICON_SIZE / 2.0;
        self.body.push_str(&format!(
            "<image class=\"goal\" href=\"{}\" x=\"{:.2}\" y=\"{:.2}\" width=\"{ICON_SIZE}\" height=\"{ICON_SIZE}\"/>\n",
            escape_xml(&href.to_string_lossy()),
            centre.0 - half,
            centre.1 - half
        ));
    }

    fn finish(mut self) -> String {
        self.body.push_str("</svg>\n");
        self.body
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn icon_path(dir: &Path, goal: u8) -> PathBuf {
    dir.join(format!("E-WEB-Goal-{goal:02}.png"))
}

/// Renders the lollipop chart as an SVG document.
pub fn render_svg(counts: &[GoalStatusCount], options: &ChartOptions) -> String {
    let layout = options.layout;
    let nmax = counts.iter().map(|c| c.number).max().unwrap_or(0);
    let rmax = marker_radius(nmax);
    let legend_height = if nmax == 0 { 0.0 } else { 2.0 * rmax + LINE_HEIGHT + 24.0 };

    let frame = layout.frame(legend_height);
    let mut svg = Svg::new(frame.width, frame.height);

    // Grid and level labels
    for (level, lines) in LEVEL_LABELS {
        let level = f64::from(level);
        match layout {
            Layout::Vertical => {
                let x = frame.x(level);
                svg.line((x, frame.top), (x, frame.bottom), GRID_COLOUR, Some("1,3"));
                let first = frame.top - 10.0 - (lines.len() - 1) as f64 * LINE_HEIGHT;
                svg.text(x, first, lines, "middle");
            }
            Layout::Horizontal => {
                let y = frame.y(level);
                svg.line((frame.left, y), (frame.right, y), GRID_COLOUR, Some("1,3"));
                let first = y + FONT_SIZE / 3.0 - (lines.len() - 1) as f64 * LINE_HEIGHT / 2.0;
                svg.text(frame.left / 2.0, first, lines, "middle");
            }
        }
    }

    // Connectors
    let mut spans: BTreeMap<u8, (u8, u8)> = BTreeMap::new();
    for c in counts {
        let level = status_level(c.status);
        spans
            .entry(c.goal)
            .and_modify(|(lo, hi)| {
                *lo = (*lo).min(level);
                *hi = (*hi).max(level);
            })
            .or_insert((level, level));
    }
    for (goal, (lo, hi)) in &spans {
        if lo == hi || !GOALS.contains(goal) {
            continue;
        }
        let goal = f64::from(*goal);
        svg.line(
            layout.point(&frame, goal, f64::from(*lo)),
            layout.point(&frame, goal, f64::from(*hi)),
            CONNECTOR_COLOUR,
            None,
        );
    }

    // Lollipops
    for c in counts.iter().filter(|c| GOALS.contains(&c.goal)) {
        let centre = layout.point(&frame, f64::from(c.goal), f64::from(status_level(c.status)));
        svg.circle("lollipop", centre, marker_radius(c.number), c.status.colour());
    }

    // Goal icons
    for goal in GOALS {
        let centre = layout.point(&frame, f64::from(goal), layout.icon_level());
        match &options.icons_dir {
            Some(dir) => svg.image(&icon_path(dir, goal), centre),
            None => svg.goal_badge(goal, centre),
        }
    }

    // Legend
    if nmax > 0 {
        let diameters: f64 = (1..=nmax).map(|n| 2.0 * marker_radius(n)).sum();
        let total = diameters + LEGEND_GAP * (nmax - 1) as f64;
        let mut x = frame.width * layout.legend_anchor() - total / 2.0;
        let cy = match layout {
            Layout::Vertical => 20.0 + rmax,
            Layout::Horizontal => frame.bottom + 12.0 + rmax,
        };

        svg.text(x - 2.0 * LEGEND_GAP, cy + FONT_SIZE / 3.0, &["Number of indicators"], "end");
        for n in 1..=nmax {
            let r = marker_radius(n);
            svg.circle("legend", (x + r, cy), r, "black");
            let label = n.to_string();
            svg.text(x + r, cy + rmax + LINE_HEIGHT, &[label.as_str()], "middle");
            x += 2.0 * r + LEGEND_GAP;
        }
    }

    svg.finish()
}

/// Renders the chart and writes it to `path`.
pub fn write_chart(path: &Path, counts: &[GoalStatusCount], options: &ChartOptions) -> Result<()> {
    let svg = render_svg(counts, options);
    std::fs::write(path, svg).with_context(|| format!("failed to write chart {}", path.display()))?;
    debug!(path = %path.display(), layout = ?options.layout, "Chart written");
    Ok(())
}
