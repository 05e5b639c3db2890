//! Hand-emitted SVG charts
//!
//! Pie/donut panels with a sample-size center label, grouped bar charts,
//! and per-group histograms. Slices are laid out counterclockwise from
//! twelve o'clock; a donut is a pie with half the radius carved out.

use std::f64::consts::PI;

/// Default matplotlib-style categorical palette
const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

const FONT: &str = "font-family=\"sans-serif\"";

/// Circular chart style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartStyle {
    Pie,
    Donut,
}

/// One labeled wedge; zero-valued slices keep their palette slot but are
/// not drawn
#[derive(Debug, Clone)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

/// One pie of a side-by-side chart
#[derive(Debug, Clone)]
pub struct PiePanel {
    pub title: String,
    pub center_label: Option<String>,
    pub slices: Vec<PieSlice>,
}

/// One bar series of a grouped bar chart
#[derive(Debug, Clone)]
pub struct BarSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// One histogram of a side-by-side chart
#[derive(Debug, Clone)]
pub struct HistogramPanel {
    pub title: String,
    pub values: Vec<f64>,
    pub bins: usize,
}

/// Escape XML special characters for text and attribute content
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn svg_open(width: f64, height: f64) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.0}\" height=\"{height:.0}\" \
         viewBox=\"0 0 {width:.0} {height:.0}\">\n\
         <rect width=\"{width:.0}\" height=\"{height:.0}\" fill=\"white\"/>\n"
    )
}

fn text_at(x: f64, y: f64, size: u32, anchor: &str, content: &str) -> String {
    format!(
        "<text x=\"{x:.1}\" y=\"{y:.1}\" font-size=\"{size}\" text-anchor=\"{anchor}\" {FONT}>{}</text>\n",
        escape_xml(content)
    )
}

/// Point on a circle; the y flip keeps angles counterclockwise on screen
fn on_circle(cx: f64, cy: f64, r: f64, angle_deg: f64) -> (f64, f64) {
    let rad = angle_deg * PI / 180.0;
    (cx + r * rad.cos(), cy - r * rad.sin())
}

fn wedge_path(cx: f64, cy: f64, r: f64, a0: f64, a1: f64, style: ChartStyle) -> String {
    let large = i32::from(a1 - a0 > 180.0);
    let (x1, y1) = on_circle(cx, cy, r, a0);
    let (x2, y2) = on_circle(cx, cy, r, a1);
    match style {
        ChartStyle::Pie => format!(
            "M {cx:.1} {cy:.1} L {x1:.1} {y1:.1} A {r:.1} {r:.1} 0 {large} 0 {x2:.1} {y2:.1} Z"
        ),
        ChartStyle::Donut => {
            let ri = r * 0.5;
            let (xi1, yi1) = on_circle(cx, cy, ri, a0);
            let (xi2, yi2) = on_circle(cx, cy, ri, a1);
            format!(
                "M {x1:.1} {y1:.1} A {r:.1} {r:.1} 0 {large} 0 {x2:.1} {y2:.1} \
                 L {xi2:.1} {yi2:.1} A {ri:.1} {ri:.1} 0 {large} 1 {xi1:.1} {yi1:.1} Z"
            )
        }
    }
}

fn render_pie_panel(svg: &mut String, panel: &PiePanel, cx: f64, cy: f64, r: f64, style: ChartStyle) {
    if !panel.title.is_empty() {
        svg.push_str(&text_at(cx, cy - r - 24.0, 15, "middle", &panel.title));
    }

    let total: f64 = panel.slices.iter().map(|s| s.value.max(0.0)).sum();
    if total > 0.0 {
        // Counterclockwise from twelve o'clock
        let mut angle = 90.0;
        for (idx, slice) in panel.slices.iter().enumerate() {
            if slice.value <= 0.0 {
                continue;
            }
            let fraction = slice.value / total;
            let sweep = 360.0 * fraction;
            let color = PALETTE[idx % PALETTE.len()];

            if fraction > 0.999 {
                svg.push_str(&format!(
                    "<circle class=\"wedge\" cx=\"{cx:.1}\" cy=\"{cy:.1}\" r=\"{r:.1}\" fill=\"{color}\"/>\n"
                ));
                if style == ChartStyle::Donut {
                    svg.push_str(&format!(
                        "<circle cx=\"{cx:.1}\" cy=\"{cy:.1}\" r=\"{:.1}\" fill=\"white\"/>\n",
                        r * 0.5
                    ));
                }
            } else {
                let path = wedge_path(cx, cy, r, angle, angle + sweep, style);
                svg.push_str(&format!(
                    "<path class=\"wedge\" d=\"{path}\" fill=\"{color}\" stroke=\"white\" stroke-width=\"1\"/>\n"
                ));
            }

            let (lx, ly) = on_circle(cx, cy, r * 0.85, angle + sweep / 2.0);
            svg.push_str(&text_at(
                lx,
                ly + 4.0,
                12,
                "middle",
                &format!("{:.1}%", 100.0 * fraction),
            ));
            angle += sweep;
        }
    }

    if let Some(label) = &panel.center_label {
        svg.push_str(&text_at(cx, cy + 5.0, 14, "middle", label));
    }
}

/// Render side-by-side pie or donut panels with a shared bottom legend
///
/// Every panel is expected to carry the same slice labels in the same
/// order, so a palette slot means the same category in each panel.
pub fn render_pie_chart(
    title: &str,
    legend_title: &str,
    panels: &[PiePanel],
    style: ChartStyle,
) -> String {
    let panel_w = 420.0;
    let width = panel_w * panels.len().max(1) as f64;
    let height = 560.0;
    let r = 150.0;
    let cy = 250.0;

    let mut svg = svg_open(width, height);
    if !title.is_empty() {
        svg.push_str(&text_at(width / 2.0, 30.0, 17, "middle", title));
    }

    for (i, panel) in panels.iter().enumerate() {
        let cx = panel_w * i as f64 + panel_w / 2.0;
        render_pie_panel(&mut svg, panel, cx, cy, r, style);
    }

    // Legend from the first panel's slice list
    if let Some(first) = panels.first() {
        let legend_y = height - 70.0;
        svg.push_str(&text_at(width / 2.0, legend_y - 22.0, 13, "middle", legend_title));

        let item_widths: Vec<f64> = first
            .slices
            .iter()
            .map(|s| 22.0 + 7.0 * s.label.len() as f64 + 18.0)
            .collect();
        let total_w: f64 = item_widths.iter().sum();
        let mut x = (width - total_w) / 2.0;
        for (idx, slice) in first.slices.iter().enumerate() {
            let color = PALETTE[idx % PALETTE.len()];
            svg.push_str(&format!(
                "<rect x=\"{x:.1}\" y=\"{:.1}\" width=\"12\" height=\"12\" fill=\"{color}\"/>\n",
                legend_y - 10.0
            ));
            svg.push_str(&text_at(x + 18.0, legend_y, 12, "start", &slice.label));
            x += item_widths[idx];
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Render a grouped bar chart of percentages by category
pub fn render_grouped_bar_chart(
    title: &str,
    y_label: &str,
    legend_title: &str,
    categories: &[String],
    series: &[BarSeries],
) -> String {
    let width = 960.0;
    let height = 540.0;
    let (left, right, top, bottom) = (70.0, 30.0, 50.0, 150.0);
    let plot_w = width - left - right;
    let plot_h = height - top - bottom;

    let max_value = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(0.0_f64, f64::max);
    let y_max = ((max_value / 10.0).ceil() * 10.0).max(10.0);

    let mut svg = svg_open(width, height);
    svg.push_str(&text_at(width / 2.0, 28.0, 17, "middle", title));

    // Axes
    svg.push_str(&format!(
        "<line x1=\"{left}\" y1=\"{top}\" x2=\"{left}\" y2=\"{:.1}\" stroke=\"black\"/>\n",
        top + plot_h
    ));
    svg.push_str(&format!(
        "<line x1=\"{left}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"black\"/>\n",
        top + plot_h,
        left + plot_w,
        top + plot_h
    ));

    // Y ticks
    for step in 0..=5 {
        let value = y_max * step as f64 / 5.0;
        let y = top + plot_h - plot_h * step as f64 / 5.0;
        svg.push_str(&text_at(left - 8.0, y + 4.0, 11, "end", &format!("{value:.0}")));
        svg.push_str(&format!(
            "<line x1=\"{:.1}\" y1=\"{y:.1}\" x2=\"{left}\" y2=\"{y:.1}\" stroke=\"black\"/>\n",
            left - 4.0
        ));
    }
    svg.push_str(&format!(
        "<text x=\"18\" y=\"{:.1}\" font-size=\"13\" text-anchor=\"middle\" {FONT} \
         transform=\"rotate(-90 18 {:.1})\">{}</text>\n",
        top + plot_h / 2.0,
        top + plot_h / 2.0,
        escape_xml(y_label)
    ));

    let n_cat = categories.len().max(1) as f64;
    let n_series = series.len().max(1) as f64;
    let slot_w = plot_w / n_cat;
    let bar_w = 0.35 * slot_w;

    for (c, category) in categories.iter().enumerate() {
        let center = left + (c as f64 + 0.5) * slot_w;
        for (j, s) in series.iter().enumerate() {
            let value = s.values.get(c).copied().unwrap_or(0.0).max(0.0);
            let h = plot_h * value / y_max;
            let x = center + (j as f64 - (n_series - 1.0) / 2.0) * bar_w - bar_w / 2.0;
            svg.push_str(&format!(
                "<rect class=\"bar\" x=\"{x:.1}\" y=\"{:.1}\" width=\"{bar_w:.1}\" height=\"{h:.1}\" fill=\"{}\"/>\n",
                top + plot_h - h,
                PALETTE[j % PALETTE.len()]
            ));
        }
        let ly = top + plot_h + 14.0;
        svg.push_str(&format!(
            "<text x=\"{center:.1}\" y=\"{ly:.1}\" font-size=\"11\" text-anchor=\"end\" {FONT} \
             transform=\"rotate(-45 {center:.1} {ly:.1})\">{}</text>\n",
            escape_xml(category)
        ));
    }

    // Legend, top right
    let mut legend_y = top + 10.0;
    let legend_x = left + plot_w - 170.0;
    svg.push_str(&text_at(legend_x, legend_y, 12, "start", legend_title));
    for (j, s) in series.iter().enumerate() {
        legend_y += 18.0;
        svg.push_str(&format!(
            "<rect x=\"{legend_x:.1}\" y=\"{:.1}\" width=\"12\" height=\"12\" fill=\"{}\"/>\n",
            legend_y - 10.0,
            PALETTE[j % PALETTE.len()]
        ));
        svg.push_str(&text_at(legend_x + 18.0, legend_y, 12, "start", &s.name));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Equal-width bin counts over `values`
fn bin_counts(values: &[f64], bins: usize) -> (f64, f64, Vec<usize>) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = if max > min { max - min } else { 1.0 };
    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - min) / span) * bins as f64) as usize;
        counts[idx.min(bins - 1)] += 1;
    }
    (min, min + span, counts)
}

fn render_histogram_panel(
    svg: &mut String,
    panel: &HistogramPanel,
    origin_x: f64,
    x_label: &str,
    y_label: &str,
) {
    let (left, top) = (origin_x + 60.0, 50.0);
    let (plot_w, plot_h) = (380.0, 280.0);

    svg.push_str(&text_at(left + plot_w / 2.0, top - 18.0, 14, "middle", &panel.title));
    svg.push_str(&format!(
        "<line x1=\"{left}\" y1=\"{top}\" x2=\"{left}\" y2=\"{:.1}\" stroke=\"black\"/>\n",
        top + plot_h
    ));
    svg.push_str(&format!(
        "<line x1=\"{left}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"black\"/>\n",
        top + plot_h,
        left + plot_w,
        top + plot_h
    ));
    svg.push_str(&text_at(
        left + plot_w / 2.0,
        top + plot_h + 40.0,
        12,
        "middle",
        x_label,
    ));
    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"middle\" {FONT} \
         transform=\"rotate(-90 {:.1} {:.1})\">{}</text>\n",
        origin_x + 16.0,
        top + plot_h / 2.0,
        origin_x + 16.0,
        top + plot_h / 2.0,
        escape_xml(y_label)
    ));

    if panel.values.is_empty() || panel.bins == 0 {
        return;
    }

    let bins = panel.bins;
    let (lo, hi, counts) = bin_counts(&panel.values, bins);
    let y_max = counts.iter().copied().max().unwrap_or(1).max(1);
    let tick = (y_max as f64 / 5.0).ceil().max(1.0) as usize;

    let mut level = 0;
    while level <= y_max {
        let y = top + plot_h - plot_h * level as f64 / y_max as f64;
        svg.push_str(&text_at(left - 8.0, y + 4.0, 11, "end", &level.to_string()));
        level += tick;
    }

    let bin_w = plot_w / bins as f64;
    for (k, &count) in counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let h = plot_h * count as f64 / y_max as f64;
        svg.push_str(&format!(
            "<rect class=\"bin\" x=\"{:.1}\" y=\"{:.1}\" width=\"{bin_w:.1}\" height=\"{h:.1}\" \
             fill=\"#1f77b4\" stroke=\"black\"/>\n",
            left + k as f64 * bin_w,
            top + plot_h - h
        ));
    }

    // Label every edge, or every other edge for fine binning
    let edge_step = if bins > 8 { 2 } else { 1 };
    let bin_span = (hi - lo) / bins as f64;
    for k in (0..=bins).step_by(edge_step) {
        let x = left + k as f64 * bin_w;
        let value = lo + k as f64 * bin_span;
        svg.push_str(&text_at(x, top + plot_h + 16.0, 10, "middle", &format!("{value:.0}")));
    }
}

/// Render one histogram per panel, side by side
pub fn render_histograms(panels: &[HistogramPanel], x_label: &str, y_label: &str) -> String {
    let panel_w = 480.0;
    let width = panel_w * panels.len().max(1) as f64;
    let height = 400.0;

    let mut svg = svg_open(width, height);
    for (i, panel) in panels.iter().enumerate() {
        render_histogram_panel(&mut svg, panel, panel_w * i as f64, x_label, y_label);
    }
    svg.push_str("</svg>\n");
    svg
}
