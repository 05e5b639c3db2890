//! Report rendering: console tables and SVG chart files

pub mod chart;
pub mod table;

pub use chart::{
    render_grouped_bar_chart, render_histograms, render_pie_chart, BarSeries, ChartStyle,
    HistogramPanel, PiePanel, PieSlice,
};
pub use table::{count_pct, fmt_ci, fmt_p, heading, percentage, rule};
