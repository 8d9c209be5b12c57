//! Fixed color palettes for proportional charts

/// Asset allocation doughnut colors
pub const ALLOCATION: [&str; 10] = [
    "rgba(54, 162, 235, 0.8)",
    "rgba(255, 99, 132, 0.8)",
    "rgba(75, 192, 192, 0.8)",
    "rgba(255, 159, 64, 0.8)",
    "rgba(153, 102, 255, 0.8)",
    "rgba(255, 205, 86, 0.8)",
    "rgba(201, 203, 207, 0.8)",
    "rgba(255, 99, 71, 0.8)",
    "rgba(46, 204, 113, 0.8)",
    "rgba(142, 68, 173, 0.8)",
];

/// Sector bar colors: the allocation palette plus three extra hues
pub const SECTOR: [&str; 13] = [
    "rgba(54, 162, 235, 0.8)",
    "rgba(255, 99, 132, 0.8)",
    "rgba(75, 192, 192, 0.8)",
    "rgba(255, 159, 64, 0.8)",
    "rgba(153, 102, 255, 0.8)",
    "rgba(255, 205, 86, 0.8)",
    "rgba(201, 203, 207, 0.8)",
    "rgba(255, 99, 71, 0.8)",
    "rgba(46, 204, 113, 0.8)",
    "rgba(142, 68, 173, 0.8)",
    "rgba(241, 196, 15, 0.8)",
    "rgba(231, 76, 60, 0.8)",
    "rgba(26, 188, 156, 0.8)",
];

/// Segment separator for doughnut, bar and polar charts
pub const SEGMENT_BORDER: &str = "rgba(255, 255, 255, 0.5)";

/// Performance line stroke
pub const LINE_STROKE: &str = "rgba(54, 162, 235, 1)";

/// Performance area fill
pub const LINE_FILL: &str = "rgba(54, 162, 235, 0.2)";

/// One color per category. Past the end of the palette the colors wrap
/// around, so category `i` always gets `palette[i % len]`.
pub fn colors_for(palette: &[&str], count: usize) -> Vec<String> {
    if palette.is_empty() {
        return Vec::new();
    }
    (0..count)
        .map(|i| palette[i % palette.len()].to_string())
        .collect()
}
