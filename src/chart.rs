//! Presentation of sampled trajectories
//!
//! Renderers only consume [`Trajectory`] data; the simulation core never
//! depends on how (or whether) paths are drawn.

use crate::sampler::Trajectory;

/// Draws a set of trajectories as text
pub trait PathRenderer {
    /// Renders `paths` on a capital axis spanning `[0, target]`
    fn render(&self, paths: &[Trajectory], target: u64) -> String;
}

/// Glyph cycle, one per path
const GLYPHS: [char; 6] = ['*', 'o', '+', 'x', '#', '@'];

/// Line chart drawn with characters for terminal output
///
/// x axis: bet index, from 0 to the longest path.
/// y axis: capital, from 0 to the target.
#[derive(Debug, Clone)]
pub struct AsciiChart {
    /// Plot area width in characters
    pub width: usize,
    /// Plot area height in lines
    pub height: usize,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl Default for AsciiChart {
    fn default() -> Self {
        Self {
            width: 72,
            height: 20,
            title: "Evolution of the gambler's fortune over time".to_string(),
            x_label: "Number of bets".to_string(),
            y_label: "Gambler's capital".to_string(),
        }
    }
}

impl AsciiChart {
    /// Creates a chart with the default labels and the given plot area
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

impl PathRenderer for AsciiChart {
    fn render(&self, paths: &[Trajectory], target: u64) -> String {
        let mut out = format!("{}\n", self.title);
        if paths.is_empty() {
            out.push_str("(no paths)\n");
            return out;
        }

        let width = self.width.max(2);
        let height = self.height.max(2);
        let top = target.max(1);
        let max_bets = paths.iter().map(Trajectory::num_bets).max().unwrap_or(0).max(1);

        let mut grid = vec![vec![' '; width]; height];
        for (i, path) in paths.iter().enumerate() {
            let glyph = GLYPHS[i % GLYPHS.len()];
            for (bet, &money) in path.values().iter().enumerate() {
                let col = bet * (width - 1) / max_bets;
                let level = (u128::from(money.min(top)) * (height as u128 - 1)
                    / u128::from(top)) as usize;
                grid[height - 1 - level][col] = glyph;
            }
        }

        let label_width = top.to_string().len();
        out.push_str(&format!("{}\n", self.y_label));
        for (r, row) in grid.iter().enumerate() {
            let label = if r == 0 {
                top.to_string()
            } else if r == height - 1 {
                "0".to_string()
            } else {
                String::new()
            };
            let line: String = row.iter().collect();
            out.push_str(&format!(
                "{:>w$} |{}\n",
                label,
                line.trim_end(),
                w = label_width
            ));
        }

        out.push_str(&format!("{:>w$} +{}\n", "", "-".repeat(width), w = label_width));
        out.push_str(&format!(
            "{:>w$}  0{:>pad$}\n",
            "",
            max_bets,
            w = label_width,
            pad = width - 1
        ));
        out.push_str(&format!(
            "{:>w$}  {:^cols$}\n",
            "",
            self.x_label,
            w = label_width,
            cols = width
        ));

        for (i, path) in paths.iter().enumerate() {
            let outcome = if path.ends_in_ruin() { "ruined" } else { "reached target" };
            out.push_str(&format!(
                "  {} path {}: {} bets, {}\n",
                GLYPHS[i % GLYPHS.len()],
                i + 1,
                path.num_bets(),
                outcome
            ));
        }

        out
    }
}
