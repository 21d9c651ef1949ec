//! Terminal histogram of measurement counts.

use console::style;
use qpe_hal::Counts;

/// Chart title.
pub const TITLE: &str = "Quantum Period Estimation Results";
/// Label of the outcome axis.
pub const X_LABEL: &str = "Measured Value";
/// Label of the count axis.
pub const Y_LABEL: &str = "Counts";

const BAR: &str = "█";

/// Bar chart of counts, one bar per observed bitstring.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Chart title.
    pub title: String,
    /// Outcome axis label.
    pub x_label: String,
    /// Count axis label.
    pub y_label: String,
    bars: Vec<(String, u64)>,
}

impl Histogram {
    /// Build a histogram with bars in ascending bitstring order.
    pub fn from_counts(counts: &Counts) -> Self {
        let bars = counts
            .sorted_by_key()
            .into_iter()
            .map(|(bits, count)| (bits.clone(), *count))
            .collect();
        Self {
            title: TITLE.into(),
            x_label: X_LABEL.into(),
            y_label: Y_LABEL.into(),
            bars,
        }
    }

    /// The `(bitstring, count)` bars in display order.
    pub fn bars(&self) -> &[(String, u64)] {
        &self.bars
    }

    /// Height of the tallest bar.
    pub fn max_count(&self) -> u64 {
        self.bars.iter().map(|(_, c)| *c).max().unwrap_or(0)
    }

    /// Length of the bar for `count` when the tallest bar is `width` wide.
    ///
    /// Non-zero counts always get at least one block.
    fn bar_len(&self, count: u64, width: usize) -> usize {
        let max = self.max_count();
        if max == 0 || count == 0 {
            return 0;
        }
        let len = (count as f64 / max as f64 * width as f64).round() as usize;
        len.max(1)
    }

    fn label_width(&self) -> usize {
        self.bars
            .iter()
            .map(|(bits, _)| bits.len())
            .max()
            .unwrap_or(0)
            .max(self.x_label.len())
    }

    /// Render as plain text, bars at most `width` blocks long.
    pub fn render(&self, width: usize) -> String {
        let mut out = format!("{}\n", self.title);
        if self.bars.is_empty() {
            out.push_str("(no data)\n");
            return out;
        }

        let label_width = self.label_width();
        out.push_str(&format!(
            "{:<label_width$} | {}\n",
            self.x_label, self.y_label
        ));
        for (bits, count) in &self.bars {
            out.push_str(&format!(
                "{bits:<label_width$} | {} {count}\n",
                BAR.repeat(self.bar_len(*count, width))
            ));
        }
        out
    }

    /// Print a styled rendering to stdout.
    pub fn print(&self, width: usize) {
        println!("{}", style(&self.title).cyan().bold());
        if self.bars.is_empty() {
            println!("  {}", style("(no data)").dim());
            return;
        }

        let label_width = self.label_width();
        println!(
            "  {} {} {}",
            style(format!("{:<label_width$}", self.x_label)).dim(),
            style("|").dim(),
            style(&self.y_label).dim()
        );
        for (bits, count) in &self.bars {
            println!(
                "  {} {} {} {}",
                style(format!("{bits:<label_width$}")).cyan(),
                style("|").dim(),
                style(BAR.repeat(self.bar_len(*count, width))).green(),
                count
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts() -> Counts {
        [
            ("100".to_string(), 10),
            ("011".to_string(), 40),
            ("000".to_string(), 1),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_labels() {
        let hist = Histogram::from_counts(&counts());
        assert_eq!(hist.title, "Quantum Period Estimation Results");
        assert_eq!(hist.x_label, "Measured Value");
        assert_eq!(hist.y_label, "Counts");
    }

    #[test]
    fn test_bars_sorted_by_bitstring() {
        let hist = Histogram::from_counts(&counts());
        let keys: Vec<_> = hist.bars().iter().map(|(b, _)| b.as_str()).collect();
        assert_eq!(keys, vec!["000", "011", "100"]);
        assert_eq!(hist.max_count(), 40);
    }

    #[test]
    fn test_render_scales_to_width() {
        let text = Histogram::from_counts(&counts()).render(20);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], TITLE);
        assert!(lines[1].starts_with("Measured Value | Counts"));
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2].matches(BAR).count(), 1);
        assert_eq!(lines[3].matches(BAR).count(), 20);
        assert_eq!(lines[4].matches(BAR).count(), 5);
        assert!(lines[3].ends_with(" 40"));
    }

    #[test]
    fn test_render_empty() {
        let text = Histogram::from_counts(&Counts::new()).render(40);
        assert_eq!(text, format!("{TITLE}\n(no data)\n"));
    }
}
