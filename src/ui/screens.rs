use crate::error::Severity;
use crate::stats::StatisticsReport;

/// Scrollable view over a rendered statistics report.
pub(crate) struct StatisticsScreen {
    pub(crate) lines: Vec<String>,
    pub(crate) scroll: u16,
}

impl StatisticsScreen {
    pub(crate) fn new(report: &StatisticsReport) -> Self {
        Self {
            lines: report.to_string().lines().map(str::to_string).collect(),
            scroll: 0,
        }
    }

    pub(crate) fn max_scroll(&self) -> u16 {
        self.lines.len().saturating_sub(1).min(u16::MAX as usize) as u16
    }

    pub(crate) fn scroll_by(&mut self, delta: i32) {
        let next = (self.scroll as i32 + delta).clamp(0, self.max_scroll() as i32);
        self.scroll = next as u16;
    }

    pub(crate) fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub(crate) fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }
}

/// Modal message shown after an action, dismissed with Enter or Esc.
pub(crate) struct MessageDialog {
    pub(crate) title: &'static str,
    pub(crate) text: String,
    pub(crate) severity: Severity,
}

impl MessageDialog {
    pub(crate) fn new(title: &'static str, text: impl Into<String>, severity: Severity) -> Self {
        Self {
            title,
            text: text.into(),
            severity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;
    use crate::stats::build_report;

    #[test]
    fn scrolling_clamps_to_report_length() {
        let report = build_report(&[Record::new("E1", "Desk", "Furniture", "2", "High")]);
        let mut screen = StatisticsScreen::new(&report);
        assert_eq!(screen.lines[0], "Workload Statistics by Completion Quantity:");

        screen.scroll_by(-3);
        assert_eq!(screen.scroll, 0);
        screen.scroll_by(100);
        assert_eq!(screen.scroll, screen.max_scroll());
        screen.scroll_to_top();
        assert_eq!(screen.scroll, 0);
    }

    #[test]
    fn no_data_is_a_single_line() {
        let screen = StatisticsScreen::new(&StatisticsReport::NoData);
        assert_eq!(screen.lines, ["No data available."]);
        assert_eq!(screen.max_scroll(), 0);
    }
}
