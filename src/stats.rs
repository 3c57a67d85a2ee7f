//! Ranked workload summary. Records are ordered by completed count (highest
//! first, ties broken by employee id) and consecutive records with the same
//! count form one rank.

use std::fmt;

use crate::models::{CompletedCount, Record};

/// Shown instead of a report when there is nothing to rank.
pub const NO_DATA_MESSAGE: &str = "No data available.";

const REPORT_TITLE: &str = "Workload Statistics by Completion Quantity:";

/// Employees sharing one completed count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroup {
    pub completed: CompletedCount,
    pub employee_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatisticsReport {
    NoData,
    Ranked {
        groups: Vec<RankGroup>,
        /// Rows left out because their completed column is not a count.
        skipped: usize,
    },
}

impl StatisticsReport {
    pub fn is_empty(&self) -> bool {
        matches!(self, StatisticsReport::NoData)
    }

    pub fn groups(&self) -> &[RankGroup] {
        match self {
            StatisticsReport::NoData => &[],
            StatisticsReport::Ranked { groups, .. } => groups,
        }
    }
}

/// Build the report from a snapshot of stored records.
pub fn build_report(records: &[Record]) -> StatisticsReport {
    let mut ranked: Vec<(CompletedCount, &str)> = Vec::with_capacity(records.len());
    let mut skipped = 0usize;
    for record in records {
        match record.completed_count() {
            Some(count) => ranked.push((count, record.employee_id.as_str())),
            None => {
                tracing::warn!(
                    employee_id = %record.employee_id,
                    completed = %record.completed,
                    "skipping record with invalid completed count"
                );
                skipped += 1;
            }
        }
    }

    if ranked.is_empty() {
        return StatisticsReport::NoData;
    }

    ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));

    let mut groups: Vec<RankGroup> = Vec::new();
    for (completed, employee_id) in ranked {
        match groups.last_mut() {
            Some(group) if group.completed == completed => {
                group.employee_ids.push(employee_id.to_string());
            }
            _ => groups.push(RankGroup {
                completed,
                employee_ids: vec![employee_id.to_string()],
            }),
        }
    }

    StatisticsReport::Ranked { groups, skipped }
}

impl fmt::Display for StatisticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (groups, skipped) = match self {
            StatisticsReport::NoData => return f.write_str(NO_DATA_MESSAGE),
            StatisticsReport::Ranked { groups, skipped } => (groups, *skipped),
        };

        writeln!(f, "{REPORT_TITLE}")?;
        for group in groups {
            writeln!(f)?;
            writeln!(f, "Rank {}:", group.completed)?;
            for employee_id in &group.employee_ids {
                writeln!(f, "  Employee ID: {employee_id}")?;
            }
            writeln!(f)?;
            writeln!(
                f,
                "Total Employees with {} Completed: {}",
                group.completed,
                group.employee_ids.len()
            )?;
        }
        if skipped > 0 {
            writeln!(f)?;
            writeln!(
                f,
                "Skipped {skipped} record(s) with an invalid completed count."
            )?;
        }
        Ok(())
    }
}
