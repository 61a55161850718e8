use prettytable::{Cell, Row, Table};

use crate::solve::outcome::Analytics;

/// Renders an [`Analytics`] record as a two-column table, for batch runners
/// that want a readable per-puzzle report.
pub fn render_analytics_table(analytics: &Analytics) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

    let rows: Vec<(&str, String)> = vec![
        ("Variables", analytics.variable_count.to_string()),
        ("Bool variables", analytics.bool_variable_count.to_string()),
        ("Constraints", analytics.constraint_count.to_string()),
        ("Conflicts", analytics.conflicts.to_string()),
        ("Branches", analytics.branches.to_string()),
        (
            "Build time (ms)",
            format!("{:.2}", analytics.build_time.as_secs_f64() * 1000.0),
        ),
        (
            "CPU time (ms)",
            format!("{:.2}", analytics.cpu_time.as_secs_f64() * 1000.0),
        ),
        (
            "Wall time (ms)",
            format!("{:.2}", analytics.wall_time.as_secs_f64() * 1000.0),
        ),
    ];

    for (metric, value) in rows {
        table.add_row(Row::new(vec![Cell::new(metric), Cell::new(&value)]));
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::render_analytics_table;
    use crate::solve::outcome::Analytics;

    #[test]
    fn table_lists_every_metric() {
        let analytics = Analytics {
            variable_count: 81,
            bool_variable_count: 0,
            constraint_count: 27,
            conflicts: 4,
            branches: 12,
            build_time: Duration::from_millis(3),
            cpu_time: Duration::from_millis(20),
            wall_time: Duration::from_millis(21),
        };
        let rendered = render_analytics_table(&analytics);
        for needle in ["Variables", "81", "Constraints", "27", "Conflicts", "4"] {
            assert!(rendered.contains(needle), "missing {needle} in:\n{rendered}");
        }
    }
}
