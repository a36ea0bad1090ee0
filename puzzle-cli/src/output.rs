//! Output formatting for day outputs

use chrono::TimeDelta;
use itertools::Itertools;
use puzzle_solver::visual::{ChartValue, EntryKind, Segment, TextRow, TreeLine};
use puzzle_solver::{Answer, DayOutput, Visualization};

/// Output formatter for day outputs
pub struct OutputFormatter {
    quiet: bool,
    visualize: bool,
    start_time: std::time::Instant,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(quiet: bool, visualize: bool) -> Self {
        Self {
            quiet,
            visualize,
            start_time: std::time::Instant::now(),
        }
    }

    /// Format and print a single day
    pub fn print_output(&self, output: &DayOutput) {
        if self.quiet {
            self.print_quiet(output);
        } else {
            self.print_full(output);
        }
        if self.visualize && !output.visualizations.is_empty() {
            for visualization in &output.visualizations {
                println!("{}", render_visualization(visualization));
            }
        }
    }

    /// Print in quiet mode (just the answers)
    fn print_quiet(&self, output: &DayOutput) {
        for answer in [&output.part1, &output.part2].into_iter().flatten() {
            println!("{}", answer);
        }
        if output.has_warning() {
            eprintln!("Error: {}", output.warning);
        }
    }

    /// Print full output with timing
    fn print_full(&self, output: &DayOutput) {
        let prefix = format!("{}/{:02}", output.year, output.day);

        if output.has_warning() {
            eprintln!("{}: Warning - {}", prefix, output.warning);
            return;
        }
        if output.part1.is_none() && output.part2.is_none() {
            println!("{}: no input", prefix);
            return;
        }

        for part in 1..=2 {
            if let Some(answer) = output.answer(part) {
                println!("{} Part {}: {}", prefix, part, format_answer(answer));
            }
        }
        if let Some(elapsed) = output.elapsed {
            println!("{} computed in {}", prefix, format_duration(elapsed));
        }
    }

    /// Print a summary after all outputs
    /// Shows both total compute time (sum of elapsed) and actual wall-clock time
    pub fn print_summary(&self, outputs: &[DayOutput]) {
        if self.quiet {
            return;
        }

        let failures = outputs.iter().filter(|o| o.has_warning()).count();
        let computed = outputs.iter().filter(|o| o.elapsed.is_some()).count();
        let idle = outputs.len() - failures - computed;

        let total_compute_time: TimeDelta = outputs.iter().filter_map(|o| o.elapsed).sum();
        let elapsed_time = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!(
            "Days: {} computed, {} failed, {} without input",
            computed, failures, idle
        );
        println!("Total compute time: {}", format_duration(total_compute_time));
        println!(
            "Elapsed wall-clock time: {}",
            format_std_duration(elapsed_time)
        );
        if !elapsed_time.is_zero() {
            let total_compute_secs =
                total_compute_time.num_microseconds().unwrap_or(0) as f64 / 1_000_000.0;
            let speedup = total_compute_secs / elapsed_time.as_secs_f64();
            println!("Speedup factor: {:.2}x", speedup);
        }
    }
}

/// Multi-line text answers start on their own line
fn format_answer(answer: &Answer) -> String {
    match answer {
        Answer::Text(text) if text.contains('\n') => format!("\n{}", text),
        other => other.to_string(),
    }
}

/// Render a visualization as plain text: a summary line, then the payload
/// for the kinds that read well in a terminal
pub fn render_visualization(visualization: &Visualization) -> String {
    let summary = format!("  [{}]", visualization.summary());
    let body = match visualization {
        Visualization::Pixels(grid) => grid.render(|&lit| if lit { '#' } else { '.' }),
        Visualization::Text(rows) => render_text(rows),
        Visualization::Tree(lines) => render_tree(lines),
        Visualization::Chart(chart) => chart
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let values = chart
                    .series
                    .iter()
                    .filter_map(|s| s.values.get(i))
                    .map(|value| match value {
                        ChartValue::Value(v) => v.to_string(),
                        ChartValue::Range(start, end) => format!("{}-{}", start, end),
                    })
                    .join(" | ");
                format!("{}: {}", label, values)
            })
            .join("\n"),
        Visualization::Heatmap(_) | Visualization::Animation { .. } => String::new(),
    };

    if body.is_empty() {
        summary
    } else {
        format!("{}\n{}", summary, body)
    }
}

fn render_text(rows: &[TextRow]) -> String {
    let mut lines = Vec::new();
    let mut current_group = None;
    for row in rows {
        if let Some(group) = &row.group
            && current_group != Some(group)
        {
            lines.push(format!("{}:", group));
            current_group = Some(group);
        }
        lines.push(format!("  {}", row.segments.iter().map(render_segment).join("")));
    }
    lines.join("\n")
}

fn render_segment(segment: &Segment) -> String {
    if segment.emphasis {
        format!("[{}]", segment.text)
    } else {
        segment.text.clone()
    }
}

fn render_tree(lines: &[TreeLine]) -> String {
    lines
        .iter()
        .map(|line| {
            let kind = match line.kind {
                EntryKind::Directory => "dir",
                EntryKind::File => "file",
            };
            format!(
                "{}- {} ({}, size={})",
                "  ".repeat(line.depth),
                line.name,
                kind,
                line.size
            )
        })
        .join("\n")
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use puzzle_solver::visual::{Chart, Grid, Series};

    #[test]
    fn test_format_duration_units() {
        assert_eq!(format_duration(TimeDelta::microseconds(250)), "250µs");
        assert_eq!(format_duration(TimeDelta::microseconds(1500)), "1.50ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(2500)), "2.50s");
        assert_eq!(format_duration(TimeDelta::microseconds(-10)), "-10µs");
    }

    #[test]
    fn test_multiline_answer_starts_on_new_line() {
        assert_eq!(format_answer(&Answer::Number(42)), "42");
        assert_eq!(format_answer(&Answer::Text("CMZ".into())), "CMZ");
        assert_eq!(format_answer(&Answer::Text("#.\n.#".into())), "\n#.\n.#");
    }

    #[test]
    fn test_render_pixels() {
        let grid = Grid::from_fn(2, 2, |row, col| row == col);
        assert_eq!(
            render_visualization(&Visualization::Pixels(grid)),
            "  [pixels (2x2)]\n#.\n.#"
        );
    }

    #[test]
    fn test_render_chart() {
        let chart = Chart {
            title: "Overlaps".to_string(),
            labels: vec!["Pair 1".to_string()],
            series: vec![
                Series {
                    label: "First".to_string(),
                    values: vec![ChartValue::Range(2, 8)],
                },
                Series {
                    label: "Second".to_string(),
                    values: vec![ChartValue::Range(3, 7)],
                },
            ],
        };
        assert_eq!(
            render_visualization(&Visualization::Chart(chart)),
            "  [chart \"Overlaps\" (1 bars x 2 series)]\nPair 1: 2-8 | 3-7"
        );
    }

    #[test]
    fn test_render_text_groups_once() {
        let row = |group: &str, shared: &str| TextRow {
            group: Some(group.to_string()),
            segments: vec![Segment::plain("ab"), Segment::emphasised(shared)],
        };
        let rows = vec![row("Group r", "r"), row("Group r", "r"), row("Group Z", "Z")];
        assert_eq!(
            render_text(&rows),
            "Group r:\n  ab[r]\n  ab[r]\nGroup Z:\n  ab[Z]"
        );
    }

    #[test]
    fn test_render_tree_indents_by_depth() {
        let lines = vec![
            TreeLine {
                depth: 0,
                name: "/".to_string(),
                kind: EntryKind::Directory,
                size: 14,
            },
            TreeLine {
                depth: 1,
                name: "b.txt".to_string(),
                kind: EntryKind::File,
                size: 14,
            },
        ];
        assert_eq!(
            render_tree(&lines),
            "- / (dir, size=14)\n  - b.txt (file, size=14)"
        );
    }
}
