//! Monospace text charts for the `!graph` command.
//!
//! Charts are plain strings meant to be wrapped in a code block so columns line up in
//! the Discord client.

use chrono::{Datelike, Timelike};

use crate::model::call_session::CallSession;

pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Heatmap shades from no activity to the busiest cell.
const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

const BAR_WIDTH: usize = 20;

/// Maximum number of entries shown in the emoji share chart.
pub const EMOJI_CHART_LIMIT: usize = 10;

/// Call sessions started per weekday (Monday first) and hour of day, in UTC.
pub type ActivityMatrix = [[u32; 24]; 7];

pub fn activity_matrix(sessions: &[CallSession]) -> ActivityMatrix {
    let mut matrix = [[0u32; 24]; 7];

    for session in sessions {
        let day = session.join_ts.weekday().num_days_from_monday() as usize;
        let hour = session.join_ts.hour() as usize;
        matrix[day][hour] += 1;
    }

    matrix
}

/// Renders the matrix as one row per weekday and one column per hour.
pub fn render_heatmap(matrix: &ActivityMatrix) -> String {
    let max = matrix.iter().flatten().copied().max().unwrap_or(0);

    let mut out = String::from("    ");
    for hour in (0..24).step_by(6) {
        out.push_str(&format!("{:<6}", hour));
    }
    out.push('\n');

    for (day, row) in WEEKDAYS.iter().zip(matrix.iter()) {
        out.push_str(day);
        out.push(' ');
        out.extend(row.iter().map(|count| shade(*count, max)));
        out.push('\n');
    }

    out.push_str(&format!("\nMost sessions in one hour slot: {}", max));
    out
}

fn shade(count: u32, max: u32) -> char {
    if count == 0 || max == 0 {
        return SHADES[0];
    }

    let top = SHADES.len() - 1;
    let level = (count as usize * top).div_ceil(max as usize);
    SHADES[level.clamp(1, top)]
}

/// Renders each entry's share of the listed total as a percentage bar.
///
/// Expects entries already sorted and truncated by the caller.
pub fn render_share_chart(entries: &[(String, u64)]) -> String {
    let total: u64 = entries.iter().map(|(_, count)| count).sum();
    if total == 0 {
        return String::new();
    }

    let label_width = label_width(entries);

    entries
        .iter()
        .map(|(label, count)| {
            let share = *count as f64 / total as f64;
            let filled = (share * BAR_WIDTH as f64).round() as usize;
            format!(
                "{:<width$} {:<bar$} {:>5.1}%",
                label,
                "█".repeat(filled),
                share * 100.0,
                width = label_width,
                bar = BAR_WIDTH,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders absolute counts as horizontal bars scaled to the largest value.
pub fn render_bar_chart(entries: &[(String, u64)]) -> String {
    let max = entries.iter().map(|(_, count)| *count).max().unwrap_or(0);
    if max == 0 {
        return String::new();
    }

    let label_width = label_width(entries);

    entries
        .iter()
        .map(|(label, count)| {
            let filled = ((*count as usize * BAR_WIDTH).div_ceil(max as usize)).max(1);
            format!(
                "{:<width$} {} {}",
                label,
                "█".repeat(filled),
                count,
                width = label_width,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn label_width(entries: &[(String, u64)]) -> usize {
    entries
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn session_at(day: u32, hour: u32) -> CallSession {
        CallSession {
            session_id: 1,
            user_id: 1,
            channel_id: 1,
            // 2026-03-02 is a Monday
            join_ts: Utc.with_ymd_and_hms(2026, 3, 2 + day, hour, 15, 0).unwrap(),
            leave_ts: None,
            duration: None,
        }
    }

    #[test]
    fn activity_matrix_is_monday_first() {
        let matrix = activity_matrix(&[session_at(0, 9), session_at(0, 9), session_at(6, 23)]);

        assert_eq!(matrix[0][9], 2);
        assert_eq!(matrix[6][23], 1);
        assert_eq!(matrix.iter().flatten().sum::<u32>(), 3);
    }

    #[test]
    fn heatmap_shades_busiest_cell_darkest() {
        let matrix = activity_matrix(&[session_at(0, 0), session_at(0, 0), session_at(1, 1)]);

        let chart = render_heatmap(&matrix);
        let lines: Vec<&str> = chart.lines().collect();

        assert!(lines[1].starts_with("Mon █"));
        assert!(lines[2].starts_with("Tue  ▒"));
        assert!(chart.ends_with("Most sessions in one hour slot: 2"));
    }

    #[test]
    fn empty_heatmap_renders_blank_rows() {
        let chart = render_heatmap(&[[0; 24]; 7]);

        assert_eq!(chart.lines().nth(1), Some(format!("Mon {}", " ".repeat(24)).as_str()));
    }

    #[test]
    fn share_chart_shows_percentages() {
        let chart = render_share_chart(&[(":)".to_string(), 3), ("<3".to_string(), 1)]);
        let lines: Vec<&str> = chart.lines().collect();

        assert!(lines[0].starts_with(":) ███████████████"));
        assert!(lines[0].ends_with("75.0%"));
        assert!(lines[1].ends_with("25.0%"));
    }

    #[test]
    fn bar_chart_scales_to_largest_count() {
        let chart = render_bar_chart(&[
            ("Caps Spam".to_string(), 10),
            ("Char Repetition".to_string(), 1),
        ]);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines[0], format!("Caps Spam       {} 10", "█".repeat(20)));
        assert_eq!(lines[1], "Char Repetition ██ 1");
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert!(render_share_chart(&[]).is_empty());
        assert!(render_bar_chart(&[]).is_empty());
    }
}
