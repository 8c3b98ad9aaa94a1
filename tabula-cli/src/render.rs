//! Terminal rendering for timetable query results.
//!
//! Extension trait adding colored output to tabula-core types using owo_colors.

use owo_colors::OwoColorize;
use tabula_core::{DaySchedule, NextLesson, Period, PeriodSlot, ScheduleResult};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for DaySchedule {
    fn render(&self) -> String {
        let mut lines = vec![format!(
            "{} {}",
            self.day.to_string().bold(),
            format!("(Week {})", self.week).dimmed()
        )];

        if let Some(from) = self.substituted_from {
            lines.push(format!("  {}", format!("showing Week {from} classes").yellow()));
        }

        if self.is_empty() {
            lines.push(format!("  {}", "No classes".dimmed()));
            return lines.join("\n");
        }

        for period in Period::all() {
            let range = PeriodSlot::new(self.day, period).range_label();
            let label = match self.get(period) {
                Some(class) => class.label.clone(),
                None => "free".dimmed().to_string(),
            };
            lines.push(format!("  {} {}  {}", period.ordinal().cyan(), range.dimmed(), label));
        }

        lines.join("\n")
    }
}

impl Render for ScheduleResult {
    fn render(&self) -> String {
        let heading = match self {
            ScheduleResult::Weekday {
                is_next_day: true, ..
            } => "School's out. Tomorrow:".to_string(),
            ScheduleResult::Weekday { .. } => "Today:".to_string(),
            ScheduleResult::Weekend { day, week, .. } => {
                format!("It's {day:?} of Week {week}. Next up:")
            }
        };

        format!("{}\n{}", heading.green(), self.shown_schedule().render())
    }
}

impl Render for NextLesson {
    fn render(&self) -> String {
        let when = if self.today {
            "Next".to_string()
        } else {
            format!("Next ({})", self.day)
        };

        format!(
            "{} {}  {} {}",
            format!("{when}:").green(),
            self.class.label.bold(),
            format!("P{}", self.period.ordinal()).cyan(),
            self.slot().range_label().dimmed()
        )
    }
}
