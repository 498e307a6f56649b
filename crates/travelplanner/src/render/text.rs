use std::fmt::Write;

use super::{ListContent, ListView};

pub(super) fn list(view: &ListView) -> String {
    let cards = match &view.content {
        ListContent::Empty => return format!("{}\n", view.kind.placeholder()),
        ListContent::Cards(cards) => cards,
    };

    let mut out = String::new();
    for card in cards {
        let mark = match (card.toggle_label.is_some(), card.completed) {
            (false, _) => "",
            (true, true) => "[x] ",
            (true, false) => "[ ] ",
        };
        let _ = write!(out, "{mark}{}", card.title);
        if let Some(badge) = &card.badge {
            let _ = write!(out, " ({badge})");
        }
        let _ = writeln!(out, "  #{}", card.id);
        for line in &card.lines {
            let _ = writeln!(out, "    {}", line.text);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::super::{render_errands, render_trips, ErrandFilter, RenderOptions};
    use crate::model::{Errand, Priority, Trip};

    #[test]
    fn test_trip_lines() {
        let trip = Trip {
            id: "100".to_string(),
            destination: "Paris".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            budget: 1500.0,
            notes: String::new(),
            created_at: Utc::now(),
        };
        let text = render_trips(&[trip], &RenderOptions::default()).to_plain();
        assert_eq!(
            text,
            "Paris  #100\n    📅 Jun 1, 2025 - Jun 10, 2025\n    💰 Budget: ₹1,500\n"
        );
    }

    #[test]
    fn test_errand_checkbox() {
        let errand = Errand {
            id: "5".to_string(),
            title: "Buy milk".to_string(),
            description: String::new(),
            priority: Priority::Medium,
            due_date: None,
            completed: false,
            created_at: Utc::now(),
        };
        let text = render_errands(&[errand], ErrandFilter::All).to_plain();
        assert_eq!(text, "[ ] Buy milk (medium)  #5\n");
    }
}
