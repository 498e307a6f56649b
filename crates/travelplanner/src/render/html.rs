use std::fmt::Write;

use super::{escape_html, Card, ListContent, ListKind, ListView};

pub(super) fn list(view: &ListView) -> String {
    match &view.content {
        ListContent::Empty => format!(
            r#"<p class="empty-state">{}</p>"#,
            escape_html(view.kind.placeholder())
        ),
        ListContent::Cards(cards) => {
            let mut out = String::new();
            for card in cards {
                card_html(&mut out, view.kind, card);
            }
            out
        }
    }
}

fn card_html(out: &mut String, kind: ListKind, card: &Card) {
    let prefix = kind.class_prefix();
    let id = escape_html(&card.id);

    let mut classes = kind.card_class().to_string();
    if card.completed {
        classes.push_str(" completed");
    }
    let _ = write!(out, r#"<div class="{classes}" data-id="{id}">"#);

    let title_class = if card.completed {
        format!("{} completed", kind.title_class())
    } else {
        kind.title_class().to_string()
    };
    let _ = write!(out, r#"<div class="{prefix}-header">"#);
    let _ = write!(
        out,
        r#"<h3 class="{title_class}">{}</h3></div>"#,
        escape_html(&card.title)
    );
    if let Some(badge) = &card.badge {
        let badge = escape_html(badge);
        let _ = write!(out, r#"<div class="{prefix}-priority priority-{badge}">{badge}</div>"#);
    }

    for line in &card.lines {
        let _ = write!(
            out,
            r#"<div class="{}">{}</div>"#,
            line.class,
            escape_html(&line.text)
        );
    }

    let _ = write!(out, r#"<div class="{prefix}-actions">"#);
    if let Some(label) = card.toggle_label {
        let style = if card.completed {
            "btn-secondary"
        } else {
            "btn-primary"
        };
        let _ = write!(
            out,
            r#"<button class="btn {style}" data-action="toggle" data-id="{id}">{label}</button>"#
        );
    }
    let _ = write!(
        out,
        r#"<button class="btn btn-edit" data-action="edit" data-id="{id}">Edit</button>"#
    );
    let _ = write!(
        out,
        r#"<button class="btn btn-danger" data-action="delete" data-id="{id}">Delete</button>"#
    );
    out.push_str("</div></div>");
}

#[cfg(test)]
mod tests {
    use super::super::{render_errands, render_trips, ErrandFilter, RenderOptions};
    use crate::model::{Errand, Priority, Trip};
    use chrono::{NaiveDate, Utc};

    fn hostile_trip() -> Trip {
        Trip {
            id: "1".to_string(),
            destination: "<script>alert(1)</script>".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            budget: 0.0,
            notes: r#"<img src=x onerror="boom">"#.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_user_text_is_escaped() {
        let html = render_trips(&[hostile_trip()], &RenderOptions::default()).to_html();
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("&quot;boom&quot;"));
    }

    #[test]
    fn test_trip_card_has_actions_keyed_by_id() {
        let html = render_trips(&[hostile_trip()], &RenderOptions::default()).to_html();
        assert!(html.contains(r#"class="trip-card" data-id="1""#));
        assert!(html.contains(r#"data-action="edit" data-id="1""#));
        assert!(html.contains(r#"data-action="delete" data-id="1""#));
        assert!(!html.contains(r#"data-action="toggle""#));
        assert!(!html.contains("trip-budget"));
    }

    #[test]
    fn test_completed_errand_markup() {
        let errand = Errand {
            id: "7".to_string(),
            title: "Buy milk".to_string(),
            description: String::new(),
            priority: Priority::Low,
            due_date: None,
            completed: true,
            created_at: Utc::now(),
        };
        let html = render_errands(&[errand], ErrandFilter::All).to_html();
        assert!(html.contains(r#"class="errand-item completed""#));
        assert!(html.contains(r#"<h3 class="errand-title completed">Buy milk</h3>"#));
        assert!(html.contains(r#"<div class="errand-priority priority-low">low</div>"#));
        assert!(html.contains(">Mark Incomplete</button>"));
        assert!(!html.contains("errand-due-date"));
    }

    #[test]
    fn test_pending_errand_title_class() {
        let errand = Errand {
            id: "8".to_string(),
            title: "Post letter".to_string(),
            description: String::new(),
            priority: Priority::High,
            due_date: None,
            completed: false,
            created_at: Utc::now(),
        };
        let html = render_errands(&[errand], ErrandFilter::All).to_html();
        assert!(html.contains(r#"<h3 class="errand-title">Post letter</h3>"#));
        assert!(html.contains(r#"<div class="errand-priority priority-high">high</div>"#));
    }

    #[test]
    fn test_errand_text_is_escaped() {
        let errand = Errand {
            id: "9".to_string(),
            title: "<b>Pay rent</b>".to_string(),
            description: r#"<a href="evil">landlord</a>"#.to_string(),
            priority: Priority::Medium,
            due_date: None,
            completed: false,
            created_at: Utc::now(),
        };
        let html = render_errands(&[errand], ErrandFilter::All).to_html();
        assert!(!html.contains("<b>"));
        assert!(!html.contains("<a "));
        assert!(html.contains("&lt;b&gt;Pay rent&lt;/b&gt;"));
        assert!(html.contains("&lt;a href=&quot;evil&quot;&gt;landlord&lt;/a&gt;"));
    }

    #[test]
    fn test_empty_state_markup() {
        let html = render_errands(&[], ErrandFilter::Pending).to_html();
        assert_eq!(html, r#"<p class="empty-state">No errands found.</p>"#);
    }
}
