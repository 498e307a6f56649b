//! Pure list rendering.
//!
//! Rendering happens in two steps. [`render_trips`] and [`render_errands`]
//! turn records into a [`ListView`], a description of the cards to show with
//! every field already formatted. [`ListView::to_html`] and
//! [`ListView::to_plain`] then produce markup or terminal text. Neither step
//! touches storage or any display surface.

mod format;
mod html;
mod text;

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::model::{Errand, Trip};

pub use format::{escape_html, format_amount, format_date};

/// Which list a view belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// The trip list.
    Trips,
    /// The errand list.
    Errands,
}

impl ListKind {
    /// Element id of the list container.
    #[must_use]
    pub fn container_id(self) -> &'static str {
        match self {
            Self::Trips => "trips-container",
            Self::Errands => "errands-container",
        }
    }

    /// Text shown instead of the list when nothing matches.
    #[must_use]
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Trips => "No trips planned yet. Add your first trip above!",
            Self::Errands => "No errands found.",
        }
    }

    fn class_prefix(self) -> &'static str {
        match self {
            Self::Trips => "trip",
            Self::Errands => "errand",
        }
    }

    fn card_class(self) -> &'static str {
        match self {
            Self::Trips => "trip-card",
            Self::Errands => "errand-item",
        }
    }

    fn title_class(self) -> &'static str {
        match self {
            Self::Trips => "trip-destination",
            Self::Errands => "errand-title",
        }
    }
}

/// Which errands to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrandFilter {
    /// Every errand.
    #[default]
    All,
    /// Errands not yet completed.
    Pending,
    /// Completed errands.
    Completed,
}

impl ErrandFilter {
    /// Whether `errand` passes this filter.
    #[must_use]
    pub fn matches(self, errand: &Errand) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !errand.completed,
            Self::Completed => errand.completed,
        }
    }

    /// The errands that pass this filter, in their original order.
    #[must_use]
    pub fn apply(self, errands: &[Errand]) -> Vec<&Errand> {
        errands.iter().filter(|e| self.matches(e)).collect()
    }

    /// Lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for ErrandFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrandFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            other => Err(Error::validation(
                "filter",
                format!("Unknown filter '{other}' (expected all, pending or completed)"),
            )),
        }
    }
}

/// Rendering settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Symbol printed before budgets.
    pub currency_symbol: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
        }
    }
}

/// One line of detail on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLine {
    /// CSS class of the line.
    pub class: &'static str,
    /// Display text, unescaped.
    pub text: String,
}

/// A rendered record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Identifier of the record behind the card.
    pub id: String,
    /// Heading text, unescaped.
    pub title: String,
    /// Whether the record is marked done.
    pub completed: bool,
    /// Small label next to the heading (errand priority).
    pub badge: Option<String>,
    /// Detail lines in display order.
    pub lines: Vec<CardLine>,
    /// Label of the completion toggle, for records that have one.
    pub toggle_label: Option<&'static str>,
}

/// What a list container should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListContent {
    /// Nothing to show; the placeholder is displayed.
    Empty,
    /// Cards in display order.
    Cards(Vec<Card>),
}

/// The full content of one list container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    /// Which list this is.
    pub kind: ListKind,
    /// The content.
    pub content: ListContent,
}

impl ListView {
    fn from_cards(kind: ListKind, cards: Vec<Card>) -> Self {
        let content = if cards.is_empty() {
            ListContent::Empty
        } else {
            ListContent::Cards(cards)
        };
        Self { kind, content }
    }

    /// The cards shown, empty for the placeholder.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        match &self.content {
            ListContent::Empty => &[],
            ListContent::Cards(cards) => cards,
        }
    }

    /// Whether the placeholder is shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self.content, ListContent::Empty)
    }

    /// Identifiers of the records shown, in order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.cards().iter().map(|c| c.id.as_str()).collect()
    }

    /// Render the container content as HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        html::list(self)
    }

    /// Render the container content as terminal text.
    #[must_use]
    pub fn to_plain(&self) -> String {
        text::list(self)
    }
}

/// Build the trip list.
#[must_use]
pub fn render_trips(trips: &[Trip], options: &RenderOptions) -> ListView {
    let cards = trips.iter().map(|trip| trip_card(trip, options)).collect();
    ListView::from_cards(ListKind::Trips, cards)
}

/// Build the errand list for `filter`.
#[must_use]
pub fn render_errands(errands: &[Errand], filter: ErrandFilter) -> ListView {
    let cards = filter.apply(errands).into_iter().map(errand_card).collect();
    ListView::from_cards(ListKind::Errands, cards)
}

fn trip_card(trip: &Trip, options: &RenderOptions) -> Card {
    let mut lines = vec![CardLine {
        class: "trip-dates",
        text: format!(
            "📅 {} - {}",
            format_date(trip.start_date),
            format_date(trip.end_date)
        ),
    }];
    if trip.has_budget() {
        lines.push(CardLine {
            class: "trip-budget",
            text: format!(
                "💰 Budget: {}{}",
                options.currency_symbol,
                format_amount(trip.budget)
            ),
        });
    }
    if !trip.notes.is_empty() {
        lines.push(CardLine {
            class: "trip-notes",
            text: trip.notes.clone(),
        });
    }

    Card {
        id: trip.id.clone(),
        title: trip.destination.clone(),
        completed: false,
        badge: None,
        lines,
        toggle_label: None,
    }
}

fn errand_card(errand: &Errand) -> Card {
    let mut lines = Vec::new();
    if !errand.description.is_empty() {
        lines.push(CardLine {
            class: "errand-description",
            text: errand.description.clone(),
        });
    }
    if let Some(due) = errand.due_date {
        lines.push(CardLine {
            class: "errand-due-date",
            text: format!("📅 Due: {}", format_date(due)),
        });
    }

    Card {
        id: errand.id.clone(),
        title: errand.title.clone(),
        completed: errand.completed,
        badge: Some(errand.priority.to_string()),
        lines,
        toggle_label: Some(if errand.completed {
            "Mark Incomplete"
        } else {
            "Mark Complete"
        }),
    }
}
