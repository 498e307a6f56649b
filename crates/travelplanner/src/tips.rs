//! Daily travel tip.

use chrono::{Datelike, NaiveDate};

/// The tip rotation.
pub const TIPS: [&str; 15] = [
    "Always pack a portable phone charger - you'll thank yourself later!",
    "Take photos of important documents and store them in a secure cloud folder.",
    "Learn a few basic phrases in the local language - locals appreciate the effort.",
    "Pack light! You'll likely buy souvenirs and need extra space on the way back.",
    "Research local customs and etiquette before visiting a new country.",
    "Keep a digital copy of your itinerary accessible offline.",
    "Always have some local currency in cash for emergencies.",
    "Take advantage of free walking tours in new cities.",
    "Pack a small first aid kit with basic medications.",
    "Download offline maps before traveling to areas with poor internet.",
    "Keep your passport and important documents in a secure, separate location.",
    "Take photos of your luggage before checking it in at the airport.",
    "Research local transportation options before arriving at your destination.",
    "Pack a universal adapter for international travel.",
    "Always inform your bank about your travel plans to avoid card blocks.",
];

/// The tip shown on `date`, chosen by day of month.
#[must_use]
pub fn tip_for(date: NaiveDate) -> &'static str {
    TIPS[date.day() as usize % TIPS.len()]
}
