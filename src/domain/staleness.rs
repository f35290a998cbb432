use std::collections::HashMap;

use super::{Card, Stack};

const FRESH_CHANNEL: f64 = 255.0;
const STALE_CHANNEL: f64 = 178.0;

/// Background colour of a card by how long ago it changed relative to its siblings.
///
/// Goes from `#FFFFFF` for the newest timestamp to `#FFB2B2` for the oldest.
/// Timestamps outside `[oldest, newest]` are clamped onto the nearest end.
pub fn staleness_color(last_modified: i64, newest: i64, oldest: i64) -> String {
    if newest == oldest {
        return "#FFFFFF".into();
    }

    // widened so timestamps far outside the range cannot overflow
    let age = newest as i128 - last_modified as i128;
    let span = newest as i128 - oldest as i128;
    let staleness = age as f64 / span as f64;
    let staleness = staleness.clamp(0.0, 1.0);

    // red stays at 255, green and blue fade together
    let channel = (FRESH_CHANNEL - staleness * (FRESH_CHANNEL - STALE_CHANNEL)).round() as u8;

    format!("#{:02X}{:02X}{:02X}", 255u8, channel, channel)
}

/// Colours of the cards that belong to `stack`, keyed by card id.
/// Empty when the stack has the gradient switched off.
pub fn stack_card_colors<'a, I>(stack: &Stack, cards: I) -> HashMap<i64, String>
where
    I: IntoIterator<Item = &'a Card>,
{
    if !stack.staleness_gradient_enabled {
        return HashMap::new();
    }

    let cards: Vec<&Card> = cards
        .into_iter()
        .filter(|card| card.stack_id == stack.id)
        .collect();

    let Some(newest) = cards.iter().map(|card| card.last_modified).max() else {
        return HashMap::new();
    };
    let oldest = cards
        .iter()
        .map(|card| card.last_modified)
        .min()
        .unwrap_or(newest);

    cards
        .iter()
        .map(|card| (card.id, staleness_color(card.last_modified, newest, oldest)))
        .collect()
}
