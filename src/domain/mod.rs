pub mod card;
pub mod error;
pub mod stack;
pub mod staleness;

pub use card::Card;
pub use error::DeckError;
pub use stack::{NewStack, Stack, StackPatch, StackWithCards};
pub use staleness::{stack_card_colors, staleness_color};
