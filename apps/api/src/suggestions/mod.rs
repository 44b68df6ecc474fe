// Suggestion review: dispatch of approved suggestions onto the editor, and the
// pending → accepted / dismissed state machine with its navigation cursor.

pub mod applier;
pub mod review;

pub use applier::Dispatch;
pub use review::{ReviewError, ReviewTally, SuggestionQueue};
