//! Translation resolution and session cache
//!
//! Resolution order for a (verse, language) pair:
//!
//! 1. built-in plain translation authored with the verse
//! 2. authored three-part payload
//! 3. session cache
//! 4. one request to the external provider, cached on success
//!
//! Results that arrive for a pair that is no longer active are dropped.

mod cache;
mod resolver;

pub use cache::TranslationCache;
pub use resolver::{
    Completion, Resolution, ResolvedTranslation, Ticket, TranslationRequest, TranslationResolver,
    TranslationSource, TranslationState,
};
