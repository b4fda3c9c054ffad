//! Text understanding core for MultiLingo.
//!
//! Provides string metrics (`analysis`), the natural-language filter
//! parser behind `/strings/filter-by-natural-language` (`filter`), the
//! chat intent classifier (`intent`), and the reply composer used by the
//! chat endpoints (`compose`). Everything here is pure and synchronous:
//! no I/O, no shared state.

pub mod analysis;
pub mod compose;
pub mod error;
pub mod filter;
pub mod intent;

pub use analysis::{StringProperties, analyze};
pub use compose::{ChatOutcome, DetectionSummary, ResponseComposer, TranslationSummary};
pub use error::{MissingContext, QueryError, QueryResult};
pub use filter::{FilterPredicate, example_queries, parse_query};
pub use intent::{ChatIntent, ConversationContext, IntentClassifier, IntentKind};
