//! Translation collaborator for MultiLingo.
//!
//! The [`Translator`] trait is the seam the API server talks to. The
//! production implementation is [`HttpTranslator`], which calls the public
//! Google translate endpoint; [`MockTranslator`] serves canned results in
//! tests. [`TranslationCache`] memoizes results for the fast chat path.

pub mod batch;
pub mod cache;
pub mod client;
pub mod error;
pub mod languages;
pub mod mock;
pub mod types;

pub use batch::{MultiTranslation, translate_many};
pub use cache::{CacheKey, CacheStats, TranslationCache};
pub use client::{HttpTranslator, TranslatorConfig};
pub use error::{TranslateError, TranslateResult};
pub use languages::{language_name, normalize, supported_languages};
pub use mock::MockTranslator;
pub use types::{Detection, Translation, TranslationRequest, Translator};
