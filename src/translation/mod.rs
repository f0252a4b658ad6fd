/*!
 * Metadata translation through an external translation service.
 *
 * This module contains the translation pipeline, split into:
 *
 * - `core`: field-level orchestration over movie and actor records
 * - `gate`: process-wide gate serializing and pacing every request
 * - `retry`: bounded retry around each request
 * - `parameters`: engine-specific credentials and minimum delays
 */

// Re-export main types for easier usage
pub use self::core::{
    AUTO_LANGUAGE_CODE, FieldPolicy, JAPANESE_LANGUAGE_CODE, MOVIE_FIELDS, MovieField,
    TranslationService,
};
pub use self::gate::TranslationGate;
pub use self::parameters::ProviderParameters;
pub use self::retry::{DEFAULT_MAX_ATTEMPTS, RetryExecutor};

// Submodules
pub mod core;
pub mod gate;
pub mod parameters;
pub mod retry;
