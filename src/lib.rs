/*!
 * # metatube-translator
 *
 * Translates movie and actor metadata into a target language through the
 * translate endpoint of a MetaTube server.
 *
 * ## Features
 *
 * - Translate movie titles, summaries, directors, genres, makers, labels and
 *   series, and actor names
 * - Supported engines: Baidu, Google, Google (free), DeepL, OpenAI
 * - One process-wide gate: a single request in flight at a time, spaced by
 *   the engine's minimum delay
 * - Up to five attempts per request; cancellation is never retried
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `app_controller`: Config bootstrap and record file translation
 * - `metadata`: Movie and actor records
 * - `translation`: Translation pipeline:
 *   - `translation::core`: Field-level orchestration
 *   - `translation::gate`: Process-wide request gate
 *   - `translation::retry`: Bounded retry executor
 *   - `translation::parameters`: Engine credentials and rate limits
 * - `providers`: Translation clients:
 *   - `providers::metatube`: MetaTube HTTP client
 *   - `providers::mock`: Scripted client for tests
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod metadata;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::{Config, TranslationConfig, TranslationEngine, TranslationMode};
pub use errors::{AppError, ProviderError, TranslationError};
pub use metadata::{ActorInfo, MovieInfo};
pub use providers::{TranslationClient, TranslationResult};
pub use translation::{RetryExecutor, TranslationGate, TranslationService};
