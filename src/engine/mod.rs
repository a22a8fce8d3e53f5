// Engine module: the code-matching core.
//
// Everything here is pure and synchronous:
// - `normalize`: raw text → canonical comparison form
// - `distance`: edit distance between canonical forms
// - `closeness`: near-miss classification and candidate ranking
// - `resolver`: catalog lookup producing a verdict
// - `attempts`/`hints`: failure pacing and hint selection
//
// Persistence and presentation live in the `session` and `repl` modules.

pub mod attempts;
pub mod catalog;
pub mod closeness;
pub mod distance;
pub mod hints;
pub mod normalize;
pub mod resolver;

pub use attempts::{AttemptTracker, CloseMatchPolicy, FailureOutcome, MAX_FAILED_ATTEMPTS};
pub use catalog::{
    AchievementDef, Catalog, CatalogError, CatalogFile, CatalogResult, CodeEntry, Content,
};
pub use closeness::{is_close, rank_candidates};
pub use distance::distance;
pub use hints::{pick_hint, Hint, FALLBACK_HINT};
pub use normalize::{clean_input, normalize};
pub use resolver::{resolve, Verdict};
