//! Judge-side helpers: the rubric prompt, JSON recovery from free text and
//! score normalization.

mod extract;
mod normalize;
mod prompt;

pub use extract::extract_json_object;
pub use normalize::{normalize, normalize_text};
pub use prompt::{judge_prompt, JUDGE_SYSTEM_PROMPT};
