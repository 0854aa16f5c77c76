//! Prompt listing for option pickers.
//!
//! Modules:
//! - `normalize`: response shape classification and search filtering
//! - `options`: option loader and searchable list provider

mod normalize;
mod options;

pub use normalize::{ResponseShape, classify_response, normalize_response};
pub use options::{PromptOptionsProvider, load_prompt_options, search_prompt_options};
