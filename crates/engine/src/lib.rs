//! # Genum Engine
//!
//! The Genum Engine turns declarative node parameters into authenticated calls
//! against the Genum prompt API and maps the responses back onto the host's
//! item model.
//!
//! ## Key Features
//!
//! - **Reference resolution**: raw prompt IDs and list selections collapse to one identifier
//! - **Request execution**: list and run operations with bearer-token authentication
//! - **Response normalization**: `[...]` and `{ "prompts": [...] }` listings read the same way
//! - **Per-item error isolation**: continue-on-fail or fail-fast with item attribution
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use genum_api::GenumClient;
//! use genum_engine::{Batch, BatchExecutor, KeystoreCredentials, NodeParameters};
//! use genum_types::InputItem;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let executor = BatchExecutor::new(Arc::new(GenumClient::from_env()?), Arc::new(KeystoreCredentials));
//! let parameters = NodeParameters::new()
//!     .with("operation", "run")
//!     .with("promptId", "150")
//!     .with("question", "Hi");
//! let output = executor.execute(&Batch::new(vec![InputItem::default()], parameters)).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **`resolve`**: resource reference resolution and prompt ID parsing
//! - **`provider`**: response normalization and option/search providers
//! - **`credentials`**: credential provider trait and implementations
//! - **`executor`**: batch execution over input items

pub mod credentials;
pub mod error;
pub mod executor;
pub mod provider;
pub mod resolve;

#[cfg(test)]
mod testing;

pub use credentials::{CredentialError, CredentialProvider, KeystoreCredentials, StaticCredentials};
pub use error::{ExecutionError, NodeOperationError};
pub use executor::{Batch, BatchExecutor, NodeParameters, ParameterSource, build_run_request};
pub use provider::{PromptOptionsProvider, ResponseShape, classify_response, load_prompt_options, normalize_response, search_prompt_options};
pub use resolve::{parse_prompt_id, resolve_reference};
