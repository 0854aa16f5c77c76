//! Shared type definitions for the Genum prompt integration.
//!
//! The types in this crate describe the data flowing between the host
//! runtime, the execution engine, and the remote prompt API:
//!
//! - [`Credential`]: bearer token material read from the credential store
//! - [`ResourceReference`]: a prompt identifier typed by hand or picked from a list
//! - [`PromptRecord`] and [`RunRequestBody`]: remote API payloads
//! - [`InputItem`] / [`OutputItem`]: the host's per-record item containers
//! - [`Resource`] / [`Operation`]: the node's resource and operation selectors

mod credential;
mod item;
mod node;
mod prompt;
mod reference;

pub use credential::{CREDENTIAL_NAME, Credential};
pub use item::{InputItem, ItemError, OutputItem};
pub use node::{Operation, ParseSelectorError, Resource, defaults};
pub use prompt::{ListOption, ListSearchResult, PromptRecord, RunRequestBody};
pub use reference::{RESOURCE_LOCATOR_TAG, ResourceLocator, ResourceReference};
