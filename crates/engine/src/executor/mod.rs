//! Batch execution: runs the node once per input item.
//!
//! - `parameters::ParameterSource` abstracts how parameter values are read
//! - [`BatchExecutor`] resolves parameters, dispatches the prompt request and
//!   flattens array responses into one output item per element
//! - failures are isolated per item in continue-on-fail mode, otherwise the
//!   first failure aborts the batch with its item index attached
//!
//! Items are processed strictly in order; the only suspension points are the
//! credential lookup and the API call of the current item.

pub mod parameters;

use std::sync::Arc;

use genum_api::PromptApi;
use genum_types::{CREDENTIAL_NAME, InputItem, Operation, OutputItem, Resource, RunRequestBody, defaults};
use serde_json::Value;
use tracing::{Instrument, debug, info_span, warn};

pub use parameters::{NodeParameters, ParameterSource};

use crate::credentials::CredentialProvider;
use crate::error::{ExecutionError, NodeOperationError};
use crate::resolve::{parse_prompt_id, resolve_reference};

/// One invocation of the node: the input items plus how to read parameters.
#[derive(Debug, Clone, Default)]
pub struct Batch<P = NodeParameters> {
    pub items: Vec<InputItem>,
    pub parameters: P,
    /// Record failures on the failing item instead of aborting the batch.
    pub continue_on_fail: bool,
}

impl<P: ParameterSource> Batch<P> {
    pub fn new(items: Vec<InputItem>, parameters: P) -> Self {
        Self {
            items,
            parameters,
            continue_on_fail: false,
        }
    }

    pub fn continue_on_fail(mut self, enabled: bool) -> Self {
        self.continue_on_fail = enabled;
        self
    }
}

/// Executes batches against a prompt API with credentials from a provider.
#[derive(Clone)]
pub struct BatchExecutor {
    api: Arc<dyn PromptApi>,
    credentials: Arc<dyn CredentialProvider>,
}

impl BatchExecutor {
    pub fn new(api: Arc<dyn PromptApi>, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self { api, credentials }
    }

    /// Run every item of `batch` in order and collect the output items.
    pub async fn execute<P: ParameterSource>(&self, batch: &Batch<P>) -> Result<Vec<OutputItem>, NodeOperationError> {
        let mut output = Vec::new();

        for (item_index, item) in batch.items.iter().enumerate() {
            let span = info_span!("batch_item", item_index, batch_size = batch.items.len());
            match self.execute_item(&batch.parameters, item_index).instrument(span).await {
                Ok(response) => {
                    let emitted = flatten_response(response);
                    debug!(item_index, emitted = emitted.len(), "item completed");
                    output.extend(emitted);
                }
                Err(error) if batch.continue_on_fail => {
                    warn!(item_index, error = %error, "item failed; continuing with next item");
                    output.push(OutputItem::failed(item, error.to_item_error(item_index), item_index));
                }
                Err(error) => {
                    warn!(item_index, error = %error, "item failed; aborting batch");
                    return Err(NodeOperationError::new(error, item_index));
                }
            }
        }

        Ok(output)
    }

    async fn execute_item<P: ParameterSource>(&self, parameters: &P, item_index: usize) -> Result<Value, ExecutionError> {
        // Resource and operation are node-wide settings and always come from the first item.
        let resource = parameters.string_parameter(parameters::RESOURCE, 0, defaults::RESOURCE)?;
        let operation = parameters.string_parameter(parameters::OPERATION, 0, defaults::OPERATION)?;

        match (resource.parse::<Resource>(), operation.parse::<Operation>()) {
            (Ok(Resource::Prompt), Ok(Operation::GetAll)) => {
                let credential = self.credentials.credentials(CREDENTIAL_NAME).await?;
                debug!(item_index, "listing prompts");
                Ok(self.api.list_prompts(&credential.api_token).await?)
            }
            (Ok(Resource::Prompt), Ok(Operation::Run)) => {
                let body = build_run_request(parameters, item_index)?;
                let credential = self.credentials.credentials(CREDENTIAL_NAME).await?;
                debug!(item_index, prompt_id = body.id, "running prompt");
                Ok(self.api.run_prompt(&credential.api_token, &body).await?)
            }
            _ => Err(ExecutionError::UnsupportedOperation { resource, operation }),
        }
    }
}

/// Build the run request for one item from its parameters.
pub fn build_run_request<P: ParameterSource + ?Sized>(parameters: &P, item_index: usize) -> Result<RunRequestBody, ExecutionError> {
    let reference = parameters.reference_parameter(parameters::PROMPT_ID, item_index)?;
    let prompt_id = parse_prompt_id(&resolve_reference(&reference))?;
    let question = parameters.string_parameter(parameters::QUESTION, item_index, defaults::QUESTION)?;
    let memory_key = parameters.string_parameter(parameters::MEMORY_KEY, item_index, defaults::MEMORY_KEY)?;
    let productive = parameters.bool_parameter(parameters::PRODUCTIVE, item_index, defaults::PRODUCTIVE)?;

    Ok(RunRequestBody::new(prompt_id, question, productive, &memory_key))
}

/// One output item per array element, or one wrapping the whole response.
fn flatten_response(response: Value) -> Vec<OutputItem> {
    match response {
        Value::Array(elements) => elements.into_iter().map(OutputItem::new).collect(),
        other => vec![OutputItem::new(other)],
    }
}
