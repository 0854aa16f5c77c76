mod input;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use genum_api::GenumClient;
use genum_engine::{
    Batch, BatchExecutor, CredentialProvider, KeystoreCredentials, NodeParameters, PromptOptionsProvider, StaticCredentials,
    executor::parameters,
};
use genum_types::{CREDENTIAL_NAME, InputItem, Operation};
use genum_util::keystore::{API_TOKEN_SECRET, remove_secret, store_secret};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "genum", version, about = "Run Genum prompts as pipeline steps")]
struct Cli {
    /// API base URL (defaults to GENUM_API_BASE or https://api.genum.ai)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Bearer token to use instead of the configured credential store
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List, search, or run prompts
    #[command(subcommand)]
    Prompts(PromptsCommand),
    /// Run the node over a batch of input items
    Execute(ExecuteArgs),
    /// Manage the stored API token
    #[command(subcommand)]
    Credentials(CredentialsCommand),
}

#[derive(Debug, Subcommand)]
enum PromptsCommand {
    /// Print prompts as name/value options
    List {
        /// Keep prompts whose name or ID contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Run one prompt
    Run(RunArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Prompt ID, or a resource locator as JSON
    #[arg(long)]
    prompt_id: String,
    #[arg(long, default_value = "")]
    question: String,
    #[arg(long, default_value = "")]
    memory_key: String,
    /// Use the committed prompt version
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    productive: bool,
}

#[derive(Debug, Args)]
struct ExecuteArgs {
    /// JSON file with input items, or `-` for stdin
    #[arg(long)]
    input: PathBuf,
    /// JSON file with `batch` and per-item `items` parameters
    #[arg(long)]
    params: Option<PathBuf>,
    /// Override the batch operation (`getAll` or `run`)
    #[arg(long)]
    operation: Option<Operation>,
    /// Record item failures in the output instead of aborting
    #[arg(long)]
    continue_on_fail: bool,
}

#[derive(Debug, Subcommand)]
enum CredentialsCommand {
    /// Check the token against the API
    Test,
    /// Save a token in the OS keychain
    Store {
        #[arg(value_name = "TOKEN")]
        api_token: String,
    },
    /// Delete the token from the OS keychain
    Remove,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    debug!(command = ?cli.command, "parsed command line");

    match &cli.command {
        Command::Prompts(PromptsCommand::List { search }) => list_prompts(&cli, search.as_deref()).await,
        Command::Prompts(PromptsCommand::Run(args)) => run_prompt(&cli, args).await,
        Command::Execute(args) => execute_batch(&cli, args).await,
        Command::Credentials(command) => manage_credentials(&cli, command).await,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_client(cli: &Cli) -> Result<GenumClient> {
    let client = match &cli.base_url {
        Some(base_url) => GenumClient::new(base_url.as_str()),
        None => GenumClient::from_env(),
    };
    client.context("could not create the API client")
}

fn credential_provider(cli: &Cli) -> Arc<dyn CredentialProvider> {
    match &cli.token {
        Some(token) => Arc::new(StaticCredentials::new(token.as_str())),
        None => Arc::new(KeystoreCredentials),
    }
}

async fn list_prompts(cli: &Cli, search: Option<&str>) -> Result<()> {
    let provider = PromptOptionsProvider::new(Arc::new(build_client(cli)?), credential_provider(cli));
    match search {
        Some(filter) => print_json(&provider.search(Some(filter)).await?),
        None => print_json(&provider.options().await?),
    }
}

async fn run_prompt(cli: &Cli, args: &RunArgs) -> Result<()> {
    let parameters = NodeParameters::new()
        .with(parameters::OPERATION, Operation::Run.as_str())
        .with(parameters::PROMPT_ID, input::prompt_id_value(&args.prompt_id))
        .with(parameters::QUESTION, args.question.as_str())
        .with(parameters::MEMORY_KEY, args.memory_key.as_str())
        .with(parameters::PRODUCTIVE, args.productive);
    run_batch(cli, Batch::new(vec![InputItem::default()], parameters)).await
}

async fn execute_batch(cli: &Cli, args: &ExecuteArgs) -> Result<()> {
    let items = input::items_from_value(input::read_json(&args.input)?);
    let mut parameters = match &args.params {
        Some(path) => input::parameters_from_value(input::read_json(path)?)?,
        None => NodeParameters::new(),
    };
    if let Some(operation) = args.operation {
        parameters = parameters.with(parameters::OPERATION, operation.as_str());
    }
    info!(item_count = items.len(), continue_on_fail = args.continue_on_fail, "executing batch");
    run_batch(cli, Batch::new(items, parameters).continue_on_fail(args.continue_on_fail)).await
}

async fn run_batch(cli: &Cli, batch: Batch) -> Result<()> {
    let executor = BatchExecutor::new(Arc::new(build_client(cli)?), credential_provider(cli));
    let output = executor.execute(&batch).await?;
    print_json(&output)
}

async fn manage_credentials(cli: &Cli, command: &CredentialsCommand) -> Result<()> {
    match command {
        CredentialsCommand::Test => {
            let credential = credential_provider(cli).credentials(CREDENTIAL_NAME).await?;
            build_client(cli)?
                .verify_credentials(&credential.api_token)
                .await
                .context("credential test failed")?;
            info!("credential test succeeded");
            Ok(())
        }
        CredentialsCommand::Store { api_token } => {
            store_secret(API_TOKEN_SECRET, api_token)?;
            info!("token stored in the OS keychain");
            Ok(())
        }
        CredentialsCommand::Remove => {
            remove_secret(API_TOKEN_SECRET)?;
            info!("token removed from the OS keychain");
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
