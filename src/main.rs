use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;

use dash_orchestration::{
    Dashboard,
    api::model_dto::RegisterModelRequestDto,
    config::ClientConfig,
    domain::{
        context::{OperationContext, run_scoped},
        models::{is_valid_folder_path, is_valid_model_filename},
        platform::SearchResource,
        schema::build_schema_from_workflow_version,
    },
    loader::parser::parse_json_file,
    logger,
};

#[derive(Parser, Debug)]
#[command(name = "dash-cli", about = "Talks to the workflow platform the way the dashboard does")]
struct Cli {
    /// JSON config file. Without it, DASH_API_URL / DASH_API_TOKEN are used.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the input schema of a workflow version, optionally validating an inputs file.
    Schema {
        workflow_version: PathBuf,
        #[arg(long)]
        inputs: Option<PathBuf>,
    },
    /// Check a model folder path and filename.
    CheckPath {
        folder: String,
        #[arg(long, default_value = "")]
        filename: String,
    },
    /// Show one compute session.
    Session { session_id: String },
    /// Ask the platform to extend a session's timeout.
    ExtendTimeout {
        #[arg(long)]
        session_id: String,
        #[arg(long)]
        machine_id: String,
        #[arg(long)]
        gpu: String,
        /// Minutes.
        #[arg(long)]
        timeout: u32,
    },
    /// Page through a listing.
    Search {
        resource: String,
        #[arg(long, default_value = "")]
        term: String,
        #[arg(long)]
        scope: Option<String>,
        #[arg(long)]
        max_pages: Option<usize>,
    },
    /// Register a model file from a url.
    RegisterModel {
        url: String,
        #[arg(long)]
        folder: String,
        #[arg(long, default_value = "")]
        filename: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Schema { workflow_version, inputs } => print_schema(&workflow_version, inputs.as_deref()),
        Command::CheckPath { folder, filename } => {
            report("folder path", &folder, is_valid_folder_path(&folder));
            report("filename", &filename, is_valid_model_filename(&filename));
            Ok(())
        }
        command => {
            let config = match &cli.config {
                Some(path) => ClientConfig::load(path).with_context(|| format!("loading config '{}'", path.display()))?,
                None => ClientConfig::from_env()?,
            };
            logger::init(&config.log_dir);
            let dashboard = Dashboard::connect(config)?;
            run_remote(&dashboard, command).await
        }
    }
}

async fn run_remote(dashboard: &Dashboard, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Session { session_id } => {
            let sessions = dashboard.sessions();
            let session = run_scoped(OperationContext::new("get-session"), sessions.get_session(&session_id)).await?;
            match session {
                Some(session) => {
                    println!("{} {}", "session".bold(), session.session_id);
                    println!("  machine:  {}", session.machine_id.as_deref().unwrap_or("-"));
                    println!("  gpu:      {}", session.gpu.as_deref().unwrap_or("-"));
                    println!("  url:      {}", session.url.as_deref().unwrap_or("-"));
                    println!("  created:  {}", session.created_at.to_rfc3339());
                    if let Some(expires_at) = session.expires_at() {
                        println!("  expires:  {}", expires_at.to_rfc3339());
                    }
                }
                None => println!("{}", "no session id given".yellow()),
            }
        }
        Command::ExtendTimeout { session_id, machine_id, gpu, timeout } => {
            let sessions = dashboard.sessions();
            let ack = run_scoped(
                OperationContext::new("extend-timeout"),
                sessions.extend_timeout(timeout, &machine_id, &session_id, &gpu),
            )
            .await?;
            println!("{} {}", "timeout extended".green(), ack.message.unwrap_or_default());
        }
        Command::Search { resource, term, scope, max_pages } => {
            let resource: SearchResource = resource.parse()?;
            let mut pager = dashboard.search::<Value>(resource);
            pager.set_query(&term, scope.as_deref());

            let pages = run_scoped(OperationContext::new(format!("search-{}", resource.logical_key())), pager.load_all(max_pages)).await?;
            for item in pager.items() {
                println!("{}", item);
            }
            let state = if pager.has_more() { "more available".yellow() } else { "end of results".green() };
            eprintln!("{} pages, {} entries, {}", pages, pager.items().count(), state);
        }
        Command::RegisterModel { url, folder, filename } => {
            let request = RegisterModelRequestDto { url, folder_path: folder, filename };
            let models = dashboard.models();
            let answer = run_scoped(OperationContext::new("register-model"), models.register(&request)).await?;
            println!("{} {}", "registered".green(), answer);
        }
        Command::Schema { .. } | Command::CheckPath { .. } => {}
    }
    Ok(())
}

fn print_schema(workflow_version: &std::path::Path, inputs: Option<&std::path::Path>) -> anyhow::Result<()> {
    let version: Value = parse_json_file(workflow_version)?;

    let Some(schema) = build_schema_from_workflow_version(&version) else {
        println!("{}", "workflow version declares no inputs".yellow());
        return Ok(());
    };

    for field in schema.fields() {
        println!("{}: {}", field.name.bold(), field.validator);
    }

    if let Some(inputs) = inputs {
        let payload: Value = parse_json_file(inputs)?;
        let accepted = schema.validate(&payload)?;
        println!("{} {}", "inputs accepted:".green(), Value::Object(accepted));
    }
    Ok(())
}

fn report(what: &str, value: &str, valid: bool) {
    if valid {
        println!("{} '{}' is valid", what, value);
    } else {
        println!("{} '{}' is {}", what, value, "invalid".red());
    }
}
