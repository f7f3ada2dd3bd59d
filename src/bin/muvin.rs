//! Muvin CLI: explore a configured dataset as a timeline network.
//!
//! Usage:
//!   muvin [--config path] [--app name] labels [--match query]
//!   muvin [--config path] [--app name] explore <value>... [filters]

use clap::{Parser, Subcommand};
use muvin::{
    DataModel, FilterUpdate, Item, Link, MuvinConfig, NodeKey, NodeLabel, NodeRequest,
    TransformRegistry,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "muvin", version, about = "Timeline network explorer for provenance data")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// App (dataset) to use; defaults to the configured default_app
    #[arg(long, global = true)]
    app: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the values the app can explore
    Labels {
        /// Only labels containing this text (case-insensitive)
        #[arg(long = "match")]
        query: Option<String>,
    },
    /// Load nodes and print the filtered network as JSON
    Explore {
        /// Values to load, in display order
        #[arg(required = true)]
        values: Vec<String>,
        /// Entity type of the requested values
        #[arg(long = "type")]
        node_type: Option<String>,
        /// Item types to hide (repeatable)
        #[arg(long)]
        exclude: Vec<String>,
        /// First visible year
        #[arg(long)]
        from: Option<i32>,
        /// Last visible year
        #[arg(long)]
        to: Option<i32>,
        /// Restrict the view to items shared with this node
        #[arg(long)]
        focus: Option<String>,
        /// Remove this node after loading, then reload the rest
        #[arg(long)]
        remove: Option<String>,
    },
}

#[derive(Serialize)]
struct NodeSummary<'a> {
    key: &'a NodeKey,
    name: &'a str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    node_type: Option<&'a str>,
    collaborators: usize,
    enabled_collaborators: usize,
}

#[derive(Serialize)]
struct ExploreSummary<'a> {
    nodes: Vec<NodeSummary<'a>>,
    items: Vec<&'a Item>,
    links: Vec<&'a Link>,
    dates: Vec<i32>,
    link_types: &'a [String],
    failures: Vec<String>,
}

fn open_model(config: Option<PathBuf>, app: Option<&str>) -> Result<DataModel, String> {
    let path = config.unwrap_or_else(MuvinConfig::default_path);
    let config = MuvinConfig::load(&path).map_err(|e| format!("Failed to load config: {}", e))?;
    let app = config.resolve_app(app).map_err(|e| e.to_string())?;
    let registry = TransformRegistry::from_config(&config);
    let transform = registry.get(&app).map_err(|e| e.to_string())?;
    tracing::debug!(app = %app, transform = transform.id(), "transform selected");
    Ok(DataModel::new(transform))
}

/// Key of a loaded node with this name, or the key it would get if loaded.
fn resolve_key(model: &DataModel, value: &str, node_type: Option<&str>) -> NodeKey {
    model
        .nodes_list()
        .into_iter()
        .find(|n| n.name == value)
        .map(|n| n.key.clone())
        .unwrap_or_else(|| NodeKey::for_entity(value, node_type))
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn cmd_labels(model: &mut DataModel, query: Option<&str>) -> i32 {
    if let Err(e) = model.fetch_node_labels().await {
        eprintln!("Error: {}", e);
        return 1;
    }
    let labels: Vec<&NodeLabel> = model.matching_labels(query.unwrap_or(""));
    print_json(&labels)
}

#[allow(clippy::too_many_arguments)]
async fn cmd_explore(
    model: &mut DataModel,
    values: &[String],
    node_type: Option<&str>,
    exclude: Vec<String>,
    from: Option<i32>,
    to: Option<i32>,
    focus: Option<&str>,
    remove: Option<&str>,
) -> i32 {
    let requests: Vec<NodeRequest> = values
        .iter()
        .map(|v| NodeRequest {
            value: v.clone(),
            node_type: node_type.map(str::to_string),
        })
        .collect();

    let mut report = model.load(&requests).await;
    if let Some(value) = remove {
        let key = resolve_key(model, value, node_type);
        report = model.remove(&key).await;
    }
    if let Some(note) = report.notification() {
        eprintln!("{}", note);
    }

    model.update_filters(FilterUpdate::LinkTypes(exclude));
    if from.is_some() {
        model.update_filters(FilterUpdate::TimeFrom(from));
    }
    if to.is_some() {
        model.update_filters(FilterUpdate::TimeTo(to));
    }
    if let Some(value) = focus {
        let key = resolve_key(model, value, node_type);
        model.update_filters(FilterUpdate::Focus(Some(key)));
    }

    let summary = ExploreSummary {
        nodes: model
            .nodes_list()
            .into_iter()
            .map(|n| NodeSummary {
                key: &n.key,
                name: &n.name,
                node_type: n.node_type.as_deref(),
                collaborators: n.collaborators.len(),
                enabled_collaborators: n.collaborators.iter().filter(|c| c.enabled).count(),
            })
            .collect(),
        items: model.items(false),
        links: model.links(),
        dates: model.dates(),
        link_types: model.link_types(),
        failures: report.failures,
    };
    print_json(&summary)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut model = match open_model(cli.config, cli.app.as_deref()) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Labels { query } => cmd_labels(&mut model, query.as_deref()).await,
        Commands::Explore {
            values,
            node_type,
            exclude,
            from,
            to,
            focus,
            remove,
        } => {
            cmd_explore(
                &mut model,
                &values,
                node_type.as_deref(),
                exclude,
                from,
                to,
                focus.as_deref(),
                remove.as_deref(),
            )
            .await
        }
    };
    std::process::exit(code);
}
