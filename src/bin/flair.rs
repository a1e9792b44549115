//! Flair API CLI binary.
//!
//! A command-line interface for interacting with the Flair API.

use std::process::ExitCode;

use clap::Parser;
use flair_api::cli::{attributes_from_args, relationships_from_args, Cli, Command};
use flair_api::{AnyResource, Fetched, FlairClient, PrettyPrint, ResourceType};
use serde::Serialize;
use tabled::{Table, Tabled};
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let client = match FlairClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set FLAIR_CLIENT_ID and FLAIR_CLIENT_SECRET environment variables");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if let flair_api::FlairError::Api {
                json: Some(body), ..
            } = &e
            {
                eprintln!("{body:#}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &FlairClient, cli: Cli) -> flair_api::Result<()> {
    match cli.command {
        Command::Get { resource_type, id } => {
            match client.get(&resource_type, id.as_deref()).await? {
                Fetched::One(resource) => output_single(&resource, cli.json)?,
                Fetched::Many(resources) => output_list(&resources, cli.json)?,
            }
        }
        Command::Create {
            resource_type,
            attributes,
            relationships,
            relationship_lists,
        } => {
            let resource = client
                .create(
                    &resource_type,
                    &attributes_from_args(attributes),
                    &relationships_from_args(relationships, relationship_lists),
                )
                .await?;
            output_single(&resource, cli.json)?;
        }
        Command::Update {
            resource_type,
            id,
            attributes,
            relationships,
            relationship_lists,
        } => {
            let resource = client
                .update(
                    &resource_type,
                    &id,
                    &attributes_from_args(attributes),
                    &relationships_from_args(relationships, relationship_lists),
                )
                .await?;
            output_single(&resource, cli.json)?;
        }
        Command::Delete { resource_type, id } => {
            client.delete(&resource_type, &id).await?;
            if cli.json {
                println!("{}", serde_json::json!({ "deleted": { "type": resource_type, "id": id } }));
            } else {
                println!("Deleted {resource_type} {id}");
            }
        }
        Command::Reading { resource_type, id } => {
            let reading = client.current_reading(&resource_type, &id).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&reading)?);
            } else {
                print_reading(&resource_type, &id, &reading.attributes);
            }
        }
    }
    Ok(())
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> flair_api::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_list(resources: &[AnyResource], json: bool) -> flair_api::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(resources)?);
    } else {
        let rows: Vec<ResourceRow> = resources.iter().map(ResourceRow::from).collect();
        println!("{}", Table::new(rows));
        println!("\n{} resources", resources.len());
    }
    Ok(())
}

fn print_reading(resource_type: &ResourceType, id: &str, attributes: &flair_api::AttributeMap) {
    println!("Current reading for {resource_type} {id}");
    for (key, value) in attributes {
        println!("  {key:<26}{value}");
    }
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct ResourceRow {
    id: String,
    #[tabled(rename = "type")]
    resource_type: String,
    name: String,
}

impl From<&AnyResource> for ResourceRow {
    fn from(r: &AnyResource) -> Self {
        Self {
            id: r.id().unwrap_or_default().to_string(),
            resource_type: r.resource_type().to_string(),
            name: r.name().unwrap_or_default(),
        }
    }
}
