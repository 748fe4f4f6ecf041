//! Parse a configuration document and decode it into structs.
//!
//! Run with: cargo run --example read_config
//! Set RUST_LOG=toml_tree=debug to see parser events.

use serde::Deserialize;
use std::error::Error;
use toml_tree::{from_node, parse, TomlNode};

#[derive(Debug, Deserialize)]
struct Database {
    enabled: bool,
    ports: Vec<u16>,
    temp_targets: Temperatures,
}

#[derive(Debug, Deserialize)]
struct Temperatures {
    cpu: f64,
    case: f64,
}

#[derive(Debug, Deserialize)]
struct Server {
    ip: String,
    role: String,
}

const CONFIG: &str = r#"# This is a TOML document

title = "TOML Example"

[owner]
name = "Tom Preston-Werner"
dob = 1979-05-27T07:32:00-08:00

[database]
enabled = true
ports = [ 8000, 8001, 8002 ]
temp_targets = { cpu = 79.5, case = 72.0 }

[[servers]]
ip = "10.0.0.1"
role = "frontend"

[[servers]]
ip = "10.0.0.2"
role = "backend"
"#;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let document = parse(CONFIG)?;

    println!("Document comment: {:?}", document.meta.comment);
    if let Some(title) = document.get("title").and_then(TomlNode::as_str) {
        println!("Title: {}", title);
    }

    // Date-times keep their offset
    if let Some(dob) = document
        .get_path(&["owner", "dob"])
        .and_then(TomlNode::as_datetime_offset)
    {
        println!("Owner born: {} (UTC {})", dob.value, dob.value.naive_utc());
    }

    // Decode a subtree into typed structs
    if let Some(node) = document.get("database").cloned() {
        let database: Database = from_node(node)?;
        println!(
            "Database enabled={} ports={:?} cpu<={} case<={}",
            database.enabled, database.ports, database.temp_targets.cpu, database.temp_targets.case
        );
    }

    if let Some(node) = document.get("servers").cloned() {
        let servers: Vec<Server> = from_node(node)?;
        for server in &servers {
            println!("Server {} is {}", server.ip, server.role);
        }
    }

    Ok(())
}
