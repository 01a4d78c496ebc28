//! MongoScope demo binary
//!
//! Drives the diagram engine through a scripted session: load a schema
//! (from a path argument or the embedded sample), auto-arrange, fit the
//! view, and render one frame, logging a summary of the result. Useful as
//! a smoke test and as a minimal embedding example.
//!
//! Usage: `mongoscope [schema.json] [--config mongoscope.toml]`

use std::fs;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use scope_core::Size;
use scope_diagram::{CancelFlag, DiagramConfig, DiagramHost, DrawCommand};

/// Built-in demo schema used when no path is given
const SAMPLE_SCHEMA: &str = r#"{
  "collections": [
    {
      "name": "users",
      "documentCount": 1200,
      "fields": [
        {"name": "_id", "type": "ObjectId"},
        {"name": "email", "type": "String", "sampleValues": ["ada@example.com"]},
        {"name": "createdAt", "type": "Date"}
      ],
      "indexes": ["email_1"]
    },
    {
      "name": "orders",
      "documentCount": 8600,
      "fields": [
        {"name": "_id", "type": "ObjectId"},
        {"name": "userId", "type": "ObjectId"},
        {"name": "items", "type": "Array"},
        {"name": "total", "type": "Number"},
        {"name": "status", "type": "String"},
        {"name": "placedAt", "type": "Date"}
      ]
    },
    {
      "name": "products",
      "documentCount": 300,
      "fields": [
        {"name": "_id", "type": "ObjectId"},
        {"name": "title", "type": "String"},
        {"name": "price", "type": "Number"}
      ]
    }
  ],
  "relationships": [
    {"from": "orders", "to": "users", "field": "userId", "type": "one-to-many"},
    {"from": "orders", "to": "products", "field": "items.productId", "type": "many-to-many"}
  ]
}"#;

const CONTAINER: Size = Size {
    width: 1280.0,
    height: 720.0,
};

struct Args {
    schema_path: Option<String>,
    config_path: Option<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        schema_path: None,
        config_path: None,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                args.config_path = Some(
                    iter.next()
                        .context("--config requires a path argument")?,
                );
            }
            other => args.schema_path = Some(other.to_string()),
        }
    }
    Ok(args)
}

fn load_config(path: Option<&str>) -> Result<DiagramConfig> {
    let Some(path) = path else {
        return Ok(DiagramConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
    toml::from_str(&text).with_context(|| format!("parsing config {path}"))
}

fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    println!();
    println!("  MongoScope — interactive schema diagrams");
    println!("  v{}", scope_diagram::VERSION);
    println!();

    let args = parse_args()?;
    let config = load_config(args.config_path.as_deref())?;

    let schema_json = match &args.schema_path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading schema {path}"))?
        }
        None => SAMPLE_SCHEMA.to_string(),
    };

    let mut host = DiagramHost::new(config);
    host.load_schema_json(&schema_json)
        .context("loading schema")?;

    info!("running auto-arrange");
    host.auto_arrange(&CancelFlag::new());
    host.fit_view(CONTAINER);

    let frame = host.render(CONTAINER);
    let dots = frame.count_where(|c| matches!(c, DrawCommand::Dot { .. }));
    let edges = frame.count_where(|c| matches!(c, DrawCommand::QuadBezier { .. }));
    let rects = frame.count_where(|c| matches!(c, DrawCommand::RoundedRect { .. }));
    let texts = frame.count_where(|c| matches!(c, DrawCommand::Text { .. }));

    info!(
        zoom = host.viewport().zoom,
        commands = frame.len(),
        grid_dots = dots,
        edges,
        rects,
        texts,
        "frame rendered"
    );

    println!(
        "  {} collections, {} relationships",
        host.schema().collections.len(),
        host.schema().relationships.len()
    );
    println!(
        "  rendered {} draw commands at zoom {:.2}",
        frame.len(),
        host.viewport().zoom
    );
    println!();

    Ok(())
}
