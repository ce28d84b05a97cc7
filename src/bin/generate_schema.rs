//! Prints the JSON Schema of the catalog document or the config file.
//!
//! Usage: `generate_schema [catalog|config]` (default: catalog)

use anyhow::{bail, Context, Result as AnyhowResult};
use snipgrid::config::Config;
use snipgrid::model::CatalogFile;

fn main() -> AnyhowResult<()> {
    let which = std::env::args().nth(1).unwrap_or_else(|| "catalog".to_string());
    let schema = match which.as_str() {
        "catalog" => schemars::schema_for!(CatalogFile),
        "config" => schemars::schema_for!(Config),
        other => bail!("unknown schema '{other}', expected 'catalog' or 'config'"),
    };

    let json = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;
    println!("{json}");
    Ok(())
}
