//! Parses the text block of an MT103 and prints every field as JSON.
//!
//! Run with `RUST_LOG=debug` to see grammar registration and codec events.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use ironswift::prelude::*;

const BLOCK4: &str = ":20:REF-2024-0001\r\n\
:23B:CRED\r\n\
:32A:240315EUR1500,25\r\n\
:50H:/DE89370400440532013000\r\nACME GMBH\r\nHAUPTSTRASSE 1\r\n10115 BERLIN\r\n\
:71A:SHA\r\n\
:72:/INS/DEUTDEFF\r\n//URGENT\r\n\
:94T:SAFE//CUST";

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}

/// Splits a FIN text block into tags; continuation lines stay in the value.
fn split_block(text: &str) -> TagBlock {
    let mut block = TagBlock::new();
    let mut current: Option<(String, String)> = None;
    for line in text.split("\r\n") {
        let header = line
            .strip_prefix(':')
            .and_then(|rest| rest.split_once(':'));
        match header {
            Some((name, value)) => {
                if let Some((name, value)) = current.take() {
                    block.push(Tag::new(name, value));
                }
                current = Some((name.to_string(), value.to_string()));
            }
            None => {
                if let Some((_, value)) = current.as_mut() {
                    value.push_str("\r\n");
                    value.push_str(line);
                }
            }
        }
    }
    if let Some((name, value)) = current {
        block.push(Tag::new(name, value));
    }
    block
}

fn main() -> Result<()> {
    init_logging();

    let registry = Registry::global().context("building field catalog")?;
    let codec = FieldCodec::with_config(CodecConfig::crlf());
    let block = split_block(BLOCK4);
    info!("Parsed {} tags", block.len());

    for tag in block.iter() {
        let Some(grammar) = registry.get(tag.name()) else {
            warn!("No grammar for field {}", tag.name());
            continue;
        };
        let mut field = Field::new(Arc::clone(grammar));
        if let Err(e) = field.parse_with(&codec, Some(tag.value())) {
            warn!("Field {} skipped: {}", tag.name(), e);
            continue;
        }
        println!("{}", serde_json::to_string_pretty(&field)?);
    }

    let amount = get_by_name(Some(&block), registry, "32A")?.context("32A missing")?;
    if let (Some(currency), Some(value)) = (
        amount.component_as_currency(2)?,
        amount.component_as_decimal(3)?,
    ) {
        info!("Settlement amount: {} {}", currency, format_amount(value));
    }

    Ok(())
}
