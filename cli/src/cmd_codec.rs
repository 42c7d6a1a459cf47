//! `eventkit encode|decode|content-types`.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use eventkit_codec::{CodecRegistry, ObservedCodec};
use eventkit_core::Direction;
use serde_json::Value;

fn read_stdin() -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buf)
        .context("reading stdin")?;
    Ok(buf)
}

pub fn encode(codec: &ObservedCodec, content_type: &str) -> Result<()> {
    let input = read_stdin()?;
    let value: Value = serde_json::from_slice(&input).context("stdin is not valid JSON")?;
    let bytes = codec
        .encode(content_type, &value)
        .with_context(|| format!("encoding as {content_type:?}"))?;
    let mut out = std::io::stdout().lock();
    out.write_all(&bytes)?;
    out.write_all(b"\n")?;
    Ok(())
}

pub fn decode(codec: &ObservedCodec, content_type: &str, pretty: bool) -> Result<()> {
    let input = read_stdin()?;
    let mut value = Value::Null;
    codec
        .decode(content_type, &input, &mut value)
        .with_context(|| format!("decoding {content_type:?}"))?;
    let text = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{text}");
    Ok(())
}

pub fn list(registry: &CodecRegistry) {
    let decoders = registry.content_types(Direction::Decode);
    let encoders = registry.content_types(Direction::Encode);
    let mut all: Vec<&String> = decoders.iter().chain(encoders.iter()).collect();
    all.sort();
    all.dedup();
    for ct in all {
        let label = if ct.is_empty() { "(default)" } else { ct.as_str() };
        let dec = if decoders.contains(ct) { "decode" } else { "" };
        let enc = if encoders.contains(ct) { "encode" } else { "" };
        println!("  {label:<24} {dec:<7} {enc}");
    }
}
