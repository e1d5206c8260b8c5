//! Replay commands: run captured responses through the pipeline offline.
//!
//! CHANGELOG:
//! - 10/17/2026 - Initial implementation

use anyhow::{Context, Result};
use serde_json::{json, Value};

use crate::config::InjectConfig;
use crate::constants::TypeConstants;
use crate::output::OutputControls;
use crate::payload::{transform_payload, Payload};
use crate::template::patch_template;

fn parse_payload(input: &str) -> Result<Value> {
    serde_json::from_str(input).context("Input is not valid JSON")
}

/// Transform a JSON payload and render the result.
pub fn render_transform(
    input: &str,
    constants: &TypeConstants,
    config: &InjectConfig,
    output: &OutputControls,
) -> Result<String> {
    let payload = Payload::classify(parse_payload(input)?);
    let out = transform_payload(payload, constants, config).into_value();
    Ok(output.emit(&out))
}

/// Patch raw template text and render the result.
///
/// Plain mode returns the text itself; JSON mode adds which rule fired.
pub fn render_patch_template(input: &str, output: &OutputControls) -> String {
    let (patched, rule) = patch_template(input);
    if output.json {
        output.emit(&json!({
            "rule": rule.map(|r| r.name()),
            "changed": patched != input,
            "text": patched,
        }))
    } else {
        patched.into_owned()
    }
}

/// Report the shape a payload classifies as.
pub fn render_classify(input: &str, output: &OutputControls) -> Result<String> {
    let payload = Payload::classify(parse_payload(input)?);
    let kind = payload.kind();
    let messages = match &payload {
        Payload::Structured(batch) => batch.messages().map(|m| m.len()),
        _ => None,
    };

    if output.json {
        Ok(output.emit(&json!({"kind": kind, "messages": messages})))
    } else {
        Ok(match messages {
            Some(count) => format!("{} ({} messages)", kind, count),
            None => kind.to_string(),
        })
    }
}

pub fn transform(
    input: &str,
    constants: &TypeConstants,
    config: &InjectConfig,
    output: &OutputControls,
) -> Result<()> {
    println!("{}", render_transform(input, constants, config, output)?);
    Ok(())
}

pub fn patch(input: &str, output: &OutputControls) -> Result<()> {
    let rendered = render_patch_template(input, output);
    if output.json {
        println!("{}", rendered);
    } else {
        print!("{}", rendered);
    }
    Ok(())
}

pub fn classify(input: &str, output: &OutputControls) -> Result<()> {
    println!("{}", render_classify(input, output)?);
    Ok(())
}
