//! Config command implementation.

use anyhow::Result;
use clap::Args;
use serde_json::{Value, json};

use paydesk_core::{EntityKind, Masker};

use crate::config::Settings;
use crate::output;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print the configuration as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ConfigArgs, settings: &Settings) -> Result<()> {
    let view = settings_view(settings);

    if args.json {
        return output::json(&view);
    }

    let text = |value: &Value| match value {
        Value::Null => "(none)".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    for key in ["configFile", "source", "token", "bulkLimit", "timeoutSecs", "pageSize"] {
        output::field(key, &text(&view[key]));
    }
    output::field("sensitiveFields", &settings.sensitive_fields.join(", "));
    for kind in EntityKind::ALL {
        let fields = settings.field_map(kind);
        output::field(&format!("fields.{}", kind), &serde_json::to_string(&fields)?);
    }

    Ok(())
}

/// The resolved settings as JSON with the token masked.
fn settings_view(settings: &Settings) -> Value {
    // The token is masked whatever the configured sensitive fields are.
    let token = Masker::new(["token"]).mask(&json!({ "token": settings.token }))["token"].clone();
    let field_maps: serde_json::Map<String, Value> = EntityKind::ALL
        .iter()
        .map(|kind| {
            let fields = serde_json::to_value(settings.field_map(*kind)).unwrap_or(Value::Null);
            (kind.to_string(), fields)
        })
        .collect();

    json!({
        "configFile": settings.config_path.as_ref().map(|p| p.display().to_string()),
        "source": settings.source.as_ref().map(|s| s.to_string()),
        "token": token,
        "bulkLimit": settings.bulk_limit,
        "timeoutSecs": settings.timeout.as_secs(),
        "pageSize": settings.page_size,
        "sensitiveFields": settings.sensitive_fields,
        "fieldMaps": field_maps,
    })
}
