use anyhow::{Context, Result};
use itertools::Itertools;
use serde::Serialize;
use specdrift_core::openapi::ParsedSpec;

use super::Outcome;
use crate::io::input;
use crate::{output, render};

#[derive(Debug, Serialize)]
pub struct EndpointRow {
    pub method: String,
    pub path: String,
    pub operation_id: Option<String>,
    pub statuses: Vec<u16>,
}

#[derive(Debug, Serialize)]
pub struct EndpointsOut {
    pub title: String,
    pub version: String,
    pub openapi_version: String,
    pub endpoints: Vec<EndpointRow>,
}

pub async fn run(spec_arg: &str) -> Result<Outcome> {
    let text = input::read_spec_text(spec_arg).await?;
    let spec = ParsedSpec::parse_str(&text)
        .with_context(|| format!("failed to parse spec {spec_arg}"))?;

    let out = EndpointsOut {
        title: spec.title.clone(),
        version: spec.version.clone(),
        openapi_version: spec.openapi_version.clone(),
        endpoints: spec
            .operations
            .iter()
            .map(|op| EndpointRow {
                method: op.method.to_string(),
                path: op.path.clone(),
                operation_id: op.operation_id.clone(),
                statuses: op.documented_status_codes(),
            })
            .collect(),
    };

    if output::is_json() {
        output::print_json(&out)?;
    } else {
        println!("{} {} (OpenAPI {})", out.title, out.version, out.openapi_version);
        let rows: Vec<Vec<String>> = out
            .endpoints
            .iter()
            .map(|e| {
                vec![
                    e.method.clone(),
                    e.path.clone(),
                    e.operation_id.clone().unwrap_or_default(),
                    e.statuses.iter().join(", "),
                ]
            })
            .collect();
        render::table(
            &mut std::io::stdout(),
            &["Method", "Path", "Operation", "Statuses"],
            &rows,
        )?;
    }
    Ok(Outcome::Clean)
}
