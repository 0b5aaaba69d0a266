use anyhow::Result;
use serde::Serialize;
use specdrift_core::openapi::ParsedSpec;

use super::Outcome;
use crate::args::DEFAULT_MODEL;
use crate::io::input;
use crate::output;

#[derive(Debug, Serialize)]
pub struct Check {
    pub name: String,
    pub ok: bool,
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct DoctorOut {
    pub ok: bool,
    pub checks: Vec<Check>,
}

pub async fn run(spec: Option<&str>) -> Result<Outcome> {
    let mut checks = Vec::new();

    let key_set = std::env::var("GOOGLE_API_KEY").is_ok_and(|k| !k.trim().is_empty());
    checks.push(Check {
        name: "GOOGLE_API_KEY".to_string(),
        ok: key_set,
        detail: if key_set {
            "set".to_string()
        } else {
            "missing (required by analyze when drift is found)".to_string()
        },
    });

    let model = std::env::var("SPECDRIFT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
    checks.push(Check {
        name: "model".to_string(),
        ok: true,
        detail: model,
    });

    if let Some(path) = spec {
        let parsed = match input::read_spec_text(path).await {
            Ok(text) => ParsedSpec::parse_str(&text).map_err(anyhow::Error::from),
            Err(e) => Err(e),
        };
        checks.push(match parsed {
            Ok(s) => Check {
                name: "spec".to_string(),
                ok: true,
                detail: format!(
                    "{} {} ({} operations)",
                    s.title,
                    s.version,
                    s.operations.len()
                ),
            },
            Err(e) => Check {
                name: "spec".to_string(),
                ok: false,
                detail: format!("{e:#}"),
            },
        });
    }

    let ok = checks.iter().all(|c| c.ok);
    let out = DoctorOut { ok, checks };

    if output::is_json() {
        output::print_json(&out)?;
    } else {
        for c in &out.checks {
            println!("[{}] {}: {}", if c.ok { "ok" } else { "!!" }, c.name, c.detail);
        }
    }

    Ok(if ok { Outcome::Clean } else { Outcome::Failed })
}
