use anyhow::{Context, Result};
use serde::Serialize;
use specdrift_core::config::SummaryConfig;
use specdrift_core::diff::summarize;
use specdrift_core::model::{AnomalySummary, RecordedResponse, RequestConfig};
use specdrift_core::openapi::ParsedSpec;
use specdrift_core::pipeline::{assess, Assessment};

use super::{timestamp, Outcome};
use crate::args::CheckArgs;
use crate::io::input;
use crate::{output, render};

#[derive(Debug, Serialize)]
pub struct CheckOut {
    pub endpoint: String,
    pub spec_path: String,
    pub has_drift: bool,
    pub anomaly_summary: AnomalySummary,
}

pub async fn run(args: CheckArgs) -> Result<Outcome> {
    let text = input::read_spec_text(&args.spec).await?;
    let spec = ParsedSpec::parse_str(&text)
        .with_context(|| format!("failed to parse spec {}", args.spec))?;
    let body = input::read_json_file(&args.response)?;
    let recorded_at = timestamp()?;

    let response = RecordedResponse {
        status_code: args.response_status.unwrap_or(args.status),
        headers: Default::default(),
        body,
        response_time_ms: 0.0,
        recorded_at: recorded_at.clone(),
        request: RequestConfig::new(args.method, args.path.clone()),
    };

    let assessment = assess(
        &spec,
        &args.spec,
        &args.path,
        args.method,
        args.status,
        &response,
        &recorded_at,
    )?;

    let out = match assessment {
        Assessment::NoDrift(report) => CheckOut {
            endpoint: report.endpoint,
            spec_path: report.spec_path,
            has_drift: false,
            anomaly_summary: summarize(Vec::new(), response.body),
        },
        Assessment::Reconcile(req) => CheckOut {
            endpoint: req.endpoint_context,
            spec_path: args.spec.clone(),
            has_drift: true,
            anomaly_summary: req.summary,
        },
    };

    if output::is_json() {
        output::print_json(&out)?;
    } else {
        let mut w = output::stdout();
        println!("{} against {}", out.endpoint, out.spec_path);
        render::anomalies(&mut w, &out.anomaly_summary, &SummaryConfig::default())?;
    }

    Ok(if out.has_drift {
        Outcome::Drift
    } else {
        Outcome::Clean
    })
}
