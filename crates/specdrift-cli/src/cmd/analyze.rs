use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use specdrift_core::config::{validate_config, DecisionConfig, DriftConfig};
use specdrift_core::model::{DriftReport, RequestConfig};
use specdrift_core::openapi::ParsedSpec;
use specdrift_core::patch;
use specdrift_core::pipeline::{assess, conclude, Assessment};
use tracing::info;

use super::{timestamp, Outcome};
use crate::args::AnalyzeArgs;
use crate::executor::{self, parse_header, ExecutorConfig};
use crate::io::{export, input};
use crate::llm::{GeminiReconciler, LlmConfig};
use crate::{output, render};

pub async fn run(args: AnalyzeArgs) -> Result<Outcome> {
    let cfg = DriftConfig {
        decision: DecisionConfig {
            auto_update_threshold: args.threshold,
        },
        ..DriftConfig::default()
    };
    validate_config(&cfg)?;

    let pb = spinner()?;
    let produced = produce_report(&args, &cfg, &pb).await;
    pb.finish_and_clear();
    let (spec, report) = produced?;

    if let Some(path) = &args.report_out {
        export::write_json(path, &report)?;
    }

    let mut spec_diff = None;
    if let (Some(path), true, Some(fragment)) = (
        &args.write_spec,
        report.auto_update_recommended,
        report.updated_spec_fragment.as_ref(),
    ) {
        let updated = patch::apply_updates(spec.document(), fragment, None);
        export::write_spec_yaml(path, &updated)?;
        info!(path = %path.display(), "patched spec written");
        spec_diff = Some(patch::diff_lines(spec.document(), &updated)?);
    }

    if output::is_json() {
        output::print_json(&report)?;
    } else {
        let mut out = output::stdout();
        render::report(&mut out, &report, &cfg.summary)?;
        if let Some(diff) = spec_diff {
            println!();
            println!("{diff}");
        }
    }

    Ok(if report.has_drift {
        Outcome::Drift
    } else {
        Outcome::Clean
    })
}

/// Load the spec, call the endpoint and build the report.
///
/// The response schema is looked up before any request is sent, so an
/// undocumented path or method never reaches the API.
async fn produce_report(
    args: &AnalyzeArgs,
    cfg: &DriftConfig,
    pb: &ProgressBar,
) -> Result<(ParsedSpec, DriftReport)> {
    pb.set_message("loading spec");
    let text = input::read_spec_text(&args.spec).await?;
    let spec = ParsedSpec::parse_str(&text)
        .with_context(|| format!("failed to parse spec {}", args.spec))?;
    info!(
        title = %spec.title,
        version = %spec.version,
        operations = spec.operations.len(),
        "spec loaded"
    );
    spec.require_response_schema(&args.path, args.method, args.status)?;

    pb.set_message("calling endpoint");
    let request = build_request(args)?;
    let exec = ExecutorConfig {
        timeout: Duration::from_secs(args.timeout),
    };
    let response = executor::execute(&request, &exec).await?;

    pb.set_message("diffing response");
    let generated_at = timestamp()?;
    let assessment = assess(
        &spec,
        &args.spec,
        &args.path,
        args.method,
        args.status,
        &response,
        &generated_at,
    )?;

    let report = match assessment {
        Assessment::NoDrift(report) => report,
        Assessment::Reconcile(req) => {
            pb.set_message("reconciling drift");
            let reconciler = GeminiReconciler::new(
                LlmConfig {
                    api_key: args.api_key.clone(),
                    model: args.model.clone(),
                    base_url: args.llm_base_url.clone(),
                    ..LlmConfig::default()
                },
                exec.timeout,
            )?;
            let decision = reconciler.reconcile(&req).await?;
            conclude(req, decision, &args.spec, &generated_at, &cfg.decision)
        }
    };
    Ok((spec, report))
}

fn build_request(args: &AnalyzeArgs) -> Result<RequestConfig> {
    let url = format!("{}{}", args.endpoint.trim_end_matches('/'), args.path);
    let mut req = RequestConfig::new(args.method, url);
    for raw in &args.headers {
        let (name, value) = parse_header(raw)?;
        req = req.header(name, value);
    }
    for raw in &args.query {
        let (name, value) = raw
            .split_once('=')
            .with_context(|| format!("invalid query parameter {raw:?} (expected name=value)"))?;
        req = req.query_param(name, value);
    }
    if let Some(path) = &args.body {
        req = req.body(input::read_json_file(path)?);
    }
    if let Some(token) = &args.auth {
        req = req.auth_token(token.clone());
    }
    Ok(req)
}

fn spinner() -> Result<ProgressBar> {
    if output::is_json() {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(80));
    Ok(pb)
}
