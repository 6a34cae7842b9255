mod config;

use anyhow::Context;
use serde::Serialize;
use sparkdigest::history::{
    JobData, NormalizedTimestamp, StageData, TimestampInput, normalize, to_canonical_string,
};
use sparkdigest::summary::{JobSummary, summarize_jobs};
use std::env;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "digestctl <command>\n\
     Commands:\n\
     - job <job.json> [stages.json]\n\
     - jobs <jobs.json> [stages.json]\n\
     - timestamp <value>\n\
     \n\
     Settings: DIGEST_PRETTY, DIGEST_LOG, DIGEST_MAX_INPUT_BYTES (or .env).\n";

fn main() -> anyhow::Result<()> {
    let cfg = config::Config::from_env()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("{USAGE}");
        std::process::exit(2);
    }

    match args[1].as_str() {
        "job" => {
            let Some(job_path) = args.get(2) else {
                usage_exit("usage: digestctl job <job.json> [stages.json]");
            };
            let job = JobData::from_json_str(&read_input(job_path, &cfg)?)
                .with_context(|| format!("in {job_path}"))?;
            let stages = read_stages(args.get(3), &cfg)?;

            let summary = JobSummary::from_job_data(&job, stages.as_deref());
            info!(
                job_id = ?summary.job_id,
                classified = summary.classified_stage_count(),
                "summarized job"
            );
            print_json(&summary, cfg.pretty)?;
        }
        "jobs" => {
            let Some(jobs_path) = args.get(2) else {
                usage_exit("usage: digestctl jobs <jobs.json> [stages.json]");
            };
            let jobs = JobData::list_from_json_str(&read_input(jobs_path, &cfg)?)
                .with_context(|| format!("in {jobs_path}"))?;
            let stages = read_stages(args.get(3), &cfg)?;

            let summaries = summarize_jobs(&jobs, stages.as_deref());
            let finished = summaries.iter().filter(|s| s.is_finished()).count();
            info!(jobs = summaries.len(), finished, "summarized jobs");
            print_json(&summaries, cfg.pretty)?;
        }
        "timestamp" => {
            let Some(raw) = args.get(2) else {
                usage_exit("usage: digestctl timestamp <value>");
            };
            let input = match raw.parse::<f64>() {
                Ok(ms) => TimestampInput::EpochMillis(ms),
                Err(_) => TimestampInput::Text(raw.clone()),
            };

            match normalize(Some(input)) {
                Some(NormalizedTimestamp::Canonical(ts)) => {
                    println!("{}", to_canonical_string(&ts));
                }
                Some(passthrough) => println!("{passthrough} (unchanged)"),
                None => println!("-"),
            }
        }
        other => {
            eprintln!("Unknown command: {other}\n\n{USAGE}");
            std::process::exit(2);
        }
    }

    Ok(())
}

fn usage_exit(msg: &str) -> ! {
    eprintln!("{msg}");
    std::process::exit(2);
}

fn read_input(path: impl AsRef<Path>, cfg: &config::Config) -> anyhow::Result<String> {
    let path = path.as_ref();
    let len = std::fs::metadata(path)
        .with_context(|| format!("cannot stat {}", path.display()))?
        .len();
    if len > cfg.max_input_bytes {
        anyhow::bail!(
            "{} is {len} bytes, over the {} byte limit",
            path.display(),
            cfg.max_input_bytes
        );
    }

    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

fn read_stages(
    path: Option<&String>,
    cfg: &config::Config,
) -> anyhow::Result<Option<Vec<StageData>>> {
    let Some(path) = path else {
        return Ok(None);
    };

    let stages = StageData::list_from_json_str(&read_input(path, cfg)?)
        .with_context(|| format!("in {path}"))?;
    Ok(Some(stages))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
