use std::process::ExitCode;

use tracing::{error, info, warn};

use cpu_schedule::config::{Config, ReportFormat};
use cpu_schedule::dispatching::PolicyKind;
use cpu_schedule::models::ProcessBatch;
use cpu_schedule::report::{JsonLinesSink, ReportSink, TextFileSink};
use cpu_schedule::scheduler::{compare_policies, compare_policies_parallel};
use cpu_schedule::telemetry::init_tracing;
use cpu_schedule::validation::validate_run;
use cpu_schedule::Result;

fn main() -> ExitCode {
    init_tracing();
    let config = Config::from_args();

    match run(&config) {
        Ok(()) => {
            println!("Analysis has been written to {}.", config.output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "simulation failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<()> {
    let batches = load_batches(config)?;

    let mut sink: Box<dyn ReportSink> = match config.format {
        ReportFormat::Text => Box::new(TextFileSink::create(&config.output)?),
        ReportFormat::Json => Box::new(JsonLinesSink::create(&config.output)?),
    };

    let options = config.compare_options();
    let kinds = PolicyKind::all();

    for batch in &batches {
        info!(processes = batch.len(), "simulating batch");

        let runs = if config.parallel {
            compare_policies_parallel(batch, &kinds, options)?
        } else {
            compare_policies(batch, &kinds, options)?
        };

        for run in &runs {
            if let Err(errors) = validate_run(run) {
                for e in &errors {
                    warn!(policy = %run.policy, kind = ?e.kind, "{}", e.message);
                }
            }
            sink.emit(&run.metrics)?;
        }
    }

    sink.flush()
}

fn load_batches(config: &Config) -> Result<Vec<ProcessBatch>> {
    if let Some(path) = &config.input {
        return Ok(vec![ProcessBatch::from_json_file(path, config.skip_invalid)?]);
    }

    let workload = config.workload();
    config
        .sizes
        .iter()
        .map(|&size| ProcessBatch::from_specs(workload.generate(size)))
        .collect()
}
