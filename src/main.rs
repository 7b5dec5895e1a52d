use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::thread;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use file_probe::cli::{CheckArgs, Cli, ColorChoice, Commands, WatchArgs};
use file_probe::config::{ProbeConfig, RuleEntry, parse_interval};
use file_probe::output::{
    ColorMode, EvalProgress, JsonFormatter, OutputFormat, OutputFormatter, RuleReport,
    TextFormatter,
};
use file_probe::{
    EXIT_CONFIG_ERROR, EXIT_INDETERMINATE, EXIT_RULE_FAILED, EXIT_SUCCESS, Evaluator,
    EvaluatorOptions, Outcome, ProbeError,
};

const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let exit_code = match &cli.command {
        Commands::Check(args) => run_check(args, &cli),
        Commands::Watch(args) => run_watch(args, &cli),
    };

    std::process::exit(exit_code);
}

/// Logs go to stderr. `RUST_LOG` wins over `-v`/`--quiet`.
fn init_logging(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    match run_check_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_check_impl(args: &CheckArgs, cli: &Cli) -> file_probe::Result<i32> {
    let config = load_config(args.config.as_deref(), cli.no_config)?;
    let rules = select_rules(&args.rules, &config)?;
    let options = evaluator_options(args.propagate_pattern_errors, &config);

    let mut probes = build_probes(rules, options);
    let round = run_round(&mut probes, cli.quiet);

    let formatter = build_formatter(args.format, color_choice_to_mode(cli.color));
    let output = formatter.format(&round.reports)?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    Ok(round.exit_code())
}

fn run_watch(args: &WatchArgs, cli: &Cli) -> i32 {
    match run_watch_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_watch_impl(args: &WatchArgs, cli: &Cli) -> file_probe::Result<i32> {
    let config = load_config(args.config.as_deref(), cli.no_config)?;
    let rules = select_rules(&args.rules, &config)?;
    let interval = match &args.interval {
        Some(interval) => parse_interval(interval)?,
        None => config.interval()?,
    };
    let options = evaluator_options(args.propagate_pattern_errors, &config);

    // one evaluator per rule for the whole session, so TRACE history accumulates
    let mut probes = build_probes(rules, options);
    let formatter = build_formatter(args.format, color_choice_to_mode(cli.color));

    let mut round_number: u64 = 0;
    loop {
        round_number += 1;
        let round = run_round(&mut probes, cli.quiet);

        let mut output = String::new();
        if args.format == OutputFormat::Text {
            let _ = writeln!(output, "--- Round {round_number} ---");
        }
        output.push_str(&formatter.format(&round.reports)?);
        write_output(None, &output, cli.quiet)?;

        if args.iterations != 0 && round_number >= args.iterations {
            return Ok(round.exit_code());
        }
        thread::sleep(interval);
    }
}

fn load_config(config_path: Option<&Path>, no_config: bool) -> file_probe::Result<ProbeConfig> {
    if no_config {
        return Ok(ProbeConfig::default());
    }

    match config_path {
        Some(path) => ProbeConfig::load(path),
        None => Ok(ProbeConfig::discover(Path::new("."))?.unwrap_or_default()),
    }
}

fn select_rules(cli_rules: &[String], config: &ProbeConfig) -> file_probe::Result<Vec<RuleEntry>> {
    if !cli_rules.is_empty() {
        return Ok(cli_rules.iter().map(|r| RuleEntry::unnamed(r)).collect());
    }

    if config.rules.is_empty() {
        return Err(ProbeError::Config(
            "No rules given. Pass rule strings or add [[rules]] to .file-probe.toml".to_string(),
        ));
    }

    Ok(config.rules.clone())
}

const fn evaluator_options(propagate_flag: bool, config: &ProbeConfig) -> EvaluatorOptions {
    let from_config = config.evaluator_options();
    EvaluatorOptions {
        propagate_pattern_errors: propagate_flag || from_config.propagate_pattern_errors,
    }
}

fn build_formatter(format: OutputFormat, color_mode: ColorMode) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(color_mode)),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

fn write_output(output_path: Option<&Path>, content: &str, quiet: bool) -> file_probe::Result<()> {
    if let Some(path) = output_path {
        fs::write(path, content)?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

struct Probe {
    entry: RuleEntry,
    evaluator: Evaluator,
}

fn build_probes(rules: Vec<RuleEntry>, options: EvaluatorOptions) -> Vec<Probe> {
    rules
        .into_iter()
        .map(|entry| Probe {
            entry,
            evaluator: Evaluator::new().with_options(options),
        })
        .collect()
}

struct Round {
    reports: Vec<RuleReport>,
    errors: usize,
}

impl Round {
    fn exit_code(&self) -> i32 {
        let any = |outcome: Outcome| self.reports.iter().any(|r| r.verdict.result == outcome);

        if self.errors > 0 {
            EXIT_CONFIG_ERROR
        } else if any(Outcome::Fail) {
            EXIT_RULE_FAILED
        } else if any(Outcome::Indeterminate) {
            EXIT_INDETERMINATE
        } else {
            EXIT_SUCCESS
        }
    }
}

fn run_round(probes: &mut [Probe], quiet: bool) -> Round {
    let mut reports = Vec::with_capacity(probes.len());
    let mut errors = 0;

    for probe in probes.iter_mut() {
        let label = probe.entry.name.as_deref().unwrap_or(&probe.entry.rule);
        let mut progress = EvalProgress::new(label, quiet);

        match probe
            .evaluator
            .evaluate_with_progress(&probe.entry.rule, &mut progress)
        {
            Ok(verdict) => {
                info!(
                    rule = %probe.entry.rule,
                    result = %verdict.result,
                    matched = verdict.matched_count,
                    "rule evaluated"
                );
                reports.push(RuleReport {
                    name: probe.entry.name.clone(),
                    rule: probe.entry.rule.clone(),
                    verdict,
                });
            }
            Err(e) => {
                progress.finish();
                debug!(
                    rule = %probe.entry.rule,
                    kind = e.error_type(),
                    "rule could not be evaluated"
                );
                eprintln!("Error: {e}");
                errors += 1;
            }
        }
    }

    Round { reports, errors }
}
