//! queue-runner: headless driver for the accounts-office queue model.
//!
//! Usage:
//!   queue-runner --servers 2 --arrival 10 --service 5
//!   queue-runner --ticket --name "Ada Obi" --service-type fee_inquiry --seed 7
//!   queue-runner --config runner.json --ipc-mode

use anyhow::{Context, Result};
use queue_core::{
    config::RunnerConfig,
    estimator::CapacityEstimator,
    params::SimulationParameters,
    rng::RngBank,
    session::{SessionOutcome, SimulatorSession},
    ticket::{IssuedTicket, ServiceType, TicketIssuer, TicketRequest},
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    SetParameters {
        server_count: u32,
        arrival_rate: f64,
        mean_service_time_minutes: f64,
    },
    Run,
    Reset,
    IssueTicket {
        student_name: String,
        service: ServiceType,
    },
    Quit,
}

#[derive(serde::Serialize)]
struct UiState<'a> {
    parameters: &'a SimulationParameters,
    within_ui_bounds: bool,
    outcome: Option<&'a SessionOutcome>,
    last_ticket: Option<&'a IssuedTicket>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = match find_arg(&args, "--config") {
        Some(path) => RunnerConfig::load(path)?,
        None => RunnerConfig::default(),
    };
    config.seed = parse_arg(&args, "--seed", config.seed)?;
    let json = has_flag(&args, "--json");

    let estimator = CapacityEstimator::new(config.model.clone())?;
    let issuer = TicketIssuer::new(
        &RngBank::new(config.seed),
        &config.model,
        config.max_issued_position,
    )?;

    if has_flag(&args, "--ipc-mode") {
        let session = SimulatorSession::new(estimator, config.defaults);
        return run_ipc_loop(session, issuer, &config);
    }

    if has_flag(&args, "--ticket") {
        return issue_one_ticket(issuer, &args, json);
    }

    let params = SimulationParameters {
        server_count: parse_arg(&args, "--servers", config.defaults.server_count)?,
        arrival_rate: parse_arg(&args, "--arrival", config.defaults.arrival_rate)?,
        mean_service_time_minutes: parse_arg(
            &args,
            "--service",
            config.defaults.mean_service_time_minutes,
        )?,
    };
    warn_if_out_of_bounds(&config, &params);

    let mut session = SimulatorSession::new(estimator, config.defaults);
    session.set_parameters(params);
    let outcome = session.run()?;

    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else {
        print_outcome(&params, outcome);
    }
    Ok(())
}

fn run_ipc_loop(
    mut session: SimulatorSession,
    mut issuer: TicketIssuer,
    config: &RunnerConfig,
) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();
    let mut last_ticket: Option<IssuedTicket> = None;

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        let handled = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => Ok(()),
            IpcCommand::SetParameters {
                server_count,
                arrival_rate,
                mean_service_time_minutes,
            } => {
                let params = SimulationParameters {
                    server_count,
                    arrival_rate,
                    mean_service_time_minutes,
                };
                warn_if_out_of_bounds(config, &params);
                session.set_parameters(params);
                Ok(())
            }
            IpcCommand::Run => session.run().map(|_| ()),
            IpcCommand::Reset => {
                session.reset();
                Ok(())
            }
            IpcCommand::IssueTicket {
                student_name,
                service,
            } => issuer
                .issue(TicketRequest::new(student_name, service))
                .map(|ticket| last_ticket = Some(ticket)),
        };

        match handled {
            Ok(()) => {
                let state = UiState {
                    parameters: session.parameters(),
                    within_ui_bounds: config.bounds.contains(session.parameters()),
                    outcome: session.last_outcome(),
                    last_ticket: last_ticket.as_ref(),
                };
                writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
                stdout.flush()?;
            }
            Err(e) => write_error(&mut stdout, &e.to_string())?,
        }
    }
    Ok(())
}

fn issue_one_ticket(mut issuer: TicketIssuer, args: &[String], json: bool) -> Result<()> {
    let name = find_arg(args, "--name").unwrap_or_default();
    let service: ServiceType = find_arg(args, "--service-type")
        .unwrap_or_default()
        .parse()?;
    let ticket = issuer.issue(TicketRequest::new(name, service))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ticket)?);
        return Ok(());
    }

    println!("=== TICKET {} ===", ticket.number);
    println!("  name:      {}", ticket.student_name);
    println!("  service:   {}", ticket.service);
    println!("  position:  {} in queue", ticket.position);
    println!("  est. wait: {}", ticket.estimated_wait);
    println!();
    println!("Please keep this ticket and wait for your number to be called.");
    Ok(())
}

fn print_outcome(params: &SimulationParameters, outcome: &SessionOutcome) {
    println!("Accounts office queue: capacity estimate");
    println!("  staff:         {}", params.server_count);
    println!("  arrivals/hr:   {}", params.arrival_rate);
    println!("  service (min): {}", params.mean_service_time_minutes);
    println!();

    match outcome {
        SessionOutcome::Overloaded { report } => {
            println!("=== OVERLOADED (utilization {:.0}%) ===", report.utilization * 100.0);
            println!("  {}", report.message);
        }
        SessionOutcome::Completed { result, advisories } => {
            println!("=== RESULTS ===");
            println!("  average wait:      {} min", result.average_wait_minutes);
            println!("  maximum wait:      {} min", result.max_wait_minutes);
            println!("  average queue:     {} students", result.average_queue_length);
            println!("  staff utilization: {}%", result.utilization_percent);
            println!("  served per day:    {} students", result.estimated_daily_throughput);
            println!();
            println!("=== RECOMMENDATIONS ===");
            for advisory in advisories {
                let marker = if advisory.is_warning() { "!" } else { "+" };
                println!("  {marker} {}", advisory.message());
            }
        }
    }
}

fn warn_if_out_of_bounds(config: &RunnerConfig, params: &SimulationParameters) {
    let fields = config.bounds.out_of_range_fields(params);
    if !fields.is_empty() {
        log::warn!("Parameters outside the usual input ranges: {}", fields.join(", "));
    }
}

fn write_error(stdout: &mut io::Stdout, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(stdout, "{}", err_json)?;
    stdout.flush()?;
    Ok(())
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// The default applies only when the flag is absent.
/// A flag that is present but unparseable is an error.
fn parse_arg<T>(args: &[String], flag: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match find_arg(args, flag) {
        Some(value) => value
            .parse()
            .with_context(|| format!("Invalid value for {flag}: {value:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn absent_flag_uses_default() {
        let argv = args(&["queue-runner", "--arrival", "12"]);
        assert_eq!(parse_arg(&argv, "--servers", 2u32).unwrap(), 2);
        assert_eq!(parse_arg(&argv, "--arrival", 10.0f64).unwrap(), 12.0);
    }

    #[test]
    fn unparseable_values_are_errors() {
        let argv = args(&["queue-runner", "--servers", "-1", "--arrival", "abc", "--service", "5"]);
        let err = parse_arg(&argv, "--servers", 2u32).unwrap_err();
        assert!(err.to_string().contains("--servers"), "unexpected message: {err}");
        assert!(parse_arg(&argv, "--arrival", 10.0f64).is_err());
        assert_eq!(parse_arg(&argv, "--service", 5.0f64).unwrap(), 5.0);
    }

    #[test]
    fn negative_float_is_parsed_and_left_to_validation() {
        let argv = args(&["queue-runner", "--arrival", "-1"]);
        assert_eq!(parse_arg(&argv, "--arrival", 10.0f64).unwrap(), -1.0);
    }
}
