use std::time::Duration;

use cmdtree_core::{
    Code, Command, Configuration, Context, FAILURE, Flag, Flags, Result, Runner, SUCCESS,
};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize)]
struct SumReport {
    values: Vec<i64>,
    total: i64,
}

#[derive(Debug, Serialize)]
struct TimerReport {
    label: String,
    after: String,
    after_ms: u128,
}

fn main() {
    init_tracing();

    let config = Configuration::new(build_tree())
        .with_arguments(cmdtree_core::arguments())
        .with_globals(global_flags())
        .with_version(PACKAGE_VERSION);

    let code = Runner::new(config).run();
    std::process::exit(code);
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}

fn global_flags() -> Flags {
    vec![
        Flag::bool("json")
            .with_short("j")
            .with_help("print results as JSON"),
    ]
    .into()
}

fn build_tree() -> Command {
    Command::new("cmdtree-demo")
        .with_help("exercise a declarative command tree")
        .with_description(
            "Demonstrates nested sub-commands and typed flags.\n\
             Every command accepts --help.",
        )
        .with_command(
            Command::new("greet")
                .with_help("greet one or more people")
                .with_flag(
                    Flag::string("name")
                        .with_short("n")
                        .required()
                        .allow_repeats()
                        .with_help("person to greet"),
                )
                .with_handler(greet),
        )
        .with_command(
            Command::new("math")
                .with_help("integer arithmetic")
                .with_command(
                    Command::new("sum")
                        .with_help("add integers")
                        .with_flag(
                            Flag::int("value")
                                .with_short("x")
                                .allow_repeats()
                                .with_help("value to add"),
                        )
                        .with_handler(sum),
                ),
        )
        .with_command(
            Command::new("timer")
                .with_help("describe a timer without waiting for it")
                .with_flag(
                    Flag::duration("after")
                        .with_short("a")
                        .with_default(Duration::from_secs(60))
                        .with_help("delay before the timer fires"),
                )
                .with_flag(
                    Flag::string("label")
                        .with_short("l")
                        .with_help("timer label"),
                )
                .with_handler(timer),
        )
}

fn greet(ctx: &Context<'_>) -> Result<Code> {
    let names = ctx.get_strings("name")?;
    debug!(count = names.len(), "greeting");
    if ctx.get_bool("json")? {
        println!("{}", serde_json::json!({ "greetings": names }));
    } else {
        for name in names {
            println!("hello, {name}!");
        }
    }
    Ok(SUCCESS)
}

fn sum(ctx: &Context<'_>) -> Result<Code> {
    let values = ctx.get_ints("value")?;
    let Some(total) = checked_sum(&values) else {
        eprintln!("error: sum of {} values overflows", values.len());
        return Ok(FAILURE);
    };
    if ctx.get_bool("json")? {
        print_json(&SumReport { values, total });
    } else {
        println!("{total}");
    }
    Ok(SUCCESS)
}

fn timer(ctx: &Context<'_>) -> Result<Code> {
    let after = ctx.get_duration("after")?;
    let label = ctx.get_string("label")?;
    let label = if label.is_empty() { "timer".to_string() } else { label };
    let human = humantime::format_duration(after).to_string();
    if ctx.get_bool("json")? {
        print_json(&TimerReport {
            label,
            after: human,
            after_ms: after.as_millis(),
        });
    } else {
        println!("{label} fires after {human}");
    }
    Ok(SUCCESS)
}

fn checked_sum(values: &[i64]) -> Option<i64> {
    values.iter().try_fold(0_i64, |acc, v| acc.checked_add(*v))
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => println!("{raw}"),
        Err(err) => eprintln!("error: JSON serialization failed: {err}"),
    }
}
