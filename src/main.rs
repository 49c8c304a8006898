use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use redtrace::config::Config;
use redtrace::prelude::*;
use redtrace::{ClientResult, InstrumentedClient, RedisDriverClient, Value};
use tracing::{error, info};

type Client = InstrumentedClient<RedisDriverClient>;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args).and_then(|mut c| c.apply_env().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.loglevel)),
        )
        .init();

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> ClientResult<()> {
    let driver = RedisDriverClient::connect(&config.url(), config.timeout())?;
    let mut client = InstrumentedClient::new(driver, config.metadata());
    info!("connected to {}", config.metadata().address());

    if config.command.is_empty() {
        prompt(&mut client, config)?;
    } else {
        let tokens: Vec<&str> = config.command.iter().map(String::as_str).collect();
        let reply = send(&mut client, &tokens)?;
        print_value(&reply, 0);
    }

    if config.profile {
        print_profile(&client, config.json);
    }
    Ok(())
}

fn send(client: &mut Client, tokens: &[&str]) -> ClientResult<Value> {
    match tokens {
        [] => Ok(Value::Nil),
        [name, rest @ ..] => client.raw_command(name, rest),
    }
}

fn prompt(client: &mut Client, config: &Config) -> ClientResult<()> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let address = config.metadata().address();

    loop {
        print!("{address}> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => return Err(redtrace::ClientError::Driver(e.to_string())),
        }

        let line = line.trim();
        match line {
            "" => continue,
            ":profile" => {
                print_profile(client, config.json);
                continue;
            }
            ":stats" => {
                print_stats(client, config.json);
                continue;
            }
            ":quit" | "quit" | "exit" => break,
            _ => {}
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        match send(client, &tokens) {
            Ok(reply) => print_value(&reply, 0),
            // transport errors are already logged and recorded
            Err(e) => println!("(error) {e}"),
        }
        if let Some(message) = client.inner_mut().last_error().map(str::to_string) {
            println!("(error) {message}");
            client.inner_mut().clear_last_error();
        }
    }
    Ok(())
}

fn print_profile(client: &Client, json: bool) {
    for record in client.commands() {
        if json {
            match serde_json::to_string(&record) {
                Ok(line) => println!("{line}"),
                Err(e) => eprintln!("{e}"),
            }
        } else {
            println!(
                "{:<8} {:>9.3}ms  {}  {}",
                record.outcome,
                record.duration_ms,
                record.message(),
                record.params
            );
        }
    }
    print_stats(client, json);
}

fn print_stats(client: &Client, json: bool) {
    let summary = client.collector().summary();
    if json {
        match serde_json::to_string(&summary) {
            Ok(line) => println!("{line}"),
            Err(e) => eprintln!("{e}"),
        }
    } else {
        println!(
            "{} commands in {:.3}ms, {} warnings, {} errors",
            summary.commands, summary.total_ms, summary.warnings, summary.errors
        );
    }
}

fn print_value(value: &Value, indent: usize) {
    let prefix = " ".repeat(indent);
    match value {
        Value::Array(items) if items.is_empty() => println!("{prefix}(empty array)"),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                print!("{prefix}{}) ", i + 1);
                print_value_inline(item, indent + 3);
            }
        }
        other => {
            print!("{prefix}");
            print_value_inline(other, indent);
        }
    }
}

fn print_value_inline(value: &Value, indent: usize) {
    match value {
        Value::Nil => println!("(nil)"),
        Value::Bool(b) => println!("({b})"),
        Value::Int(n) => println!("(integer) {n}"),
        Value::Float(f) => println!("(double) {f}"),
        Value::Status(s) => println!("{s}"),
        Value::Bulk(data) => println!("\"{}\"", String::from_utf8_lossy(data)),
        Value::Array(items) if items.is_empty() => println!("(empty array)"),
        Value::Array(_) => {
            println!();
            print_value(value, indent);
        }
    }
}
