//! SQLFrame CLI Client
//!
//! Command-line interface for sending statements to a SQLFrame server.

use std::io::{self, BufRead};

use clap::Parser;
use sqlframe::network::Client;

/// SQLFrame CLI
#[derive(Parser, Debug)]
#[command(name = "sqlframe-cli")]
#[command(about = "Send SQL statements or REPORT to a SQLFrame server")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:7778")]
    server: String,

    /// Statements to send, one frame each; reads stdin lines when empty
    statements: Vec<String>,
}

fn main() {
    let args = Args::parse();

    let mut client = match Client::connect(&args.server) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to connect to {}: {}", args.server, e);
            std::process::exit(1);
        }
    };

    let result = if args.statements.is_empty() {
        run_stdin(&mut client)
    } else {
        args.statements
            .iter()
            .try_for_each(|statement| send_and_print(&mut client, statement))
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_stdin(client: &mut Client) -> sqlframe::Result<()> {
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        send_and_print(client, &line)?;
    }
    Ok(())
}

fn send_and_print(client: &mut Client, statement: &str) -> sqlframe::Result<()> {
    let response = client.send_raw(statement)?;
    println!("{}", response);
    Ok(())
}
