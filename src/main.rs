use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{arg, value_parser, Command};
use ripit::dispatch::{dispatch, FailurePolicy};
use ripit::transcript::parse_transcript;

const USAGE: &str = "Ripit is a CLI tool that repeats a captured HTTP request, e.g. one exported from Burp Suite.

Usage:
    ripit --request-file request.txt
    ripit --request-file request.txt --request-number 5

Information:
    --request-file   (location of the plain text request file)
    --request-number (number of concurrent requests, useful for race conditions)";

fn main() -> Result<()> {
    env_logger::init();

    let cmd = Command::new("ripit")
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .arg(
            arg!(--"request-file" <PATH> "Path to the HTTP request file")
                .value_parser(value_parser!(PathBuf))
                .required(false),
        )
        .arg(
            arg!(--"request-number" <COUNT> "Number of concurrent HTTP requests to send")
                .value_parser(value_parser!(u32).range(1..))
                .required(false)
                .default_value("1"),
        );

    let matches = cmd.get_matches();
    let request_file = match matches.get_one::<PathBuf>("request-file") {
        Some(path) if !path.as_os_str().is_empty() => path,
        _ => {
            println!("{USAGE}");
            return Ok(());
        }
    };
    let request_number = *matches.get_one::<u32>("request-number").unwrap();

    let request = parse_transcript(request_file).context("Error parsing request file")?;
    log::debug!(
        "parsed {} {} ({} headers, {} body bytes)",
        request.method,
        request.url,
        request.headers.len(),
        request.body.len()
    );

    dispatch(&request, request_number, FailurePolicy::Report)
}
