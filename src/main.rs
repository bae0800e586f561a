//! premiser — PREMIS record generation CLI
//!
//! Thin driver standing in for the HTTP transport layer: feed it a
//! file (or stdin), get the serialized record on stdout or at `-o`.

use std::path::PathBuf;
use std::process;

use clap::{Arg, ArgAction, Command};
use tracing::{error, info, Level};

use premiser::{Pipeline, PipelineConfig, StagedUpload, UploadRequest};

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();

    let level = match matches.get_count("verbose") {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = PipelineConfig {
        staging_dir: matches.get_one::<String>("staging-dir").map(PathBuf::from),
        ..Default::default()
    };
    let pipeline = Pipeline::new(config);

    let request = UploadRequest {
        original_name: matches.get_one::<String>("original-name").cloned(),
        client_md5: matches.get_one::<String>("md5").cloned(),
    };

    let input = matches.get_one::<String>("input").cloned().unwrap_or_default();
    let as_json = matches.get_flag("json");

    let output = match run(&pipeline, &input, &request, as_json).await {
        Ok(bytes) => bytes,
        Err(err) => {
            error!("{err}");
            process::exit(1);
        }
    };

    match matches.get_one::<String>("output") {
        Some(path) => {
            if let Err(err) = tokio::fs::write(path, &output).await {
                error!("could not write {path}: {err}");
                process::exit(1);
            }
            info!("wrote {path}");
        }
        None => {
            use std::io::Write;
            if std::io::stdout().write_all(&output).is_err() {
                process::exit(1);
            }
            println!();
        }
    }
}

async fn run(
    pipeline: &Pipeline,
    input: &str,
    request: &UploadRequest,
    as_json: bool,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if input == "-" {
        // stdin has no path, so it goes through staging first
        let mut stdin = tokio::io::stdin();
        let staged = StagedUpload::stage(pipeline.config(), &mut stdin).await?;
        return render(pipeline, staged.path(), request, as_json).await;
    }
    render(pipeline, &PathBuf::from(input), request, as_json).await
}

async fn render(
    pipeline: &Pipeline,
    path: &std::path::Path,
    request: &UploadRequest,
    as_json: bool,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if as_json {
        let record = pipeline.build_record(path, request).await?;
        Ok(serde_json::to_vec_pretty(&record)?)
    } else {
        let document = pipeline.describe(path, request).await?;
        Ok(document.bytes)
    }
}

fn build_cli() -> Command {
    Command::new("premiser")
        .about("Produce a PREMIS preservation metadata record for a file")
        .arg(
            Arg::new("input")
                .help("File to describe, or '-' for stdin")
                .required(true),
        )
        .arg(
            Arg::new("original-name")
                .long("original-name")
                .help("Client-claimed original filename, used for extension-based format detection"),
        )
        .arg(
            Arg::new("md5")
                .long("md5")
                .help("Expected md5 checksum; a mismatch fails the run"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Write the record here instead of stdout"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Emit the record graph as JSON instead of PREMIS XML"),
        )
        .arg(
            Arg::new("staging-dir")
                .long("staging-dir")
                .help("Parent directory for staged stdin uploads"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase log verbosity"),
        )
}
