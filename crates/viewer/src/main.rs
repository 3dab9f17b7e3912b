use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use boxview_lib::command::{execute_json, execute_json_batch, CommandResponse};
use boxview_lib::state::{ViewerSettings, ViewerState};

/// Command-line options
#[derive(Default)]
struct CliArgs {
    /// JSON array of commands to run instead of reading stdin
    commands: Option<PathBuf>,
    /// Settings file overriding the user config
    settings: Option<PathBuf>,
    /// Skip the startup profile
    empty: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boxview=info,boxview_lib=info".into()),
        )
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("usage: boxview [--commands <file.json>] [--settings <file.json>] [--empty]");
            std::process::exit(2);
        }
    };

    let settings = match &args.settings {
        Some(path) => match ViewerSettings::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::error!("{e}");
                std::process::exit(1);
            }
        },
        None => ViewerSettings::load(),
    };

    let mut state = ViewerState::new(settings);
    if !args.empty {
        state.load_initial_profile();
    }

    let result = match &args.commands {
        Some(path) => run_script(&mut state, path),
        None => run_stdin(&mut state),
    };
    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--commands" => {
                let path = args.next().ok_or("--commands needs a path")?;
                parsed.commands = Some(PathBuf::from(path));
            }
            "--settings" => {
                let path = args.next().ok_or("--settings needs a path")?;
                parsed.settings = Some(PathBuf::from(path));
            }
            "--empty" => parsed.empty = true,
            other => return Err(format!("Unknown argument: {other}")),
        }
    }
    Ok(parsed)
}

fn run_script(state: &mut ViewerState, path: &Path) -> Result<(), String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read commands {}: {e}", path.display()))?;
    let responses = execute_json_batch(state, &json)?;
    tracing::info!("Ran {} commands from {}", responses.len(), path.display());

    let mut out = io::stdout().lock();
    for resp in &responses {
        print_response(&mut out, resp).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn run_stdin(state: &mut ViewerState) -> Result<(), String> {
    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.map_err(|e| e.to_string())?;
        if line.trim().is_empty() {
            continue;
        }
        let resp = execute_json(state, &line).unwrap_or_else(|e| {
            tracing::warn!("{e}");
            CommandResponse {
                success: false,
                error: Some(e),
                data: None,
            }
        });
        print_response(&mut out, &resp).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn print_response(out: &mut impl Write, resp: &CommandResponse) -> io::Result<()> {
    serde_json::to_writer(&mut *out, resp)?;
    writeln!(out)?;
    out.flush()
}
