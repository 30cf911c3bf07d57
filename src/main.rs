//! gomoku-nn -- policy-value evaluation server for a Gomoku MCTS agent.
//!
//! Loads a network at startup, then reads commands from stdin and writes
//! responses to stdout.
//!
//! Usage:
//!   gomoku-nn [OPTIONS]
//!
//! Options:
//!   --model PATH      ONNX policy-value model
//!   --config FILE     JSON engine config (flags below override it)
//!   --device DEV      cpu, cuda or cuda:<id> (default: cuda:0)
//!   --cpu-fallback    Run on CPU if the requested accelerator is unavailable
//!   --threads N       Intra-op threads for the session (default: 4)
//!   --uniform         Use a uniform policy and zero value instead of a model

use std::env;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;

use gomoku_nn::engine::Engine;
use gomoku_nn::eval::{EngineConfig, InferenceEngine, UniformBackend};
use gomoku_nn::protocol::parser::{parse_command, Command};

/// Parsed command-line arguments.
struct Args {
    model: Option<PathBuf>,
    config: Option<PathBuf>,
    device: Option<String>,
    cpu_fallback: bool,
    threads: Option<usize>,
    uniform: bool,
}

fn main() {
    let args = parse_args();

    let network = match build_network(&args) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let mut engine = match network {
        Some(n) => Engine::with_network(n),
        None => Engine::new(),
    };

    if let Err(e) = run_loop(&mut engine) {
        eprintln!("info string output error: {}", e);
        process::exit(1);
    }
}

/// Runs the protocol loop until `quit` or end of input.
fn run_loop(engine: &mut Engine) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Hello => engine.handle_hello(&mut out)?,
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => engine.set_option(name, value),
            Command::NewGame => engine.new_game(),
            Command::Position { text } => {
                if let Err(e) = engine.set_position(&text) {
                    eprintln!("info string {}", e);
                }
            }
            Command::Eval => engine.handle_eval(&mut out)?,
            Command::Quit => break,
        }
    }
    Ok(())
}

/// Loads the network the arguments ask for. Returns `None` when neither a
/// model nor `--uniform` was given.
fn build_network(args: &Args) -> Result<Option<InferenceEngine>, String> {
    if args.uniform {
        eprintln!("info string Using uniform policy backend");
        return Ok(Some(InferenceEngine::with_backend(UniformBackend)));
    }

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path).map_err(|e| e.to_string())?,
        None => EngineConfig::default(),
    };
    if let Some(model) = &args.model {
        config.model_path = model.clone();
    }
    if let Some(device) = &args.device {
        config.device = device.parse().map_err(|e| format!("{}", e))?;
    }
    if args.cpu_fallback {
        config.allow_cpu_fallback = true;
    }
    if let Some(threads) = args.threads {
        config.intra_threads = threads;
    }

    if config.model_path.as_os_str().is_empty() {
        eprintln!("info string No model given; eval is unavailable");
        return Ok(None);
    }

    InferenceEngine::load_with_config(&config)
        .map(Some)
        .map_err(|e| format!("failed to load model: {}", e))
}

fn parse_args() -> Args {
    let argv: Vec<String> = env::args().collect();
    let mut args = Args {
        model: None,
        config: None,
        device: None,
        cpu_fallback: false,
        threads: None,
        uniform: false,
    };

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--model" => args.model = Some(PathBuf::from(value_for(&argv, &mut i))),
            "--config" => args.config = Some(PathBuf::from(value_for(&argv, &mut i))),
            "--device" => args.device = Some(value_for(&argv, &mut i)),
            "--threads" => {
                let v = value_for(&argv, &mut i);
                args.threads = Some(v.parse().unwrap_or_else(|_| {
                    eprintln!("invalid --threads value: {}", v);
                    process::exit(1);
                }));
            }
            "--cpu-fallback" => args.cpu_fallback = true,
            "--uniform" => args.uniform = true,
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }
    args
}

/// Returns the value following the flag at `argv[*i]`, advancing `i`.
fn value_for(argv: &[String], i: &mut usize) -> String {
    *i += 1;
    match argv.get(*i) {
        Some(v) => v.clone(),
        None => {
            eprintln!("missing value for {}", argv[*i - 1]);
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: gomoku-nn [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --model PATH     ONNX policy-value model");
    eprintln!("  --config FILE    JSON engine config (flags override it)");
    eprintln!("  --device DEV     cpu, cuda or cuda:<id> (default: cuda:0)");
    eprintln!("  --cpu-fallback   Run on CPU if the accelerator is unavailable");
    eprintln!("  --threads N      Intra-op threads for the session (default: 4)");
    eprintln!("  --uniform        Uniform policy and zero value, no model");
}
