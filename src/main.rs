// clue-rt: run a hand-lowered demo program on the emulated C runtime

use clue_rt::demos;
use clue_rt::runtime::{startup, Runtime, RuntimeConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("clue-rt");

    if args.len() < 2 {
        eprintln!("Error: No program name provided");
        eprintln!();
        eprintln!("Usage: {} <program> [args...]", program_name);
        eprintln!();
        eprintln!("Programs:");
        for name in demos::NAMES {
            eprintln!("  {}", name);
        }
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} partialsums 2500", program_name);
        std::process::exit(1);
    }

    let mut program = match demos::lookup(&args[1]) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // The demo sees itself as argv[0]
    let mut runtime = Runtime::new(RuntimeConfig::default());
    match startup::run(&mut runtime, program.as_mut(), &args[1..]) {
        Ok(code) => std::process::exit(code as i32),
        Err(e) => {
            eprintln!("Runtime error: {}", e);
            std::process::exit(2);
        }
    }
}
