use sim::{run_match, MatchSummary, DEFAULT_MAX_TICKS, FIXED_DT};
use std::env;
use std::fs;
use std::time::Instant;

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    println!("🥒 Pickleball Match Simulator");
    println!("{}", "=".repeat(70));
    println!();

    // Parse CLI arguments
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            if args.len() < 3 {
                eprintln!("Usage: {} run <seed> [--ticks <n>] [output_file]", args[0]);
                std::process::exit(1);
            }

            let seed: u64 = args[2].parse().unwrap_or_else(|e| {
                eprintln!("❌ Invalid seed '{}': {}", args[2], e);
                std::process::exit(1);
            });

            // Parse optional --ticks flag
            let mut max_ticks = DEFAULT_MAX_TICKS;
            let mut output_file_idx = 3;

            if args.len() > 3 && (args[3] == "--ticks" || args[3] == "-t") {
                if args.len() < 5 {
                    eprintln!("❌ Error: --ticks requires a value");
                    std::process::exit(1);
                }
                max_ticks = args[4].parse().unwrap_or_else(|e| {
                    eprintln!("❌ Invalid tick budget '{}': {}", args[4], e);
                    std::process::exit(1);
                });
                output_file_idx = 5;
            }

            let output_file = args.get(output_file_idx).map(|s| s.as_str());

            run_command(seed, max_ticks, output_file);
        }

        "--help" | "-h" => {
            print_usage(&args[0]);
            std::process::exit(0);
        }

        _ => {
            eprintln!("❌ Unknown command: {}", command);
            print_usage(&args[0]);
            std::process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <command> [options]", program);
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <seed> [--ticks <n>] [output_file]");
    eprintln!("      Simulate one deterministic match");
    eprintln!("      - seed: u64 RNG seed; the same seed replays the same match");
    eprintln!("      - --ticks: Optional tick budget (default: {})", DEFAULT_MAX_TICKS);
    eprintln!("      - output_file: Optional file to save the summary (JSON)");
    eprintln!("                     Defaults to: pickleball-match_seed<seed>_<timestamp>.json");
    eprintln!();
    eprintln!("Example:");
    eprintln!("  {} run 42 --ticks 200000 match.json", program);
}

fn run_command(seed: u64, max_ticks: u64, output_file: Option<&str>) {
    println!("📋 Simulating match");
    println!("  Seed: {}", seed);
    println!("  Tick budget: {}", max_ticks);
    println!();

    let start = Instant::now();

    let summary = run_match(seed, max_ticks, FIXED_DT).unwrap_or_else(|e| {
        eprintln!("❌ Invalid configuration: {}", e);
        std::process::exit(1);
    });

    let duration = start.elapsed();
    println!("  Simulation time: {:.2}s", duration.as_secs_f64());
    println!();

    // Determine output filename
    let default_filename = format!(
        "pickleball-match_seed{}_{}.json",
        seed,
        chrono::Utc::now().timestamp()
    );
    let file_to_save = output_file.unwrap_or(&default_filename);

    match save_summary(&summary, file_to_save) {
        Ok(_) => {
            println!("✅ Match finished!");
            match summary.winner {
                Some(side) => println!("  Winner: {}", side),
                None => println!("  Winner: none (tick budget reached)"),
            }
            println!("  Score: {}-{}", summary.score_p1, summary.score_p2);
            println!("  Rallies: {}", summary.rallies.len());
            println!("  Ticks: {}", summary.ticks);
            println!("  Log Hash: 0x{}", summary.log_hash);
            println!();
            println!("💾 Summary saved to: {}", file_to_save);
            println!("{}", "=".repeat(70));
        }
        Err(e) => {
            eprintln!("❌ Error saving summary: {}", e);
            std::process::exit(1);
        }
    }
}

fn save_summary(summary: &MatchSummary, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json)?;
    Ok(())
}
