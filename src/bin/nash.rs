//! Nash equilibrium solver binary.
//!
//! Usage:
//!   cargo run --release --bin nash -- [OPTIONS] <FILE.nfg>
//!
//! Options:
//!   --brief              Only print equilibrium counts
//!   --verbose            Print the parsed game and search diagnostics
//!   --pure-only          Skip the mixed-equilibrium search
//!   --max <N>            Stop each search pass after N equilibria
//!   --output <FILE>      Write a JSON report
//!
//! Exits with status 1 on bad arguments or an unreadable input file.

use std::env;
use std::fs;
use std::process;

use indicatif::{ProgressBar, ProgressStyle};

use nash_solver::nfg::{self, Parser};
use nash_solver::output::{describe_game, EquilibriaReport};
use nash_solver::solver::{EquilibriaFinder, FinderConfig};

fn main() {
    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let mut verbose = false;
    let mut brief = false;
    let mut pure_only = false;
    let mut max_equilibria = usize::MAX;
    let mut output_file: Option<String> = None;
    let mut input_file: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--brief" | "-b" => {
                brief = true;
            }
            "--verbose" | "-v" => {
                verbose = true;
            }
            "--pure-only" | "-p" => {
                pure_only = true;
            }
            "--max" | "-m" => {
                i += 1;
                if i < args.len() {
                    max_equilibria = args[i].parse().unwrap_or(usize::MAX);
                }
            }
            "--output" | "-o" => {
                i += 1;
                if i < args.len() {
                    output_file = Some(args[i].clone());
                }
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            arg if !arg.starts_with('-') && input_file.is_none() => {
                input_file = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    if verbose && brief {
        eprintln!("Mutually exclusive flags selected (--brief and --verbose).");
        process::exit(1);
    }

    let path = match input_file {
        Some(path) => path,
        None => {
            eprintln!("Missing input file.");
            print_help();
            process::exit(1);
        }
    };

    match fs::metadata(&path) {
        Ok(metadata) if metadata.len() > 0 => {}
        _ => {
            eprintln!("File {} is empty or does not exist.", path);
            process::exit(1);
        }
    }

    println!("File: {}", path);
    let parsed = match Parser::parse_file(&path) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            process::exit(1);
        }
    };
    let game = nfg::build_game(&parsed);
    if verbose {
        println!("{}", describe_game(&game));
        if !parsed.comment.is_empty() {
            println!("Comment: {}", parsed.comment);
        }
    }

    let config = FinderConfig::new().with_max_equilibria(max_equilibria);
    let mut finder = EquilibriaFinder::with_config(&game, config);

    // Pure equilibria
    let num_pure = finder.find_pure();
    println!("Found {} pure strategy Nash equilibria.", num_pure);
    if !brief {
        for profile in finder.equilibria() {
            println!("  {}", profile.describe(&game));
        }
    }
    println!("Duration: {:?}", finder.stats().pure_duration);

    // Mixed equilibria
    if !pure_only {
        println!();
        let progress = if !game.zero_sum() && !brief {
            let bar = ProgressBar::new(finder.num_support_combinations());
            bar.set_style(
                ProgressStyle::with_template(
                    "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} supports",
                )
                .unwrap()
                .progress_chars("=>-"),
            );
            Some(bar)
        } else {
            None
        };

        let num_mixed = finder.find_mixed_with_callback(|update| {
            if let Some(bar) = &progress {
                bar.set_position(update.supports_visited);
            }
        });
        if let Some(bar) = progress {
            bar.finish_and_clear();
        }

        println!("Found {} mixed strategy Nash equilibria.", num_mixed);
        if !brief {
            for profile in finder.mixed_equilibria() {
                println!("  {}", profile.describe(&game));
            }
        }
        let stats = finder.stats();
        if verbose {
            println!(
                "LP solves: {} ({} infeasible, {} failed)",
                stats.lp_solves, stats.lp_infeasible, stats.lp_failures
            );
            println!("Supports visited: {}", stats.supports_visited);
        }
        println!("LCP-creation duration: {:?}", stats.lcp_duration);
        println!("LP-solve duration: {:?}", stats.lp_duration);
        println!("Duration: {:?}", stats.mixed_duration);
    }

    if let Some(output_path) = output_file {
        let report = EquilibriaReport::from_finder(&finder);
        match report.save(&output_path) {
            Ok(_) => println!("Report saved to {}", output_path),
            Err(e) => {
                eprintln!("Error saving report: {}", e);
                process::exit(1);
            }
        }
    }
}

fn print_help() {
    println!("Nash equilibrium solver for normal-form games");
    println!();
    println!("Usage: nash [OPTIONS] <FILE.nfg>");
    println!();
    println!("Options:");
    println!("  -b, --brief              Only print equilibrium counts");
    println!("  -v, --verbose            Print the parsed game and search diagnostics");
    println!("  -p, --pure-only          Skip the mixed-equilibrium search");
    println!("  -m, --max <N>            Stop each search pass after N equilibria");
    println!("  -o, --output <FILE>      Write a JSON report");
    println!("  -h, --help               Show this help");
    println!();
    println!("Examples:");
    println!("  # Find all equilibria of a game");
    println!("  nash games/battle_of_the_sexes.nfg");
    println!();
    println!("  # Counts only, stop after the first equilibrium of each kind");
    println!("  nash --brief --max 1 games/prisoners_dilemma.nfg");
    println!();
    println!("  # Export a JSON report");
    println!("  nash --output report.json games/matching_pennies.nfg");
}
