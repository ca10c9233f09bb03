//! Command-line front end. Every command reads a JSON recipe so the memorable
//! inputs never appear in shell history.

use std::env;
use std::process::ExitCode;

use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recallpass::config::Recipe;
use recallpass::generator::{derive, derive_with_trace};
use recallpass::salt::derive_salt;
use recallpass::vectors::check_reference_vectors;

fn print_usage() -> ExitCode {
    eprintln!("Commands:\n  derive <recipe.json>\n  salt <recipe.json>\n  inspect <recipe.json>\n  check");
    ExitCode::FAILURE
}

fn load_recipe(path: &str) -> Option<Recipe> {
    match Recipe::load(path) {
        Ok(recipe) => Some(recipe),
        Err(err) => {
            eprintln!("recipe load failed: {err}");
            None
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "recallpass=info".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return print_usage();
    }

    match args[1].as_str() {
        "derive" => {
            if args.len() != 3 {
                return print_usage();
            }
            let Some(recipe) = load_recipe(&args[2]) else {
                return ExitCode::FAILURE;
            };
            match derive(&recipe.input, &recipe.options) {
                Ok(password) => println!("{}", password.as_str()),
                Err(err) => {
                    eprintln!("derivation failed: {err}");
                    return ExitCode::FAILURE;
                }
            }
        }
        "salt" => {
            if args.len() != 3 {
                return print_usage();
            }
            let Some(recipe) = load_recipe(&args[2]) else {
                return ExitCode::FAILURE;
            };
            println!("{}", derive_salt(&recipe.input));
        }
        "inspect" => {
            if args.len() != 3 {
                return print_usage();
            }
            let Some(recipe) = load_recipe(&args[2]) else {
                return ExitCode::FAILURE;
            };
            match derive_with_trace(&recipe.input, &recipe.options) {
                Ok(trace) => {
                    let printable = json!({
                        "salt": trace.salt,
                        "mixResults": trace.mix_results,
                        "masterHashLength": trace.master_hash.len(),
                        "extraTransform": trace.extra_transform,
                        "password": trace.password.as_str(),
                    });
                    println!("{printable:#}");
                }
                Err(err) => {
                    eprintln!("derivation failed: {err}");
                    return ExitCode::FAILURE;
                }
            }
        }
        "check" => {
            if args.len() != 2 {
                return print_usage();
            }
            let outcomes = match check_reference_vectors() {
                Ok(outcomes) => outcomes,
                Err(err) => {
                    eprintln!("derivation failed: {err}");
                    return ExitCode::FAILURE;
                }
            };
            let mut failed = false;
            for outcome in &outcomes {
                println!("{:<18} {}", outcome.name, if outcome.passed { "ok" } else { "FAILED" });
                failed |= !outcome.passed;
            }
            if failed {
                return ExitCode::FAILURE;
            }
        }
        _ => return print_usage(),
    }

    ExitCode::SUCCESS
}
