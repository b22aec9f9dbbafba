//! Lumen CLI
//!
//! Inspect the demo mixin library and the diagnostic catalogue.

use lumen_diagnostic::{ErrorCode, ErrorDocs};
use lumen_mixin::{MixinRegistry, ParamKeys};
use lumenc::demo::demo_registry;
use lumenc::{expand_mixin, init_tracing, parse_overrides, LumenConfig};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "mixins" => {
            let registry = load_registry();
            for name in registry.names() {
                let params = registry.get(name).map_or(0, |g| g.params().len());
                if params == 0 {
                    println!("{name}");
                } else {
                    println!("{name} ({params} argument{})", if params == 1 { "" } else { "s" });
                }
            }
        }
        "params" => {
            load_registry();
            let keys = ParamKeys::global();
            for name in keys.names() {
                if let Some(key) = keys.lookup(&name) {
                    println!("{key}");
                }
            }
        }
        "expand" => {
            if args.len() < 3 {
                eprintln!("Usage: lumenc expand <mixin> [key=value...]");
                eprintln!("Example: lumenc expand ToneMapEffect ColorTransform.Shader=ToneMapAces");
                std::process::exit(1);
            }
            expand(&args[2], &args[3..]);
        }
        "--explain" | "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: lumenc explain <ERROR_CODE>");
                eprintln!("Example: lumenc explain E2001");
                std::process::exit(1);
            }
            explain(&args[2]);
        }
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn load_registry() -> MixinRegistry {
    match demo_registry(ParamKeys::global()) {
        Ok((registry, _)) => registry,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn expand(name: &str, overrides: &[String]) {
    let config = match LumenConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };
    let registry = load_registry();
    let recipe = parse_overrides(ParamKeys::global(), overrides)
        .and_then(|params| expand_mixin(&registry, name, params, &config));
    match recipe {
        Ok(recipe) => print!("{recipe}"),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn explain(code_str: &str) {
    let Ok(code) = code_str.parse::<ErrorCode>() else {
        eprintln!("Unknown error code: {code_str}");
        eprintln!();
        eprintln!("Codes look like E2001 (errors), W2001 (warnings) or I0001 (notes).");
        std::process::exit(1);
    };

    match ErrorDocs::get(code) {
        Some(doc) => println!("{doc}"),
        None => {
            eprintln!("No documentation available for {code}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Lumen shader front end");
    println!();
    println!("Usage: lumenc <command> [options]");
    println!();
    println!("Commands:");
    println!("  mixins                      List the demo mixins");
    println!("  params                      List declared parameter keys and their types");
    println!("  expand <mixin> [k=v...]     Expand a mixin and print the recipe");
    println!("  explain <code>              Explain an error code (e.g., E2001)");
    println!("  help                        Show this message");
    println!();
    println!("Environment:");
    println!("  RUST_LOG                    Enable tracing output (e.g., lumen_mixin=trace)");
    println!("  LUMEN_ERROR_LIMIT           Errors rendered per run (0 = unlimited)");
    println!("  LUMEN_MAX_MIXIN_DEPTH       Nested mixin expansions allowed");
}
