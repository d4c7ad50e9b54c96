//! rpcgate CLI — driving adapter for request translation.
//!
//! Subcommands:
//! - `match <config> <path>` — print the matched request type and parameters
//! - `build <config> <method> <path> [--body <json> | --body-file <file>]` — translate and print the message
//! - `check <config>` — validate config loads and every route resolves
//! - `info` — print registered request types and their fields
//!
//! Logging goes to stderr, filtered by `RPCGATE_LOG` (default `warn`).

use std::process;

use rpcgate::{match_uri, GatewayConfig, TypeRegistry, TypeResolver};
use rpcgate_http::{Gateway, HttpRequest};

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "match" => cmd_match(&args[2..]),
        "build" => cmd_build(&args[2..]),
        "check" => cmd_check(&args[2..]),
        "info" => cmd_info(),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("error: unknown command \"{other}\"");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("RPCGATE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_match(args: &[String]) -> Result<(), String> {
    let [config_path, path] = args else {
        return Err("match requires a config file path and a request path".into());
    };

    let config = load_config(config_path)?;
    let table = config
        .template_table()
        .map_err(|e| format!("config invalid: {e}"))?;

    match match_uri(path, &table) {
        Some(m) => {
            println!("{}", m.type_name());
            let mut params: Vec<_> = m.params().iter().collect();
            params.sort();
            for (name, value) in params {
                println!("  {name} = {value}");
            }
        }
        None => println!("(no match)"),
    }

    Ok(())
}

fn cmd_build(args: &[String]) -> Result<(), String> {
    let request = parse_build_args(args)?;
    let config = load_config(&request.config_path)?;
    let gateway = Gateway::from_config(&config, build_registry())
        .map_err(|e| format!("config invalid: {e}"))?;

    let http = HttpRequest::builder()
        .method(request.method.as_str())
        .path(request.path.as_str())
        .body(request.body)
        .build();

    let translation = gateway
        .translate(&http)
        .map_err(|e| format!("{} {e}", e.status_code()))?;

    let json = translation
        .message()
        .to_json()
        .map_err(|e| format!("failed to encode message: {e}"))?;
    let pretty =
        serde_json::to_string_pretty(&json).map_err(|e| format!("failed to encode message: {e}"))?;

    println!("{} (from {})", translation.type_name(), translation.source());
    println!("{pretty}");
    Ok(())
}

fn cmd_check(args: &[String]) -> Result<(), String> {
    let [config_path] = args else {
        return Err("check requires a config file path".into());
    };

    let config = load_config(config_path)?;
    let gateway = Gateway::from_config(&config, build_registry())
        .map_err(|e| format!("config invalid: {e}"))?;

    println!("Config valid ({} routes)", gateway.table().len());
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // Uniform return type for all commands
fn cmd_info() -> Result<(), String> {
    let registry = build_registry();

    println!("Registered request types:");
    for name in registry.type_names() {
        let fields = registry
            .resolve(name)
            .map(|t| t.field_names().join(", "))
            .unwrap_or_default();
        println!("  {name} [{fields}]");
    }

    println!("\nReference routes:");
    for (template, type_name) in rpcgate_test::ROUTES {
        println!("  {template} → {type_name}");
    }

    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Registry assembly (composition root)
// ═══════════════════════════════════════════════════════════════════════════════

fn build_registry() -> TypeRegistry {
    rpcgate_test::register(TypeRegistry::builder()).build()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Config loading
// ═══════════════════════════════════════════════════════════════════════════════

fn load_config(path: &str) -> Result<GatewayConfig, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read \"{path}\": {e}"))?;

    let is_json = std::path::Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let config: GatewayConfig = if is_json {
        GatewayConfig::from_json(&content).map_err(|e| format!("JSON parse error: {e}"))?
    } else {
        // Default to YAML (handles .yaml and .yml)
        serde_yaml::from_str(&content).map_err(|e| format!("YAML parse error: {e}"))?
    };

    tracing::debug!(path, routes = config.routes.len(), "config loaded");
    Ok(config)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Argument parsing
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, PartialEq, Eq)]
struct BuildArgs {
    config_path: String,
    method: String,
    path: String,
    body: Vec<u8>,
}

fn parse_build_args(args: &[String]) -> Result<BuildArgs, String> {
    let [config_path, method, path, rest @ ..] = args else {
        return Err("build requires a config file path, a method and a request path".into());
    };

    let mut body = Vec::new();
    let mut i = 0;
    while i < rest.len() {
        let flag = rest[i].as_str();
        let value = rest
            .get(i + 1)
            .ok_or_else(|| format!("{flag} requires a value"))?;
        match flag {
            "--body" => body = value.clone().into_bytes(),
            "--body-file" => {
                body = std::fs::read(value)
                    .map_err(|e| format!("failed to read \"{value}\": {e}"))?;
            }
            other => return Err(format!("unexpected argument \"{other}\"")),
        }
        i += 2;
    }

    Ok(BuildArgs {
        config_path: config_path.clone(),
        method: method.to_ascii_uppercase(),
        path: path.clone(),
        body,
    })
}

fn print_usage() {
    eprintln!(
        "Usage: rpcgate <command> [options]

Commands:
  match <config> <path>                                  Match a path against the routes
  build <config> <method> <path> [--body <json>]         Translate a request and print the message
        [--body-file <file>]
  check <config>                                         Validate config
  info                                                   Print registered request types
  help                                                   Show this help

Environment:
  RPCGATE_LOG   log filter (e.g. debug, rpcgate=trace); default warn"
    );
}
