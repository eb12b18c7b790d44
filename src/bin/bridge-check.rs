use nulltrace_bridge::{narrow_message, parse_message, BridgeError, GuardError};
use serde_json::Value;
use std::env;
use std::fs;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: bridge-check <message.json>...");
        eprintln!();
        eprintln!("Each file holds one surface message or a JSON array of messages.");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  bridge-check save.json");
        eprintln!("  bridge-check recorded/*.json");
        process::exit(1);
    }

    let mut exit_code = 0;

    for file_path in &args[1..] {
        let messages = match load_messages(file_path) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("✗ {}: {}", file_path, e);
                exit_code = 1;
                continue;
            }
        };
        for (i, message) in messages.iter().enumerate() {
            match narrow_message(message) {
                Ok(m) => println!("✓ {}[{}]: {}", file_path, i, m.command()),
                Err(e) => {
                    eprintln!("{}", failure_line(file_path, i, &e));
                    print_error(&e);
                    exit_code = 1;
                }
            }
        }
    }

    process::exit(exit_code);
}

/// A file is either one message or an array of messages.
fn load_messages(path: &str) -> Result<Vec<Value>, BridgeError> {
    let content = fs::read_to_string(path)?;
    match parse_message(&content)? {
        Value::Array(items) => Ok(items),
        single => Ok(vec![single]),
    }
}

/// `✗ <file>[i]: <reason>`, followed on stderr by the indented detail.
fn failure_line(file_path: &str, index: usize, error: &GuardError) -> String {
    format!("✗ {}[{}]: {}", file_path, index, error)
}

fn print_error(error: &GuardError) {
    match error {
        GuardError::NotAnEnvelope => {
            eprintln!("  Not a message envelope:");
            eprintln!("    expected an object with a string 'command'");
        }
        GuardError::UnknownCommand { command } => {
            eprintln!("  Unknown command '{}'", command);
        }
        GuardError::MissingData { command } => {
            eprintln!("  Command '{}' has no object 'data' payload", command);
        }
        GuardError::InvalidPayload { command, reason } => {
            eprintln!("  Invalid payload for '{}':", command);
            eprintln!("    {}", reason);
        }
        e => {
            eprintln!("  {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_failure_line_carries_reason() {
        let err = narrow_message(&json!({"command": "eval"})).unwrap_err();
        let line = failure_line("batch.json", 3, &err);
        assert_eq!(line, format!("✗ batch.json[3]: {}", err));
        assert!(line.contains("eval"));
    }

    #[test]
    fn test_failure_line_for_bad_enum_literal() {
        let v = json!({"command": "log", "data": {"level": {"warn": null}, "message": "m"}});
        let err = narrow_message(&v).unwrap_err();
        assert!(matches!(err, GuardError::InvalidPayload { .. }));
        assert!(failure_line("a.json", 0, &err).starts_with("✗ a.json[0]: "));
        assert!(!failure_line("a.json", 0, &err).ends_with(": "));
    }
}
