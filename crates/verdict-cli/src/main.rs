use std::{
    error::Error,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, ValueEnum};
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use verdict::{Config, ValidationOptions};

/// Check whether JSON documents are valid against a JSON Schema (Draft 2020-12).
#[derive(Parser, Debug)]
#[command(name = "verdict-cli", version, about)]
struct Cli {
    /// The JSON Schema to validate with.
    schema: PathBuf,

    /// JSON documents to validate. May be given multiple times.
    #[arg(short = 'i', long = "instance", required = true)]
    instances: Vec<PathBuf>,

    /// JSON file with `max_ref_depth` and `default_base_uri` settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// How many references may be followed without consuming any of the instance.
    #[arg(long)]
    max_ref_depth: Option<usize>,

    /// Base URI of the schema when it has no `$id`.
    #[arg(long)]
    base_uri: Option<String>,

    /// Make a schema document available to references, as `URI=FILE`.
    #[arg(long = "resource", value_parser = parse_resource)]
    resources: Vec<(String, PathBuf)>,

    /// Skip validating the schema against its meta-schema.
    #[arg(long)]
    no_schema_validation: bool,

    #[arg(long, value_enum, default_value_t = Output::Text)]
    output: Output,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Output {
    /// `<path> - VALID` or `<path> - INVALID`
    Text,
    /// `true` or `false`
    Plain,
}

fn parse_resource(value: &str) -> Result<(String, PathBuf), String> {
    match value.split_once('=') {
        Some((uri, path)) if !uri.is_empty() && !path.is_empty() => {
            Ok((uri.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected `URI=FILE`, got `{value}`")),
    }
}

fn read_json(path: &Path) -> Result<Value, Box<dyn Error>> {
    let contents = fs::read_to_string(path)
        .map_err(|error| format!("Failed to read {}: {error}", path.display()))?;
    let value = serde_json::from_str(&contents)
        .map_err(|error| format!("Failed to parse {}: {error}", path.display()))?;
    Ok(value)
}

fn options(cli: &Cli) -> Result<ValidationOptions, Box<dyn Error>> {
    let mut options = verdict::options();
    if let Some(path) = &cli.config {
        let config: Config = serde_json::from_value(read_json(path)?)
            .map_err(|error| format!("Invalid configuration in {}: {error}", path.display()))?;
        options = options.with_config(config);
    }
    if let Some(depth) = cli.max_ref_depth {
        options = options.with_max_ref_depth(depth);
    }
    if let Some(base_uri) = &cli.base_uri {
        options = options.with_base_uri(base_uri.as_str());
    }
    for (uri, path) in &cli.resources {
        options = options.with_resource(uri.as_str(), read_json(path)?);
    }
    Ok(options.should_validate_schema(!cli.no_schema_validation))
}

/// Returns whether every instance is valid.
fn run(cli: &Cli) -> Result<bool, Box<dyn Error>> {
    let options = options(cli)?;
    let schema = read_json(&cli.schema)?;
    let instances = cli
        .instances
        .iter()
        .map(|path| read_json(path).map(|instance| (path, instance)))
        .collect::<Result<Vec<_>, _>>()?;

    let validator = match options.build(&schema) {
        Ok(validator) => Some(validator),
        Err(error) => {
            writeln!(io::stderr(), "Schema error: {error}")?;
            None
        }
    };

    let mut stdout = io::stdout().lock();
    let mut all_valid = true;
    for (path, instance) in &instances {
        let valid = validator
            .as_ref()
            .is_some_and(|validator| validator.is_valid(instance));
        tracing::debug!(instance = %path.display(), valid, "Validated");
        all_valid &= valid;
        match cli.output {
            Output::Text => {
                let verdict = if valid { "VALID" } else { "INVALID" };
                writeln!(stdout, "{} - {verdict}", path.display())?;
            }
            Output::Plain => writeln!(stdout, "{valid}")?,
        }
    }
    Ok(all_valid)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(error) => {
            let _ = writeln!(io::stderr(), "Error: {error}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_resource, Cli};
    use clap::CommandFactory;
    use std::path::PathBuf;
    use test_case::test_case;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn resource_argument() {
        assert_eq!(
            parse_resource("http://example.com/a.json=defs/a.json"),
            Ok((
                "http://example.com/a.json".to_string(),
                PathBuf::from("defs/a.json")
            ))
        );
    }

    #[test_case("no-separator")]
    #[test_case("=file.json" ; "missing uri")]
    #[test_case("http://example.com/=" ; "missing file")]
    fn malformed_resource_argument(value: &str) {
        assert!(parse_resource(value).is_err());
    }
}
