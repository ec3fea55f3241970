//! GamePulse CLI - inspect, canonicalize and run dashboard URLs

mod config;
mod logging;

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use gamepulse_core::presets::{self, PresetGroup};
use gamepulse_core::url::{self, CompareSet, QueryParams};
use gamepulse_core::{FilterController, FilterState, QueryClient};

#[derive(Parser)]
#[command(name = "gamepulse-cli")]
#[command(author, version, about = "GamePulse dashboard URL and query tool", long_about = None)]
struct Cli {
    /// Config file (TOML); defaults to <data dir>/gamepulse/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// RPC gateway base URL
    #[arg(long, global = true, env = "GAMEPULSE_API_URL")]
    api_url: Option<String>,

    /// API key sent with every request
    #[arg(long, global = true, env = "GAMEPULSE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the filter state encoded in a URL as JSON
    Decode {
        /// Dashboard URL or query string ("-" reads stdin)
        input: String,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Build the canonical query string for a filter state JSON document
    Encode {
        /// Read the JSON from a file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Rewrite a URL into its canonical query string
    Normalize {
        /// Dashboard URL or query string ("-" reads stdin)
        input: String,
    },

    /// Summarize the filters, presets and compare set of a URL
    Inspect {
        /// Dashboard URL or query string ("-" reads stdin)
        input: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the filters of a URL against the remote API
    Query {
        /// Dashboard URL or query string ("-" reads stdin)
        input: String,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init_logging(cli.log_dir.as_deref());

    match cli.command {
        Commands::Decode { input, pretty } => {
            let state = url::decode(&QueryParams::parse(&read_input(&input)?));
            println!("{}", to_json(&state, pretty)?);
        }
        Commands::Encode { file } => {
            println!("{}", cmd_encode(file.as_deref())?);
        }
        Commands::Normalize { input } => {
            let controller = FilterController::from_query(&read_input(&input)?);
            println!("{}", controller.query_string());
        }
        Commands::Inspect { input, json } => {
            let report = InspectReport::from_query(&read_input(&input)?);
            if json {
                println!("{}", to_json(&report, true)?);
            } else {
                print!("{}", report.render());
            }
        }
        Commands::Query { input, pretty } => {
            let config = config::load_config(cli.config.as_deref())?;
            let config = config::apply_overrides(config, cli.api_url, cli.api_key);
            let results = cmd_query(config, &read_input(&input)?).await?;
            println!("{}", to_json(&results, pretty)?);
        }
    }

    Ok(())
}

/// Read a positional input, where `-` means stdin.
fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        Ok(text.trim().to_string())
    } else {
        Ok(input.to_string())
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    text.context("Failed to serialize output")
}

fn cmd_encode(file: Option<&Path>) -> Result<String> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => read_input("-")?,
    };
    encode_json(&text)
}

fn encode_json(text: &str) -> Result<String> {
    let state: FilterState = serde_json::from_str(text).context("Invalid filter state JSON")?;
    Ok(url::encode(&state).to_query_string())
}

async fn cmd_query(config: gamepulse_core::QueryConfig, input: &str) -> Result<gamepulse_core::QueryResults> {
    let mut controller = FilterController::default();
    let commit = controller.navigate(input);
    info!(commit = %commit.id, query = %commit.query, base_url = %config.base_url, "Running query");

    let client = QueryClient::new(config).context("Failed to create HTTP client")?;
    match client.run(&commit.state).await {
        Ok(results) => {
            info!(rows = results.rows.len(), "Query finished");
            Ok(results)
        }
        Err(e) => {
            warn!(error = %e, "Query failed");
            anyhow::bail!("{}", e.user_message())
        }
    }
}

// ============================================================================
// Inspect
// ============================================================================

#[derive(Debug, Serialize)]
struct InspectReport {
    query: String,
    active_filters: usize,
    summary: String,
    presets: Vec<ActivePreset>,
    compare: Vec<u32>,
}

#[derive(Debug, Serialize)]
struct ActivePreset {
    group: PresetGroup,
    preset: presets::PresetId,
}

impl InspectReport {
    fn from_query(input: &str) -> Self {
        let params = QueryParams::parse(input);
        let state = url::decode(&params);
        let compare = CompareSet::decode(&params);

        let mut canonical = url::encode(&state);
        compare.encode_into(&mut canonical);

        let presets = PresetGroup::ALL
            .iter()
            .filter_map(|group| {
                presets::active_preset(&state, *group).map(|preset| ActivePreset { group: *group, preset })
            })
            .collect();

        Self {
            query: canonical.to_query_string(),
            active_filters: state.active_filter_count(),
            summary: state.describe(),
            presets,
            compare: compare.ids().to_vec(),
        }
    }

    fn render(&self) -> String {
        let presets = if self.presets.is_empty() {
            "-".to_string()
        } else {
            self.presets
                .iter()
                .map(|p| format!("{}: {}", p.group.field().label(), p.preset.label()))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let compare = if self.compare.is_empty() {
            "-".to_string()
        } else {
            self.compare.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
        };

        format!(
            "Query:          {}\nActive filters: {}\nSummary:        {}\nPresets:        {}\nCompare:        {}\n",
            if self.query.is_empty() { "-" } else { &self.query },
            self.active_filters,
            self.summary,
            presets,
            compare,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use gamepulse_core::presets::PresetId;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "gamepulse-cli",
            "query",
            "?genres=1",
            "--api-url",
            "http://localhost:9999",
            "--log-dir",
            "/tmp/logs",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:9999"));
        assert_eq!(cli.log_dir, Some(PathBuf::from("/tmp/logs")));
        assert!(matches!(cli.command, Commands::Query { pretty: false, .. }));
    }

    #[test]
    fn test_encode_json() {
        let query = encode_json(r#"{"type":"dlc","genres":{"ids":[1,2],"mode":"any"},"price":{"max":19.99}}"#).unwrap();
        assert_eq!(query, "type=dlc&maxPrice=19.99&genres=1,2&genreMode=any");

        assert_eq!(encode_json("{}").unwrap(), "");
        assert!(encode_json("[1, 2]").is_err());
    }

    #[test]
    fn test_inspect_report() {
        let report = InspectReport::from_query("https://example.com/?minGrowth7d=10&compare=730,570,730&junk=1");
        assert_eq!(report.query, "minGrowth7d=10&compare=730,570");
        assert_eq!(report.active_filters, 1);
        assert_eq!(report.compare, vec![730, 570]);
        assert_eq!(report.presets.len(), 1);
        assert_eq!(report.presets[0].group, PresetGroup::Growth7d);
        assert_eq!(report.presets[0].preset, PresetId::Growing);

        let text = report.render();
        assert!(text.contains("Presets:        Growth 7d: Growing"));
        assert!(text.contains("Compare:        730, 570"));
    }

    #[tokio::test]
    async fn test_query_reports_unreachable_server() {
        // Bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = gamepulse_core::QueryConfig {
            base_url: format!("http://{}", addr),
            timeout_ms: 2_000,
            ..Default::default()
        };
        let err = cmd_query(config, "?genres=1").await.unwrap_err();
        assert!(err.to_string().contains("try again"), "{err}");
    }

    #[test]
    fn test_inspect_default_state() {
        let report = InspectReport::from_query("");
        assert_eq!(report.active_filters, 0);
        assert!(report.render().starts_with("Query:          -\n"));
    }
}
