use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use socialmatrix_core::{
    ConfigManager, Gender, NetworkGenerator, NetworkStore, Person, SocialGraph, SocialMatrixConfig,
};
use socialmatrix_graph::{encode, AnalyticsEngine, GraphAlgebra, MatrixOperation};
use std::path::{Path, PathBuf};
use tabled::{builder::Builder, settings::Style};
use tracing::debug;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, Registry};

#[derive(Parser)]
#[command(name = "socialmatrix")]
#[command(about = "SocialMatrix CLI - Adjacency-matrix algebra over social networks", long_about = None)]
#[command(version)]
struct Cli {
    /// Output format (json, pretty, table)
    #[arg(short, long, global = true, default_value = "pretty")]
    output: OutputFormat,

    /// Configuration file (defaults to ./.socialmatrix.toml or ~/.socialmatrix/config.toml)
    #[arg(long, global = true, env = "SOCIALMATRIX_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine two networks through their adjacency matrices
    Combine {
        /// Matrix operation
        #[arg(value_enum)]
        operation: OperationArg,

        /// First network (JSON)
        graph_a: PathBuf,

        /// Second network (JSON)
        graph_b: PathBuf,

        /// Write the result graph to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Degree table, friend suggestions and adjacency matrix of a network
    Analyze {
        /// Network (JSON)
        graph: PathBuf,

        /// Maximum number of suggestions (overrides the configured limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Generate a random network from the built-in name pools
    Generate {
        /// Network label
        #[arg(short, long)]
        label: String,

        /// Seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write the network to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Copy a network, retagging every person with a new label
    Duplicate {
        /// Network (JSON)
        graph: PathBuf,

        /// Label of the copy
        #[arg(short, long)]
        label: String,

        /// Write the copy to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List people whose name starts with a prefix
    Find {
        /// Network (JSON)
        graph: PathBuf,

        /// Name prefix
        prefix: String,
    },

    /// Edit a network file in place
    Edit {
        /// Network (JSON)
        graph: PathBuf,

        #[command(subcommand)]
        action: EditCommands,
    },
}

#[derive(Clone, ValueEnum)]
enum OperationArg {
    Union,
    Difference,
    Product,
}

impl From<OperationArg> for MatrixOperation {
    fn from(arg: OperationArg) -> Self {
        match arg {
            OperationArg::Union => MatrixOperation::Union,
            OperationArg::Difference => MatrixOperation::Difference,
            OperationArg::Product => MatrixOperation::Product,
        }
    }
}

#[derive(Subcommand)]
enum EditCommands {
    /// Add a person
    AddPerson {
        /// Person name
        name: String,

        /// Gender (male, female, unspecified)
        #[arg(short, long, default_value = "unspecified")]
        gender: Gender,
    },

    /// Add a person with an unused name from the pools
    AddRandomPerson {
        /// Seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Change a person's gender
    SetGender {
        /// Person name
        name: String,

        /// Gender (male, female, unspecified)
        gender: Gender,
    },

    /// Remove a person and every friendship touching them
    RemovePerson {
        /// Person name
        name: String,
    },

    /// Add a friendship between two people
    AddFriendship {
        /// First person
        a: String,

        /// Second person
        b: String,
    },

    /// Remove a friendship in either orientation
    RemoveFriendship {
        /// First person
        a: String,

        /// Second person
        b: String,
    },
}

#[derive(Serialize)]
struct CombineResult {
    operation: String,
    left: String,
    right: String,
    people: usize,
    friendships: usize,
    written_to: Option<String>,
    result: SocialGraph,
}

#[derive(Serialize)]
struct AdjacencyView {
    people: Vec<String>,
    rows: Vec<Vec<u32>>,
}

#[derive(Serialize)]
struct AnalyzeResult {
    network: String,
    people: usize,
    friendships: usize,
    degrees: Vec<socialmatrix_graph::DegreeEntry>,
    suggestions: Vec<socialmatrix_graph::Suggestion>,
    adjacency: AdjacencyView,
}

#[derive(Serialize)]
struct GraphResult {
    network: String,
    people: usize,
    friendships: usize,
    written_to: Option<String>,
    graph: SocialGraph,
}

#[derive(Serialize)]
struct EditResult {
    network: String,
    action: String,
    people: usize,
    friendships: usize,
    file: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            print_output(&cli.output, &output)?;
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<serde_json::Value> {
    let manager = match &cli.config {
        Some(path) => ConfigManager::from_path(path),
        None => ConfigManager::load(),
    }
    .context("Failed to load configuration")?;

    init_tracing(manager.config(), cli.verbose);
    debug!(config_path = ?manager.config_path(), "configuration loaded");

    execute_command(cli, manager.config())
}

fn init_tracing(config: &SocialMatrixConfig, verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level))
    };
    let registry = Registry::default().with(env_filter);

    let installed = match config.logging.format.as_str() {
        "json" => tracing::subscriber::set_global_default(
            registry.with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
        ),
        "compact" => tracing::subscriber::set_global_default(
            registry.with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            ),
        ),
        _ => tracing::subscriber::set_global_default(
            registry.with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr),
            ),
        ),
    };
    installed.ok();
}

fn execute_command(cli: &Cli, config: &SocialMatrixConfig) -> Result<serde_json::Value> {
    match &cli.command {
        Commands::Combine {
            operation,
            graph_a,
            graph_b,
            out,
        } => execute_combine(operation.clone().into(), graph_a, graph_b, out.as_deref()),
        Commands::Analyze { graph, limit } => execute_analyze(graph, *limit, config),
        Commands::Generate { label, seed, out } => {
            execute_generate(label, *seed, out.as_deref(), config)
        }
        Commands::Duplicate { graph, label, out } => {
            let source = load_graph(graph)?;
            let copy = source.duplicate_as(label.as_str());
            graph_output(copy, out.as_deref())
        }
        Commands::Find { graph, prefix } => {
            let graph = load_graph(graph)?;
            let matches: Vec<&Person> = graph.find_people_by_prefix(prefix);
            Ok(serde_json::to_value(matches)?)
        }
        Commands::Edit { graph, action } => execute_edit(graph, action, config),
    }
}

fn execute_combine(
    operation: MatrixOperation,
    graph_a: &Path,
    graph_b: &Path,
    out: Option<&Path>,
) -> Result<serde_json::Value> {
    let a = load_graph(graph_a)?;
    let b = load_graph(graph_b)?;

    let mut algebra = GraphAlgebra::new();
    let result = algebra
        .combine(operation, &a, &b)
        .with_context(|| format!("Failed to compute {} of {} and {}", operation, a.label(), b.label()))?;

    if let Some(path) = out {
        save_graph(path, &result)?;
    }

    let output = CombineResult {
        operation: operation.to_string(),
        left: a.label().to_string(),
        right: b.label().to_string(),
        people: result.person_count(),
        friendships: result.friendship_count(),
        written_to: out.map(|p| p.display().to_string()),
        result,
    };
    Ok(serde_json::to_value(output)?)
}

fn execute_analyze(
    path: &Path,
    limit: Option<usize>,
    config: &SocialMatrixConfig,
) -> Result<serde_json::Value> {
    let graph = load_graph(path)?;

    let engine = match limit {
        Some(0) => bail!("--limit must be at least 1"),
        Some(n) => AnalyticsEngine::new(n),
        None => AnalyticsEngine::from_config(&config.analytics),
    };
    let analytics = engine.analyze(&graph);
    let (index, matrix) = encode(&graph);

    let output = AnalyzeResult {
        network: graph.label().to_string(),
        people: graph.person_count(),
        friendships: graph.friendship_count(),
        degrees: analytics.degrees,
        suggestions: analytics.suggestions,
        adjacency: AdjacencyView {
            people: index.names().map(str::to_string).collect(),
            rows: matrix.to_rows(),
        },
    };
    Ok(serde_json::to_value(output)?)
}

fn execute_generate(
    label: &str,
    seed: Option<u64>,
    out: Option<&Path>,
    config: &SocialMatrixConfig,
) -> Result<serde_json::Value> {
    let generator = NetworkGenerator::new(config.generator.clone());
    let mut rng = seeded_rng(seed);
    let graph = generator.random_network(label, &mut rng);
    graph_output(graph, out)
}

fn execute_edit(
    path: &Path,
    action: &EditCommands,
    config: &SocialMatrixConfig,
) -> Result<serde_json::Value> {
    let mut graph = load_graph(path)?;

    let description = match action {
        EditCommands::AddPerson { name, gender } => {
            let label = graph.label().to_string();
            graph
                .add_person(Person::new(name.as_str(), *gender, label))
                .with_context(|| format!("Failed to add {}", name))?;
            format!("added {}", name.trim())
        }
        EditCommands::AddRandomPerson { seed } => {
            let generator = NetworkGenerator::new(config.generator.clone());
            let mut rng = seeded_rng(*seed);
            let person = generator
                .add_random_person(&mut graph, &mut rng)
                .context("Failed to add a random person")?;
            format!("added {} ({})", person.name, person.gender)
        }
        EditCommands::SetGender { name, gender } => {
            let current = graph
                .get_person(name)
                .cloned()
                .with_context(|| format!("{} is not in {}", name, graph.label()))?;
            graph.update_person(current.with_gender(*gender))?;
            format!("set {} to {}", name, gender)
        }
        EditCommands::RemovePerson { name } => {
            let removed = graph
                .remove_person(name)
                .with_context(|| format!("Failed to remove {}", name))?;
            format!("removed {}", removed.name)
        }
        EditCommands::AddFriendship { a, b } => {
            graph
                .add_friendship(a, b)
                .with_context(|| format!("Failed to connect {} and {}", a, b))?;
            format!("connected {} and {}", a, b)
        }
        EditCommands::RemoveFriendship { a, b } => {
            graph
                .remove_friendship(a, b)
                .with_context(|| format!("Failed to disconnect {} and {}", a, b))?;
            format!("disconnected {} and {}", a, b)
        }
    };

    save_graph(path, &graph)?;

    let output = EditResult {
        network: graph.label().to_string(),
        action: description,
        people: graph.person_count(),
        friendships: graph.friendship_count(),
        file: path.display().to_string(),
    };
    Ok(serde_json::to_value(output)?)
}

fn graph_output(graph: SocialGraph, out: Option<&Path>) -> Result<serde_json::Value> {
    if let Some(path) = out {
        save_graph(path, &graph)?;
    }
    let output = GraphResult {
        network: graph.label().to_string(),
        people: graph.person_count(),
        friendships: graph.friendship_count(),
        written_to: out.map(|p| p.display().to_string()),
        graph,
    };
    Ok(serde_json::to_value(output)?)
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn load_graph(path: &Path) -> Result<SocialGraph> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let graph: SocialGraph = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!(
        network = graph.label(),
        people = graph.person_count(),
        friendships = graph.friendship_count(),
        "loaded {}",
        path.display()
    );
    Ok(graph)
}

fn save_graph(path: &Path, graph: &SocialGraph) -> Result<()> {
    let json = serde_json::to_string_pretty(graph)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!(network = graph.label(), "wrote {}", path.display());
    Ok(())
}

fn print_output(format: &OutputFormat, value: &serde_json::Value) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        OutputFormat::Pretty => {
            print_pretty(value)?;
        }
        OutputFormat::Table => {
            print_table(value)?;
        }
    }
    Ok(())
}

fn print_pretty(value: &serde_json::Value) -> Result<()> {
    match value {
        serde_json::Value::Object(map) => {
            for (key, val) in map {
                let key_colored = key.cyan().bold();
                match val {
                    serde_json::Value::String(s) => {
                        println!("{}: {}", key_colored, s.green());
                    }
                    serde_json::Value::Number(n) => {
                        println!("{}: {}", key_colored, n.to_string().yellow());
                    }
                    serde_json::Value::Null => {
                        println!("{}: {}", key_colored, "-".dimmed());
                    }
                    serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                        println!("{}:", key_colored);
                        print_pretty(val)?;
                    }
                    _ => {
                        println!("{}: {}", key_colored, val);
                    }
                }
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr {
                println!("  {}", compact_line(item));
            }
        }
        _ => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
    }
    Ok(())
}

/// One-line rendering of a row object, e.g. `name=Alice count=2`.
fn compact_line(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{}={}", k, cell(v)))
            .collect::<Vec<_>>()
            .join(" "),
        serde_json::Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join(" "),
        other => cell(other),
    }
}

fn cell(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

fn print_table(value: &serde_json::Value) -> Result<()> {
    match value {
        serde_json::Value::Object(map) => {
            let mut scalars = Builder::default();
            let mut has_scalars = false;
            let mut nested = Vec::new();
            for (key, val) in map {
                match val {
                    serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                        nested.push((key, val))
                    }
                    _ => {
                        scalars.push_record([key.clone(), cell(val)]);
                        has_scalars = true;
                    }
                }
            }
            if has_scalars {
                let mut table = scalars.build();
                table.with(Style::rounded());
                println!("{}", table);
            }
            for (key, val) in nested {
                println!("\n{}", key.cyan().bold());
                print_table(val)?;
            }
        }
        serde_json::Value::Array(rows) => print_rows(rows),
        _ => print_pretty(value)?,
    }
    Ok(())
}

fn print_rows(rows: &[serde_json::Value]) {
    if rows.is_empty() {
        println!("{}", "(none)".dimmed());
        return;
    }

    let mut builder = Builder::default();
    if let Some(serde_json::Value::Object(first)) = rows.first() {
        builder.push_record(first.keys().cloned());
    }
    for row in rows {
        match row {
            serde_json::Value::Object(map) => builder.push_record(map.values().map(cell)),
            serde_json::Value::Array(items) => builder.push_record(items.iter().map(cell)),
            other => builder.push_record([cell(other)]),
        }
    }
    let mut table = builder.build();
    table.with(Style::rounded());
    println!("{}", table);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_network(dir: &TempDir, file: &str, graph: &SocialGraph) -> PathBuf {
        let path = dir.path().join(file);
        save_graph(&path, graph).unwrap();
        path
    }

    fn alice_bob() -> SocialGraph {
        let mut g = SocialGraph::new("A");
        g.add_person(Person::new("Alice", Gender::Female, "A")).unwrap();
        g.add_person(Person::new("Bob", Gender::Male, "A")).unwrap();
        g.add_friendship("Alice", "Bob").unwrap();
        g
    }

    #[test]
    fn parses_combine_and_edit_commands() {
        let cli = Cli::try_parse_from([
            "socialmatrix",
            "--output",
            "json",
            "combine",
            "product",
            "a.json",
            "b.json",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Combine {
                operation: OperationArg::Product,
                ..
            }
        ));

        let cli = Cli::try_parse_from([
            "socialmatrix",
            "edit",
            "a.json",
            "add-person",
            "Carol",
            "--gender",
            "f",
        ])
        .unwrap();
        match cli.command {
            Commands::Edit {
                action: EditCommands::AddPerson { name, gender },
                ..
            } => {
                assert_eq!(name, "Carol");
                assert_eq!(gender, Gender::Female);
            }
            _ => panic!("expected edit add-person"),
        }

        assert!(Cli::try_parse_from(["socialmatrix", "combine", "xor", "a", "b"]).is_err());
    }

    #[test]
    fn combine_writes_result_graph() {
        let dir = TempDir::new().unwrap();
        let a = write_network(&dir, "a.json", &alice_bob());
        let mut carol = SocialGraph::new("B");
        carol.add_person(Person::new("Bob", Gender::Male, "B")).unwrap();
        carol.add_person(Person::new("Carol", Gender::Female, "B")).unwrap();
        carol.add_friendship("Bob", "Carol").unwrap();
        let b = write_network(&dir, "b.json", &carol);
        let out = dir.path().join("result.json");

        let value = execute_combine(MatrixOperation::Product, &a, &b, Some(&out)).unwrap();
        assert_eq!(value["people"], 3);
        assert_eq!(value["friendships"], 1);

        let written = load_graph(&out).unwrap();
        assert_eq!(written.label(), "Result");
        assert!(written.are_friends("Alice", "Carol"));
    }

    #[test]
    fn edit_rewrites_file_and_reports_failures() {
        let dir = TempDir::new().unwrap();
        let path = write_network(&dir, "a.json", &alice_bob());
        let config = SocialMatrixConfig::default();

        execute_edit(
            &path,
            &EditCommands::RemovePerson {
                name: "Bob".to_string(),
            },
            &config,
        )
        .unwrap();
        let graph = load_graph(&path).unwrap();
        assert_eq!(graph.person_count(), 1);
        assert_eq!(graph.friendship_count(), 0);

        let err = execute_edit(
            &path,
            &EditCommands::AddFriendship {
                a: "Alice".to_string(),
                b: "Alice".to_string(),
            },
            &config,
        );
        assert!(err.is_err());
    }

    #[test]
    fn analyze_rejects_zero_limit() {
        let dir = TempDir::new().unwrap();
        let path = write_network(&dir, "a.json", &alice_bob());
        let config = SocialMatrixConfig::default();

        assert!(execute_analyze(&path, Some(0), &config).is_err());
        let value = execute_analyze(&path, None, &config).unwrap();
        assert_eq!(value["adjacency"]["rows"], serde_json::json!([[0, 1], [1, 0]]));
        assert_eq!(value["degrees"][0]["name"], "Alice");
    }

    #[test]
    fn compact_line_renders_rows() {
        let row = serde_json::json!({ "count": 2, "name": "Alice" });
        assert_eq!(compact_line(&row), "count=2 name=Alice");
        assert_eq!(compact_line(&serde_json::json!([0, 1])), "0 1");
    }
}
