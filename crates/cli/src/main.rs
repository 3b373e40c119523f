mod store;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use osydata_core::{convert_str, parse_str, Diagnostics};
use osydata_storage::{CaseStore as _, StoreConfig};
use store::DirStore;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// GMPL data-file conversion toolchain.
#[derive(Parser)]
#[command(name = "osydata", version, about = "GMPL data-file conversion toolchain")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a data file to the consumer's case JSON
    Convert {
        /// Path to the data file
        file: PathBuf,
        /// Write the full bundle to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Write one JSON document per record group into this directory
        #[arg(long)]
        case_dir: Option<PathBuf>,
        /// Mirror case-directory writes into a second directory
        #[arg(long, requires = "case_dir")]
        mirror: Option<PathBuf>,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Print a structural summary of a data file without converting it
    Inspect {
        /// Path to the data file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Convert {
            file,
            out,
            case_dir,
            mirror,
            pretty,
        } => cmd_convert(
            &file,
            out.as_deref(),
            case_dir.as_deref(),
            mirror,
            pretty,
            cli.output,
            cli.quiet,
        ),
        Commands::Inspect { file } => cmd_inspect(&file, cli.output),
    }
}

fn read_input(file: &Path) -> String {
    match fs::read_to_string(file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: cannot read {}: {}", file.display(), e);
            process::exit(1);
        }
    }
}

fn cmd_convert(
    file: &Path,
    out: Option<&Path>,
    case_dir: Option<&Path>,
    mirror: Option<PathBuf>,
    pretty: bool,
    output: OutputFormat,
    quiet: bool,
) {
    let text = read_input(file);
    let conversion = convert_str(&text);
    if conversion.empty_input {
        eprintln!(
            "error: {} contains no set or param declarations",
            file.display()
        );
        process::exit(1);
    }

    let bundle_json = match serde_json::to_value(&conversion.bundle) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: cannot serialize bundle: {}", e);
            process::exit(1);
        }
    };

    if let Some(dir) = case_dir {
        let store = DirStore::new(dir.to_path_buf(), StoreConfig { pretty, mirror });
        if let Err(e) = write_case_dir(&store, &bundle_json) {
            eprintln!("error: {}", e);
            process::exit(1);
        }
        if !quiet {
            eprintln!("wrote case directory {}", dir.display());
        }
    } else {
        let rendered = render_json(&bundle_json, pretty);
        match out {
            Some(path) => {
                if let Err(e) = fs::write(path, rendered + "\n") {
                    eprintln!("error: cannot write {}: {}", path.display(), e);
                    process::exit(1);
                }
            }
            None => println!("{}", rendered),
        }
    }

    if !quiet {
        report_diagnostics(&conversion.diagnostics, output);
    }
}

/// One document per record group plus genData, so the layout matches what
/// the consumer application reads back per case.
fn write_case_dir(
    store: &DirStore,
    bundle_json: &serde_json::Value,
) -> Result<(), osydata_storage::StorageError> {
    if let Some(map) = bundle_json.as_object() {
        for (key, doc) in map {
            store.put(key, doc)?;
        }
    }
    Ok(())
}

fn render_json(value: &serde_json::Value, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(value).unwrap_or_default()
    } else {
        value.to_string()
    }
}

fn report_diagnostics(diag: &Diagnostics, output: OutputFormat) {
    match output {
        OutputFormat::Json => {
            if let Ok(js) = serde_json::to_string(diag) {
                eprintln!("{}", js);
            }
        }
        OutputFormat::Text => {
            eprintln!(
                "diagnostics: {} unknown params, {} skipped blocks, {} bad values, {} ambiguous slices, {} dropped tuples",
                diag.unknown_params,
                diag.skipped_blocks,
                diag.coercion_failures,
                diag.ambiguous_slices,
                diag.dropped_tuples
            );
        }
    }
}

fn cmd_inspect(file: &Path, output: OutputFormat) {
    let text = read_input(file);
    let parsed = parse_str(&text);
    if parsed.is_empty() {
        eprintln!(
            "error: {} contains no set or param declarations",
            file.display()
        );
        process::exit(1);
    }

    match output {
        OutputFormat::Json => {
            let sets: serde_json::Map<String, serde_json::Value> = parsed
                .sets
                .iter()
                .map(|(name, members)| (name.clone(), serde_json::Value::from(members.len())))
                .collect();
            let params: Vec<serde_json::Value> = parsed
                .params
                .iter()
                .map(|p| {
                    serde_json::json!({
                        "name": p.name,
                        "default": p.default,
                        "slices": p.slices.len(),
                        "rows": p.slices.iter().map(|s| s.rows.len()).sum::<usize>(),
                    })
                })
                .collect();
            let summary = serde_json::json!({ "sets": sets, "params": params });
            println!("{}", summary);
        }
        OutputFormat::Text => {
            println!("Sets ({}):", parsed.sets.len());
            for (name, members) in &parsed.sets {
                println!("  {}: {} members", name, members.len());
            }
            println!("Params ({}):", parsed.params.len());
            for p in &parsed.params {
                let rows: usize = p.slices.iter().map(|s| s.rows.len()).sum();
                println!(
                    "  {} (default={}, slices={}, rows={})",
                    p.name,
                    p.default.as_deref().unwrap_or("-"),
                    p.slices.len(),
                    rows
                );
            }
        }
    }
}
