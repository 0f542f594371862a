//! Rime Switcher CLI
//!
//! Entry point for the `rime-switcher` command-line tool.

use clap::{Parser, Subcommand, ValueEnum};
use rime_switcher::logging::init_logging;
use rime_switcher::{
    ConfigStore, FileDocumentStore, Layered, OptionSwitcher, Query, Settings, BASE_CONFIG_ID,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "rime-switcher")]
#[command(about = "Inspect Rime front-end configuration and option switchers", version)]
struct Cli {
    /// Path to settings file (default: ~/.config/rime-switcher/settings.toml)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output in human-readable format instead of JSON
    #[arg(long, global = true)]
    human: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ValueType {
    Bool,
    Int,
    Double,
    String,
    Color,
    Image,
    List,
}

#[derive(Subcommand)]
enum Commands {
    /// Read one typed value from a document
    Get {
        /// Path such as style/font_point or switches/@0/name
        path: String,

        /// Alias replacing the last path component when the path is absent
        #[arg(long)]
        alias: Option<String>,

        /// Type to read the value as
        #[arg(long = "type", value_enum, default_value = "string")]
        value_type: ValueType,

        /// Document name: squirrel, default, user, installation, or a schema id
        #[arg(long, default_value = BASE_CONFIG_ID)]
        doc: String,

        /// Fall back to the base document when the value is absent
        #[arg(long)]
        fallback: bool,
    },

    /// Show the option switcher declared by a schema
    Switcher {
        /// Schema id
        schema: String,
    },

    /// Set the active state of an option group
    SetState {
        /// Schema id
        schema: String,

        /// Group name or any member of the group
        option: String,

        /// New active state
        state: String,
    },

    /// Switch to a script variant
    Variant {
        /// Schema id
        schema: String,

        /// Variant name, e.g. traditional or !simplification
        variant: String,
    },

    /// Show the per-application options snapshot
    AppOptions {
        /// Application bundle id
        app_id: String,

        /// Document to read app options from
        #[arg(long, default_value = BASE_CONFIG_ID)]
        doc: String,
    },

    /// Show where a document was loaded from
    Inspect {
        /// Document name: squirrel, default, user, installation, or a schema id
        name: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match load_settings(cli.settings) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading settings: {}", e);
            process::exit(1);
        }
    };

    match cli.command {
        Commands::Get {
            path,
            alias,
            value_type,
            doc,
            fallback,
        } => {
            run_get(&settings, &path, alias.as_deref(), value_type, &doc, fallback, cli.human);
        }
        Commands::Switcher { schema } => {
            let switcher = load_switcher(&settings, &schema);
            print_switcher(&switcher, cli.human);
        }
        Commands::SetState { schema, option, state } => {
            let mut switcher = load_switcher(&settings, &schema);
            if let Err(e) = switcher.update_group_state(&state, &option) {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
            print_switcher(&switcher, cli.human);
        }
        Commands::Variant { schema, variant } => {
            let mut switcher = load_switcher(&settings, &schema);
            if let Err(e) = switcher.update_current_script_variant(&variant) {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
            print_switcher(&switcher, cli.human);
        }
        Commands::AppOptions { app_id, doc } => {
            run_app_options(&settings, &app_id, &doc, cli.human);
        }
        Commands::Inspect { name } => {
            run_inspect(&settings, &name, cli.human);
        }
    }
}

fn load_settings(path: Option<PathBuf>) -> Result<Settings, rime_switcher::SettingsError> {
    match path {
        Some(p) => Settings::load(&p),
        None => Settings::load_default(),
    }
}

fn open_store(settings: &Settings, name: &str) -> ConfigStore {
    let documents = FileDocumentStore::new(&settings.user_data_dir, &settings.shared_data_dir);
    let mut store = ConfigStore::new(Arc::new(documents), settings.clone());
    if let Err(e) = store.open_by_name(name) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
    store
}

fn load_switcher(settings: &Settings, schema: &str) -> OptionSwitcher {
    let store = open_store(settings, schema);
    match store.option_switcher_for_schema() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Invalid switches in schema '{}': {}", schema, e);
            process::exit(1);
        }
    }
}

fn read_value<S: TypedRead>(source: &S, query: Query<'_>, value_type: ValueType) -> Option<Value> {
    match value_type {
        ValueType::Bool => source.read::<bool>(query).map(Value::from),
        ValueType::Int => source.read::<i64>(query).map(Value::from),
        ValueType::Double => source.read::<f64>(query).map(Value::from),
        ValueType::String => source.read::<String>(query).map(Value::from),
        ValueType::List => source.read::<Vec<String>>(query).map(Value::from),
        ValueType::Color => source
            .read::<rime_switcher::Color>(query)
            .and_then(|c| serde_json::to_value(c).ok()),
        ValueType::Image => source.read::<rime_switcher::ImageRef>(query).map(|image| {
            json!({
                "path": image.path.display().to_string(),
                "format": image.format_name(),
            })
        }),
    }
}

/// A single store or a schema-then-base chain.
trait TypedRead {
    fn read<T: rime_switcher::FromConfig>(&self, query: Query<'_>) -> Option<T>;
}

impl TypedRead for ConfigStore {
    fn read<T: rime_switcher::FromConfig>(&self, query: Query<'_>) -> Option<T> {
        self.get(query)
    }
}

impl TypedRead for Layered<'_> {
    fn read<T: rime_switcher::FromConfig>(&self, query: Query<'_>) -> Option<T> {
        self.get(query)
    }
}

fn run_get(
    settings: &Settings,
    path: &str,
    alias: Option<&str>,
    value_type: ValueType,
    doc: &str,
    fallback: bool,
    human: bool,
) {
    let mut query = Query::new(path);
    if let Some(alias) = alias {
        query = query.alias(alias);
    }

    let store = open_store(settings, doc);
    let value = if fallback && doc != BASE_CONFIG_ID {
        let base = open_store(settings, BASE_CONFIG_ID);
        read_value(&Layered::new(&store, &base), query, value_type)
    } else {
        read_value(&store, query, value_type)
    };

    match value {
        Some(v) if human => println!("{}: {}", path, v),
        Some(v) => print_json(&json!({ "path": path, "value": v })),
        None => {
            if human {
                println!("{}: (absent)", path);
            } else {
                print_json(&json!({ "path": path, "value": null }));
            }
            process::exit(1);
        }
    }
}

fn print_switcher(switcher: &OptionSwitcher, human: bool) {
    if !human {
        print_json(switcher);
        return;
    }

    println!("Schema: {}", switcher.schema_id());
    println!("Version: {}", switcher.version());
    if switcher.is_empty() {
        println!("No tracked options.");
    }
    for group in switcher.groups() {
        let active = switcher.group_state(&group.name).unwrap_or("-");
        println!("  group {} = {}  [{}]", group.name, active, group.states.join(", "));
    }
    for toggle in switcher.toggles() {
        let state = if switcher.is_active(toggle) { "on" } else { "off" };
        println!("  toggle {} = {}", toggle, state);
    }
    if let Some(variant) = switcher.current_script_variant() {
        println!("Script variant: {} ({})", variant, switcher.script_locale());
    }
}

fn run_app_options(settings: &Settings, app_id: &str, doc: &str, human: bool) {
    let store = open_store(settings, doc);
    let options = store.app_options(app_id);

    if !human {
        print_json(&options);
        return;
    }

    if options.is_empty() {
        println!("No options for {}.", app_id);
        return;
    }
    println!("Options for {}:", app_id);
    for (name, value) in options.iter() {
        println!("  {} = {}", name, serde_json::to_string(&value).unwrap_or_default());
    }
}

fn run_inspect(settings: &Settings, name: &str, human: bool) {
    let store = open_store(settings, name);
    let (Some(id), Some(source)) = (store.document_id(), store.source()) else {
        eprintln!("Error: no document open");
        process::exit(1);
    };

    if human {
        println!("Document: {}", id);
        println!("Path: {}", source.path.as_deref().unwrap_or("(memory)"));
        println!("Digest: {}", source.digest);
        println!("Loaded: {}", source.loaded_at.to_rfc3339());
    } else {
        print_json(&json!({ "document": id.to_string(), "source": source }));
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}
