use std::env;
use std::path::PathBuf;

use dash_core::ids::IdGenerator;
use dash_core::logging::init_logging;
use dash_core::persistence::FileSlotStorage;
use dash_core::persistence::PersistenceAdapter;
use dash_core::store::DashboardStore;

mod commands;
mod render;
mod settings;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Default)]
struct GlobalArgs {
    config: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    rest: Vec<String>,
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_global_args(env::args().skip(1).collect())?;
    let Some(first) = args.rest.first() else {
        print_help();
        return Ok(());
    };

    match first.as_str() {
        "--help" | "-h" | "help" => {
            print_help();
            return Ok(());
        }
        "--version" | "-V" | "version" => {
            println!("dash {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    let command = commands::parse_command(&args.rest).inspect_err(|_| print_help())?;
    let config = settings::load_config(args.config.as_deref())?;
    init_logging(&config.logging.level, config.logging.dir.as_deref())?;

    let data_dir = settings::resolve_data_dir(&config, args.data_dir.as_deref());
    let storage = FileSlotStorage::open(&data_dir)?;
    let adapter = PersistenceAdapter::with_key(storage, config.storage.slot_key.clone());
    log::debug!(
        "event=cli_start module=cli data_dir={} key={}",
        adapter.storage().dir().display(),
        adapter.key()
    );
    let mut store = DashboardStore::with_adapter(adapter);
    let mut ids = IdGenerator::new();

    let output = commands::execute(&mut store, &mut ids, command)?;
    print!("{output}");
    Ok(())
}

fn parse_global_args(args: Vec<String>) -> Result<GlobalArgs, Box<dyn std::error::Error>> {
    let mut parsed = GlobalArgs::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "--data-dir" => {
                let Some(value) = args.get(i + 1) else {
                    return Err(format!("{} requires a path", args[i]).into());
                };
                if args[i] == "--config" {
                    parsed.config = Some(PathBuf::from(value));
                } else {
                    parsed.data_dir = Some(PathBuf::from(value));
                }
                i += 2;
            }
            _ => {
                parsed.rest.push(args[i].clone());
                i += 1;
            }
        }
    }
    Ok(parsed)
}

fn print_help() {
    println!("dash {}", env!("CARGO_PKG_VERSION"));
    println!("Usage:");
    println!("  dash [--config PATH] [--data-dir PATH] COMMAND");
    println!();
    println!("Commands:");
    println!("  show                                   dashboard with displayed widgets");
    println!("  catalog                                all widgets grouped by category");
    println!("  search [QUERY]                         search widgets by name, text or category");
    println!("  add-category NAME");
    println!("  remove-category ID                     also deletes widgets the category owns");
    println!("  add-widget --category ID --name NAME [--text TEXT]");
    println!("  remove-widget ID");
    println!("  show-widget CATEGORY WIDGET");
    println!("  hide-widget CATEGORY WIDGET");
    println!("  pick CATEGORY WIDGET on|off");
    println!("  import PATH                            replace the dashboard from a JSON file");
    println!("  export                                 print the stored JSON");
    println!("  reset                                  restore the sample dashboard");
    println!("  --help");
    println!("  --version");
}
