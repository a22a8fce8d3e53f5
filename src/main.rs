/// cofre - Secret-Code Unlock Game CLI
use std::env;
use std::path::PathBuf;
use std::process;

use cofre::engine::Catalog;
use cofre::repl;
use cofre::session::{FileStorage, MemoryStorage, Session};
use cofre::CloseMatchPolicy;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_usage() {
    eprintln!("cofre v{}", VERSION);
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    cofre [OPTIONS] --catalog <FILE>");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -h, --help            Print this help message");
    eprintln!("    -v, --version         Print version information");
    eprintln!("    -c, --catalog <FILE>  Catalog of secret codes (TOML)");
    eprintln!("    -d, --data-dir <DIR>  Where progress is stored");
    eprintln!("                          (default: the platform data directory)");
    eprintln!("    --memory              Keep progress in memory only");
    eprintln!("    --seed <N>            Fixed seed for hint selection");
    eprintln!("    --count-close         Count close matches as failed attempts");
    eprintln!("    --max-attempts <N>    Failed attempts before a hint (default: 5)");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("    cofre --catalog codes.toml");
    eprintln!("    cofre --catalog codes.toml --memory --seed 42");
}

fn print_version() {
    println!("cofre {}", VERSION);
}

struct Options {
    catalog: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    memory: bool,
    seed: Option<u64>,
    count_close: bool,
    max_attempts: Option<u32>,
}

fn parse_args() -> Result<Options, String> {
    let args: Vec<String> = env::args().collect();

    let mut catalog = None;
    let mut data_dir = None;
    let mut memory = false;
    let mut seed = None;
    let mut count_close = false;
    let mut max_attempts = None;
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                process::exit(0);
            }
            "-c" | "--catalog" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing file after --catalog".to_string());
                }
                catalog = Some(PathBuf::from(&args[i]));
            }
            "-d" | "--data-dir" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing directory after --data-dir".to_string());
                }
                data_dir = Some(PathBuf::from(&args[i]));
            }
            "--memory" => {
                memory = true;
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value after --seed".to_string());
                }
                seed = Some(
                    args[i]
                        .parse::<u64>()
                        .map_err(|_| format!("Invalid seed: {}", args[i]))?,
                );
            }
            "--count-close" => {
                count_close = true;
            }
            "--max-attempts" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value after --max-attempts".to_string());
                }
                max_attempts = Some(
                    args[i]
                        .parse::<u32>()
                        .map_err(|_| format!("Invalid attempt count: {}", args[i]))?,
                );
            }
            arg => {
                return Err(format!("Unknown option: {}", arg));
            }
        }
        i += 1;
    }

    Ok(Options {
        catalog,
        data_dir,
        memory,
        seed,
        count_close,
        max_attempts,
    })
}

fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("cofre"))
}

fn build_session<S: cofre::Storage>(options: &Options, catalog: Catalog, storage: S) -> Session<S> {
    let mut session = Session::new(catalog, storage);
    if let Some(seed) = options.seed {
        session = session.with_seed(seed);
    }
    if options.count_close {
        session = session.with_policy(CloseMatchPolicy::Counted);
    }
    if let Some(max) = options.max_attempts {
        session = session.with_max_attempts(max);
    }
    session
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let options = match parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    let Some(catalog_path) = options.catalog.as_ref() else {
        eprintln!("Error: Missing --catalog");
        eprintln!();
        print_usage();
        process::exit(1);
    };

    let catalog = match Catalog::load(catalog_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let result = if options.memory {
        let mut session = build_session(&options, catalog, MemoryStorage::new());
        repl::run(&mut session, None)
    } else {
        let data_dir = options
            .data_dir
            .clone()
            .or_else(default_data_dir)
            .unwrap_or_else(|| PathBuf::from(".cofre"));
        let storage = match FileStorage::open(&data_dir) {
            Ok(storage) => storage,
            Err(e) => {
                eprintln!("Error: Could not open data dir '{}': {}", data_dir.display(), e);
                process::exit(1);
            }
        };
        let history = data_dir.join("history.txt");
        let mut session = build_session(&options, catalog, storage);
        repl::run(&mut session, Some(&history))
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
