mod cli;

use vidshelf::{config, library::Library, server};
use vidshelf_common::{LibraryItem, LibrarySnapshot};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&Path>,
) -> Result<()> {
    // Load config
    let mut config = config::load_config_or_default(config_path)?;

    // Override host/port from CLI if specified
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config::validate_config(&config)?;

    tracing::info!("Starting vidshelf server");
    tracing::info!("Media directory: {:?}", config.library.media_dir);
    tracing::info!("Metadata directory: {:?}", config.library.metadata_dir);
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    server::start_server(config).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            // Verbose mode: trace for vidshelf, debug for HTTP
            "vidshelf=trace,vidshelf_common=debug,vidshelf_parser=debug,tower_http=debug"
                .to_string()
        } else {
            // Normal mode: info for vidshelf and HTTP requests
            "vidshelf=info,tower_http=info".to_string()
        }
    });

    // Logs go to stderr so `scan --json` output stays machine readable.
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            // Create tokio runtime
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Scan { json } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(scan(cli.config.as_deref(), json))
        }
        Commands::Validate { file } => {
            let path = file.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("vidshelf {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn scan(config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let library = Library::from_config(&config)?;
    let snapshot = library.snapshot().await?;

    if json {
        let json_str = serde_json::to_string_pretty(snapshot.as_ref())?;
        println!("{}", json_str);
    } else {
        print_tree(&snapshot);
    }

    Ok(())
}

fn print_tree(snapshot: &LibrarySnapshot) {
    let shows = snapshot.shows().count();
    let episodes: usize = snapshot.shows().map(|s| s.episode_count()).sum();
    println!(
        "{} movies, {} shows, {} episodes\n",
        snapshot.movies().count(),
        shows,
        episodes
    );

    for item in snapshot.items() {
        match item {
            LibraryItem::Movie(movie) => {
                print!("[movie] {} ({})", movie.title, movie.id);
                if movie.subtitles_url.is_some() {
                    print!(" [subtitles]");
                }
                println!();
            }
            LibraryItem::Show(show) => {
                println!("[show]  {} ({})", show.title, show.id);
                for season in &show.seasons {
                    println!("          Season {}", season.season_number);
                    for ep in &season.episodes {
                        print!("            E{:<3} {} ({})", ep.episode_number, ep.title, ep.id);
                        if ep.subtitles_url.is_some() {
                            print!(" [subtitles]");
                        }
                        println!();
                    }
                }
            }
        }
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  Media directory: {:?}", config.library.media_dir);
            println!("  Metadata directory: {:?}", config.library.metadata_dir);
            println!("  Snapshot cache: {}", config.library.cache_snapshots);
            println!("  Metadata provider enabled: {}", config.provider.enabled);
            if let Some(ref endpoint) = config.provider.endpoint {
                println!("    Endpoint: {}", endpoint);
            }
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  Media directory: {:?}", config.library.media_dir);
        }
    }

    Ok(())
}
