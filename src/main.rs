use clap::Parser;
use folio::cli::{
    handle_delete, handle_hash_password, handle_init, handle_list, handle_serve, load_config, Cli,
    Commands,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("FOLIO_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = load_config(&cli).and_then(|config| match cli.command {
        Commands::Init => handle_init(&config),
        Commands::Serve { bind } => handle_serve(config, bind),
        Commands::List { kind, json } => handle_list(&config, &kind, json),
        Commands::Delete { kind, id, category } => handle_delete(&config, &kind, &id, category),
        Commands::HashPassword => handle_hash_password(),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
