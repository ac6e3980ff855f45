//! pdf-gateway - CLI entry point

use anyhow::Context;
use clap::Parser;
use pdf_gateway::{
    exit_codes, Cli, Commands, ConfigError, ConvertArgs, DocumentSource, Gateway, GatewayConfig,
    ServeArgs, WebServer,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => run_serve(&args),
        Commands::Convert(args) => run_convert(&args),
    };

    std::process::exit(match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            if e.downcast_ref::<ConfigError>().is_some() {
                exit_codes::CONFIG_ERROR
            } else {
                exit_codes::GENERAL_ERROR
            }
        }
    });
}

fn load_config(path: Option<&std::path::PathBuf>) -> Result<GatewayConfig, ConfigError> {
    match path {
        Some(path) => GatewayConfig::load_from_path(path),
        None => GatewayConfig::load(),
    }
}

// ============ Serve Command ============

fn run_serve(args: &ServeArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(port) = args.port {
        config.server.port = Some(port);
    }
    if let Some(bind) = &args.bind {
        config.server.bind = bind.clone();
    }
    config.validate()?;

    tracing::info!(
        upstream = %config.gotenberg.url,
        auth = config.gotenberg.auth_enabled,
        port = config.port(),
        "starting gateway"
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let server = WebServer::new(&config);
        server
            .run()
            .await
            .map_err(|e| anyhow::anyhow!("server error: {e}"))
    })
}

// ============ Convert Command ============

fn run_convert(args: &ConvertArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_ref())?;
    config.validate_upstream()?;

    let source = match &args.input {
        Some(input) => {
            let html = std::fs::read_to_string(input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            DocumentSource::Raw { html }
        }
        None => DocumentSource::Templated {
            header: args.header.clone().unwrap_or_default(),
            body: args.body.clone().unwrap_or_default(),
            footer: args.footer.clone().unwrap_or_default(),
        },
    };

    let rt = tokio::runtime::Runtime::new()?;
    let written = rt.block_on(async {
        let gateway = Gateway::from_config(&config);
        gateway.generate_to_file(&source, &args.output).await
    })?;

    println!("Wrote {} ({} bytes)", args.output.display(), written);
    Ok(())
}
