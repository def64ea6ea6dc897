use std::{error::Error, sync::Arc};

use clap::Parser;
use shape_redemption_checker::{
    load_config, run_interactive, Args, CheckerConfig, Command, RedemptionChecker,
};
use shape_resolver_client_utils::GatewayResolverClient;

fn init_logging(config: &CheckerConfig) {
    let env = env_logger::Env::default().default_filter_or(config.logging.level.as_str());
    env_logger::Builder::from_env(env).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    init_logging(&config);

    let resolver = GatewayResolverClient::new(
        config.resolver_base_url()?,
        config.resolver.api_key.as_deref(),
        config.resolver.timeout(),
    )?;

    let mut input = config.initial_input();
    args.apply_to(&mut input);

    let checker = Arc::new(RedemptionChecker::new(
        resolver,
        input,
        config.price_bounds.partial,
    ));

    let outcome = match args.command {
        Command::Single { .. } => checker.check_single().await,
        Command::Batch { .. } => checker.check_batch().await,
        Command::Interactive => {
            run_interactive(checker, args.output).await?;
            return Ok(());
        }
    };

    match outcome {
        Ok(view) => {
            println!("{}", args.output.render(&view)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
