//! bridgeup is a CLI tool to deploy cross-chain bridge contracts onto rollups and sidechains.

mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use bridgeup_deploy::{
    ArtifactStore, DeploymentConfig, EndpointRole, JsonFileRecorder, JsonRpcChainClient,
    NetworkFamily, chain::BaseNetwork, client::Contract, deploy_l2, deploy_messenger_wrapper,
    gas::needs_explicit_gas_override, lookup_bridge_endpoint,
    resolve_messenger_wrapper_parameters,
};
use clap::Parser;
use comfy_table::Table;
use strum::IntoEnumIterator;

use cli::{Cli, Command, DeployArgs, EndpointsArgs, PlanArgs, WrapperArgs};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize the logger.
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .init();

    match cli.command {
        Command::Deploy(args) => deploy(args).await,
        Command::Wrapper(args) => wrapper(args).await,
        Command::Plan(args) => plan(args),
        Command::Endpoints(args) => endpoints(args),
    }
}

fn load_config(path: &Path) -> Result<DeploymentConfig> {
    let config = DeploymentConfig::load(path)?;
    tracing::info!(config_path = %path.display(), "Loaded deployment config");
    Ok(config)
}

async fn deploy(args: DeployArgs) -> Result<()> {
    let mut config = load_config(&args.config)?;
    if let Some(output) = args.output {
        config.output = output;
    }
    tracing::info!(output = %config.output.display(), "Recording deployments");

    let url = args.rpc_url.unwrap_or_else(|| config.l2_rpc_url.clone());

    let client = JsonRpcChainClient::new(url, ArtifactStore::new(&config.artifacts))?
        .with_polling(config.polling);
    let recorder = JsonFileRecorder::new(&config.output);

    let result = deploy_l2(&client, &recorder, &config.l2)
        .await
        .with_context(|| format!("Deployment to chain {} failed", config.l2.l2_chain_id))?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn wrapper(args: WrapperArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let wrapper = config
        .wrapper
        .as_ref()
        .context("No [wrapper] section in the deployment config")?;
    let url = match args.rpc_url.or_else(|| config.l1_rpc_url.clone()) {
        Some(url) => url,
        None => anyhow::bail!("No base chain RPC endpoint: set l1_rpc_url or pass --rpc-url"),
    };

    let client = JsonRpcChainClient::new(url, ArtifactStore::new(&config.artifacts))?
        .with_polling(config.polling);

    let address = deploy_messenger_wrapper(&client, wrapper)
        .await
        .with_context(|| format!("Messenger wrapper for chain {} failed", wrapper.l2_chain_id))?;

    tracing::info!(address = %address, "Messenger wrapper deployed");
    println!("{address}");
    Ok(())
}

fn plan(args: PlanArgs) -> Result<()> {
    let family = NetworkFamily::of(args.l2_chain_id);
    let strategy = family.strategy();

    let mut summary = Table::new();
    summary.set_header(vec!["", "Value"]);
    summary.add_row(vec!["Target chain".to_string(), args.l2_chain_id.to_string()]);
    summary.add_row(vec!["Base chain".to_string(), args.l1_chain_id.to_string()]);
    summary.add_row(vec!["Family".to_string(), family.to_string()]);
    summary.add_row(vec![
        "L2 bridge".to_string(),
        Contract::l2_bridge(family).to_string(),
    ]);
    summary.add_row(vec![
        "Messenger wrapper".to_string(),
        Contract::messenger_wrapper(family)
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string()),
    ]);
    summary.add_row(vec![
        "Messenger proxy".to_string(),
        family.uses_messenger_proxy().to_string(),
    ]);
    summary.add_row(vec![
        "Explicit gas limit".to_string(),
        needs_explicit_gas_override(args.l2_chain_id).to_string(),
    ]);
    summary.add_row(vec![
        "Constructor shapes".to_string(),
        format!("wrapper {:?}, bridge {:?}", strategy.wrapper, strategy.bridge),
    ]);
    println!("{summary}");

    if family.uses_messenger_proxy() {
        let fx_child = lookup_bridge_endpoint(args.l1_chain_id, EndpointRole::FxChild)
            .context("Messenger proxy wiring needs a known base chain")?;
        println!("Messenger proxy fx child: {fx_child}");
    }

    let params = resolve_messenger_wrapper_parameters(
        args.l2_chain_id,
        args.l1_bridge,
        args.l2_bridge,
        args.l1_messenger,
    );
    let mut table = Table::new();
    table.set_header(vec!["#", "Kind", "Messenger wrapper argument"]);
    for (i, arg) in params.iter().enumerate() {
        table.add_row(vec![i.to_string(), arg.kind().to_string(), arg.to_string()]);
    }
    println!("{table}");

    Ok(())
}

fn endpoints(args: EndpointsArgs) -> Result<()> {
    let networks: Vec<BaseNetwork> = match args.l1_chain_id {
        Some(id) => vec![
            BaseNetwork::of(id).with_context(|| format!("Unknown base chain id {id}"))?,
        ],
        None => vec![BaseNetwork::Mainnet, BaseNetwork::Goerli],
    };

    let mut table = Table::new();
    table.set_header(vec!["Base chain", "Role", "Address"]);
    for network in networks {
        for role in EndpointRole::iter() {
            let address = lookup_bridge_endpoint(network.chain_id(), role)
                .map(|a| a.to_string())
                .unwrap_or_else(|e| e.to_string());
            table.add_row(vec![network.to_string(), role.to_string(), address]);
        }
    }
    println!("{table}");

    Ok(())
}
