use anyhow::{format_err, Result};
use clap::Parser;
use log::info;
use solana_cli_output::OutputFormat;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::signature::{Keypair, Signer};

use whalehub_client::actions::{ActionOutcome, ActionTracker};
use whalehub_client::cli::{ActionView, Opts, WhalehubCommands};
use whalehub_client::config::{load_cfg, EnvOverrides};
use whalehub_client::context::ClientContext;
use whalehub_client::output::{
    format_output, parse_output_format, ActionOutput, AdminOutput, GaugeOutput,
    LiquidStakingOutput, TokenStakingOutput,
};
use whalehub_client::refresher::Refresher;
use whalehub_client::registry::find_token;
use whalehub_client::routes::Route;
use whalehub_client::snapshot::Snapshot;

fn read_keypair_file(s: &str) -> Result<Keypair> {
    solana_sdk::signature::read_keypair_file(s)
        .map_err(|_| format_err!("failed to read keypair from {}", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    solana_logger::setup_with_default("whalehub_client=info");

    let opts = Opts::parse();
    let config = load_cfg(&opts.config, &EnvOverrides::from_env())?;
    let output_format = parse_output_format(&opts.output);

    let payer = config
        .payer_path
        .as_deref()
        .map(read_keypair_file)
        .transpose()?;
    let wallet = opts.wallet.or_else(|| payer.as_ref().map(|payer| payer.pubkey()));

    let rpc_client = RpcClient::new_with_commitment(config.http_url.clone(), config.commitment);
    let ctx = ClientContext::from_config(&config);
    info!("using {} on {:?}", config.http_url, ctx.network);
    let refresher = Refresher::new(rpc_client, ctx, wallet);

    if let Some((request, view)) = opts.command.action() {
        load_action_view(&refresher, &view).await?;
        let mut tracker = ActionTracker::new();
        let kind = request.kind();
        let outcome = tracker.run(&refresher, payer.as_ref(), &request).await?;
        let (status, signature) = match outcome {
            ActionOutcome::Confirmed(signature) => ("confirmed", Some(signature.to_string())),
            ActionOutcome::Rejected(_) => ("rejected", None),
            ActionOutcome::Failed => ("failed", None),
        };
        let output = ActionOutput {
            action: kind.label().to_string(),
            status: status.to_string(),
            signature,
        };
        println!("{}", format_output(&output_format, &output));
        return Ok(());
    }

    match opts.command {
        WhalehubCommands::Liquid => show_route(&refresher, Route::LiquidStake, &output_format).await,
        WhalehubCommands::Token { token } => {
            let route = Route::resolve(&format!("/stake/{}", token));
            show_route(&refresher, route, &output_format).await
        }
        WhalehubCommands::Gauge => show_route(&refresher, Route::Gauge, &output_format).await,
        WhalehubCommands::Admin => show_route(&refresher, Route::Admin, &output_format).await,
        WhalehubCommands::Open { path } => {
            show_route(&refresher, Route::resolve(&path), &output_format).await
        }
        WhalehubCommands::Watch { path } => {
            let route = Route::resolve(&path);
            show_route(&refresher, route, &output_format).await?;
            refresher
                .watch(|snapshot| print_route(route, snapshot, &output_format))
                .await
        }
        _ => Ok(()),
    }
}

/// Refreshes the view an action validates against.
async fn load_action_view(refresher: &Refresher<RpcClient>, view: &ActionView) -> Result<()> {
    match view {
        ActionView::Liquid => refresher.refresh_liquid().await,
        ActionView::Gauge => refresher.refresh_gauge().await,
        ActionView::Token(id) => {
            let token = find_token(id).ok_or_else(|| format_err!("unknown token {}", id))?;
            refresher
                .refresh_token(&token.mint(refresher.context().network))
                .await
        }
        ActionView::None => Ok(()),
    }
}

async fn show_route(
    refresher: &Refresher<RpcClient>,
    route: Route,
    output_format: &OutputFormat,
) -> Result<()> {
    match route {
        Route::LiquidStake => refresher.refresh_liquid().await?,
        Route::Stake(token) => {
            refresher
                .refresh_token(&token.mint(refresher.context().network))
                .await?
        }
        Route::Gauge => refresher.refresh_gauge().await?,
        Route::Admin => {
            let is_admin = refresher
                .wallet()
                .is_some_and(|wallet| refresher.context().is_admin(&wallet));
            if !is_admin {
                return Err(format_err!("the admin page needs an admin wallet"));
            }
            tokio::try_join!(refresher.refresh_gauge(), refresher.refresh_admin_tokens())?;
        }
        Route::Terms | Route::PrivacyPolicy => {}
    }
    print_route(route, &refresher.snapshot(), output_format);
    Ok(())
}

fn print_route(route: Route, snapshot: &Snapshot, output_format: &OutputFormat) {
    let text = match route {
        Route::LiquidStake => snapshot
            .liquid
            .as_ref()
            .map(|view| format_output(output_format, &LiquidStakingOutput::from(view))),
        Route::Stake(_) => snapshot
            .token
            .as_ref()
            .map(|view| format_output(output_format, &TokenStakingOutput::from(view))),
        Route::Gauge => snapshot
            .gauge
            .as_ref()
            .map(|view| format_output(output_format, &GaugeOutput::from(view))),
        Route::Admin => snapshot.gauge.as_ref().map(|view| {
            let tokens = snapshot.admin.as_ref().map_or(&[][..], |admin| &admin.tokens[..]);
            format_output(output_format, &AdminOutput::new(view, tokens))
        }),
        Route::Terms | Route::PrivacyPolicy => route.document().map(str::to_string),
    };
    if let Some(text) = text {
        println!("{}", text.trim_end());
    }
}
