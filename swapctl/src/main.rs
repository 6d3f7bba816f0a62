use anyhow::Context;
use clap::Parser;
use nearswap_client::{JsonRpcClient, Session, Token};
use swapctl::config::{Cli, Command, Settings};
use swapctl::wallet::DryRunWallet;
use tracing_subscriber::FmtSubscriber;
use yocto::{normalize_amount, to_human, Precision, YoctoAmount};

type SwapSession = Session<JsonRpcClient, DryRunWallet>;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    // logger
    let subscriber = FmtSubscriber::builder()
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let cli = Cli::parse();

    // conversions need no connection
    match &cli.command {
        Command::ToYocto { amount } => {
            println!("{}", normalize_amount(amount)?);
            return Ok(());
        }
        Command::ToHuman { yocto, digits } => {
            let amount: YoctoAmount = yocto.parse()?;
            let precision = digits.map_or(Precision::Full, Precision::Truncated);
            println!("{}", to_human(amount.as_str(), precision));
            return Ok(());
        }
        _ => {}
    }

    let settings = Settings::load(&cli).context("loading configuration")?;
    tracing::info!(
        network = %settings.network,
        rpc = %settings.rpc_url,
        contract = %settings.contract_name,
        "connecting"
    );
    let rpc = JsonRpcClient::new(settings.rpc_url.clone())?;
    let wallet = DryRunWallet::new(settings.account_id.clone());
    let session = Session::new(settings.contract_name.clone(), rpc, wallet);

    run(&session, cli.command).await
}

fn print_amount(label: &str, amount: &YoctoAmount) {
    println!("{label}\t{}\t({} yocto)", amount.to_display(), amount);
}

async fn run(session: &SwapSession, command: Command) -> anyhow::Result<()> {
    match command {
        Command::ToYocto { .. } | Command::ToHuman { .. } => {}
        Command::Pools => {
            for pool in session.list_pools().await? {
                println!("{pool}");
            }
        }
        Command::PoolInfo { token } => match session.pool_info(&token).await? {
            Some(info) => {
                print_amount("ynear", &info.ynear);
                print_amount("tokens", &info.tokens);
                print_amount("total_shares", &info.total_shares);
            }
            None => println!("no pool for {token}"),
        },
        Command::QuoteIn { from, to, amount } => {
            let out = session
                .quote_from_in(&Token::from_spec(&from), &Token::from_spec(&to), &amount)
                .await?;
            print_amount("out", &out);
        }
        Command::QuoteOut { from, to, amount } => {
            let needed = session
                .quote_from_out(&Token::from_spec(&from), &Token::from_spec(&to), &amount)
                .await?;
            print_amount("in", &needed);
        }
        Command::Allowance { token } => {
            let allowance = session.allowance(&Token::from_spec(&token)).await?;
            print_amount("allowance", &allowance);
        }
        Command::Balance { token } => {
            let token = Token::from_spec(&token);
            let balance = session.token_balance(&token).await?;
            print_amount(&token.symbol, &balance);
        }
        Command::GasCheck => {
            if session.gas_check().await? {
                println!("ok");
            } else {
                anyhow::bail!("less than 0.6 NEAR available for fees");
            }
        }
        Command::SwapIn {
            from,
            to,
            amount,
            min_out,
        } => {
            session
                .swap_from_in(&Token::from_spec(&from), &Token::from_spec(&to), &amount, &min_out)
                .await?;
        }
        Command::SwapOut {
            from,
            to,
            amount,
            max_in,
        } => {
            let from = Token::from_spec(&from);
            let to = Token::from_spec(&to);
            let max_in = match max_in {
                Some(max_in) => max_in.parse()?,
                None => session.quote_from_out(&from, &to, &amount).await?,
            };
            if session.needs_approval(&from, &max_in).await? {
                tracing::warn!(token = %from.symbol, "allowance below input, approve first");
            }
            session.swap_from_out(&from, &to, &max_in, &amount).await?;
        }
        Command::Approve { token, amount } => {
            session
                .inc_allowance(&Token::from_spec(&token), &amount)
                .await?;
        }
    }
    Ok(())
}
