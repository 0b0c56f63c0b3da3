use clap::Parser;
use tracing_subscriber::EnvFilter;

use sharekhata::api::HttpLedgerApi;
use sharekhata::domain::{Mobile, balance};
use sharekhata::store::LedgerStore;

/// Fetch the current user's shared-expense ledgers and print their
/// standings.
#[derive(Debug, Parser)]
#[command(name = "sharekhata")]
struct Args {
    /// Ledger service base URL.
    #[arg(long, env = "SHAREKHATA_API_URL", default_value = "http://localhost:5000")]
    base_url: String,

    /// Mobile number of the authenticated user.
    #[arg(long, env = "SHAREKHATA_MOBILE")]
    mobile: Mobile,

    /// Bearer token for the personal-expense routes.
    #[arg(long, env = "SHAREKHATA_TOKEN")]
    token: Option<String>,

    /// Bypass the staleness window and refresh from the network.
    #[arg(long)]
    force: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let api = HttpLedgerApi::new(args.base_url, args.token);
    let store = LedgerStore::new(api);

    let view = match store.fetch_ledgers(args.force).await {
        Ok(view) => view,
        Err(e) => {
            eprintln!("Error fetching ledgers: {}", e);
            std::process::exit(1);
        }
    };

    let user = args.mobile.as_str();

    println!("friend,mobile,transactions,standing");
    for ledger in &view.ledgers {
        let standing = balance::BalanceStanding::of(balance::effective_balance(ledger, user));
        println!(
            "{},{},{},{}",
            ledger.friend.name, ledger.friend.mobile, ledger.transaction_count, standing
        );
    }

    let totals = balance::totals(&view.ledgers, user);
    println!(
        "you get {} / you give {} (net {})",
        totals.you_get,
        totals.you_give,
        totals.net()
    );

    let summary = &view.expense_summary;
    println!(
        "personal spend: today {} / yesterday {} / last week {} / last month {}",
        summary.today, summary.yesterday, summary.last_week, summary.last_month
    );

    Ok(())
}
