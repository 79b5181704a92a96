//! Quotation HTTP server binary.
//!
//! Parses the command line, opens the SQLite store once for the life of the
//! process, binds the listener and serves `GET /cotacao`.
use clap::Parser;
use log::info;
use quote_common::Result;
use quote_common::net::addr;
use quote_server::config::Args;
use quote_server::fetcher::RateFetcher;
use quote_server::store::QuoteStore;
use quote_server::{AppState, run};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();
    let budgets = args.budgets()?;

    let store = QuoteStore::open(&args.database).await?;
    info!(
        "Database {} ready with {} stored quotations",
        args.database.display(),
        store.count().await?
    );
    info!(
        "Budgets: request {:?}, fetch {:?}, persist {:?}",
        budgets.request, budgets.fetch, budgets.persist
    );

    let state = AppState {
        fetcher: RateFetcher::new(&args.upstream_url),
        store,
        budgets,
    };

    let listener = TcpListener::bind(addr(&args.bind_address, args.port)).await?;
    run(listener, state).await?;
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
