use clap::Parser;
use cli::{Cli, Command, DbSubCommand};
use config::Config;

mod cli;
mod config;
mod db;
mod models;
mod observations;
mod repos;
mod schema;
mod server;
mod tools;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Cli::parse();
    let config = Config::from_env()?;

    match args.cmd {
        Command::Http { address } => server::run(address, &args.database_url, &config).await,
        Command::Db(db_cmd) => match db_cmd.cmd {
            DbSubCommand::Info => tools::info::exec(&args.database_url, &config).await,
        },
    }
}
