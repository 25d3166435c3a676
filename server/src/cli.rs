use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(about = "Climate observations API.")]
pub struct Cli {
    /// SQLite dataset, e.g. sqlite://resources/hawaii.sqlite
    #[arg(env = "CLIMATE_DATABASE_URL", short, long)]
    pub database_url: String,
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the JSON API.
    Http {
        #[arg(env = "CLIMATE_SERVER_ADDRESS")]
        address: std::net::SocketAddr,
    },
    Db(DbCommand),
}

#[derive(Debug, Parser)]
pub struct DbCommand {
    #[command(subcommand)]
    pub cmd: DbSubCommand,
}

#[derive(Debug, Subcommand)]
pub enum DbSubCommand {
    /// Check the schema and print dataset facts.
    Info,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_http_command() {
        let cli = Cli::try_parse_from([
            "climate",
            "--database-url",
            "sqlite://hawaii.sqlite",
            "http",
            "127.0.0.1:5000",
        ])
        .unwrap();

        assert_eq!(cli.database_url, "sqlite://hawaii.sqlite");
        match cli.cmd {
            Command::Http { address } => assert_eq!(address.port(), 5000),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_db_info_command() {
        let cli = Cli::try_parse_from(["climate", "-d", "sqlite::memory:", "db", "info"]).unwrap();
        assert!(matches!(
            cli.cmd,
            Command::Db(DbCommand {
                cmd: DbSubCommand::Info
            })
        ));
    }

    #[test]
    fn rejects_bad_address() {
        let result = Cli::try_parse_from(["climate", "-d", "sqlite::memory:", "http", "nowhere"]);
        assert!(result.is_err());
    }
}
