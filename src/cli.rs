use clap::{Parser, Subcommand};

/// BouwMeesters Amsterdam site server
#[derive(Parser)]
#[command(name = "bouwsite", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Port to bind (defaults to BOUWSITE_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Apply pending database migrations and exit
    Migrate,

    /// Manage back-office accounts
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Subcommand)]
pub enum AdminCommands {
    /// Create an admin account
    Create {
        #[arg(long)]
        email: String,
        #[arg(long, env = "BOUWSITE_ADMIN_PASSWORD")]
        password: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_admin_create() {
        let cli = Cli::parse_from([
            "bouwsite",
            "admin",
            "create",
            "--email",
            "beheer@bouwmeesters.nl",
            "--password",
            "geheim123",
            "--first-name",
            "Sanne",
        ]);
        match cli.command {
            Some(Commands::Admin {
                command:
                    AdminCommands::Create {
                        email,
                        password,
                        first_name,
                        last_name,
                    },
            }) => {
                assert_eq!(email, "beheer@bouwmeesters.nl");
                assert_eq!(password, "geheim123");
                assert_eq!(first_name.as_deref(), Some("Sanne"));
                assert!(last_name.is_none());
            }
            _ => panic!("expected admin create"),
        }
    }

    #[test]
    fn test_serve_port_is_optional() {
        let cli = Cli::parse_from(["bouwsite", "serve"]);
        assert!(matches!(cli.command, Some(Commands::Serve { port: None })));
        let cli = Cli::parse_from(["bouwsite", "serve", "--port", "8080"]);
        assert!(matches!(cli.command, Some(Commands::Serve { port: Some(8080) })));
        assert!(Cli::parse_from(["bouwsite"]).command.is_none());
    }
}
