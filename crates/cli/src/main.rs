use anyhow::Context;
use bookshelf_kernel::settings::Settings;
use clap::{Args, Parser, Subcommand};

/// Bookshelf service command line
#[derive(Debug, Parser)]
#[command(name = "bookshelf", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server until interrupted
    Serve(ServeArgs),
    /// Print the effective settings as JSON
    Config,
}

#[derive(Debug, Args)]
struct ServeArgs {
    /// Override `server.host`
    #[arg(long)]
    host: Option<String>,
    /// Override `server.port`
    #[arg(long)]
    port: Option<u16>,
}

impl ServeArgs {
    fn apply(self, settings: &mut Settings) {
        if let Some(host) = self.host {
            settings.server.host = host;
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load bookshelf settings")?;

    match cli.command {
        Command::Config => {
            let rendered = serde_json::to_string_pretty(&settings)
                .context("failed to render settings")?;
            println!("{rendered}");
        }
        Command::Serve(args) => {
            args.apply(&mut settings);
            bookshelf_telemetry::init(&settings.telemetry)?;

            tracing::info!(
                env = ?settings.environment,
                bind = %settings.bind_address(),
                "bookshelf CLI serving"
            );
            bookshelf_app::run(&settings).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_overrides_apply_to_settings() {
        let cli = Cli::parse_from(["bookshelf", "serve", "--port", "9100"]);
        let mut settings = Settings::default();

        let Command::Serve(args) = cli.command else {
            panic!("expected serve subcommand");
        };
        args.apply(&mut settings);

        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.server.host, "0.0.0.0");
    }
}
