use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotirelay::{
    config::{self, Settings},
    error,
    resolver::TrackResolver,
    server, success,
    types::TrackQuery,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP relay (default)
    Serve(ServeOptions),

    /// Resolve a single track link and print the result as JSON
    Resolve(ResolveOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone, Default)]
pub struct ServeOptions {
    /// Port to listen on, overrides PORT
    #[clap(long, short)]
    port: Option<u16>,
}

#[derive(Parser, Debug, Clone)]
pub struct ResolveOptions {
    /// Spotify track link, e.g. https://open.spotify.com/track/<id>
    url: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn load_settings() -> Settings {
    match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Cannot load settings. Err: {}", e),
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve(ServeOptions::default())) {
        Command::Serve(opt) => {
            let mut settings = load_settings();
            if let Some(port) = opt.port {
                settings.port = port;
            }

            if let Err(e) = server::start_api_server(settings).await {
                error!("Server stopped. Err: {}", e);
            }
        }
        Command::Resolve(opt) => {
            let settings = load_settings();

            let query = match TrackQuery::parse(&opt.url) {
                Ok(query) => query,
                Err(e) => error!("{}", e),
            };

            let resolver = match TrackResolver::new(settings.resolver) {
                Ok(resolver) => resolver,
                Err(e) => error!("Cannot build HTTP client. Err: {}", e),
            };

            match resolver.resolve(&query).await {
                Ok(track) => match serde_json::to_string_pretty(&track) {
                    Ok(json) => {
                        println!("{}", json);
                        success!("Resolved {}", track.metadata.title);
                    }
                    Err(e) => error!("Cannot serialize result. Err: {}", e),
                },
                Err(e) => error!("{}", e),
            }
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
