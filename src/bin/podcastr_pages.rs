use clap::{Parser, Subcommand};
use podcastr_pages::{generate, util, Config, FetchResult};
use simple_error::SimpleResult;

#[derive(Parser)]
#[command(name = "podcastr-pages")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Pre-render Podcastr episode pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    config: Config,
}

#[derive(Subcommand)]
enum Commands {
    /// Pre-render the most recent episodes
    Build,
    /// Render one episode page, reusing it while fresh
    Page { slug: String },
    /// Print the shaped episode as JSON
    Show { slug: String },
}

#[tokio::main]
async fn main() -> SimpleResult<()> {
    let _logger = util::init_log_with("info");
    let cli = Cli::parse();
    log::debug!("{:?}", cli.config);

    run(cli).await.map_err(util::to_simple)
}

async fn run(cli: Cli) -> FetchResult<()> {
    match cli.command {
        Commands::Build => {
            let report = cli.config.generator().build().await?;
            log::info!(
                "{} pages written to {}",
                report.pages.len(),
                cli.config.out_dir.display()
            );
        }
        Commands::Page { slug } => {
            let generator = cli.config.generator();
            let path = generator.page_path(&slug);
            tokio::task::spawn_blocking(move || generator.page(&slug)).await??;
            println!("{}", path.display());
        }
        Commands::Show { slug } => {
            let client = cli.config.client();
            let episode =
                tokio::task::spawn_blocking(move || generate::static_props(&client, &slug))
                    .await??;
            println!("{}", serde_json::to_string_pretty(&episode)?);
        }
    }
    Ok(())
}
