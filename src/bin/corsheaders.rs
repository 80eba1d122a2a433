use clap::Parser;
use corsheaders::cli::{run_cli, Cli};
use corsheaders::logging::{init_logging, LogConfig};

fn main() -> anyhow::Result<()> {
    init_logging(&LogConfig::from_env())?;
    let cli = Cli::parse();
    run_cli(cli, &mut std::io::stdout().lock())
}
