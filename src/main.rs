use clap::Parser;
use yusmov::{Config, cli::Cli, run};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = if cli.needs_config() {
        Config::load_file()?
    } else {
        Config::default()
    };

    let worker_threads = config.general.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if worker_threads > 0 {
        builder.worker_threads(worker_threads);
    }
    let runtime = builder.build()?;

    runtime.block_on(run(cli, config))
}
