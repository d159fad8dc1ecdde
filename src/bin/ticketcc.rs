use ticketcc::{cli, config, ErrorKind};

fn init_tracing() {
    use tracing_subscriber::{
        filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt as _, Registry,
    };

    // Payloads go to stdout, keep logs on stderr.
    Registry::default()
        .with(
            fmt::Layer::new()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_target(true)
                .with_timer(fmt::time::ChronoLocal::rfc_3339()),
        )
        .with(
            EnvFilter::try_from_env(config::env::LOG_DIRECTIVE)
                .or_else(|_| EnvFilter::try_new("warn"))
                .unwrap(),
        )
        .init();
}

fn main() {
    init_tracing();

    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(num_cpus::get())
        .on_thread_start(|| tracing::trace!("thread start"))
        .on_thread_stop(|| tracing::trace!("thread stop"))
        .enable_time()
        .build()
        .unwrap()
        .block_on(async {
            run().await;
        })
}

async fn run() {
    if let Err(err) = run_inner().await {
        let code = match err.kind() {
            ErrorKind::ChaincodeResponse { .. } => 2,
            _ => 1,
        };
        eprintln!("{}", err);
        std::process::exit(code);
    };
}

async fn run_inner() -> ticketcc::Result<()> {
    let cli::TicketccCommand { peer, command } = cli::parse();

    command.run(peer).await
}
