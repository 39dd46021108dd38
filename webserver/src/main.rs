//! random-mean entry point

use clap::Parser;
use shared::{ComponentId, logging};
use tokio::signal;

use orchestrator::{Orchestrator, RealRandomnessSource};
use webserver::{Args, WebServer, WebServerResult};

#[tokio::main]
async fn main() -> WebServerResult<()> {
    // Optional .env feeds clap's `env` fallbacks
    dotenv::dotenv().ok();
    let args = Args::parse();

    logging::init_tracing_with_level(Some(&args.log_level));
    let component = ComponentId::WebServer;

    let upstream = args.upstream_config()?;
    let server = args.server_config()?;

    let source = RealRandomnessSource::new(&upstream)?;
    let orchestrator = Orchestrator::new(source, upstream);
    let webserver = WebServer::new(orchestrator, server);

    let shutdown = async move {
        match signal::ctrl_c().await {
            Ok(()) => logging::log_shutdown(component, "Received Ctrl+C signal"),
            Err(err) => logging::log_error(component, "Signal handling", &err),
        }
    };

    if let Err(e) = webserver.run(shutdown).await {
        logging::log_error(component, "Web server", &e);
        return Err(e);
    }

    logging::log_success(component, "Web server stopped gracefully");
    Ok(())
}
