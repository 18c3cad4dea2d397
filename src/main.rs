use std::io::Error;

use bookstore::{config, server, telemetry};

#[actix::main]
async fn main() -> Result<(), Error> {
    let config = config::load().map_err(Error::other)?;

    telemetry::init(&config.observability);

    server::run(config).await
}
