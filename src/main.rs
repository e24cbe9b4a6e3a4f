// The MIT License (MIT)
// Copyright (c) 2023 IBP.network
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

mod api;
mod beanstalk;
mod config;
mod errors;
mod event;
mod message;
mod relay;
mod report;
mod severity;
mod slack;

use crate::api::routes::routes;
use crate::beanstalk::Beanstalk;
use crate::config::CONFIG;
use crate::errors::RelayError;
use crate::event::Envelope;
use crate::relay::{Relay, Status};
use log::{error, info};
use std::{env, fs, sync::Arc};

use actix_web::{middleware, web, App, HttpServer};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // load configuration
    let config = CONFIG.clone();

    if config.is_debug {
        env::set_var("RUST_LOG", "beanstalk_notify=debug,actix_web=debug");
    } else {
        env::set_var("RUST_LOG", "beanstalk_notify=info,actix_web=info");
    }
    env_logger::try_init().unwrap_or_default();

    info!(
        "{} v{} * {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_DESCRIPTION")
    );

    // a single relay is shared by every invocation
    let beanstalk = Beanstalk::new(&config).await;
    let relay = Relay::new(&config, Arc::new(beanstalk));

    // relay a single event and exit
    if let Some(event_file) = &config.event_file {
        if let Err(e) = relay_event_file(&relay, event_file).await {
            error!("{}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    // start http webhooks server
    let addr = format!("{}:{}", config.api_host, config.api_port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(relay.clone()))
            .wrap(middleware::Logger::default())
            .configure(routes)
    })
    .bind(addr)?
    .run()
    .await
}

async fn relay_event_file(relay: &Relay, path: &str) -> Result<Status, RelayError> {
    let data = fs::read_to_string(path)?;
    let envelope: Envelope = serde_json::from_str(&data)?;
    let status = relay.relay(&envelope).await?;
    info!("event {} {}", path, status);
    Ok(status)
}
