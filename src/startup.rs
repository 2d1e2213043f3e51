use std::net::TcpListener;
use std::sync::Arc;

use actix_web::{dev::Server, web::Data, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use crate::configuration::{ServiceAccount, Settings};
use crate::routes::*;
use crate::store::{DocumentStore, FirestoreStore};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    /// Assemble the server from settings. Reads the service-account blob
    /// from the environment, so a missing credential fails here, at
    /// startup, not on the first submission.
    pub async fn build(configuration: Settings) -> anyhow::Result<Self> {
        let service_account = ServiceAccount::from_env()?;
        let store = FirestoreStore::new(
            configuration.store.base_url.clone(),
            service_account,
            configuration.store.timeout(),
        )
        .context("Failed to build the document store client")?;

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, Arc::new(store))?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(listener: TcpListener, store: Arc<dyn DocumentStore>) -> Result<Server, std::io::Error> {
    let store = Data::from(store);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .service(health_check)
            .service(signup)
            .app_data(store.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
