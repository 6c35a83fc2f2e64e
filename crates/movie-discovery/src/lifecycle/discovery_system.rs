use crate::clients::{ActorClient, DiscoveryClient};
use crate::config::{AppConfig, ControllerConfig};
use crate::gateway::{FetchGateway, HttpTransport};
use crate::model::UrlParams;
use crate::query_actor::{self, ControllerContext};
use std::sync::Arc;
use tracing::{error, info};

/// The running search view.
///
/// # Example
///
/// ```ignore
/// let system = DiscoverySystem::from_config(&config, Arc::new(UreqTransport::new()), "?query=heat");
///
/// system.client.input("heat 1995").await?;
/// let snapshot = system.client.snapshot().await?;
///
/// system.shutdown().await?;
/// ```
pub struct DiscoverySystem {
    /// Client for driving the query controller
    pub client: DiscoveryClient,

    /// Task handle of the controller loop (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl DiscoverySystem {
    /// Spawns the controller seeded from `initial`. Must be called inside a Tokio runtime.
    ///
    /// The initial load (one fetch for the seeded query and page) starts right away.
    pub fn new(config: &ControllerConfig, gateway: FetchGateway, initial: UrlParams) -> Self {
        let (actor, client) = query_actor::new(config, initial);

        let context = ControllerContext {
            gateway: Arc::new(gateway),
            mailbox: client.clone(),
        };
        let handle = tokio::spawn(actor.run(context));

        Self {
            client: DiscoveryClient::new(client),
            handle,
        }
    }

    /// Builds the gateway from `config` and parses `initial_url` (full URL or query string).
    pub fn from_config(
        config: &AppConfig,
        transport: Arc<dyn HttpTransport>,
        initial_url: &str,
    ) -> Self {
        let gateway = FetchGateway::new(config.gateway.clone(), transport);
        Self::new(&config.controller, gateway, UrlParams::parse(initial_url))
    }

    /// Stops the controller and waits for its task.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the controller shut down cleanly
    /// - `Err(String)` if the loop was unreachable or its task panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        self.client.shutdown().await.map_err(|e| {
            error!(error = %e, "Shutdown request failed");
            e.to_string()
        })?;

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
