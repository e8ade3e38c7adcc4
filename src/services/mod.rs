/// Business logic services layer
use crate::clients::LaunchGateway;
use crate::domain::{Launch, Rocket};
use crate::errors::ApiResult;
use crate::listing::{ListStore, ListView, LoadStatus};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Single entry point for launch data: every gateway read goes through here
pub struct LaunchService {
    gateway: Arc<dyn LaunchGateway>,
    list: Arc<ListStore>,
}

impl LaunchService {
    pub fn new(gateway: Arc<dyn LaunchGateway>, list: Arc<ListStore>) -> Self {
        Self { gateway, list }
    }

    pub fn list(&self) -> &ListStore {
        &self.list
    }

    /// Fetch the full collection into the list store
    pub async fn refresh_launches(&self) -> ApiResult<usize> {
        self.list.mark_loading();
        let mut pending = PendingLoad {
            list: &self.list,
            settled: false,
        };

        let result = self.gateway.fetch_launches().await;
        pending.settled = true;

        match result {
            Ok(launches) => {
                let count = launches.len();
                self.list.set_launches(launches);
                info!("Loaded {} launches", count);
                Ok(count)
            }
            Err(e) => {
                error!("Launch list fetch error: {:?}", e);
                self.list.mark_failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Current list view, loading the collection on first use
    pub async fn list_view(&self) -> ListView {
        if self.list.status() == LoadStatus::Idle {
            // failure is recorded in the store status
            let _ = self.refresh_launches().await;
        }
        self.list.view()
    }

    pub async fn launch(&self, id: &str) -> ApiResult<Launch> {
        self.gateway.fetch_launch_by_id(id).await
    }

    pub async fn rocket(&self, rocket_id: &str) -> ApiResult<Rocket> {
        self.gateway.fetch_rocket_by_id(rocket_id).await
    }
}

/// Releases the `Loading` status if the fetch future is dropped mid-flight
struct PendingLoad<'a> {
    list: &'a ListStore,
    settled: bool,
}

impl Drop for PendingLoad<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("Launch list fetch cancelled");
            self.list.abandon_loading();
        }
    }
}
