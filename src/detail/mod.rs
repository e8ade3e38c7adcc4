/// Launch detail composition
// Launch first, then its rocket, in a background task that publishes each
// intermediate view on a watch channel. Dropping the handle cancels the task.
use crate::domain::{Launch, Rocket};
use crate::errors::ApiError;
use crate::services::LaunchService;
use crate::utils::non_empty;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Which loading text to show; switches once the patience delay passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadingMessage {
    Initial,
    StillWorking,
}

impl LoadingMessage {
    pub fn text(self) -> &'static str {
        match self {
            LoadingMessage::Initial => "Loading launch details...",
            LoadingMessage::StillWorking => "Thanks for your patience, still loading...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Resource<T> {
    Pending(LoadingMessage),
    Ready(T),
    Failed(String),
    NotApplicable,
}

impl<T> Resource<T> {
    pub fn status(&self) -> ResourceStatus {
        match self {
            Resource::Pending(_) => ResourceStatus::Loading,
            Resource::Ready(_) => ResourceStatus::Success,
            Resource::Failed(_) => ResourceStatus::Error,
            Resource::NotApplicable => ResourceStatus::Idle,
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Resource::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Resource::Pending(_))
    }
}

/// Consolidated detail view-model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchDetailView {
    pub launch: Resource<Launch>,
    pub rocket: Resource<Rocket>,
}

impl LaunchDetailView {
    fn pending() -> Self {
        Self {
            launch: Resource::Pending(LoadingMessage::Initial),
            rocket: Resource::NotApplicable,
        }
    }

    fn launch_failed(message: String) -> Self {
        Self {
            launch: Resource::Failed(message),
            rocket: Resource::NotApplicable,
        }
    }

    pub fn is_settled(&self) -> bool {
        !self.launch.is_pending() && !self.rocket.is_pending()
    }

    /// Overall status: any failure wins, then any pending load
    pub fn status(&self) -> ResourceStatus {
        let parts = [self.launch.status(), self.rocket.status()];
        if parts.contains(&ResourceStatus::Error) {
            ResourceStatus::Error
        } else if parts.contains(&ResourceStatus::Loading) {
            ResourceStatus::Loading
        } else {
            self.launch.status()
        }
    }
}

pub struct DetailComposer {
    service: Arc<LaunchService>,
    patience: Duration,
}

impl DetailComposer {
    pub fn new(service: Arc<LaunchService>, patience: Duration) -> Self {
        Self { service, patience }
    }

    /// Start composing the view for `id`
    pub fn open(&self, id: Option<&str>) -> DetailHandle {
        let id = non_empty(id).map(str::to_string);
        let initial = match id {
            Some(_) => LaunchDetailView::pending(),
            None => LaunchDetailView::launch_failed(
                ApiError::MissingParameter("Launch ID").to_string(),
            ),
        };

        let (tx, rx) = watch::channel(initial);
        let task = match id {
            Some(id) => tokio::spawn(run_composition(
                self.service.clone(),
                self.patience,
                id,
                tx,
            )),
            None => tokio::spawn(async {}),
        };

        DetailHandle { rx, task }
    }

    /// Compose and wait for the final view
    pub async fn compose(&self, id: Option<&str>) -> LaunchDetailView {
        self.open(id).settled().await
    }
}

/// Publish a snapshot; false once every receiver is gone
fn publish(tx: &watch::Sender<LaunchDetailView>, view: &LaunchDetailView) -> bool {
    tx.send(view.clone()).is_ok()
}

async fn run_composition(
    service: Arc<LaunchService>,
    patience: Duration,
    id: String,
    tx: watch::Sender<LaunchDetailView>,
) {
    let mut view = LaunchDetailView::pending();

    let fetch = service.launch(&id);
    tokio::pin!(fetch);
    let slow = tokio::time::sleep(patience);
    tokio::pin!(slow);
    let mut patience_elapsed = false;

    let result = loop {
        tokio::select! {
            result = &mut fetch => break result,
            () = &mut slow, if !patience_elapsed => {
                patience_elapsed = true;
                view.launch = Resource::Pending(LoadingMessage::StillWorking);
                if !publish(&tx, &view) {
                    return;
                }
            }
        }
    };

    let launch = match result {
        Ok(launch) => launch,
        Err(e) => {
            warn!("Launch {} fetch error: {}", id, e);
            publish(&tx, &LaunchDetailView::launch_failed(e.to_string()));
            return;
        }
    };

    let rocket_id = launch.rocket_id().map(str::to_string);
    view.launch = Resource::Ready(launch);

    let Some(rocket_id) = rocket_id else {
        debug!("Launch {} has no rocket reference", id);
        view.rocket = Resource::NotApplicable;
        publish(&tx, &view);
        return;
    };

    view.rocket = Resource::Pending(LoadingMessage::Initial);
    if !publish(&tx, &view) {
        return;
    }

    view.rocket = match service.rocket(&rocket_id).await {
        Ok(rocket) => Resource::Ready(rocket),
        Err(e) => {
            warn!("Rocket {} fetch error: {}", rocket_id, e);
            Resource::Failed(e.to_string())
        }
    };
    publish(&tx, &view);
}

/// A mounted detail view; dropping it discards any in-flight result
pub struct DetailHandle {
    rx: watch::Receiver<LaunchDetailView>,
    task: JoinHandle<()>,
}

impl DetailHandle {
    pub fn current(&self) -> LaunchDetailView {
        self.rx.borrow().clone()
    }

    /// Next published snapshot, `None` once composition has finished
    pub async fn changed(&mut self) -> Option<LaunchDetailView> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    pub async fn settled(mut self) -> LaunchDetailView {
        if let Ok(view) = self.rx.wait_for(LaunchDetailView::is_settled).await {
            return view.clone();
        }
        self.rx.borrow().clone()
    }
}

impl Drop for DetailHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
