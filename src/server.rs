use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{Extension, Router, routing::any};
use tokio::{sync::oneshot, task::JoinHandle};

use crate::{
    api::{self, LandingPage},
    debug,
    error::{Error, Result},
    info,
    management::PendingFlow,
    warning,
};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Routes of the authorization callback server. Every route answers any method.
pub fn router(pending: Arc<PendingFlow>, landing: Arc<LandingPage>) -> Router {
    Router::new()
        .route("/", any(api::landing))
        .route("/callback/", any(api::callback))
        .route("/favicon.ico", any(api::favicon))
        .fallback(api::not_found)
        .layer(Extension(pending))
        .layer(Extension(landing))
}

/// Handle of a running callback server.
pub struct CallbackServer {
    local_addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl CallbackServer {
    /// Binds `addr` and serves `app` on a background task.
    ///
    /// Fails with [`Error::ServerStart`] when the socket cannot be bound.
    pub async fn start(addr: SocketAddr, app: Router) -> Result<Self> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| Error::ServerStart { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| Error::ServerStart { addr, source })?;

        let (shutdown, signal) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = signal.await;
                })
                .await;
            if let Err(e) = served {
                warning!("Callback server stopped with error: {}", e);
            }
        });

        info!("HTTP server started on {}", local_addr);
        Ok(Self {
            local_addr,
            shutdown: Some(shutdown),
            task: Some(task),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops accepting requests and waits for in-flight responses.
    /// Calling it again is a no-op.
    pub async fn stop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            info!("Stopping HTTP server");
            let _ = shutdown.send(());
        }

        if let Some(mut task) = self.task.take() {
            if tokio::time::timeout(SHUTDOWN_GRACE, &mut task).await.is_err() {
                debug!("Callback server did not drain in time, aborting");
                task.abort();
            }
        }
    }
}

impl Drop for CallbackServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}
