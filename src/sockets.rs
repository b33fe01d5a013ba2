use serde_json::{Value, json};
use socketioxide::SocketIo;
use socketioxide::extract::{Data, SocketRef};

use crate::utils::traits::ViewInvalidator;

pub const VIEW_STALE_EVENT: &str = "view-stale";

pub async fn on_connect(socket: SocketRef, Data(_data): Data<Value>) {
    tracing::debug!(socket = %socket.id, "dashboard client connected");
}

/// Broadcasts [`VIEW_STALE_EVENT`] to every connected client.
#[derive(Clone, Default)]
pub struct SocketInvalidator {
    io: Option<SocketIo>,
}

impl SocketInvalidator {
    pub fn new(io: Option<SocketIo>) -> Self {
        Self { io }
    }
}

impl ViewInvalidator for SocketInvalidator {
    fn mark_stale(&self, path: &str) {
        let Some(io) = self.io.clone() else {
            tracing::debug!(path, "no socket layer, skipping view invalidation");
            return;
        };

        let payload = json!({ "path": path });
        tokio::spawn(async move {
            if let Err(e) = io.emit(VIEW_STALE_EVENT, &payload).await {
                tracing::warn!("Broadcast error {}", e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_invalidator_is_a_no_op() {
        SocketInvalidator::default().mark_stale("/dashboard");
    }
}
