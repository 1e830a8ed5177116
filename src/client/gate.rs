//! One pending request per screen

use parking_lot::Mutex;
use smallvec::SmallVec;
use std::sync::Arc;

use super::{ClientError, RequestKind};

/// Tracks which request kinds are in flight
///
/// Cloning shares the same pending set.
#[derive(Debug, Clone, Default)]
pub struct RequestGate {
    pending: Arc<Mutex<SmallVec<[RequestKind; 5]>>>,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `kind`; fails if a request of the same kind is still pending
    pub fn try_acquire(&self, kind: RequestKind) -> Result<InFlight, ClientError> {
        let mut pending = self.pending.lock();
        if pending.contains(&kind) {
            tracing::warn!(%kind, "request already in flight");
            return Err(ClientError::Busy(kind));
        }
        pending.push(kind);
        Ok(InFlight {
            gate: self.clone(),
            kind,
        })
    }

    /// The screen's `loading` flag
    pub fn is_pending(&self, kind: RequestKind) -> bool {
        self.pending.lock().contains(&kind)
    }

    fn release(&self, kind: RequestKind) {
        let mut pending = self.pending.lock();
        if let Some(pos) = pending.iter().position(|k| *k == kind) {
            pending.swap_remove(pos);
        }
    }
}

/// Held while a request is pending; dropping it frees the kind again
#[derive(Debug)]
pub struct InFlight {
    gate: RequestGate,
    kind: RequestKind,
}

impl InFlight {
    pub fn kind(&self) -> RequestKind {
        self.kind
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.gate.release(self.kind);
    }
}
