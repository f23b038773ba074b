use lumen_engine::runtime::EngineRuntime;

use crate::platform::{EventKind, WindowEvent, WindowHandle, WindowId};

/// Lifecycle of one window's session. Transitions only move forward.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum SessionState {
    /// Window exists; no engine resources yet.
    Created,
    /// Surface and scene constructed.
    EngineAttached,
    /// Scene presenting on the surface. Paint/input are delivered only here.
    Running,
    /// Subscriptions revoked; engine resources being released.
    Closing,
    /// Scene and surface dropped; the host window may finalize.
    Released,
}

/// Callback invoked for a subscribed event kind.
pub type EventHandler = Box<dyn FnMut(WindowId, &WindowEvent)>;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
    handler: EventHandler,
}

/// Per-window record. Owns the window's surface and scene exclusively.
pub struct Session<E: EngineRuntime> {
    pub(crate) handle: WindowHandle,
    state: SessionState,
    history: Vec<SessionState>,
    pub(crate) surface: Option<E::Surface>,
    pub(crate) scene: Option<E::Scene>,
    subscriptions: Vec<Subscription>,
}

impl<E: EngineRuntime> Session<E> {
    pub(crate) fn new(handle: WindowHandle) -> Self {
        Self {
            handle,
            state: SessionState::Created,
            history: vec![SessionState::Created],
            surface: None,
            scene: None,
            subscriptions: Vec::new(),
        }
    }

    pub fn window(&self) -> WindowId {
        self.handle.id
    }

    pub fn handle(&self) -> &WindowHandle {
        &self.handle
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// States visited so far, in order.
    pub fn history(&self) -> &[SessionState] {
        &self.history
    }

    pub(crate) fn into_history(self) -> Vec<SessionState> {
        self.history
    }

    /// Moves to `next`. Backward or repeated transitions are refused.
    pub(crate) fn advance(&mut self, next: SessionState) -> bool {
        if next <= self.state {
            log::error!(
                "{}: refusing lifecycle transition {:?} -> {:?}",
                self.handle.id,
                self.state,
                next
            );
            return false;
        }
        log::debug!("{}: {:?} -> {:?}", self.handle.id, self.state, next);
        self.state = next;
        self.history.push(next);
        true
    }

    /// Enters `Closing` and revokes every subscription.
    pub(crate) fn begin_closing(&mut self) {
        self.advance(SessionState::Closing);
        let revoked = self.subscriptions.len();
        self.subscriptions.clear();
        if revoked > 0 {
            log::debug!("{}: revoked {revoked} subscriptions", self.handle.id);
        }
    }

    pub(crate) fn subscribe(&mut self, id: SubscriptionId, kind: EventKind, handler: EventHandler) {
        self.subscriptions.push(Subscription { id, kind, handler });
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Delivers `event` to matching subscribers. Returns how many were called.
    pub(crate) fn deliver(&mut self, event: &WindowEvent) -> usize {
        if self.state != SessionState::Running {
            log::trace!("{}: {:?} dropped in {:?}", self.handle.id, event.kind(), self.state);
            return 0;
        }

        let window = self.handle.id;
        let kind = event.kind();
        let mut delivered = 0;
        for sub in self.subscriptions.iter_mut().filter(|s| s.kind == kind) {
            (sub.handler)(window, event);
            delivered += 1;
        }
        delivered
    }
}
