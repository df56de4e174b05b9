//! Navigation notifier that boundaries subscribe to.
//!
//! Single-threaded: listeners are plain closures kept behind `Rc<RefCell<..>>`.
//! A [`Subscription`] unregisters its listener when dropped.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A route change, as seen by listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteChange {
    pub from: String,
    pub to: String,
}

type Listener = Rc<dyn Fn(&RouteChange)>;

#[derive(Default)]
struct Inner {
    current: String,
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Holds the current path and notifies listeners on every navigation.
#[derive(Clone)]
pub struct Router {
    inner: Rc<RefCell<Inner>>,
}

impl Router {
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                current: initial_path.into(),
                ..Inner::default()
            })),
        }
    }

    pub fn current_path(&self) -> String {
        self.inner.borrow().current.clone()
    }

    /// Register a listener that runs on every route change.
    pub fn listen<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&RouteChange) + 'static,
    {
        let listener: Listener = Rc::new(listener);
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, listener));

        Subscription {
            router: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Navigate to `path`. Listeners fire even when the path does not change,
    /// matching a user reloading the same route.
    pub fn navigate(&self, path: impl Into<String>) {
        let to = path.into();
        let (change, listeners) = {
            let mut inner = self.inner.borrow_mut();
            let from = std::mem::replace(&mut inner.current, to.clone());
            let listeners: Vec<Listener> =
                inner.listeners.iter().map(|(_, l)| Rc::clone(l)).collect();
            (RouteChange { from, to }, listeners)
        };

        tracing::debug!(from = %change.from, to = %change.to, "route changed");

        // The borrow is released so listeners may subscribe or navigate themselves.
        for listener in listeners {
            (*listener)(&change);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Router")
            .field("current", &inner.current)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

/// Handle of a registered listener.
#[must_use = "dropping a subscription unregisters the listener"]
pub struct Subscription {
    router: Weak<RefCell<Inner>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.router.upgrade() {
            if let Ok(mut inner) = inner.try_borrow_mut() {
                inner.listeners.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_listeners_receive_changes() {
        let router = Router::new("/");
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let _sub = router.listen(move |change| sink.borrow_mut().push(change.clone()));

        router.navigate("/!v/abc");
        router.navigate("/!v/abc");

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], RouteChange { from: "/".into(), to: "/!v/abc".into() });
        assert_eq!(router.current_path(), "/!v/abc");
    }

    #[test]
    fn test_dropping_subscription_unregisters() {
        let router = Router::new("/");
        let hits = Rc::new(Cell::new(0));

        let counter = Rc::clone(&hits);
        let sub = router.listen(move |_| counter.set(counter.get() + 1));
        assert_eq!(router.listener_count(), 1);

        router.navigate("/a");
        drop(sub);
        router.navigate("/b");

        assert_eq!(hits.get(), 1);
        assert_eq!(router.listener_count(), 0);
    }

    #[test]
    fn test_listener_may_navigate_reentrantly() {
        let router = Router::new("/");
        let inner_router = router.clone();
        let _sub = router.listen(move |change| {
            if change.to == "/old" {
                inner_router.navigate("/new");
            }
        });

        router.navigate("/old");
        assert_eq!(router.current_path(), "/new");
    }
}
