//! Synchronous event emitter.
use std::{error::Error, fmt};

use crate::map::Map;

/// An occurrence delivered to subscribers.
///
/// Renders as `name@target`, where `target` labels the emitting
/// component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    name: String,
    target: String,
}

impl Event {
    /// # Errors
    ///
    /// Returns [`InvalidEventName`] when `name` is empty.
    pub fn new(
        name: impl Into<String>,
        target: impl Into<String>,
    ) -> Result<Event, InvalidEventName> {
        let name = name.into();
        if name.is_empty() {
            return Err(InvalidEventName {});
        }
        Ok(Event { name, target: target.into() })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.target)
    }
}

// ===== Emitter =====

type Callback = Box<dyn FnMut(&Event, &Map)>;

/// Handle returned by [`Emitter::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subscription(u64);

/// Dispatches events to registered callbacks, synchronously and in
/// subscription order.
///
/// Subscribing under the name `"*"` receives every event. Unsubscribing
/// uses the [`Subscription`] token handed out at registration, so
/// identical callbacks never collide.
///
/// # Example
///
/// ```
/// use velin::event::Emitter;
/// use velin::Map;
///
/// let mut emitter = Emitter::new("session");
/// let token = emitter.subscribe("open", |event, _data| {
///     assert_eq!(event.to_string(), "open@session");
/// });
/// emitter.emit("open", &Map::new()).unwrap();
/// emitter.unsubscribe(token);
/// ```
pub struct Emitter {
    target: String,
    subscribers: Vec<(String, Subscription, Callback)>,
    next_token: u64,
}

impl Emitter {
    /// `target` labels this emitter in delivered events.
    pub fn new(target: impl Into<String>) -> Emitter {
        Emitter {
            target: target.into(),
            subscribers: Vec::new(),
            next_token: 0,
        }
    }

    /// Register a callback for `event`, or for every event with `"*"`.
    pub fn subscribe(
        &mut self,
        event: impl Into<String>,
        callback: impl FnMut(&Event, &Map) + 'static,
    ) -> Subscription {
        let token = Subscription(self.next_token);
        self.next_token += 1;
        self.subscribers
            .push((event.into(), token, Box::new(callback)));
        token
    }

    /// Drop a subscription. Returns whether the token was registered.
    pub fn unsubscribe(&mut self, token: Subscription) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(_, t, _)| *t != token);
        before != self.subscribers.len()
    }

    /// Deliver `data` to the subscribers of `name` and then to the
    /// wildcard subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidEventName`] when `name` is empty.
    pub fn emit(&mut self, name: &str, data: &Map) -> Result<&mut Self, InvalidEventName> {
        let event = Event::new(name, self.target.clone())?;
        crate::log::debug!("emit {event}");
        for (subscribed, _, callback) in &mut self.subscribers {
            if subscribed == name && subscribed != "*" {
                callback(&event, data);
            }
        }
        for (subscribed, _, callback) in &mut self.subscribers {
            if subscribed == "*" {
                callback(&event, data);
            }
        }
        Ok(self)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("target", &self.target)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

// ===== Error =====

/// Error when an event name is empty.
#[non_exhaustive]
#[derive(Debug)]
pub struct InvalidEventName {}

impl Error for InvalidEventName {}

impl fmt::Display for InvalidEventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("event name cannot be empty")
    }
}

#[cfg(test)]
mod test {
    use std::{cell::RefCell, rc::Rc};

    use super::{Emitter, Event};
    use crate::map::Map;

    #[test]
    fn event_display() {
        let event = Event::new("close", "body").unwrap();
        assert_eq!(event.to_string(), "close@body");
        assert_eq!(event.name(), "close");
        assert_eq!(event.target(), "body");
    }

    #[test]
    fn empty_name_rejected() {
        assert!(Event::new("", "body").is_err());
        let mut emitter = Emitter::new("body");
        assert!(emitter.emit("", &Map::new()).is_err());
    }

    #[test]
    fn delivers_in_subscription_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut emitter = Emitter::new("req");

        for tag in ["a", "b"] {
            let seen = Rc::clone(&seen);
            emitter.subscribe("sent", move |_, _| seen.borrow_mut().push(tag));
        }
        let other = Rc::clone(&seen);
        emitter.subscribe("failed", move |_, _| other.borrow_mut().push("x"));

        emitter.emit("sent", &Map::new()).unwrap();
        assert_eq!(*seen.borrow(), ["a", "b"]);
    }

    #[test]
    fn wildcard_receives_everything_last() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut emitter = Emitter::new("req");

        let wild = Rc::clone(&seen);
        emitter.subscribe("*", move |event, _| {
            wild.borrow_mut().push(format!("*:{}", event.name()));
        });
        let exact = Rc::clone(&seen);
        emitter.subscribe("sent", move |event, _| {
            exact.borrow_mut().push(event.name().to_owned());
        });

        emitter.emit("sent", &Map::new()).unwrap();
        emitter.emit("closed", &Map::new()).unwrap();
        assert_eq!(*seen.borrow(), ["sent", "*:sent", "*:closed"]);
    }

    #[test]
    fn unsubscribe_by_token() {
        let count = Rc::new(RefCell::new(0));
        let mut emitter = Emitter::new("req");

        let a = Rc::clone(&count);
        let keep = emitter.subscribe("tick", move |_, _| *a.borrow_mut() += 1);
        let b = Rc::clone(&count);
        let stale = emitter.subscribe("tick", move |_, _| *b.borrow_mut() += 10);

        assert!(emitter.unsubscribe(stale));
        assert!(!emitter.unsubscribe(stale));
        emitter.emit("tick", &Map::new()).unwrap();
        assert_eq!(*count.borrow(), 1);
        assert_eq!(emitter.subscriber_count(), 1);
        emitter.unsubscribe(keep);
        assert_eq!(emitter.subscriber_count(), 0);
    }

    #[test]
    fn data_reaches_callbacks() {
        let seen = Rc::new(RefCell::new(None));
        let mut emitter = Emitter::new("resp");

        let slot = Rc::clone(&seen);
        emitter.subscribe("status", move |_, data| {
            *slot.borrow_mut() = data.get("code").and_then(|v| v.as_int());
        });

        let mut data = Map::new();
        data.set("code", 404i64);
        emitter.emit("status", &data).unwrap();
        assert_eq!(*seen.borrow(), Some(404));
    }
}
