//! Test doubles for the connection seam

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use super::connection::{Connection, ConnectionEvent, Connector, EventSink};

/// A connection opened by `FakeConnector`
#[derive(Debug, Clone)]
pub struct OpenedConnection {
    pub url: String,
    pub sink: EventSink,
    closed: Rc<Cell<bool>>,
}

impl OpenedConnection {
    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    pub fn emit(&self, event: ConnectionEvent) -> bool {
        self.sink.emit(event)
    }
}

/// Connector that records every connection it opens
#[derive(Debug, Clone, Default)]
pub struct FakeConnector {
    opened: Rc<RefCell<Vec<OpenedConnection>>>,
}

impl FakeConnector {
    pub fn opened(&self) -> Vec<OpenedConnection> {
        self.opened.borrow().clone()
    }

    pub fn last(&self) -> OpenedConnection {
        self.opened
            .borrow()
            .last()
            .cloned()
            .expect("no connection opened")
    }
}

pub struct FakeConnection {
    closed: Rc<Cell<bool>>,
}

impl Connection for FakeConnection {
    fn close(&mut self) {
        self.closed.set(true);
    }
}

impl Connector for FakeConnector {
    type Connection = FakeConnection;

    fn open(&self, url: &str, sink: EventSink) -> FakeConnection {
        let closed = Rc::new(Cell::new(false));
        self.opened.borrow_mut().push(OpenedConnection {
            url: url.to_string(),
            sink,
            closed: Rc::clone(&closed),
        });
        FakeConnection { closed }
    }
}

struct WarnCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Run `f` and count the warn-level log entries it records
pub fn count_warnings<T>(f: impl FnOnce() -> T) -> (T, usize) {
    let count = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(WarnCounter(Arc::clone(&count)));
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, count.load(Ordering::SeqCst))
}
