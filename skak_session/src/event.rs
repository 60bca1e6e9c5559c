use std::sync::Arc;

use skak_core::error::CoreError;
use skak_protocol::UCIMessage;

/// What a session reports to its listener. At most one [`Event::Disconnected`]
/// is ever emitted per session lifetime.
#[derive(Debug, Clone)]
pub enum Event {
    /// A line was received from the connectable and parsed.
    Message(UCIMessage),
    Error(CoreError),
    Disconnected { stop_requested: bool },
}

/// Receives session events. Implementations are invoked from worker threads
/// unless wrapped in an [`ExecutorAdapter`].
pub trait SessionListener: Send + Sync {
    fn on_event(&self, event: Event);
}

/// A listener that does nothing; the default before a real listener is
/// wired in (e.g. the half-constructed peer side of a [`crate::ServerSession`]).
pub struct NullListener;

impl SessionListener for NullListener {
    fn on_event(&self, _event: Event) {}
}

/// Runs listener callbacks submitted to it, in whatever order and on
/// whatever thread it chooses. A UI toolkit typically implements this by
/// posting to its own event loop.
pub trait Executor: Send + Sync {
    fn execute(&self, job: Box<dyn FnOnce() + Send>);
}

/// Runs jobs immediately on the calling (worker) thread. Useful for tests
/// and headless callers that don't need thread marshalling.
pub struct InlineExecutor;

impl Executor for InlineExecutor {
    fn execute(&self, job: Box<dyn FnOnce() + Send>) {
        job();
    }
}

/// Wraps a [`SessionListener`] so every call is reposted onto an [`Executor`]
/// instead of running directly on the worker thread that observed it. This
/// is what lets a UI safely receive session events on its own thread.
pub struct ExecutorAdapter<L, E> {
    listener: Arc<L>,
    executor: Arc<E>,
}

impl<L, E> ExecutorAdapter<L, E> {
    pub fn new(listener: Arc<L>, executor: Arc<E>) -> Self {
        Self { listener, executor }
    }
}

impl<L: SessionListener + 'static, E: Executor + 'static> SessionListener for ExecutorAdapter<L, E> {
    fn on_event(&self, event: Event) {
        let listener = self.listener.clone();
        self.executor.execute(Box::new(move || listener.on_event(event)));
    }
}

#[cfg(test)]
mod test {
    use std::sync::Mutex;

    use super::*;

    struct RecordingListener(Mutex<Vec<String>>);

    impl SessionListener for RecordingListener {
        fn on_event(&self, event: Event) {
            self.0.lock().unwrap().push(format!("{event:?}"));
        }
    }

    #[test]
    fn inline_executor_runs_the_job_immediately() {
        let listener = Arc::new(RecordingListener(Mutex::new(Vec::new())));
        let adapter = ExecutorAdapter::new(listener.clone(), Arc::new(InlineExecutor));

        adapter.on_event(Event::Disconnected { stop_requested: true });

        assert_eq!(listener.0.lock().unwrap().len(), 1);
    }

    #[test]
    fn null_listener_drops_every_event() {
        NullListener.on_event(Event::Disconnected { stop_requested: true });
    }
}
