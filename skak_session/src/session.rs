use std::io::{self, BufRead, BufReader, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use skak_core::error::CoreError;
use skak_protocol::{parse_message, UCIMessage};

use crate::connectable::Connectable;
use crate::event::{Event, SessionListener};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    Started,
    Closed,
}

/// A bidirectional, line-oriented connection to a chess engine, running a
/// reader and a writer worker and notifying a listener of inbound traffic,
/// errors and disconnection.
///
/// `NotStarted --start--> Started --stop/fault/peer-close--> Closed` (terminal).
/// At most one `start` is honoured; later calls are no-ops. `send_message`
/// is a no-op unless the session is `Started`.
pub struct Session {
    state: Arc<Mutex<SessionState>>,
    connectable: Arc<Mutex<Box<dyn Connectable>>>,
    outbound: Arc<Mutex<Option<Sender<String>>>>,
    listener: Arc<Mutex<Arc<dyn SessionListener>>>,
    stop_requested: Arc<AtomicBool>,
}

impl Session {
    pub fn new(connectable: Box<dyn Connectable>, listener: Arc<dyn SessionListener>) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::NotStarted)),
            connectable: Arc::new(Mutex::new(connectable)),
            outbound: Arc::new(Mutex::new(None)),
            listener: Arc::new(Mutex::new(listener)),
            stop_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn state(&self) -> SessionState {
        *self.state.lock().unwrap()
    }

    /// Replaces the listener. Safe to call before or after `start`.
    pub fn set_listener(&self, listener: Arc<dyn SessionListener>) {
        *self.listener.lock().unwrap() = listener;
    }

    pub fn start(&self) {
        {
            let mut state = self.state.lock().unwrap();
            if *state != SessionState::NotStarted {
                return;
            }
            *state = SessionState::Started;
        }

        let (reader, writer) = {
            let mut connectable = self.connectable.lock().unwrap();
            (connectable.reader(), connectable.writer())
        };

        let (outbound_tx, outbound_rx) = mpsc::channel::<String>();
        *self.outbound.lock().unwrap() = Some(outbound_tx);

        let (worker_tx, worker_rx) = mpsc::channel::<io::Error>();

        let reader_handle = spawn_reader(reader, self.listener.clone(), worker_tx.clone());
        let writer_handle = spawn_writer(writer, outbound_rx, worker_tx);

        // The supervisor is the only thread that joins the workers, so it
        // owns their handles outright instead of sharing `self.handles`.
        spawn_supervisor(
            worker_rx,
            self.state.clone(),
            self.connectable.clone(),
            self.outbound.clone(),
            self.listener.clone(),
            self.stop_requested.clone(),
            reader_handle,
            writer_handle,
        );
    }

    /// `ProtocolState`: sending while not `Started` is silently dropped.
    pub fn send_message(&self, message: &UCIMessage) {
        if self.state() != SessionState::Started {
            tracing::debug!(%message, "dropping send: session is not started");
            return;
        }

        if let Some(tx) = self.outbound.lock().unwrap().as_ref() {
            let _ = tx.send(format!("{message}\n"));
        }
    }

    /// Idempotent. Marks the session as stopping, closes the connectable
    /// (unblocking any worker parked on a stream read) and returns
    /// immediately without waiting for the workers to finish; a supervisor
    /// thread observes their exit and performs the final cleanup.
    pub fn stop(&self) {
        if self.state() == SessionState::Closed {
            return;
        }
        self.stop_requested.store(true, Ordering::SeqCst);
        self.connectable.lock().unwrap().close();
        self.outbound.lock().unwrap().take();
    }
}

fn closed_error() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "connectable closed")
}

fn spawn_reader(
    reader: Box<dyn std::io::Read + Send>,
    listener: Arc<Mutex<Arc<dyn SessionListener>>>,
    worker_done: Sender<io::Error>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut lines = BufReader::new(reader);
        let mut line = String::new();

        let cause = loop {
            line.clear();
            match lines.read_line(&mut line) {
                Ok(0) => break closed_error(),
                Ok(_) => {
                    let message = parse_message(&line);
                    let current = listener.lock().unwrap().clone();
                    current.on_event(Event::Message(message));
                }
                Err(e) => break e,
            }
        };

        let _ = worker_done.send(cause);
    })
}

fn spawn_writer(
    mut writer: Box<dyn Write + Send>,
    outbound: Receiver<String>,
    worker_done: Sender<io::Error>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let cause = loop {
            match outbound.recv() {
                Ok(line) => {
                    if let Err(e) = writer.write_all(line.as_bytes()).and_then(|_| writer.flush()) {
                        break e;
                    }
                }
                Err(_) => break closed_error(),
            }
        };

        let _ = worker_done.send(cause);
    })
}

/// Watches for the first worker to stop. If neither side had called `stop()`
/// yet, this is an auto-stop: the peer closed the connection or I/O failed.
/// Either way this is the session's dedicated cleanup thread: it closes the
/// connectable and drops the outbound sender so neither worker has to shut
/// itself down, waits for both to exit, then fires the one and only
/// disconnect notification.
#[allow(clippy::too_many_arguments)]
fn spawn_supervisor(
    worker_done: Receiver<io::Error>,
    state: Arc<Mutex<SessionState>>,
    connectable: Arc<Mutex<Box<dyn Connectable>>>,
    outbound: Arc<Mutex<Option<Sender<String>>>>,
    listener: Arc<Mutex<Arc<dyn SessionListener>>>,
    stop_requested: Arc<AtomicBool>,
    reader_handle: JoinHandle<()>,
    writer_handle: JoinHandle<()>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let Ok(cause) = worker_done.recv() else {
            return;
        };

        let was_requested = stop_requested.load(Ordering::SeqCst);
        *state.lock().unwrap() = SessionState::Closed;
        connectable.lock().unwrap().close();
        outbound.lock().unwrap().take();

        wait_or_detach(reader_handle);
        wait_or_detach(writer_handle);

        let listener = listener.lock().unwrap().clone();
        if !was_requested {
            listener.on_event(Event::Error(CoreError::from(cause)));
        }
        listener.on_event(Event::Disconnected { stop_requested: was_requested });
    })
}

/// Gives a worker up to 500ms to notice the interrupt and exit on its own,
/// then joins unconditionally. `std::thread` has no way to forcibly kill a
/// thread, so an unconditional join is as close to "interrupt" as this
/// runtime allows once the grace period elapses.
fn wait_or_detach(handle: JoinHandle<()>) {
    let deadline = Instant::now() + Duration::from_millis(500);
    while !handle.is_finished() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(10));
    }
    let _ = handle.join();
}

#[cfg(test)]
mod test {
    use std::io::Cursor;
    use std::sync::mpsc;
    use std::time::Duration;

    use super::*;

    struct LoopbackPipe {
        input: Option<Cursor<Vec<u8>>>,
        output: mpsc::Sender<Vec<u8>>,
    }

    struct LoopbackWriter(mpsc::Sender<Vec<u8>>);
    impl Write for LoopbackWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            let _ = self.0.send(buf.to_vec());
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Connectable for LoopbackPipe {
        fn reader(&mut self) -> Box<dyn std::io::Read + Send> {
            Box::new(self.input.take().expect("reader already taken"))
        }

        fn writer(&mut self) -> Box<dyn Write + Send> {
            Box::new(LoopbackWriter(self.output.clone()))
        }

        fn close(&mut self) {}
    }

    struct RecordingListener {
        events: Mutex<Vec<String>>,
    }

    impl SessionListener for RecordingListener {
        fn on_event(&self, event: Event) {
            self.events.lock().unwrap().push(format!("{event:?}"));
        }
    }

    #[test]
    fn receives_messages_from_the_stream() {
        let (tx, _rx) = mpsc::channel();
        let connectable = LoopbackPipe { input: Some(Cursor::new(b"uciok\n".to_vec())), output: tx };
        let listener = Arc::new(RecordingListener { events: Mutex::new(Vec::new()) });

        let session = Session::new(Box::new(connectable), listener.clone());
        session.start();

        for _ in 0..50 {
            if listener.events.lock().unwrap().iter().any(|e| e.contains("UCIOk")) {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }

        assert!(listener.events.lock().unwrap().iter().any(|e| e.contains("UCIOk")));
    }

    #[test]
    fn send_message_before_start_is_dropped() {
        let (tx, rx) = mpsc::channel();
        let connectable = LoopbackPipe { input: Some(Cursor::new(Vec::new())), output: tx };
        let session = Session::new(Box::new(connectable), Arc::new(crate::event::NullListener));

        session.send_message(&UCIMessage::IsReady);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn eof_triggers_exactly_one_disconnect() {
        let (tx, _rx) = mpsc::channel();
        let connectable = LoopbackPipe { input: Some(Cursor::new(Vec::new())), output: tx };
        let listener = Arc::new(RecordingListener { events: Mutex::new(Vec::new()) });

        let session = Session::new(Box::new(connectable), listener.clone());
        session.start();

        for _ in 0..50 {
            if listener.events.lock().unwrap().iter().any(|e| e.contains("Disconnected")) {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }

        let disconnects =
            listener.events.lock().unwrap().iter().filter(|e| e.contains("Disconnected")).count();
        assert_eq!(disconnects, 1);
        assert_eq!(session.state(), SessionState::Closed);
    }
}
