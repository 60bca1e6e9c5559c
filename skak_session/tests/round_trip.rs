use std::io::{Read, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use skak_protocol::UCIMessage;
use skak_session::{Connectable, Event, Session, SessionListener, SessionState};

/// A reader backed by a channel of byte chunks. `None` models the remote
/// side closing the stream: once received (or once the sender is dropped),
/// every subsequent read reports EOF.
struct ChannelReader {
    rx: Receiver<Option<Vec<u8>>>,
    buf: Vec<u8>,
    closed: bool,
}

impl Read for ChannelReader {
    fn read(&mut self, out: &mut [u8]) -> std::io::Result<usize> {
        if self.closed {
            return Ok(0);
        }
        if self.buf.is_empty() {
            match self.rx.recv() {
                Ok(Some(chunk)) => self.buf = chunk,
                Ok(None) | Err(_) => {
                    self.closed = true;
                    return Ok(0);
                }
            }
        }
        let n = out.len().min(self.buf.len());
        out[..n].copy_from_slice(&self.buf[..n]);
        self.buf.drain(..n);
        Ok(n)
    }
}

/// Echoes `uciok` back whenever it sees a `uci` command, simulating the
/// bare minimum of a real engine's handshake.
struct ScriptedEngineWriter {
    reply: Sender<Option<Vec<u8>>>,
}

impl Write for ScriptedEngineWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if String::from_utf8_lossy(buf).trim() == "uci" {
            let _ = self.reply.send(Some(b"uciok\n".to_vec()));
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

struct MockEngine {
    reply_tx: Sender<Option<Vec<u8>>>,
    reply_rx: Option<Receiver<Option<Vec<u8>>>>,
}

impl Connectable for MockEngine {
    fn reader(&mut self) -> Box<dyn Read + Send> {
        Box::new(ChannelReader {
            rx: self.reply_rx.take().expect("reader taken twice"),
            buf: Vec::new(),
            closed: false,
        })
    }

    fn writer(&mut self) -> Box<dyn Write + Send> {
        Box::new(ScriptedEngineWriter { reply: self.reply_tx.clone() })
    }

    fn close(&mut self) {
        let _ = self.reply_tx.send(None);
    }
}

fn mock_engine() -> (MockEngine, Sender<Option<Vec<u8>>>) {
    let (reply_tx, reply_rx) = mpsc::channel();
    let engine = MockEngine { reply_tx: reply_tx.clone(), reply_rx: Some(reply_rx) };
    (engine, reply_tx)
}

struct RecordingListener {
    events: Mutex<Vec<Event>>,
}

impl SessionListener for RecordingListener {
    fn on_event(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

fn wait_for(events: &Mutex<Vec<Event>>, predicate: impl Fn(&Event) -> bool) -> bool {
    for _ in 0..200 {
        if events.lock().unwrap().iter().any(&predicate) {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    false
}

#[test]
fn uci_handshake_reaches_the_listener() {
    let listener = Arc::new(RecordingListener { events: Mutex::new(Vec::new()) });
    let (engine, _close) = mock_engine();
    let session = Session::new(Box::new(engine), listener.clone());
    session.start();

    session.send_message(&UCIMessage::UCI);

    assert!(wait_for(&listener.events, |e| matches!(e, Event::Message(UCIMessage::UCIOk))));

    session.stop();
}

#[test]
fn closing_the_stream_after_stop_reports_a_requested_disconnect_with_no_error() {
    let listener = Arc::new(RecordingListener { events: Mutex::new(Vec::new()) });
    let (engine, _close) = mock_engine();
    let session = Session::new(Box::new(engine), listener.clone());
    session.start();

    session.stop();

    assert!(wait_for(&listener.events, |e| matches!(e, Event::Disconnected { .. })));

    let events = listener.events.lock().unwrap();
    let disconnects: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            Event::Disconnected { stop_requested } => Some(*stop_requested),
            _ => None,
        })
        .collect();
    assert_eq!(disconnects, vec![true]);
    assert!(!events.iter().any(|e| matches!(e, Event::Error(_))));
    assert_eq!(session.state(), SessionState::Closed);
}

#[test]
fn unrequested_stream_closure_reports_both_an_error_and_a_disconnect() {
    let listener = Arc::new(RecordingListener { events: Mutex::new(Vec::new()) });
    let (engine, close) = mock_engine();
    let session = Session::new(Box::new(engine), listener.clone());
    session.start();

    // The engine vanishes on its own (crash, killed externally) rather than
    // the caller calling `stop()` first.
    let _ = close.send(None);

    assert!(wait_for(&listener.events, |e| matches!(e, Event::Disconnected { .. })));

    let events = listener.events.lock().unwrap();
    let disconnects: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            Event::Disconnected { stop_requested } => Some(*stop_requested),
            _ => None,
        })
        .collect();
    assert_eq!(disconnects, vec![false]);
    assert_eq!(events.iter().filter(|e| matches!(e, Event::Error(_))).count(), 1);
    assert_eq!(session.state(), SessionState::Closed);
}
