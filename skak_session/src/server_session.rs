use std::io::{self};
use std::net::TcpListener;
use std::sync::Arc;

use skak_protocol::UCIMessage;

use crate::connectable::{AcceptedSocket, Connectable};
use crate::event::{Event, NullListener, SessionListener};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaySide {
    Engine,
    Client,
}

/// What an observer of a [`ServerSession`] sees: traffic tagged with which
/// side produced it, rather than the raw per-session events.
#[derive(Debug, Clone)]
pub enum ServerEvent {
    FromEngine(UCIMessage),
    FromClient(UCIMessage),
    EngineDisconnected { stop_requested: bool },
    ClientDisconnected { stop_requested: bool },
    Error { side: RelaySide },
}

pub trait ServerSessionListener: Send + Sync {
    fn on_server_event(&self, event: ServerEvent);
}

/// Forwards one session's traffic to its peer session and, tagged by side,
/// to the server observer. Installed on both the engine and client
/// [`Session`]s after construction so each can reference the other.
struct RelayListener {
    side: RelaySide,
    peer: Arc<Session>,
    observer: Arc<dyn ServerSessionListener>,
}

impl SessionListener for RelayListener {
    fn on_event(&self, event: Event) {
        match event {
            Event::Message(message) => {
                self.peer.send_message(&message);
                let tagged = match self.side {
                    RelaySide::Engine => ServerEvent::FromEngine(message),
                    RelaySide::Client => ServerEvent::FromClient(message),
                };
                self.observer.on_server_event(tagged);
            }
            Event::Error(_) => {
                self.observer.on_server_event(ServerEvent::Error { side: self.side });
            }
            Event::Disconnected { stop_requested } => {
                self.peer.stop();
                let tagged = match self.side {
                    RelaySide::Engine => ServerEvent::EngineDisconnected { stop_requested },
                    RelaySide::Client => ServerEvent::ClientDisconnected { stop_requested },
                };
                self.observer.on_server_event(tagged);
            }
        }
    }
}

/// Brokers a single external client connection to a local engine process:
/// one listening port, one client at a time, and four workers wired up as
/// two relays (engine-reader to client-outbound, client-reader to
/// engine-outbound).
pub struct ServerSession {
    engine: Arc<Session>,
    client: Arc<Session>,
}

impl ServerSession {
    /// Blocks accepting exactly one client connection, then wires it to a
    /// fresh engine session and starts both.
    pub fn accept(
        listener: &TcpListener,
        engine_connectable: Box<dyn Connectable>,
        observer: Arc<dyn ServerSessionListener>,
    ) -> io::Result<Self> {
        let (stream, _addr) = listener.accept()?;
        let client_connectable: Box<dyn Connectable> = Box::new(AcceptedSocket::new(stream));

        let engine = Arc::new(Session::new(engine_connectable, Arc::new(NullListener)));
        let client = Arc::new(Session::new(client_connectable, Arc::new(NullListener)));

        engine.set_listener(Arc::new(RelayListener {
            side: RelaySide::Engine,
            peer: client.clone(),
            observer: observer.clone(),
        }));
        client.set_listener(Arc::new(RelayListener {
            side: RelaySide::Client,
            peer: engine.clone(),
            observer,
        }));

        engine.start();
        client.start();

        Ok(Self { engine, client })
    }

    pub fn stop(&self) {
        self.engine.stop();
        self.client.stop();
    }
}

#[cfg(test)]
mod test {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpStream;
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;
    use crate::connectable::RemoteSocket;

    struct RecordingObserver {
        events: Mutex<Vec<ServerEvent>>,
    }

    impl ServerSessionListener for RecordingObserver {
        fn on_server_event(&self, event: ServerEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn client_uci_is_relayed_to_the_engine_and_the_reply_back() {
        let engine_listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let engine_port = engine_listener.local_addr().unwrap().port();

        // Stands in for the engine process: accepts one connection, echoes
        // `uciok` on seeing `uci`.
        std::thread::spawn(move || {
            let (stream, _) = engine_listener.accept().unwrap();
            let mut writer = stream.try_clone().unwrap();
            let mut lines = BufReader::new(stream);
            let mut line = String::new();
            while lines.read_line(&mut line).unwrap_or(0) > 0 {
                if line.trim() == "uci" {
                    writer.write_all(b"uciok\n").unwrap();
                }
                line.clear();
            }
        });

        let client_listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let client_port = client_listener.local_addr().unwrap().port();

        let observer = Arc::new(RecordingObserver { events: Mutex::new(Vec::new()) });
        let observer_for_server = observer.clone();
        std::thread::spawn(move || {
            let engine_connectable = Box::new(RemoteSocket::connect("127.0.0.1", engine_port).unwrap());
            let _server =
                ServerSession::accept(&client_listener, engine_connectable, observer_for_server).unwrap();
            std::thread::sleep(Duration::from_secs(2));
        });

        std::thread::sleep(Duration::from_millis(50));
        let mut client = TcpStream::connect(("127.0.0.1", client_port)).unwrap();
        client.write_all(b"uci\n").unwrap();

        let mut reply = String::new();
        let mut reader = BufReader::new(client);
        reader.read_line(&mut reply).unwrap();
        assert_eq!(reply.trim(), "uciok");

        for _ in 0..200 {
            if observer
                .events
                .lock()
                .unwrap()
                .iter()
                .any(|e| matches!(e, ServerEvent::FromEngine(UCIMessage::UCIOk)))
            {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }

        let events = observer.events.lock().unwrap();
        assert!(events.iter().any(|e| matches!(e, ServerEvent::FromClient(UCIMessage::UCI))));
        assert!(events.iter().any(|e| matches!(e, ServerEvent::FromEngine(UCIMessage::UCIOk))));
    }
}
