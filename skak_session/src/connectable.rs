use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::process::{Child, Command, Stdio};

/// A byte-stream endpoint standing in for a local child process or a network
/// socket: a reader half, a writer half, and an idempotent close that
/// unblocks whichever worker is currently parked on a stream read.
pub trait Connectable: Send {
    fn reader(&mut self) -> Box<dyn Read + Send>;
    fn writer(&mut self) -> Box<dyn Write + Send>;
    fn close(&mut self);
}

/// A locally spawned engine process, connected via its stdin/stdout.
pub struct LocalProcess {
    child: Child,
}

impl LocalProcess {
    pub fn spawn(command: &str, args: &[String], working_dir: Option<&str>) -> io::Result<Self> {
        let mut cmd = Command::new(command);
        cmd.args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());

        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }

        Ok(Self { child: cmd.spawn()? })
    }
}

impl Connectable for LocalProcess {
    fn reader(&mut self) -> Box<dyn Read + Send> {
        Box::new(self.child.stdout.take().expect("stdout taken more than once"))
    }

    fn writer(&mut self) -> Box<dyn Write + Send> {
        Box::new(self.child.stdin.take().expect("stdin taken more than once"))
    }

    fn close(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Shared behaviour for both socket-backed connectables: an outbound
/// connection we dialled ourselves, and one a listener already accepted.
struct SocketConnectable {
    stream: TcpStream,
}

impl Connectable for SocketConnectable {
    fn reader(&mut self) -> Box<dyn Read + Send> {
        Box::new(self.stream.try_clone().expect("socket clone for reader"))
    }

    fn writer(&mut self) -> Box<dyn Write + Send> {
        Box::new(self.stream.try_clone().expect("socket clone for writer"))
    }

    fn close(&mut self) {
        let _ = self.stream.shutdown(Shutdown::Both);
    }
}

/// A connection dialled out to a remote engine listening at `host:port`.
pub struct RemoteSocket(SocketConnectable);

impl RemoteSocket {
    pub fn connect(host: &str, port: u16) -> io::Result<Self> {
        Ok(Self(SocketConnectable { stream: TcpStream::connect((host, port))? }))
    }
}

impl Connectable for RemoteSocket {
    fn reader(&mut self) -> Box<dyn Read + Send> {
        self.0.reader()
    }

    fn writer(&mut self) -> Box<dyn Write + Send> {
        self.0.writer()
    }

    fn close(&mut self) {
        self.0.close();
    }
}

/// A connection a `TcpListener` has already accepted on the server side.
pub struct AcceptedSocket(SocketConnectable);

impl AcceptedSocket {
    pub fn new(stream: TcpStream) -> Self {
        Self(SocketConnectable { stream })
    }
}

impl Connectable for AcceptedSocket {
    fn reader(&mut self) -> Box<dyn Read + Send> {
        self.0.reader()
    }

    fn writer(&mut self) -> Box<dyn Write + Send> {
        self.0.writer()
    }

    fn close(&mut self) {
        self.0.close();
    }
}
