mod clock;
mod connectable;
mod controller;
mod event;
mod server_session;
mod session;

pub use clock::ClockSync;
pub use connectable::{AcceptedSocket, Connectable, LocalProcess, RemoteSocket};
pub use controller::{
    EngineReplyListener, EngineVsEngine, HumanVsEngine, HumanVsHuman, SpectatedServer,
};
pub use event::{Event, Executor, ExecutorAdapter, InlineExecutor, NullListener, SessionListener};
pub use server_session::{RelaySide, ServerEvent, ServerSession, ServerSessionListener};
pub use session::{Session, SessionState};
