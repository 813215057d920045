//! Console glue for embedding a Tiller shell.
//!
//! The engine only defines the `Screen` trait it writes to; this crate
//! provides ready-made screens, a bounded command history with cursor
//! recall, TOML configuration, and the `Console` session type that wires
//! them to a `Shell`.

mod config;
mod history;
mod screen;
mod session;

/// Console configuration loaded from TOML.
pub use config::ConsoleConfig;
/// Bounded command history with previous/next recall.
pub use history::History;
/// Screen capturing output in memory.
pub use screen::BufferScreen;
/// Screen writing to any `io::Write`.
pub use screen::WriterScreen;
/// The result of a completion request.
pub use session::Completion;
/// A shell wired to history and configuration.
pub use session::Console;
