//! Terminal discovery and text dispatch.
//!
//! Terminals are owned by the host multiplexer; this module only holds
//! weak references into its live list. Resolution walks a confidence
//! hierarchy (self-launched, keyword-matched, best-effort fallback) and
//! dispatch refuses to send to an unverified terminal without explicit
//! user approval.

pub mod dispatch;
pub mod host;
pub mod resolver;
pub mod tmux;

pub use dispatch::{strip_continuation, Dispatcher};
pub use host::{TerminalHost, TerminalId, TerminalInfo};
pub use resolver::{Candidate, TerminalResolver};
pub use tmux::TmuxHost;
