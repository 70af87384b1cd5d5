//! Clipboard integration: text placement, image capture, and the polling
//! gate that turns copied screenshots into terminal handoffs.

pub mod capture;
pub mod dedup;
pub mod gate;
pub mod text;

pub use capture::{save_clipboard_image, ImageSource, OsClipboard};
pub use dedup::{content_hash, DedupWindow};
pub use gate::{ClipboardGate, GateConfig, TickOutcome};
pub use text::{SystemClipboard, TextClipboard};
