// Editor module for foyeajX Note.

pub mod clock;
pub mod debounce;
pub mod document;
pub mod format;
pub mod history;
pub mod session;
pub mod tools;

pub use clock::{Clock, ManualClock, SystemClock};
pub use debounce::DebounceSlot;
pub use document::{DocumentSurface, MemoryDocument};
pub use format::{apply_inline_style, FormatError, InlineStyle, Selection};
pub use history::History;
pub use session::EditingSession;
pub use tools::{Append, AppendTranscript, Clear, Replace, Tool};
