mod backend;
mod machine;
mod rodio_backend;
mod types;

pub use backend::{MediaBackend, MediaHandle};
pub use machine::{Session, next_index, previous_index};
pub use rodio_backend::{PreparedAudio, RodioBackend};
pub use types::{Prepared, SessionEvent, SessionState, SessionView, Ticket};
