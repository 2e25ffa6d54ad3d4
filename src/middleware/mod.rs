pub mod session_guard;

pub use session_guard::{page_guard, require_session};
