mod session;

pub use session::ChatSession;
