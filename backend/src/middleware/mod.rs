//! Request middleware.

pub mod cors;
pub mod trace;

pub use cors::{FrontendOrigin, InvalidOrigin, cors, security_headers};
pub use trace::Trace;
