//! HTTP surface: every route answers 200 with an [`envelope::Envelope`].

pub mod envelope;
pub mod handlers;
pub mod routes;
pub mod validate;

pub use envelope::{Envelope, Reply};
pub use routes::configure_routes;
