//! Service layer holding the credential business logic.
//! - Independent of the web framework; the server crate only maps inputs and errors.
//! - Storage sits behind the `UserRepository` trait and is injected by the caller.

pub mod auth;
