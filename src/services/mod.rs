pub mod recommendation;
pub mod store;
pub mod webhook;
