pub mod db;
pub mod guard;
pub mod public;
mod router;
pub use router::router;
