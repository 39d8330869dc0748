pub mod ingest;

pub use ingest::load_profile;
