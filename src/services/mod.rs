pub mod loader;
pub mod recommender;

pub use loader::{detect_schema, load, load_reader, Schema};
pub use recommender::Recommender;
