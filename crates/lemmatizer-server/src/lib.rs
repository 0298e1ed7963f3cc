pub mod handlers;
pub mod model;

pub use handlers::{AppState, router};
pub use model::{ModelPaths, load_lemmatizer};
