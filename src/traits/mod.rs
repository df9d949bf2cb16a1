pub mod model_client;
pub mod plugin;

pub use model_client::ModelClient;
pub use plugin::Plugin;
