pub mod model_registry;
pub mod path_rules;

pub use model_registry::ModelRegistry;
pub use path_rules::{CUSTOM_MODEL_FILENAME_REGEX, is_valid_folder_path, is_valid_model_filename};
