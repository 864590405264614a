use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Allowed custom model filenames. The empty name is accepted and means "keep the source name".
    pub static ref CUSTOM_MODEL_FILENAME_REGEX: Regex = Regex::new(r"^$|^[0-9a-zA-Z._-]+$").unwrap();
}

/// Folder paths are relative and never contain empty segments.
pub fn is_valid_folder_path(path: &str) -> bool {
    !path.starts_with('/') && !path.contains("//")
}

pub fn is_valid_model_filename(filename: &str) -> bool {
    CUSTOM_MODEL_FILENAME_REGEX.is_match(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_paths() {
        assert!(is_valid_folder_path("models/foo"));
        assert!(is_valid_folder_path("checkpoints"));
        assert!(is_valid_folder_path("loras/style/"));
        assert!(!is_valid_folder_path("/models"));
        assert!(!is_valid_folder_path("a//b"));
    }

    #[test]
    fn filenames() {
        assert!(is_valid_model_filename("model-v1.safetensors"));
        assert!(is_valid_model_filename("sd_xl_base_1.0.ckpt"));
        assert!(is_valid_model_filename(""));
        assert!(!is_valid_model_filename("bad name!"));
        assert!(!is_valid_model_filename("nested/name.pt"));
    }
}
