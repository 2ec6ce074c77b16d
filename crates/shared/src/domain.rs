use serde::{Deserialize, Serialize};

/// Query value the server treats as "list recent generations".
pub const REFRESH_QUERY: &str = "any";

/// A generated image as reported by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRecord {
    pub image_path: String,
    pub user_input: String,
}

impl ImageRecord {
    pub fn new(image_path: impl Into<String>, user_input: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            user_input: user_input.into(),
        }
    }
}
