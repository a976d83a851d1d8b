//! Client configuration.

/// Public instance of the task service.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Number of items requested per collection fetch.
pub const DEFAULT_LIMIT: usize = 15;

/// Where the client talks to and how much it asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub limit: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ClientConfig {
    /// Default config pointed at `base_url`. Blank values keep the default.
    pub fn with_base_url(base_url: Option<&str>) -> Self {
        match base_url.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => Self {
                base_url: url.to_string(),
                ..Self::default()
            },
            None => Self::default(),
        }
    }
}
