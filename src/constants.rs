pub mod limits {

    /// Results requested from the provider per page.
    pub const RESULTS_PER_PAGE: u32 = 10;

    pub const RECENT_SEARCHES_LIMIT: u64 = 10;

    pub const DEFAULT_PAGE: u32 = 1;
}

pub mod messages {

    pub const SEARCH_STRING_REQUIRED: &str = "Search string is required.";

    pub const INVALID_SEARCH_STRING: &str = "Search string is not valid UTF-8.";

    pub const API_KEY_MISSING: &str = "Pixabay API key not configured on the server.";

    pub const PROVIDER_ERROR: &str = "Error from Pixabay API";

    pub const PROVIDER_UNAVAILABLE: &str = "No response from Pixabay API";

    pub const PROVIDER_FAILED: &str = "Failed to fetch images from Pixabay";

    pub const RECENT_FAILED: &str = "Failed to retrieve recent searches";
}
