use std::env;
use std::path::Path;

// Default configuration constants
pub const DEFAULT_API_BASE_URL: &str = "";
pub const DEFAULT_API_TOKEN: &str = "";
pub const DEFAULT_USERS_ENDPOINT: &str = "/users";
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 20];

/// What the view does with its list after a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteRefresh {
    /// Refetch only once the server confirmed the delete.
    #[default]
    OnSuccess,
    /// Refetch whatever the delete returned, masking failures.
    Always,
}

impl DeleteRefresh {
    /// Parse a policy name; unknown values fall back to [`DeleteRefresh::OnSuccess`].
    ///
    /// # Examples
    ///
    /// ```
    /// use roster::config::DeleteRefresh;
    ///
    /// assert_eq!(DeleteRefresh::parse("always"), DeleteRefresh::Always);
    /// assert_eq!(DeleteRefresh::parse("on-success"), DeleteRefresh::OnSuccess);
    /// assert_eq!(DeleteRefresh::parse("bogus"), DeleteRefresh::OnSuccess);
    /// ```
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "always" => DeleteRefresh::Always,
            _ => DeleteRefresh::OnSuccess,
        }
    }
}

/// Settings resolved from the environment once per command.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
    pub api_token: String,
    pub users_endpoint: String,
    pub page_size: usize,
    pub delete_refresh: DeleteRefresh,
}

impl Settings {
    pub fn from_env() -> Self {
        Settings {
            api_base_url: get_api_base_url(),
            api_token: get_api_token(),
            users_endpoint: get_users_endpoint(),
            page_size: get_page_size(),
            delete_refresh: get_delete_refresh(),
        }
    }
}

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(&env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()))
}

pub fn get_api_token() -> String {
    env::var("API_TOKEN").unwrap_or_else(|_| DEFAULT_API_TOKEN.to_string())
}

pub fn get_users_endpoint() -> String {
    sanitize_endpoint(&env::var("USERS_ENDPOINT").unwrap_or_else(|_| DEFAULT_USERS_ENDPOINT.to_string()))
}

pub fn get_page_size() -> usize {
    env::var("PAGE_SIZE")
        .ok()
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .filter(|n| PAGE_SIZE_OPTIONS.contains(n))
        .unwrap_or(DEFAULT_PAGE_SIZE)
}

pub fn get_delete_refresh() -> DeleteRefresh {
    env::var("DELETE_REFRESH")
        .map(|raw| DeleteRefresh::parse(&raw))
        .unwrap_or_default()
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "http://localhost:5000".to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn sanitize_endpoint(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        DEFAULT_USERS_ENDPOINT.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
