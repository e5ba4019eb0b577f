use clap::Parser;

#[derive(Parser)]
#[command(name = "portfolio-server")]
#[command(about = "Portfolio Server - Renders a GitHub portfolio with repository browser, search and gallery")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// GitHub login whose profile and repositories are shown
    #[arg(long, env = "GITHUB_USERNAME", default_value = "Azabell1993")]
    pub username: String,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_BASE", default_value = "https://api.github.com")]
    pub api_base: String,

    /// User-Agent sent with every GitHub request
    #[arg(long, env = "PORTFOLIO_USER_AGENT", default_value = "Azabell1993-Portfolio")]
    pub user_agent: String,

    /// Address to bind the HTTP server to
    #[arg(long, env = "PORTFOLIO_BIND", default_value = "0.0.0.0")]
    pub bind: String,

    /// Port for the HTTP server
    #[arg(long, env = "PORTFOLIO_PORT", default_value = "8080")]
    pub port: u16,

    /// File holding the persisted theme preference
    #[arg(long, env = "PORTFOLIO_PREFS", default_value = "portfolio-prefs.json")]
    pub prefs_path: String,

    /// Quiet period in milliseconds before search input is applied
    #[arg(long, env = "SEARCH_DEBOUNCE_MS", default_value = "300")]
    pub search_debounce_ms: u64,

    /// Number of recently updated repositories polled for the commit feed
    #[arg(long, env = "COMMIT_REPO_LIMIT", default_value = "10")]
    pub commit_repo_limit: usize,
}
