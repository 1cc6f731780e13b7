use crate::data_manager::DataManager;
use crate::github::types::TrendingSince;
use clap::{Args, Parser, Subcommand};
use reqwest::StatusCode;
use std::path::PathBuf;

/// GitHub Explorer - browse GitHub repositories and users from the terminal
#[derive(Parser)]
#[command(name = "gh-explorer")]
#[command(about = "A GitHub client for trending, search, starring and profiles", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Logging level (overrides the configuration file)
    #[arg(short, long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Sign in with an OAuth authorization code
    Login(LoginArgs),

    /// Show trending repositories
    Trending(TrendingArgs),

    /// Search repositories
    Search(SearchArgs),

    /// Search users
    SearchUsers(SearchArgs),

    /// Render a repository README to HTML
    Readme(ReadmeArgs),

    /// Show a user profile
    User(UserArgs),

    /// Check whether a repository is starred
    Starred(RepoArgs),

    /// Star a repository
    Star(RepoArgs),

    /// Remove a star from a repository
    Unstar(RepoArgs),

    /// List the users a user is following
    Following(UserPageArgs),

    /// List a user's followers
    Followers(UserPageArgs),

    /// Sign out and clear cached data
    Logout,
}

#[derive(Args, Clone)]
pub struct LoginArgs {
    /// Authorization code from the OAuth redirect
    #[arg(value_name = "CODE")]
    pub code: String,
}

#[derive(Args, Clone)]
pub struct TrendingArgs {
    /// Restrict to a language (e.g., "rust")
    #[arg(short, long)]
    pub language: Option<String>,

    /// Time window: daily, weekly or monthly
    #[arg(short, long, default_value = "weekly")]
    pub since: String,
}

#[derive(Args, Clone)]
pub struct SearchArgs {
    /// Search query
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Result page (1-based)
    #[arg(short, long, default_value = "1")]
    pub page: u32,
}

#[derive(Args, Clone)]
pub struct ReadmeArgs {
    /// Repository owner
    pub owner: String,

    /// Repository name
    pub repo: String,

    /// Stylesheet file referenced from the generated HTML
    #[arg(long)]
    pub css: Option<String>,
}

#[derive(Args, Clone)]
pub struct UserArgs {
    /// GitHub login
    pub username: String,
}

#[derive(Args, Clone)]
pub struct RepoArgs {
    /// Repository owner
    pub owner: String,

    /// Repository name
    pub repo: String,
}

#[derive(Args, Clone)]
pub struct UserPageArgs {
    /// GitHub login
    pub username: String,

    /// Result page (1-based)
    #[arg(short, long, default_value = "1")]
    pub page: u32,
}

pub async fn handle_command(
    command: Commands,
    data_manager: DataManager,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    match command {
        Commands::Login(args) => {
            let profile = data_manager.sign_in(&args.code).await?;
            println!("Signed in as {}", profile.login);
            if let Some(email) = &profile.email {
                println!("Email: {}", email);
            }
        }
        Commands::Trending(args) => {
            let Some(since) = TrendingSince::parse(&args.since) else {
                eprintln!(
                    "Unknown time window '{}'. Use daily, weekly or monthly.",
                    args.since
                );
                std::process::exit(1);
            };

            let repos = data_manager
                .trending(args.language.as_deref(), since)
                .await?;
            if repos.is_empty() {
                println!("No trending repositories found.");
            }
            for repo in repos {
                println!(
                    "{:>6}* {} - {}",
                    repo.stargazers_count.unwrap_or(0),
                    repo.full_name,
                    repo.description.unwrap_or_default()
                );
            }
        }
        Commands::Search(args) => {
            let results = data_manager
                .search_repositories(&args.query, args.page)
                .await?;
            println!("{} repositories (page {})", results.total_count, args.page);
            for repo in results.items {
                println!("{} - {}", repo.full_name, repo.description.unwrap_or_default());
            }
        }
        Commands::SearchUsers(args) => {
            let results = data_manager.search_users(&args.query, args.page).await?;
            println!("{} users (page {})", results.total_count, args.page);
            for user in results.items {
                println!("{} ({})", user.login, user.html_url);
            }
        }
        Commands::Readme(args) => {
            match data_manager
                .rendered_readme(&args.owner, &args.repo, args.css.as_deref())
                .await?
            {
                Some(html) => println!("{}", html),
                None => eprintln!("No stylesheet given, nothing to render."),
            }
        }
        Commands::User(args) => {
            let profile = data_manager.user_profile(&args.username).await?;
            println!("{}", profile.login);
            if let Some(name) = &profile.name {
                println!("Name: {}", name);
            }
            if let Some(bio) = &profile.bio {
                println!("Bio: {}", bio);
            }
            println!(
                "Repos: {}  Followers: {}  Following: {}",
                profile.public_repos.unwrap_or(0),
                profile.followers.unwrap_or(0),
                profile.following.unwrap_or(0)
            );
            println!(
                "Followed by you: {}",
                if profile.followed { "yes" } else { "no" }
            );
        }
        Commands::Starred(args) => {
            match data_manager
                .is_repository_starred(&args.owner, &args.repo)
                .await?
            {
                Some(status) if status == StatusCode::NO_CONTENT => {
                    println!("{}/{} is starred.", args.owner, args.repo)
                }
                Some(_) => println!("{}/{} is not starred.", args.owner, args.repo),
                None => exit_not_signed_in(),
            }
        }
        Commands::Star(args) => {
            match data_manager.star_repository(&args.owner, &args.repo).await? {
                Some(status) if status.is_success() => {
                    println!("Starred {}/{}.", args.owner, args.repo)
                }
                Some(status) => println!("GitHub answered {}.", status),
                None => exit_not_signed_in(),
            }
        }
        Commands::Unstar(args) => {
            match data_manager
                .unstar_repository(&args.owner, &args.repo)
                .await?
            {
                Some(status) if status.is_success() => {
                    println!("Unstarred {}/{}.", args.owner, args.repo)
                }
                Some(status) => println!("GitHub answered {}.", status),
                None => exit_not_signed_in(),
            }
        }
        Commands::Following(args) => {
            let users = data_manager.following(&args.username, args.page).await?;
            if users.is_empty() {
                println!("No users found.");
            }
            for user in users {
                println!("{}", user.login);
            }
        }
        Commands::Followers(args) => {
            let users = data_manager.followers(&args.username, args.page).await?;
            if users.is_empty() {
                println!("No users found.");
            }
            for user in users {
                println!("{}", user.login);
            }
        }
        Commands::Logout => {
            data_manager.clear_cached_state();
            println!("Signed out and cleared cached data.");
        }
    }

    Ok(())
}

fn exit_not_signed_in() -> ! {
    eprintln!("Not signed in. Run 'gh-explorer login <code>' first.");
    std::process::exit(1);
}
