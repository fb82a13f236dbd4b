//! Seed the gallery with demo users, websites, likes and comments.
//!
//! Prints a development session token for every demo account so the admin
//! area can be exercised without the identity provider.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Deserialize;
use showcase_core::common::{UserId, UserRole, WebsiteId};
use showcase_core::config::Config;
use showcase_core::domains::auth::JwtService;
use showcase_core::domains::user::models::User;
use showcase_core::domains::website::models::{
    ImportedState, NewWebsite, Website, WebsiteCategory, WebsiteComment, WebsiteLike,
    WebsiteStatus,
};
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "seed")]
#[command(about = "Seed the showcase database with demo data")]
struct Cli {
    /// Delete all users first (their websites, likes and comments cascade)
    #[arg(long)]
    reset: bool,

    /// Seed data file
    #[arg(long, default_value = "data/showcase_seed.json")]
    data: PathBuf,
}

#[derive(Debug, Deserialize)]
struct SeedData {
    users: Vec<UserInput>,
    websites: Vec<WebsiteInput>,
    likes: Vec<Reaction>,
    comments: Vec<CommentInput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserInput {
    key: String,
    name: String,
    email: String,
    email_verified: bool,
    role: UserRole,
    image: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebsiteInput {
    key: String,
    title: String,
    description: String,
    image_url: String,
    source_url: Option<String>,
    live_url: String,
    tags: Vec<String>,
    category: WebsiteCategory,
    is_popular: bool,
    status: WebsiteStatus,
    submitted_by: String,
    reviewed_by: Option<String>,
    view_count: i32,
    published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct Reaction {
    website: String,
    user: String,
}

#[derive(Debug, Deserialize)]
struct CommentInput {
    website: String,
    user: String,
    content: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    println!("✓ Connected to database");

    let json_data = std::fs::read_to_string(&cli.data)
        .with_context(|| format!("Failed to read seed data file {}", cli.data.display()))?;
    let seed_data: SeedData =
        serde_json::from_str(&json_data).context("Failed to parse seed data")?;

    if !cli.reset && User::count(&pool).await? > 0 {
        bail!("database already has users; pass --reset to reseed");
    }

    println!("\n🚀 Starting seed process...\n");

    // Reset and seed commit together or not at all
    let mut tx = pool.begin().await?;

    if cli.reset {
        let removed = User::delete_all(&mut *tx).await?;
        println!("  ✓ Cleared {} existing users and their content", removed);
    }

    let mut users: HashMap<String, User> = HashMap::new();
    for input in &seed_data.users {
        let user = User::create(
            UserId::new(),
            &input.name,
            &input.email,
            input.email_verified,
            input.image.as_deref(),
            input.role,
            &mut *tx,
        )
        .await
        .with_context(|| format!("Failed to insert user {}", input.email))?;
        println!("  ✓ User {} ({})", user.name, user.role);
        users.insert(input.key.clone(), user);
    }

    let mut websites: HashMap<String, WebsiteId> = HashMap::new();
    for input in &seed_data.websites {
        let submitter = lookup_user(&users, &input.submitted_by)?;
        let reviewer = input
            .reviewed_by
            .as_deref()
            .map(|key| lookup_user(&users, key))
            .transpose()?;

        let new = NewWebsite {
            title: input.title.clone(),
            description: input.description.clone(),
            image_url: input.image_url.clone(),
            source_url: input.source_url.clone(),
            live_url: input.live_url.clone(),
            tags: input.tags.clone(),
            category: input.category,
        };
        let state = ImportedState {
            status: input.status,
            is_popular: input.is_popular,
            view_count: input.view_count,
            reviewed_by: reviewer,
            published_at: input.published_at,
        };

        let website = Website::import(&new, &state, submitter, &mut *tx)
            .await
            .with_context(|| format!("Failed to insert website {}", input.title))?;
        println!("  ✓ Website {} [{}]", website.title, website.status);
        websites.insert(input.key.clone(), website.id);
    }

    for like in &seed_data.likes {
        let website_id = lookup_website(&websites, &like.website)?;
        let user_id = lookup_user(&users, &like.user)?;
        WebsiteLike::insert(website_id, user_id, &mut *tx).await?;
    }
    println!("  ✓ {} likes", seed_data.likes.len());

    for comment in &seed_data.comments {
        let website_id = lookup_website(&websites, &comment.website)?;
        let user_id = lookup_user(&users, &comment.user)?;
        WebsiteComment::create(website_id, user_id, &comment.content, &mut *tx).await?;
    }
    println!("  ✓ {} comments", seed_data.comments.len());

    tx.commit().await.context("Failed to commit seed data")?;

    println!("\n✨ Seed complete!");
    println!(
        "   Seeded {} users, {} websites, {} likes and {} comments",
        seed_data.users.len(),
        seed_data.websites.len(),
        seed_data.likes.len(),
        seed_data.comments.len()
    );

    let jwt = JwtService::new(&config.session_secret, config.session_issuer.clone());
    println!("\n🔑 Development session tokens:");
    for input in &seed_data.users {
        if let Some(user) = users.get(&input.key) {
            let token = jwt.create_token(&user.session_identity())?;
            println!("\n   {} <{}> ({})\n   {}", user.name, user.email, user.role, token);
        }
    }

    Ok(())
}

fn lookup_user(users: &HashMap<String, User>, key: &str) -> Result<UserId> {
    users
        .get(key)
        .map(|u| u.id)
        .with_context(|| format!("Unknown user key '{key}' in seed data"))
}

fn lookup_website(websites: &HashMap<String, WebsiteId>, key: &str) -> Result<WebsiteId> {
    websites
        .get(key)
        .copied()
        .with_context(|| format!("Unknown website key '{key}' in seed data"))
}
