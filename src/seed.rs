use thiserror::Error;

use crate::{
    config::{AdminSeedConfig, SeedMode},
    error::AppError,
    models::{NewAdminUser, NewArticle},
    password::hash_password,
    repository::{AdminUserRepositoryState, ArticleRepositoryState},
};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("ADMIN_EMAIL must be set to seed the initial admin")]
    MissingAdminEmail,

    #[error("ADMIN_PASSWORD must be set to seed the initial admin")]
    MissingAdminPassword,

    #[error(transparent)]
    App(#[from] AppError),
}

/// seed_admin_users
///
/// Creates the initial administrator unless any admin account already exists. Returns
/// whether an account was created.
pub async fn seed_admin_users(
    repo: &AdminUserRepositoryState,
    admin: &AdminSeedConfig,
) -> Result<bool, SeedError> {
    if repo.count().await? > 0 {
        tracing::info!("Admin users already exist, skipping admin seed");
        return Ok(false);
    }

    let email = admin.email.trim();
    if email.is_empty() {
        return Err(SeedError::MissingAdminEmail);
    }
    if admin.password.is_empty() {
        return Err(SeedError::MissingAdminPassword);
    }

    let user = repo
        .create(NewAdminUser {
            email: email.to_string(),
            password_hash: hash_password(&admin.password)?,
            name: admin.name.clone(),
        })
        .await?;

    tracing::info!(user_id = user.id, email = %user.email, "Seeded initial admin user");
    Ok(true)
}

/// seed_articles
///
/// Inserts the sample articles into an empty table. Returns how many were inserted.
pub async fn seed_articles(repo: &ArticleRepositoryState) -> Result<usize, SeedError> {
    if repo.count().await? > 0 {
        tracing::info!("Articles already exist, skipping article seed");
        return Ok(0);
    }

    let samples = sample_articles();
    let inserted = samples.len();
    for article in samples {
        repo.create(article).await?;
    }

    tracing::info!(count = inserted, "Seeded sample articles");
    Ok(inserted)
}

/// run_seeds
///
/// Development seeds the admin and the sample articles; production only the admin.
pub async fn run_seeds(
    mode: SeedMode,
    admins: &AdminUserRepositoryState,
    articles: &ArticleRepositoryState,
    admin: &AdminSeedConfig,
) -> Result<(), SeedError> {
    tracing::info!(?mode, "Running database seeds");

    seed_admin_users(admins, admin).await?;
    if mode == SeedMode::Development {
        seed_articles(articles).await?;
    }

    tracing::info!("Database seeding completed");
    Ok(())
}

fn sample_articles() -> Vec<NewArticle> {
    vec![
        NewArticle {
            title: "Welcome to the Article Console".to_string(),
            content: "This is the first published article. Sign in to the admin console to \
                      edit it, unpublish it or write your own."
                .to_string(),
            author: "Editorial Team".to_string(),
            published: true,
        },
        NewArticle {
            title: "Writing Good Headlines".to_string(),
            content: "A headline should tell the reader what they will learn in as few words \
                      as possible. Lead with the subject and keep it concrete."
                .to_string(),
            author: "Jane Editor".to_string(),
            published: true,
        },
        NewArticle {
            title: "Upcoming Features (Draft)".to_string(),
            content: "Notes on what is planned next. This draft stays hidden from the public \
                      API until it is published."
                .to_string(),
            author: "Editorial Team".to_string(),
            published: false,
        },
    ]
}
