use crate::{
    error::{AppError, AppResult},
    models::{Article, ArticleChanges, DashboardResponse, DashboardStats, NewArticle},
    repository::ArticleRepositoryState,
};

/// Number of articles listed under `recent_articles` on the dashboard.
pub const RECENT_ARTICLES_LIMIT: usize = 5;

/// ArticleUseCase
///
/// Business rules for articles on top of an `ArticleRepository`. Cloning is cheap (one
/// `Arc`), so the use case is stored directly in the application state.
#[derive(Clone)]
pub struct ArticleUseCase {
    repo: ArticleRepositoryState,
}

impl ArticleUseCase {
    pub fn new(repo: ArticleRepositoryState) -> Self {
        Self { repo }
    }

    /// create_article
    ///
    /// Title, content and author must be non-empty after trimming; the first missing field
    /// is named in the error. Articles are always created unpublished.
    pub async fn create_article(
        &self,
        title: &str,
        content: &str,
        author: &str,
    ) -> AppResult<Article> {
        require(title, "title")?;
        require(content, "content")?;
        require(author, "author")?;

        let article = self
            .repo
            .create(NewArticle {
                title: title.to_string(),
                content: content.to_string(),
                author: author.to_string(),
                published: false,
            })
            .await?;

        tracing::info!(article_id = article.id, "article created");
        Ok(article)
    }

    /// get_article
    ///
    /// Returns the article in whatever publish state it is in; public callers must check
    /// `published` themselves.
    pub async fn get_article(&self, id: i64) -> AppResult<Article> {
        check_id(id)?;
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("article not found"))
    }

    pub async fn get_all_articles(&self) -> AppResult<Vec<Article>> {
        self.repo.get_all().await
    }

    pub async fn get_published_articles(&self) -> AppResult<Vec<Article>> {
        self.repo.get_published().await
    }

    pub async fn get_articles_by_author(&self, author: &str) -> AppResult<Vec<Article>> {
        require(author, "author")?;
        self.repo.get_by_author(author).await
    }

    /// update_article
    ///
    /// Applies a partial update. Absent or blank text fields keep their stored value, so an
    /// update can never leave an article with an empty title, content or author.
    pub async fn update_article(&self, id: i64, changes: ArticleChanges) -> AppResult<Article> {
        let mut article = self.get_article(id).await?;

        if let Some(title) = non_blank(changes.title) {
            article.title = title;
        }
        if let Some(content) = non_blank(changes.content) {
            article.content = content;
        }
        if let Some(author) = non_blank(changes.author) {
            article.author = author;
        }
        if let Some(published) = changes.published {
            article.published = published;
        }

        let updated = self.persist(&article).await?;
        tracing::info!(article_id = id, "article updated");
        Ok(updated)
    }

    /// Soft-deletes the article. Deleting twice reports not found the second time.
    pub async fn delete_article(&self, id: i64) -> AppResult<()> {
        check_id(id)?;
        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("article not found"));
        }
        tracing::info!(article_id = id, "article deleted");
        Ok(())
    }

    pub async fn publish_article(&self, id: i64) -> AppResult<Article> {
        self.set_published(id, true).await
    }

    pub async fn unpublish_article(&self, id: i64) -> AppResult<Article> {
        self.set_published(id, false).await
    }

    /// dashboard
    ///
    /// Totals over all live articles plus the most recent ones, newest first.
    pub async fn dashboard(&self) -> AppResult<DashboardResponse> {
        let all = self.repo.get_all().await?;
        let published = self.repo.get_published().await?;

        let total_articles = all.len() as i64;
        let published_articles = published.len() as i64;

        let recent_articles = all.into_iter().take(RECENT_ARTICLES_LIMIT).collect();

        Ok(DashboardResponse {
            stats: DashboardStats {
                total_articles,
                published_articles,
                draft_articles: total_articles - published_articles,
            },
            recent_articles,
        })
    }

    async fn set_published(&self, id: i64, published: bool) -> AppResult<Article> {
        let mut article = self.get_article(id).await?;
        article.published = published;

        let updated = self.persist(&article).await?;
        tracing::info!(article_id = id, published, "article publish state changed");
        Ok(updated)
    }

    // The row can vanish between the read and the write.
    async fn persist(&self, article: &Article) -> AppResult<Article> {
        self.repo
            .update(article)
            .await?
            .ok_or_else(|| AppError::not_found("article not found"))
    }
}

fn require(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(())
}

fn check_id(id: i64) -> AppResult<()> {
    if id <= 0 {
        return Err(AppError::validation("invalid article ID"));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
