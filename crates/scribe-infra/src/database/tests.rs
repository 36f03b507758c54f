#[cfg(test)]
mod tests {
    use crate::database::entity::post;
    use crate::database::postgres_repo::PostgresPostRepository;
    use scribe_core::domain::Post;
    use scribe_core::ports::{BaseRepository, PostRepository};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn model(id: i64, title: &str, created_at: chrono::DateTime<chrono::Utc>) -> post::Model {
        post::Model {
            id,
            title: title.to_owned(),
            content: "Raw *markdown*".to_owned(),
            content_html: "<p>Raw <em>markdown</em></p>".to_owned(),
            created_at: created_at.into(),
            updated_at: created_at.into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model(7, "Test Post", now)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(7).await.unwrap();

        assert!(result.is_some());
        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, 7);
        assert_eq!(post.content_html, "<p>Raw <em>markdown</em></p>");
    }

    #[tokio::test]
    async fn test_list_recent_maps_all_rows() {
        let now = chrono::Utc::now();
        let earlier = now - chrono::Duration::hours(1);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model(2, "newer", now), model(1, "older", earlier)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let posts = repo.list_recent().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "newer");
        assert_eq!(posts[1].title, "older");
    }
}
