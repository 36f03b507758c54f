//! Post CRUD handlers.
//!
//! Create and update run the content pipeline synchronously before the write;
//! reads serve the stored `content_html` verbatim and never re-render.

use actix_web::{HttpResponse, web};

use scribe_core::domain::{Post, PostDraft};
use scribe_core::ports::{BaseRepository, PostRepository};
use scribe_shared::dto::{PostRequest, PostResponse};
use scribe_shared::response::ApiResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        content_html: post.content_html,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

/// GET /api/posts - all posts, newest first.
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_recent().await?;
    let count = posts.len();
    let data: Vec<PostResponse> = posts.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_count(data, count)))
}

/// POST /api/posts - create a post.
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let draft = PostDraft::new(req.title, req.content);
    draft.validate().map_err(AppError::Validation)?;

    // Validation passed; render and sanitize so content and content_html are
    // written as a consistent pair.
    let content_html = state.pipeline.process(&draft.content);
    let post = Post::new(draft.title, draft.content, content_html);

    let saved = state.posts.save(post).await?;
    tracing::info!(post_id = saved.id, "Post created");

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        to_response(saved),
        "Post created successfully",
    )))
}

/// GET /api/posts/{id} - a single post.
pub async fn get_post(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post with id {} not found", id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(post))))
}

/// PUT /api/posts/{id} - full replacement of title and content.
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    let draft = PostDraft::new(req.title, req.content);
    draft.validate().map_err(AppError::Validation)?;

    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post with id {} not found", id)))?;

    let content_html = state.pipeline.process(&draft.content);
    post.apply_edit(draft.title, draft.content, content_html);

    let saved = state.posts.save(post).await?;
    tracing::info!(post_id = saved.id, "Post updated");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        to_response(saved),
        "Post updated successfully",
    )))
}

/// DELETE /api/posts/{id} - remove a post.
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state.posts.delete(id).await?;
    tracing::info!(post_id = id, "Post deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message_only("Post deleted successfully")))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test, web};
    use scribe_core::ContentPipeline;
    use scribe_infra::InMemoryPostRepository;
    use scribe_shared::dto::PostResponse;
    use scribe_shared::response::ApiResponse;

    use crate::handlers::configure_routes;
    use crate::state::AppState;

    fn test_state() -> AppState {
        AppState {
            posts: Arc::new(InMemoryPostRepository::new()),
            pipeline: Arc::new(ContentPipeline::new()),
        }
    }

    macro_rules! test_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn create_stores_sanitized_rendering() {
        let app = test_app!(test_state());

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(serde_json::json!({
                "title": "Hi",
                "content": "Hello **world**\n\nSecond para."
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: ApiResponse<PostResponse> = test::read_body_json(resp).await;
        assert!(body.success);
        let post = body.data.unwrap();
        assert_eq!(post.id, 1);
        assert!(post.content_html.contains("<strong>world</strong>"));
        assert_eq!(post.content_html.matches("<p>").count(), 2);
        assert!(post.content_html.contains("Second para."));
        assert_eq!(post.created_at, post.updated_at);
    }

    #[actix_web::test]
    async fn create_rejects_out_of_bounds_input() {
        let app = test_app!(test_state());

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(serde_json::json!({"title": "", "content": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        // Nothing was stored
        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let body: ApiResponse<Vec<PostResponse>> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.count, Some(0));
    }

    #[actix_web::test]
    async fn update_rerenders_and_refreshes_updated_at() {
        let app = test_app!(test_state());

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(serde_json::json!({
                "title": "Hi",
                "content": "Hello **world**\n\nSecond para."
            }))
            .to_request();
        let body: ApiResponse<PostResponse> = test::call_and_read_body_json(&app, req).await;
        let created = body.data.unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{}", created.id))
            .set_json(serde_json::json!({
                "title": "Hi",
                "content": "<script>x</script>Bye"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: ApiResponse<PostResponse> = test::read_body_json(resp).await;
        let updated = body.data.unwrap();
        assert_eq!(updated.id, created.id);
        assert!(updated.content_html.contains("Bye"));
        assert!(!updated.content_html.contains("<script"));
        assert_eq!(updated.created_at, created.created_at);
        assert_ne!(updated.updated_at, created.updated_at);
    }

    #[actix_web::test]
    async fn update_missing_post_is_404() {
        let app = test_app!(test_state());

        let req = test::TestRequest::put()
            .uri("/api/posts/999")
            .set_json(serde_json::json!({"title": "t", "content": "c"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn get_serves_stored_record() {
        let app = test_app!(test_state());

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(serde_json::json!({"title": "One", "content": "body"}))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/api/posts/1").to_request();
        let body: ApiResponse<PostResponse> = test::call_and_read_body_json(&app, req).await;
        let post = body.data.unwrap();
        assert_eq!(post.title, "One");
        assert_eq!(post.content, "body");
        assert!(post.content_html.contains("<p>body</p>"));
    }

    #[actix_web::test]
    async fn get_missing_post_is_404() {
        let app = test_app!(test_state());

        let req = test::TestRequest::get().uri("/api/posts/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn list_returns_newest_first_with_count() {
        let app = test_app!(test_state());

        for title in ["first", "second", "third"] {
            let req = test::TestRequest::post()
                .uri("/api/posts")
                .set_json(serde_json::json!({"title": title, "content": "body"}))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let body: ApiResponse<Vec<PostResponse>> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.count, Some(3));
        let titles: Vec<&str> = body
            .data
            .as_ref()
            .unwrap()
            .iter()
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[actix_web::test]
    async fn delete_removes_post_then_404s() {
        let app = test_app!(test_state());

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(serde_json::json!({"title": "gone", "content": "soon"}))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::delete().uri("/api/posts/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::delete().uri("/api/posts/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
