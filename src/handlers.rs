use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::core::errors::ApiError;
use crate::core::helpers::excerpt;
use crate::core::query_params::{get_bool_flag, get_page_request, parse_query_params};
use crate::feed::Feed;
use crate::models::{EnrichedPostSummary, Page};

pub struct AppState {
    pub feed: Feed,
    pub excerpt_chars: usize,
}

impl AppState {
    pub fn new(feed: Feed) -> Self {
        AppState {
            feed,
            excerpt_chars: crate::config::excerpt_chars(),
        }
    }

    /// Shorten summary bodies for list views unless `?full=true`.
    fn present(&self, req: &HttpRequest, mut page: Page<EnrichedPostSummary>) -> Page<EnrichedPostSummary> {
        let params = parse_query_params(req.query_string());
        if !get_bool_flag(&params, "full") {
            for post in &mut page.items {
                post.content = excerpt(&post.content, self.excerpt_chars);
            }
        }
        page
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health)).service(
        web::scope("/api")
            .route("/posts", web::get().to(list_posts))
            .route("/posts/{id}", web::get().to(get_post))
            .route("/users/{id}", web::get().to(get_user))
            .route("/users/{id}/posts", web::get().to(list_user_posts))
            .route("/users/{id}/comments", web::get().to(list_user_comments))
            .route("/users/{id}/followers", web::get().to(list_followers))
            .route("/users/{id}/following", web::get().to(list_following)),
    );
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

async fn list_posts(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let params = parse_query_params(req.query_string());
    let page = state.feed.get_paginated_posts(get_page_request(&params)).await?;

    Ok(HttpResponse::Ok().json(state.present(&req, page)))
}

async fn get_post(path: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let post = state.feed.get_post(&path).await?;
    Ok(HttpResponse::Ok().json(post))
}

async fn get_user(path: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let profile = state.feed.get_user_profile(&path).await?;
    Ok(HttpResponse::Ok().json(profile))
}

async fn list_user_posts(
    req: HttpRequest,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let params = parse_query_params(req.query_string());
    let page = state
        .feed
        .list_posts_by_user(&path, get_page_request(&params))
        .await?;

    Ok(HttpResponse::Ok().json(state.present(&req, page)))
}

async fn list_user_comments(
    req: HttpRequest,
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let params = parse_query_params(req.query_string());
    let page = state
        .feed
        .list_comments_by_user(&path, get_page_request(&params))
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

async fn list_followers(path: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let users = state.feed.followers(&path).await?;
    Ok(HttpResponse::Ok().json(json!({ "data": users })))
}

async fn list_following(path: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let users = state.feed.following(&path).await?;
    Ok(HttpResponse::Ok().json(json!({ "data": users })))
}
