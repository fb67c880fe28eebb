use actix_web::{web, HttpResponse};
use serde::Deserialize;
use crate::{
    api::metrics,
    models::{User, UserFilter},
    state::AppState,
    utils::{non_blank, parse_flag, parse_int_or, UNEXPECTED_ERROR_MESSAGE},
};

// Query values arrive as raw strings: anything unparsable becomes the default.

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Only users with a greater id are returned (default 0)
    pub id_greater_than: Option<String>,
    /// Users per page, at most 100
    pub page_size: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FilterQuery {
    pub id_greater_than: Option<String>,
    /// "true" keeps site admins only
    pub only_admins: Option<String>,
    /// "true" keeps users with an avatar only
    pub only_with_avatar: Option<String>,
    /// Case-insensitive login prefix
    pub login_starts_with: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ImportFilterQuery {
    /// Minimum number of matching users to import (default 10)
    pub number_of_items: Option<String>,
    pub only_admins: Option<String>,
    pub only_with_avatar: Option<String>,
    pub login_starts_with: Option<String>,
}

fn unexpected_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(serde_json::json!({
        "success": false,
        "error": UNEXPECTED_ERROR_MESSAGE
    }))
}

/// GET /users/list-from-github?idGreaterThan=0&pageSize=100
#[utoipa::path(
    get,
    path = "/users/list-from-github",
    tag = "Users",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of GitHub users", body = Vec<User>),
        (status = 500, description = "GitHub Users API unavailable")
    )
)]
pub async fn list_from_github(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    let id_greater_than = parse_int_or(query.id_greater_than.as_deref(), 0);
    // 0 lets the source apply its own ceiling
    let page_size = parse_int_or(query.page_size.as_deref(), 0);

    log::info!("🐙 GET /users/list-from-github?idGreaterThan={}&pageSize={}", id_greater_than, page_size);

    match state.github.list(id_greater_than, page_size).await {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(e) => {
            log::error!("❌ Failed to list GitHub users: {}", e);
            unexpected_error()
        }
    }
}

/// GET /users/list-from-github/filtered?onlyAdmins=true&loginStartsWith=a
#[utoipa::path(
    get,
    path = "/users/list-from-github/filtered",
    tag = "Users",
    params(FilterQuery),
    responses(
        (status = 200, description = "One page of GitHub users, filtered", body = Vec<User>),
        (status = 500, description = "GitHub Users API unavailable")
    )
)]
pub async fn list_from_github_filtered(
    state: web::Data<AppState>,
    query: web::Query<FilterQuery>,
) -> HttpResponse {
    let filter = UserFilter {
        only_admins: parse_flag(query.only_admins.as_deref()),
        only_with_avatar: parse_flag(query.only_with_avatar.as_deref()),
        login_starts_with: non_blank(query.login_starts_with.as_deref()),
        id_greater_than: Some(parse_int_or(query.id_greater_than.as_deref(), 0)),
    };

    log::info!("🔍 GET /users/list-from-github/filtered {:?}", filter);

    match state.imports.paginator().list_by_filter(&filter).await {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(e) => {
            log::error!("❌ Failed to list filtered GitHub users: {}", e);
            unexpected_error()
        }
    }
}

/// POST /users/save - creates the user or refreshes admin flag and avatar
#[utoipa::path(
    post,
    path = "/users/save",
    tag = "Users",
    request_body = User,
    responses(
        (status = 200, description = "Saved user, or null when nothing was saved", body = User),
        (status = 500, description = "Persistence failure")
    )
)]
pub async fn save(
    state: web::Data<AppState>,
    user: web::Json<User>,
) -> HttpResponse {
    log::info!("💾 POST /users/save - {}", user.login);

    match state.users.create_or_update(&user).await {
        Ok(outcome) => HttpResponse::Ok().json(outcome.into_user()),
        Err(e) => {
            log::error!("❌ Failed to save user {}: {}", user.login, e);
            unexpected_error()
        }
    }
}

/// POST /users/import-github-page?idGreaterThan=0&pageSize=10
#[utoipa::path(
    post,
    path = "/users/import-github-page",
    tag = "Users",
    params(PageQuery),
    responses(
        (status = 200, description = "Import summary", body = String, content_type = "text/plain"),
        (status = 500, description = "Import failed")
    )
)]
pub async fn import_github_page(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    let id_greater_than = parse_int_or(query.id_greater_than.as_deref(), 0);
    let page_size = parse_int_or(query.page_size.as_deref(), 10);

    log::info!("📥 POST /users/import-github-page?idGreaterThan={}&pageSize={}", id_greater_than, page_size);

    match state.imports.import_users_from_github_by_page(id_greater_than, page_size).await {
        Ok(imported) => {
            metrics::add_imported_users(imported);
            let message = if imported > 0 {
                format!("total of {} items imported successfully", imported)
            } else {
                "No items found".to_string()
            };
            HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(message)
        }
        Err(e) => {
            log::error!("❌ Import by page failed: {}", e);
            unexpected_error()
        }
    }
}

/// POST /users/import-from-github?numberOfItems=10&onlyAdmins=true
#[utoipa::path(
    post,
    path = "/users/import-from-github",
    tag = "Users",
    params(ImportFilterQuery),
    responses(
        (status = 200, description = "Import summary", body = String, content_type = "text/plain"),
        (status = 500, description = "Import failed")
    )
)]
pub async fn import_from_github(
    state: web::Data<AppState>,
    query: web::Query<ImportFilterQuery>,
) -> HttpResponse {
    let number_of_items = parse_int_or(query.number_of_items.as_deref(), 10).max(0) as usize;
    let filter = UserFilter {
        only_admins: parse_flag(query.only_admins.as_deref()),
        only_with_avatar: parse_flag(query.only_with_avatar.as_deref()),
        login_starts_with: non_blank(query.login_starts_with.as_deref()),
        id_greater_than: None,
    };

    log::info!("📥 POST /users/import-from-github numberOfItems={} {:?}", number_of_items, filter);

    match state.imports.import_users_from_github_by_filter(&filter, number_of_items).await {
        Ok(imported) => {
            metrics::add_imported_users(imported);
            HttpResponse::Ok()
                .content_type("text/plain; charset=utf-8")
                .body(format!("total of {} items imported successfully", imported))
        }
        Err(e) => {
            log::error!("❌ Import by filter failed: {}", e);
            unexpected_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::user_service::tests::InMemoryUserStore;
    use crate::services::UserSource;
    use crate::utils::AppError;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    struct FakeGitHub {
        calls: Mutex<Vec<(i64, i64)>>,
        pages: Mutex<Vec<Vec<User>>>,
        fail: bool,
    }

    impl FakeGitHub {
        fn with_pages(pages: Vec<Vec<User>>) -> Self {
            Self { calls: Mutex::new(Vec::new()), pages: Mutex::new(pages), fail: false }
        }
    }

    #[async_trait]
    impl UserSource for FakeGitHub {
        async fn list(&self, id_greater_than: i64, page_size: i64) -> Result<Vec<User>, AppError> {
            self.calls.lock().unwrap().push((id_greater_than, page_size));
            if self.fail {
                return Err(AppError::SourceUnavailable("connection refused to 10.0.0.1".to_string()));
            }
            let mut pages = self.pages.lock().unwrap();
            Ok(if pages.is_empty() { Vec::new() } else { pages.remove(0) })
        }
    }

    fn scenario_page() -> Vec<User> {
        vec![User::new("a", 1, None, true), User::new("b", 2, Some("x"), false)]
    }

    fn state(github: Arc<FakeGitHub>, store: Arc<InMemoryUserStore>) -> web::Data<AppState> {
        web::Data::new(AppState::new(github, store, Duration::ZERO))
    }

    async fn body_text(resp: actix_web::dev::ServiceResponse) -> String {
        let bytes = test::read_body(resp).await;
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[actix_web::test]
    async fn test_list_from_github_passes_values_through() {
        let github = Arc::new(FakeGitHub::with_pages(vec![scenario_page()]));
        let app = test::init_service(
            App::new()
                .app_data(state(github.clone(), Arc::new(InMemoryUserStore::default())))
                .configure(crate::api::configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/users/list-from-github?idGreaterThan=10&pageSize=20")
            .to_request();
        let users: Vec<User> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(users, scenario_page());
        assert_eq!(*github.calls.lock().unwrap(), vec![(10, 20)]);
    }

    #[actix_web::test]
    async fn test_list_from_github_missing_params_use_ceiling() {
        let github = Arc::new(FakeGitHub::with_pages(vec![]));
        let app = test::init_service(
            App::new()
                .app_data(state(github.clone(), Arc::new(InMemoryUserStore::default())))
                .configure(crate::api::configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/users/list-from-github").to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert_eq!(*github.calls.lock().unwrap(), vec![(0, 0)]);
    }

    #[actix_web::test]
    async fn test_list_filtered_only_admins() {
        let github = Arc::new(FakeGitHub::with_pages(vec![scenario_page()]));
        let app = test::init_service(
            App::new()
                .app_data(state(github.clone(), Arc::new(InMemoryUserStore::default())))
                .configure(crate::api::configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/users/list-from-github/filtered?onlyAdmins=true")
            .to_request();
        let users: Vec<User> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(users, vec![User::new("a", 1, None, true)]);
        assert_eq!(*github.calls.lock().unwrap(), vec![(0, 100)]);
    }

    #[actix_web::test]
    async fn test_import_page_with_garbage_params_uses_defaults() {
        let github = Arc::new(FakeGitHub::with_pages(vec![scenario_page()]));
        let store = Arc::new(InMemoryUserStore::default());
        let app = test::init_service(
            App::new()
                .app_data(state(github.clone(), store.clone()))
                .configure(crate::api::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/users/import-github-page?idGreaterThan=x&pageSize=y")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert_eq!(body_text(resp).await, "total of 2 items imported successfully");
        assert_eq!(*github.calls.lock().unwrap(), vec![(0, 10)]);
        assert_eq!(store.users.lock().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_import_page_without_users_reports_none_found() {
        let github = Arc::new(FakeGitHub::with_pages(vec![]));
        let app = test::init_service(
            App::new()
                .app_data(state(github, Arc::new(InMemoryUserStore::default())))
                .configure(crate::api::configure),
        )
        .await;

        let req = test::TestRequest::post().uri("/users/import-github-page").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(body_text(resp).await, "No items found");
    }

    #[actix_web::test]
    async fn test_import_failure_hides_details() {
        let mut fake = FakeGitHub::with_pages(vec![]);
        fake.fail = true;
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(fake), Arc::new(InMemoryUserStore::default())))
                .configure(crate::api::configure),
        )
        .await;

        let req = test::TestRequest::post().uri("/users/import-from-github").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_text(resp).await;
        assert!(body.contains(UNEXPECTED_ERROR_MESSAGE));
        assert!(!body.contains("10.0.0.1"));
    }

    #[actix_web::test]
    async fn test_import_from_github_applies_filter_flags() {
        let github = Arc::new(FakeGitHub::with_pages(vec![scenario_page()]));
        let store = Arc::new(InMemoryUserStore::default());
        let app = test::init_service(
            App::new()
                .app_data(state(github.clone(), store.clone()))
                .configure(crate::api::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/users/import-from-github?numberOfItems=abc&onlyAdmins=true&onlyWithAvatar=yes")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(body_text(resp).await, "total of 1 items imported successfully");
        assert_eq!(*store.users.lock().unwrap(), vec![User::new("a", 1, None, true)]);
        // First page, then the empty page that ends the run
        assert_eq!(*github.calls.lock().unwrap(), vec![(1, 100), (2, 100)]);
    }

    #[actix_web::test]
    async fn test_save_creates_then_updates() {
        let store = Arc::new(InMemoryUserStore::default());
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(FakeGitHub::with_pages(vec![])), store.clone()))
                .configure(crate::api::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/users/save")
            .set_json(serde_json::json!({ "login": "any_login", "githubId": 1, "avatar": "any", "isSiteAdmin": true }))
            .to_request();
        let created: Option<User> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created, Some(User::new("any_login", 1, Some("any"), true)));

        let req = test::TestRequest::post()
            .uri("/users/save")
            .set_json(serde_json::json!({ "login": "any_login", "githubId": 5, "avatar": null, "isSiteAdmin": false }))
            .to_request();
        let updated: Option<User> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated, Some(User::new("any_login", 1, None, false)));
    }
}
