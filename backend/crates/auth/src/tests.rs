//! Router-level tests for the auth crate

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use platform::token::TokenCodec;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::config::AuthConfig;
    use crate::infra::memory::InMemoryUserRepository;
    use crate::presentation::router::auth_router_generic;

    fn app() -> Router {
        auth_router_generic(
            InMemoryUserRepository::new(),
            Arc::new(TokenCodec::new("router-secret").unwrap()),
            AuthConfig::default(),
        )
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn register(app: &Router) -> String {
        let (status, body) = send(
            app,
            "POST",
            "/user",
            None,
            Some(json!({ "name": "Ann", "email": "ann@x.com", "password": "pass1234" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"]["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_register_hides_password() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/user",
            None,
            Some(json!({ "name": "Ann", "email": "ann@x.com", "password": "pass1234" })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        let user = &body["data"]["user"];
        assert_eq!(user["email"], "ann@x.com");
        assert!(user.get("password").is_none());
        assert!(user.get("passwordHash").is_none());
        assert!(body["data"]["token"].is_string());
    }

    #[tokio::test]
    async fn test_register_twice_conflicts() {
        let app = app();
        register(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/user",
            None,
            Some(json!({ "name": "Ann", "email": "ann@x.com", "password": "pass1234" })),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "This email is already registered");
    }

    #[tokio::test]
    async fn test_register_validation_details() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/user",
            None,
            Some(json!({ "email": "nope" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation failed");
        assert!(body["details"]["email"].is_array());
        assert!(body["details"]["password"].is_array());
    }

    #[tokio::test]
    async fn test_login_and_profile() {
        let app = app();
        register(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/userLogin",
            None,
            Some(json!({ "email": "ann@x.com", "password": "pass1234" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["data"]["token"].as_str().unwrap().to_string();

        let (status, body) = send(&app, "GET", "/user/profile", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Ann");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let app = app();
        register(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/userLogin",
            None,
            Some(json!({ "email": "ann@x.com", "password": "wrong-pass" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Incorrect password");
    }

    #[tokio::test]
    async fn test_login_with_overlong_password() {
        let app = app();
        register(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/userLogin",
            None,
            Some(json!({ "email": "ann@x.com", "password": "p".repeat(129) })),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Incorrect password" }));
    }

    #[tokio::test]
    async fn test_change_password_details_use_request_names() {
        let app = app();
        let token = register(&app).await;

        let (status, body) = send(
            &app,
            "PUT",
            "/user/password",
            Some(&token),
            Some(json!({ "currentPassword": "pass1234", "newPassword": "abc" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"]["newPassword"].is_array());
        assert!(body["details"].get("new_password").is_none());
    }

    #[tokio::test]
    async fn test_profile_requires_token() {
        let app = app();

        let (status, body) = send(&app, "GET", "/user/profile", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Token not provided");

        let (status, body) = send(&app, "GET", "/user/profile", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid token");
    }

    #[tokio::test]
    async fn test_update_profile_and_change_password() {
        let app = app();
        let token = register(&app).await;

        let (status, body) = send(
            &app,
            "PUT",
            "/user/profile",
            Some(&token),
            Some(json!({ "name": "Annie", "preferences": { "theme": "dark", "dateFormat": "DD/MM/YYYY" } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Annie");
        assert_eq!(body["data"]["preferences"]["theme"], "dark");
        assert_eq!(body["data"]["preferences"]["dateFormat"], "DD/MM/YYYY");

        let (status, _) = send(
            &app,
            "PUT",
            "/user/password",
            Some(&token),
            Some(json!({ "currentPassword": "pass1234", "newPassword": "newpass99" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            &app,
            "POST",
            "/userLogin",
            None,
            Some(json!({ "email": "ann@x.com", "password": "newpass99" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_delete_profile() {
        let app = app();
        let token = register(&app).await;

        let (status, body) = send(&app, "DELETE", "/user/profile", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"]["message"].is_string());

        let (status, _) = send(&app, "GET", "/user/profile", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

#[cfg(test)]
mod google_router_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use platform::token::TokenCodec;
    use tower::ServiceExt;

    use crate::application::config::{AuthConfig, GoogleConfig};
    use crate::domain::identity::{ExternalIdentity, IdentityProvider};
    use crate::error::AuthResult;
    use crate::infra::memory::InMemoryUserRepository;
    use crate::presentation::router::google_router_generic;

    struct StubProvider;

    impl IdentityProvider for StubProvider {
        fn authorization_url(&self) -> AuthResult<String> {
            Ok("https://accounts.example/consent?client_id=abc".into())
        }

        async fn exchange_code(&self, _code: &str) -> AuthResult<ExternalIdentity> {
            Ok(ExternalIdentity {
                subject: "sub-1".into(),
                email: "ann@x.com".into(),
                name: None,
                avatar: None,
                access_token: "access".into(),
                refresh_token: None,
            })
        }
    }

    fn app(tokens: Arc<TokenCodec>) -> Router {
        google_router_generic(
            InMemoryUserRepository::new(),
            StubProvider,
            tokens,
            AuthConfig::default(),
            GoogleConfig {
                client_id: "abc".into(),
                client_secret: "shh".into(),
                redirect_uri: "http://localhost:3000/api/auth/google/callback".into(),
                frontend_redirect_uri: "http://localhost:5173".into(),
            },
        )
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_redirects_to_consent_page() {
        let tokens = Arc::new(TokenCodec::new("secret").unwrap());
        let response = app(tokens).oneshot(get("/api/auth/google")).await.unwrap();

        assert!(response.status().is_redirection());
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://accounts.example/consent?client_id=abc"
        );
    }

    #[tokio::test]
    async fn test_callback_redirects_with_token() {
        let tokens = Arc::new(TokenCodec::new("secret").unwrap());
        let response = app(tokens.clone())
            .oneshot(get("/api/auth/google/callback?code=xyz"))
            .await
            .unwrap();

        assert!(response.status().is_redirection());
        let location = response.headers()[header::LOCATION].to_str().unwrap();
        let token = location
            .strip_prefix("http://localhost:5173/auth/callback?token=")
            .unwrap();
        let claims = tokens.verify(token).unwrap();
        assert_eq!(claims.email, "ann@x.com");
    }

    #[tokio::test]
    async fn test_callback_without_code() {
        let tokens = Arc::new(TokenCodec::new("secret").unwrap());
        let response = app(tokens)
            .oneshot(get("/api/auth/google/callback"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
