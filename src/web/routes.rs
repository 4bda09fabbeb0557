// src/web/routes.rs
use crate::{
    state::AppState,
    web::{registro_handlers, sala_handlers, usuario_handlers},
};
use axum::{
    response::Redirect,
    routing::{get, post},
    Router,
};

pub fn create_router(app_state: AppState) -> Router {
    // --- Usuários (alunos e professores) ---
    let usuario_routes = Router::new()
        .route(
            "/alunos",
            get(usuario_handlers::show_aluno_form).post(usuario_handlers::handle_create_aluno),
        )
        .route(
            "/professores",
            get(usuario_handlers::show_professor_form)
                .post(usuario_handlers::handle_create_professor),
        )
        .route("/usuarios", get(usuario_handlers::show_usuarios_page))
        .route("/usuarios/{id}/apagar", post(usuario_handlers::handle_delete_usuario));

    // --- Salas ---
    let sala_routes = Router::new()
        .route(
            "/salas",
            get(sala_handlers::show_salas_page).post(sala_handlers::handle_create_sala),
        )
        .route("/salas/{id}/apagar", post(sala_handlers::handle_delete_sala));

    // --- Registros de uso ---
    let registro_routes = Router::new()
        .route(
            "/registros",
            get(registro_handlers::show_registros_page)
                .post(registro_handlers::handle_create_registro),
        )
        .route("/registros/novo", get(registro_handlers::show_registro_form))
        .route("/api/registros", get(registro_handlers::api_list_registros));

    Router::new()
        .route("/", get(|| async { Redirect::to("/registros") }))
        .merge(usuario_routes)
        .merge(sala_routes)
        .merge(registro_routes)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn test_app() -> (Router, sqlx::SqlitePool) {
        let pool = test_pool().await;
        let state = AppState {
            db_pool: pool.clone(),
            bcrypt_cost: 4,
        };
        (create_router(state), pool)
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn location(response: &axum::response::Response) -> String {
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    async fn body_to_string(body: Body) -> String {
        let bytes = body.collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn root_redirects_to_registros() {
        let (app, _) = test_app().await;
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/registros");
    }

    #[tokio::test]
    async fn creating_a_sala_redirects_with_success() {
        let (app, pool) = test_app().await;
        let response = app
            .clone()
            .oneshot(post_form("/salas", "nome_sala=Lab+1&capacidade=30"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(location(&response).starts_with("/salas?success="));

        let response = app
            .oneshot(Request::get("/salas").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_to_string(response.into_body()).await.contains("Lab 1"));

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sala")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn invalid_capacity_redirects_with_error() {
        let (app, _) = test_app().await;
        let response = app
            .oneshot(post_form("/salas", "nome_sala=Lab&capacidade=muitos"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(location(&response).starts_with("/salas?error="));
    }

    #[tokio::test]
    async fn duplicate_email_across_tipos_is_reported() {
        let (app, _) = test_app().await;
        let response = app
            .clone()
            .oneshot(post_form(
                "/alunos",
                "nome=Ana&email=ana%40uni.br&senha=x&matricula=2024001",
            ))
            .await
            .unwrap();
        assert!(location(&response).starts_with("/alunos?success="));

        let response = app
            .oneshot(post_form(
                "/professores",
                "nome=Ana&email=ana%40uni.br&senha=x&disciplina=Artes",
            ))
            .await
            .unwrap();
        assert!(location(&response).starts_with("/professores?error="));
    }

    #[tokio::test]
    async fn registro_flow_lists_and_serves_json() {
        let (app, _) = test_app().await;
        for request in [
            post_form("/alunos", "nome=Ana&email=a%40uni.br&senha=x&matricula=1"),
            post_form("/salas", "nome_sala=Lab&capacidade=10"),
            post_form("/registros", "id_usuario=1&id_sala=1&data=2025-04-01"),
        ] {
            let response = app.clone().oneshot(request).await.unwrap();
            assert!(location(&response).contains("?success="), "{}", location(&response));
        }

        let response = app
            .clone()
            .oneshot(Request::get("/registros?data=2025-04-01").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_to_string(response.into_body()).await;
        assert!(html.contains("1 - Ana (aluno)"));
        assert!(html.contains("1 - Lab"));

        let response = app
            .oneshot(
                Request::get("/api/registros?data=2025-04-01")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value =
            serde_json::from_str(&body_to_string(response.into_body()).await).unwrap();
        assert_eq!(json[0]["data"], "2025-04-01");
        assert_eq!(json[0]["sala"], "1 - Lab");
    }

    #[tokio::test]
    async fn registro_for_missing_sala_is_reported() {
        let (app, _) = test_app().await;
        app.clone()
            .oneshot(post_form("/alunos", "nome=Ana&email=a%40uni.br&senha=x&matricula=1"))
            .await
            .unwrap();
        let response = app
            .oneshot(post_form("/registros", "id_usuario=1&id_sala=9&data="))
            .await
            .unwrap();
        assert!(location(&response).starts_with("/registros/novo?error="));
    }

    #[tokio::test]
    async fn invalid_date_filter() {
        let (app, _) = test_app().await;
        let response = app
            .clone()
            .oneshot(Request::get("/registros?data=01-02-2025").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_to_string(response.into_body()).await.contains("Data inválida"));

        let response = app
            .oneshot(Request::get("/api/registros?data=ontem").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        let json: serde_json::Value =
            serde_json::from_str(&body_to_string(response.into_body()).await).unwrap();
        assert_eq!(json["status"], 400);
        assert!(json["erro"].as_str().unwrap().contains("Data inválida"));
    }

    #[tokio::test]
    async fn missing_form_fields_redirect_with_error() {
        let (app, pool) = test_app().await;
        for (uri, body) in [
            ("/salas", "nome_sala=Lab"),
            ("/alunos", "nome=Ana&email=a%40uni.br"),
            ("/professores", "disciplina=IA"),
        ] {
            let response = app.clone().oneshot(post_form(uri, body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", uri);
            let destino = location(&response);
            assert!(destino.starts_with(&format!("{}?error=", uri)), "{}", destino);
            assert!(destino.contains(urlencoding::encode("Preencha todos os campos").as_ref()));
        }

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sala")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn deleting_usuario_through_the_form() {
        let (app, _) = test_app().await;
        app.clone()
            .oneshot(post_form("/professores", "nome=Rui&email=r%40uni.br&senha=x&disciplina=IA"))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(post_form("/usuarios/1/apagar", ""))
            .await
            .unwrap();
        assert!(location(&response).starts_with("/usuarios?success="));

        let response = app
            .oneshot(post_form("/usuarios/1/apagar", ""))
            .await
            .unwrap();
        assert!(location(&response).starts_with("/usuarios?error="));
    }
}
