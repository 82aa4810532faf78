//! End-to-end tests for the `/api` surface, driven through the full router
//! against the in-memory store.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};

use common::{article, body_json, project, service, team_member, testimonial, TestApp};

mod csrf_tests {
    use super::*;

    #[tokio::test]
    async fn test_issuer_returns_verifiable_token() {
        let app = TestApp::new();
        let resp = app.get("/api/csrf-token").await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        let token = body["token"].as_str().unwrap();
        assert!(!token.is_empty());
        assert!(app.state.csrf.verify(token).is_ok());
    }

    #[tokio::test]
    async fn test_mutation_without_token_is_forbidden() {
        let app = TestApp::new();
        let req = Request::post("/api/contact")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let resp = app.send(req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_json(resp).await,
            json!({ "error": "Forbidden", "message": "CSRF token missing" })
        );
        assert!(app.store.inquiries().await.is_empty());
    }

    #[tokio::test]
    async fn test_mutation_with_forged_token_is_forbidden() {
        let app = TestApp::new();
        let req = Request::post("/api/auth/logout")
            .header("x-csrf-token", "abc:123:def")
            .body(Body::empty())
            .unwrap();
        let resp = app.send(req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_json(resp).await["message"],
            "Invalid or expired CSRF token"
        );
    }
}

mod services_tests {
    use super::*;

    #[tokio::test]
    async fn test_lists_only_active_services_in_order() {
        let app = TestApp::new();
        app.store
            .insert_service(service("Renovatie", "renovatie", "renovation", 2, true))
            .await;
        app.store
            .insert_service(service("Gesloten", "gesloten", "closed", 0, false))
            .await;
        app.store
            .insert_service(service("Nieuwbouw", "nieuwbouw", "new-build", 1, true))
            .await;

        let resp = app.get("/api/services").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r["isActive"] == true));
        assert_eq!(rows[0]["slugNl"], "nieuwbouw");
        assert_eq!(rows[1]["slugNl"], "renovatie");
    }

    #[tokio::test]
    async fn test_store_failure_hides_error_text() {
        let app = TestApp::new();
        app.store.set_failing(true);

        let resp = app.get("/api/services").await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body, json!({ "message": "Failed to fetch services" }));
        assert!(!body.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_service_by_either_slug() {
        let app = TestApp::new();
        app.store
            .insert_service(service("Renovatie", "renovatie", "renovation", 0, true))
            .await;
        app.store
            .insert_service(service("Oud", "oud", "old", 0, false))
            .await;

        for slug in ["renovatie", "renovation"] {
            let resp = app.get(&format!("/api/services/{slug}")).await;
            assert_eq!(resp.status(), StatusCode::OK);
            assert_eq!(body_json(resp).await["titleNl"], "Renovatie");
        }

        let resp = app.get("/api/services/old").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["message"], "Service not found");
    }
}

mod content_tests {
    use super::*;

    #[tokio::test]
    async fn test_statistics_not_implemented() {
        let app = TestApp::new();
        let resp = app.get("/api/maatschappelijke-statistics").await;
        assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(
            body_json(resp).await,
            json!({ "message": "Not implemented yet" })
        );
    }

    #[tokio::test]
    async fn test_projects_list_active_newest_first() {
        let app = TestApp::new();
        let old = project("Kantoor Zuidas", true, 30);
        let new = project("Woningen Noord", true, 1);
        let hidden = project("Concept", false, 0);
        let hidden_id = hidden.id;
        let new_id = new.id;
        for p in [old, new, hidden] {
            app.store.insert_project(p).await;
        }

        let body = body_json(app.get("/api/projects").await).await;
        let titles: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["titleNl"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Woningen Noord", "Kantoor Zuidas"]);

        let resp = app.get(&format!("/api/projects/{new_id}")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["categoryEn"], "residential");

        let resp = app.get(&format!("/api/projects/{hidden_id}")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_team_members_ordered_and_contact_details_hidden() {
        let app = TestApp::new();
        app.store.insert_team_member(team_member("Sanne", 2, true)).await;
        app.store.insert_team_member(team_member("Pieter", 1, false)).await;

        let resp = app.get("/api/team-members").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        let members = body.as_array().unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0]["nameNl"], "Pieter");
        assert!(members[0]["email"].is_null());
        assert_eq!(members[1]["email"], "sanne@example.nl");
        assert_eq!(members[1]["order"], 2);
    }

    #[tokio::test]
    async fn test_blog_categories_and_tags() {
        let app = TestApp::new();
        let mut a = article("a", true, 0);
        a.category_nl = Some("Techniek".into());
        a.tags_nl = vec!["fundering".into(), "".into()];
        a.tags_en = vec!["foundation".into()];
        let mut b = article("b", true, 1);
        b.category_nl = Some("Techniek".into());
        b.tags_nl = vec!["fundering".into()];
        let mut c = article("c", true, 2);
        c.category_nl = Some("Duurzaam".into());
        let mut draft = article("draft", false, 0);
        draft.category_nl = Some("Concept".into());
        draft.tags_nl = vec!["geheim".into()];
        for x in [a, b, c, draft, article("d", true, 3)] {
            app.store.insert_article(x).await;
        }

        let body = body_json(app.get("/api/blog/categories").await).await;
        assert_eq!(
            body,
            json!({
                "categories": [
                    { "category": "Techniek", "count": 2 },
                    { "category": "Duurzaam", "count": 1 },
                ],
                "success": true
            })
        );

        let body = body_json(app.get("/api/blog/tags").await).await;
        assert_eq!(
            body,
            json!({ "tags": ["foundation", "fundering"], "success": true })
        );
    }

    #[tokio::test]
    async fn test_popular_articles_by_views() {
        let app = TestApp::new();
        for (slug, views) in [("rustig", 1), ("populair", 40), ("middel", 12)] {
            let mut a = article(slug, true, 0);
            a.view_count = views;
            app.store.insert_article(a).await;
        }
        let mut draft = article("concept", false, 0);
        draft.view_count = 999;
        app.store.insert_article(draft).await;

        let body = body_json(app.get("/api/blog/popular?limit=2").await).await;
        assert_eq!(body["success"], true);
        let slugs: Vec<_> = body["articles"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["slugNl"].as_str().unwrap())
            .collect();
        assert_eq!(slugs, vec!["populair", "middel"]);

        let body = body_json(app.get("/api/blog/popular").await).await;
        assert_eq!(body["articles"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_testimonials_only_active_in_order() {
        let app = TestApp::new();
        app.store.insert_testimonial(testimonial("Familie de Jong", 2, true)).await;
        app.store.insert_testimonial(testimonial("Café Noord", 1, true)).await;
        app.store.insert_testimonial(testimonial("Verborgen BV", 0, false)).await;

        let resp = app.get("/api/testimonials").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        let names: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["customerName"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Café Noord", "Familie de Jong"]);
    }

    #[tokio::test]
    async fn test_malformed_project_id_is_not_found() {
        let app = TestApp::new();
        let resp = app.get("/api/projects/not-a-uuid").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["message"], "Project not found");
    }

    #[tokio::test]
    async fn test_blog_pagination_and_cache_header() {
        let app = TestApp::new();
        for (i, slug) in ["a", "b", "c"].iter().enumerate() {
            app.store.insert_article(article(slug, true, i as i64)).await;
        }
        app.store.insert_article(article("draft", false, 0)).await;

        let resp = app.get("/api/blog?page=2&limit=2").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()["cache-control"],
            "public, s-maxage=120, stale-while-revalidate=240"
        );
        let body = body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(
            body["pagination"],
            json!({ "page": 2, "limit": 2, "total": 3, "totalPages": 2 })
        );
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["slugNl"], "c");
    }

    #[tokio::test]
    async fn test_blog_bad_limit_keeps_requested_page() {
        let app = TestApp::new();
        for i in 0..15 {
            app.store
                .insert_article(article(&format!("artikel-{i}"), true, i))
                .await;
        }

        let body = body_json(app.get("/api/blog?page=2&limit=abc").await).await;
        assert_eq!(
            body["pagination"],
            json!({ "page": 2, "limit": 10, "total": 15, "totalPages": 2 })
        );
        assert_eq!(body["data"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_blog_article_counts_views() {
        let app = TestApp::new();
        app.store.insert_article(article("duurzaam", true, 0)).await;

        let resp = app.get("/api/blog/duurzaam-en").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["article"]["viewCount"], 1);

        app.get("/api/blog/duurzaam").await;
        assert_eq!(app.store.articles().await[0].view_count, 2);

        let resp = app.get("/api/blog/bestaat-niet").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["message"], "Article not found");
    }

    #[tokio::test]
    async fn test_contact_submission_stored() {
        let app = TestApp::new();
        let req = app.json_request(
            "POST",
            "/api/contact",
            &json!({
                "firstName": "Jan",
                "lastName": "Jansen",
                "email": "jan@example.nl",
                "message": "Wij willen een aanbouw.",
                "projectType": "renovation"
            }),
        );
        let resp = app.send(req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(
            body["message"],
            "Thank you for your message! We will contact you soon."
        );

        let stored = app.store.inquiries().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(body["data"]["id"], stored[0].id.to_string());
        assert_eq!(stored[0].project_type.as_deref(), Some("renovation"));
    }

    #[tokio::test]
    async fn test_contact_validation() {
        let app = TestApp::new();

        let resp = app
            .send(app.json_request("POST", "/api/contact", &json!({ "firstName": "Jan" })))
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["message"], "Missing required fields");

        let resp = app
            .send(app.json_request(
                "POST",
                "/api/contact",
                &json!({
                    "firstName": "Jan",
                    "lastName": "Jansen",
                    "email": "geen-email",
                    "message": "Hallo"
                }),
            ))
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["message"], "Invalid email address");
    }

    #[tokio::test]
    async fn test_contact_rate_limited() {
        let app = TestApp::new();
        let body = json!({ "firstName": "Jan" });
        for _ in 0..5 {
            let resp = app.send(app.json_request("POST", "/api/contact", &body)).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }

        let resp = app.send(app.json_request("POST", "/api/contact", &body)).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(resp.headers().contains_key("retry-after"));
        assert!(resp.headers().contains_key("x-ratelimit-reset"));
        let body = body_json(resp).await;
        assert_eq!(body["error"], "Too many requests");
        let retry = body["retryAfter"].as_u64().unwrap();
        assert!(retry > 0 && retry <= 3600);
        assert_eq!(
            body["message"],
            format!("Rate limit exceeded. Try again in {retry} seconds.")
        );
    }

    #[tokio::test]
    async fn test_unknown_api_path_is_json_404() {
        let app = TestApp::new();
        let resp = app.get("/api/does-not-exist").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["message"], "Not found");
    }
}

mod auth_tests {
    use super::*;

    #[tokio::test]
    async fn test_login_session_logout() {
        let app = TestApp::new();
        app.seed_user("beheer@bouwmeesters.nl", "bouwen123", "admin")
            .await;

        let resp = app
            .send(app.json_request(
                "POST",
                "/api/auth/login",
                &json!({ "email": "Beheer@BouwMeesters.nl", "password": "bouwen123" }),
            ))
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let set_cookie = resp.headers()["set-cookie"].to_str().unwrap().to_string();
        assert!(set_cookie.starts_with("admin_session="));
        assert!(set_cookie.contains("HttpOnly"));
        let body = body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["user"]["email"], "beheer@bouwmeesters.nl");
        assert!(body["user"].get("passwordHash").is_none());

        let cookie = set_cookie.split(';').next().unwrap();
        let resp = app.get_with_cookie("/api/auth/session", cookie).await;
        let body = body_json(resp).await;
        assert_eq!(body["authenticated"], true);
        assert_eq!(body["user"]["role"], "admin");

        let resp = app
            .send(app.json_request("POST", "/api/auth/logout", &json!({})))
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers()["set-cookie"]
            .to_str()
            .unwrap()
            .contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_session_without_cookie() {
        let app = TestApp::new();
        let resp = app.get("/api/auth/session").await;
        assert_eq!(body_json(resp).await, json!({ "authenticated": false }));
    }

    #[tokio::test]
    async fn test_login_rejections() {
        let app = TestApp::new();
        let user = app
            .seed_user("beheer@bouwmeesters.nl", "bouwen123", "admin")
            .await;

        let resp = app
            .send(app.json_request("POST", "/api/auth/login", &json!({ "email": "x@y.nl" })))
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp).await["message"],
            "Email and password are required"
        );

        let resp = app
            .send(app.json_request(
                "POST",
                "/api/auth/login",
                &json!({ "email": "beheer@bouwmeesters.nl", "password": "fout" }),
            ))
            .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(resp).await["message"], "Invalid email or password");

        let resp = app
            .send(app.json_request(
                "POST",
                "/api/auth/login",
                &json!({ "email": "onbekend@bouwmeesters.nl", "password": "bouwen123" }),
            ))
            .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        app.store.set_user_active(user.id, false).await;
        let resp = app
            .send(app.json_request(
                "POST",
                "/api/auth/login",
                &json!({ "email": "beheer@bouwmeesters.nl", "password": "bouwen123" }),
            ))
            .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(resp).await["message"], "Account is deactivated");

        let resp = app
            .send(app.json_request(
                "POST",
                "/api/auth/login",
                &json!({ "email": "beheer@bouwmeesters.nl", "password": "fout" }),
            ))
            .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        // Five attempts used up the login window.
        let resp = app
            .send(app.json_request(
                "POST",
                "/api/auth/login",
                &json!({ "email": "beheer@bouwmeesters.nl", "password": "bouwen123" }),
            ))
            .await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_session_for_deactivated_user_is_anonymous() {
        let app = TestApp::new();
        let user = app
            .seed_user_without_password("oud@bouwmeesters.nl", "admin")
            .await;
        let cookie = app.session_cookie(&user);
        app.store.set_user_active(user.id, false).await;

        let resp = app.get_with_cookie("/api/auth/session", &cookie).await;
        assert_eq!(body_json(resp).await["authenticated"], false);
    }
}

mod admin_tests {
    use super::*;

    #[tokio::test]
    async fn test_requires_session() {
        let app = TestApp::new();
        let resp = app.get("/api/admin/services").await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(resp).await, json!({ "message": "Unauthorized" }));
    }

    #[tokio::test]
    async fn test_requires_admin_role() {
        let app = TestApp::new();
        let editor = app
            .seed_user_without_password("redactie@bouwmeesters.nl", "editor")
            .await;
        let resp = app
            .get_with_cookie("/api/admin/inquiries", &app.session_cookie(&editor))
            .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_json(resp).await["message"],
            "Forbidden - Admin access required"
        );
    }

    #[tokio::test]
    async fn test_service_crud() {
        let app = TestApp::new();
        let admin = app
            .seed_user_without_password("beheer@bouwmeesters.nl", "admin")
            .await;
        let cookie = app.session_cookie(&admin);
        app.store
            .insert_service(service("Verborgen", "verborgen", "hidden", 5, false))
            .await;

        let mut req = app.json_request(
            "POST",
            "/api/admin/services",
            &json!({
                "titleNl": "Verduurzaming",
                "titleEn": "Sustainability",
                "descriptionNl": "Isolatie en warmtepompen.",
                "descriptionEn": "Insulation and heat pumps.",
                "slugNl": "verduurzaming",
                "slugEn": "sustainability",
                "order": 1
            }),
        );
        req.headers_mut().insert("cookie", cookie.parse().unwrap());
        let resp = app.send(req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created = body_json(resp).await;
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["isActive"], true);

        let resp = app.get_with_cookie("/api/admin/services", &cookie).await;
        let all = body_json(resp).await;
        assert_eq!(all.as_array().unwrap().len(), 2);

        let mut req = app.json_request(
            "PUT",
            &format!("/api/admin/services/{id}"),
            &json!({ "titleEn": "Sustainable building", "isActive": false }),
        );
        req.headers_mut().insert("cookie", cookie.parse().unwrap());
        let resp = app.send(req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let updated = body_json(resp).await;
        assert_eq!(updated["titleEn"], "Sustainable building");
        assert_eq!(updated["titleNl"], "Verduurzaming");
        assert_eq!(updated["isActive"], false);

        let resp = app.get("/api/services").await;
        assert!(body_json(resp).await.as_array().unwrap().is_empty());

        let mut req = app.json_request("DELETE", &format!("/api/admin/services/{id}"), &json!({}));
        req.headers_mut().insert("cookie", cookie.parse().unwrap());
        let resp = app.send(req).await;
        assert_eq!(body_json(resp).await, json!({ "success": true }));

        let mut req = app.json_request("DELETE", &format!("/api/admin/services/{id}"), &json!({}));
        req.headers_mut().insert("cookie", cookie.parse().unwrap());
        let resp = app.send(req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_validates_body() {
        let app = TestApp::new();
        let admin = app
            .seed_user_without_password("beheer@bouwmeesters.nl", "admin")
            .await;
        let mut req = app.json_request(
            "POST",
            "/api/admin/services",
            &json!({
                "titleNl": "X",
                "titleEn": "X",
                "descriptionNl": "x",
                "descriptionEn": "x",
                "slugNl": "Met Spaties"
            }),
        );
        req.headers_mut()
            .insert("cookie", app.session_cookie(&admin).parse().unwrap());
        let resp = app.send(req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_admin_mutation_needs_csrf_even_with_session() {
        let app = TestApp::new();
        let admin = app
            .seed_user_without_password("beheer@bouwmeesters.nl", "admin")
            .await;
        let req = Request::post("/api/admin/services")
            .header("content-type", "application/json")
            .header("cookie", app.session_cookie(&admin))
            .body(Body::from("{}"))
            .unwrap();
        let resp = app.send(req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(resp).await["message"], "CSRF token missing");
    }

    #[tokio::test]
    async fn test_inquiries_listed_newest_first() {
        let app = TestApp::new();
        for name in ["Eerste", "Tweede"] {
            let resp = app
                .send(app.json_request(
                    "POST",
                    "/api/contact",
                    &json!({
                        "firstName": name,
                        "lastName": "Klant",
                        "email": "klant@example.nl",
                        "message": "Offerte graag"
                    }),
                ))
                .await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let admin = app
            .seed_user_without_password("beheer@bouwmeesters.nl", "admin")
            .await;
        let resp = app
            .get_with_cookie("/api/admin/inquiries", &app.session_cookie(&admin))
            .await;
        let body = body_json(resp).await;
        assert_eq!(body["success"], true);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["status"], "new");
    }

    fn authed(
        app: &TestApp,
        cookie: &str,
        method: &str,
        uri: &str,
        body: &Value,
    ) -> Request<Body> {
        let mut req = app.json_request(method, uri, body);
        req.headers_mut().insert("cookie", cookie.parse().unwrap());
        req
    }

    #[tokio::test]
    async fn test_content_admin_routes_require_session() {
        let app = TestApp::new();
        for uri in ["/api/admin/projects", "/api/admin/team", "/api/admin/blog"] {
            let resp = app.get(uri).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_project_crud() {
        let app = TestApp::new();
        let admin = app
            .seed_user_without_password("beheer@bouwmeesters.nl", "admin")
            .await;
        let cookie = app.session_cookie(&admin);

        let resp = app
            .send(authed(
                &app,
                &cookie,
                "POST",
                "/api/admin/projects",
                &json!({
                    "titleNl": "Kademuur Herengracht",
                    "titleEn": "Herengracht quay wall",
                    "descriptionNl": "Herstel van de kademuur.",
                    "descriptionEn": "Quay wall restoration.",
                    "categoryNl": "infrastructuur",
                    "categoryEn": "infrastructure",
                    "gallery": "kade-1.jpg, kade-2.jpg",
                    "status": "in-progress"
                }),
            ))
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created = body_json(resp).await;
        assert_eq!(created["success"], true);
        let id = created["data"]["id"].as_str().unwrap().to_string();
        assert_eq!(created["data"]["featuredImage"], "kade-1.jpg");
        assert_eq!(created["data"]["gallery"][1]["alt"], "Gallery image 2");

        let resp = app
            .send(authed(
                &app,
                &cookie,
                "PUT",
                &format!("/api/admin/projects/{id}"),
                &json!({ "status": "completed", "isActive": false }),
            ))
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let updated = body_json(resp).await;
        assert_eq!(updated["data"]["status"], "completed");
        assert_eq!(updated["data"]["titleNl"], "Kademuur Herengracht");

        // Inactive projects stay visible to admins only.
        assert!(body_json(app.get("/api/projects").await)
            .await
            .as_array()
            .unwrap()
            .is_empty());
        let all = body_json(app.get_with_cookie("/api/admin/projects", &cookie).await).await;
        assert_eq!(all["data"].as_array().unwrap().len(), 1);

        let resp = app
            .send(authed(
                &app,
                &cookie,
                "PUT",
                &format!("/api/admin/projects/{id}"),
                &json!({ "status": "gesloopt" }),
            ))
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = app
            .send(authed(&app, &cookie, "DELETE", &format!("/api/admin/projects/{id}"), &json!({})))
            .await;
        assert_eq!(body_json(resp).await, json!({ "success": true }));

        let resp = app
            .send(authed(&app, &cookie, "DELETE", &format!("/api/admin/projects/{id}"), &json!({})))
            .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["message"], "Project not found");
    }

    #[tokio::test]
    async fn test_team_crud() {
        let app = TestApp::new();
        let admin = app
            .seed_user_without_password("beheer@bouwmeesters.nl", "admin")
            .await;
        let cookie = app.session_cookie(&admin);
        app.store.insert_team_member(team_member("Pieter", 1, false)).await;

        let resp = app
            .send(authed(
                &app,
                &cookie,
                "POST",
                "/api/admin/team",
                &json!({
                    "nameNl": "Fatima el Amrani",
                    "nameEn": "Fatima el Amrani",
                    "titleNl": "Werkvoorbereider",
                    "titleEn": "Work planner",
                    "email": "fatima@bouwmeesters.nl",
                    "order": 0
                }),
            ))
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created = body_json(resp).await;
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["showContactInfo"], false);

        // Admins see contact details the public listing hides.
        let all = body_json(app.get_with_cookie("/api/admin/team", &cookie).await).await;
        let all = all.as_array().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0]["nameNl"], "Fatima el Amrani");
        assert_eq!(all[0]["email"], "fatima@bouwmeesters.nl");

        let resp = app
            .send(authed(
                &app,
                &cookie,
                "PUT",
                &format!("/api/admin/team/{id}"),
                &json!({ "titleEn": "Site planner", "nameNl": "" }),
            ))
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = app
            .send(authed(
                &app,
                &cookie,
                "PUT",
                &format!("/api/admin/team/{id}"),
                &json!({ "titleEn": "Site planner", "showContactInfo": true }),
            ))
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["titleEn"], "Site planner");

        let public = body_json(app.get("/api/team-members").await).await;
        assert_eq!(public[0]["email"], "fatima@bouwmeesters.nl");

        let resp = app
            .send(authed(&app, &cookie, "DELETE", &format!("/api/admin/team/{id}"), &json!({})))
            .await;
        assert_eq!(body_json(resp).await, json!({ "success": true }));

        let resp = app
            .send(authed(&app, &cookie, "PUT", "/api/admin/team/geen-uuid", &json!({})))
            .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_blog_crud() {
        let app = TestApp::new();
        let admin = app
            .seed_user_without_password("beheer@bouwmeesters.nl", "admin")
            .await;
        let cookie = app.session_cookie(&admin);
        let draft = json!({
            "titleNl": "Funderingsherstel in Amsterdam",
            "titleEn": "Foundation repair in Amsterdam",
            "contentNl": "Houten palen...",
            "contentEn": "Wooden piles...",
            "slugNl": "funderingsherstel",
            "slugEn": "foundation-repair",
            "tagsNl": ["fundering"],
            "categoryNl": "Techniek"
        });

        let resp = app
            .send(authed(&app, &cookie, "POST", "/api/admin/blog", &draft))
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created = body_json(resp).await;
        let id = created["data"]["id"].as_str().unwrap().to_string();
        assert_eq!(created["data"]["isPublished"], false);

        let resp = app
            .send(authed(&app, &cookie, "POST", "/api/admin/blog", &draft))
            .await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(resp).await,
            json!({ "message": "Failed to create blog article" })
        );

        // Drafts are admin-only.
        assert_eq!(
            app.get("/api/blog/funderingsherstel").await.status(),
            StatusCode::NOT_FOUND
        );
        let resp = app
            .get_with_cookie(&format!("/api/admin/blog/{id}"), &cookie)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["article"]["slugEn"], "foundation-repair");

        let resp = app
            .send(authed(
                &app,
                &cookie,
                "PUT",
                &format!("/api/admin/blog/{id}"),
                &json!({ "isPublished": true, "publishedAt": "2024-05-01T09:00:00Z" }),
            ))
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["data"]["isPublished"], true);
        assert_eq!(
            app.get("/api/blog/funderingsherstel").await.status(),
            StatusCode::OK
        );

        let listed = body_json(app.get_with_cookie("/api/admin/blog", &cookie).await).await;
        assert_eq!(listed["data"].as_array().unwrap().len(), 1);

        let resp = app
            .send(authed(&app, &cookie, "DELETE", &format!("/api/admin/blog/{id}"), &json!({})))
            .await;
        assert_eq!(
            body_json(resp).await,
            json!({ "success": true, "message": "Deleted successfully" })
        );
        let resp = app
            .get_with_cookie(&format!("/api/admin/blog/{id}"), &cookie)
            .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["message"], "Article not found");
    }
}
