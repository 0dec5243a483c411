//! HTTP tests for the stats endpoint
//!
//! These tests validate the `/api/stats` contract end-to-end against a
//! scripted upstream: the endpoint is always 200 with a well-formed body,
//! and the dashboard headers are present on every response.

#[cfg(test)]
mod http_integration_tests {
    use std::sync::Arc;

    use actix_web::{test, web, App};
    use serde_json::Value;

    use crate::handlers::{api_headers, configure_stats_routes};
    use crate::services::testing::MockRepoHost;
    use crate::services::StatsService;

    const REPOSITORIES: [&str; 3] = ["web-server", "k8s-ci-cd-demo", "terraform-aws-secure-vpc"];

    fn stats_service(host: MockRepoHost) -> web::Data<StatsService> {
        web::Data::new(StatsService::new(
            Arc::new(host),
            "shayczech",
            REPOSITORIES.iter().map(|r| r.to_string()).collect(),
        ))
    }

    fn failing_host() -> MockRepoHost {
        REPOSITORIES
            .iter()
            .fold(MockRepoHost::new(), |host, repo| host.with_failure(repo))
    }

    #[actix_rt::test]
    async fn http_stats_returns_zeroed_record_when_every_upstream_call_fails() {
        let app = test::init_service(
            App::new()
                .app_data(stats_service(failing_host()))
                .wrap(api_headers())
                .configure(|cfg| {
                    cfg.service(web::scope("/api").configure(configure_stats_routes));
                }),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/stats").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.status().as_u16(),
            200,
            "upstream failures must not leak into the status"
        );

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["terraformModules"], 0);
        assert_eq!(body["ansiblePlaybooks"], 0);
        assert_eq!(body["iacResources"], 0);
        assert_eq!(body["githubCommits"], 0);
        assert_eq!(body["ciCdRuns"], 105);
        assert_eq!(body["securityScore"], 94);
    }

    #[actix_rt::test]
    async fn http_stats_aggregates_scripted_upstream_data() {
        let host = MockRepoHost::new()
            .with_commit_page("web-server", Some(42), 1)
            .with_blobs(
                "web-server",
                &[
                    "ansible/setup.yml",
                    "main.tf",
                    ".github/workflows/ci.yml",
                    "charts/playbook-foo.yaml",
                ],
            )
            .with_commit_page("k8s-ci-cd-demo", None, 1)
            .with_blobs("k8s-ci-cd-demo", &["deploy/app.yaml", "README.md"])
            .with_failure("terraform-aws-secure-vpc");

        let app = test::init_service(
            App::new()
                .app_data(stats_service(host))
                .wrap(api_headers())
                .configure(|cfg| {
                    cfg.service(web::scope("/api").configure(configure_stats_routes));
                }),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/stats").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);

        let body: Value = test::read_body_json(resp).await;
        // 42 from the pagination link + 1 counted entry + 0 from the failure
        assert_eq!(body["githubCommits"], 43);
        // only main.tf matches the suffix
        assert_eq!(body["terraformModules"], 1);
        // the workflow file is excluded; deploy/app.yaml matches no rule
        assert_eq!(body["ansiblePlaybooks"], 2);
        assert_eq!(body["iacResources"], 3);
        assert_eq!(body["ciCdRuns"], 105);
        assert_eq!(body["securityScore"], 94);
    }

    #[actix_rt::test]
    async fn http_stats_sets_cors_and_cache_headers() {
        let app = test::init_service(
            App::new()
                .app_data(stats_service(failing_host()))
                .wrap(api_headers())
                .configure(|cfg| {
                    cfg.service(web::scope("/api").configure(configure_stats_routes));
                }),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/stats").to_request();
        let resp = test::call_service(&app, req).await;

        let headers = resp.headers();
        assert_eq!(headers.get("Access-Control-Allow-Origin").unwrap(), "*");
        assert_eq!(headers.get("Access-Control-Allow-Methods").unwrap(), "GET");
        assert_eq!(
            headers.get("Access-Control-Allow-Headers").unwrap(),
            "Content-Type"
        );
        assert_eq!(
            headers.get("Cache-Control").unwrap(),
            "no-store, no-cache, must-revalidate, proxy-revalidate"
        );
        assert_eq!(headers.get("Pragma").unwrap(), "no-cache");
        assert_eq!(headers.get("Expires").unwrap(), "0");
    }

    #[actix_rt::test]
    async fn http_stats_body_is_valid_json_with_all_fields() {
        let app = test::init_service(
            App::new()
                .app_data(stats_service(failing_host()))
                .wrap(api_headers())
                .configure(|cfg| {
                    cfg.service(web::scope("/api").configure(configure_stats_routes));
                }),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/stats").to_request();
        let resp = test::call_service(&app, req).await;

        let body: Value = test::read_body_json(resp).await;
        for field in [
            "terraformModules",
            "ansiblePlaybooks",
            "iacResources",
            "ciCdRuns",
            "securityScore",
            "githubCommits",
        ] {
            assert!(body[field].is_u64(), "missing or non-numeric field {field}");
        }
    }
}
