//! Shared-link endpoint integration tests
//!
//! Tests the link endpoints:
//! - POST /SrDashboard - Publish (insert or append)
//! - GET /Jrdashboard - Search by senior and/or subject
//! - GET /explore - Browse, optionally by subject

use axum::http::StatusCode;
use serde_json::{json, Value};
use studyshare_links::{LinkRepository, LinkSearch, NewLink};

use crate::common::{assertions, TestApp};

async fn publish(app: &TestApp, owner: &str, subject: &str, drive: &str, other: &str) -> Value {
    let (status, body) = app
        .post(
            "/SrDashboard",
            json!({
                "username": owner,
                "password": "not-stored",
                "subject": subject,
                "driveLink": drive,
                "OtherLink": other
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "publish failed: {}", body);
    body
}

mod test_publish {
    use super::*;

    #[test_log::test(tokio::test)]
    async fn test_first_publish_creates_single_link_record() {
        let app = TestApp::new().await.unwrap();
        let owner = app.owner("alice");

        let body = publish(&app, &owner, "math", "linkA", "other1").await;
        assert_eq!(body["message"], "File link saved successfully");
        assert_eq!(body["driveLink"], "linkA");

        let repo = LinkRepository::new(app.pool.clone());
        let record = repo.find(&owner, "math").await.unwrap().unwrap();
        assert_eq!(record.file_paths, vec!["linkA".to_string()]);
        assert_eq!(record.links, "other1");

        app.cleanup().await.unwrap();
    }

    #[tokio::test]
    async fn test_second_publish_appends_and_overwrites_other_link() {
        let app = TestApp::new().await.unwrap();
        let owner = app.owner("alice");

        publish(&app, &owner, "math", "linkA", "other1").await;
        publish(&app, &owner, "math", "linkB", "other2").await;

        let repo = LinkRepository::new(app.pool.clone());
        let record = repo.find(&owner, "math").await.unwrap().unwrap();
        assert_eq!(
            record.file_paths,
            vec!["linkA".to_string(), "linkB".to_string()]
        );
        assert_eq!(record.links, "other2");
        assert!(record.updated_at >= record.created_at);

        let (rows,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM files WHERE username = $1 AND subject = $2")
                .bind(&owner)
                .bind("math")
                .fetch_one(&app.pool)
                .await
                .unwrap();
        assert_eq!(rows, 1);

        app.cleanup().await.unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_links_accumulate() {
        let app = TestApp::new().await.unwrap();
        let owner = app.owner("bob");

        publish(&app, &owner, "physics", "same", "o").await;
        publish(&app, &owner, "physics", "same", "o").await;

        let repo = LinkRepository::new(app.pool.clone());
        let record = repo.find(&owner, "physics").await.unwrap().unwrap();
        assert_eq!(record.file_paths, vec!["same".to_string(), "same".to_string()]);

        app.cleanup().await.unwrap();
    }

    #[tokio::test]
    async fn test_subjects_are_separate_records() {
        let app = TestApp::new().await.unwrap();
        let owner = app.owner("carol");

        publish(&app, &owner, "math", "m1", "o").await;
        publish(&app, &owner, "chemistry", "c1", "o").await;

        let repo = LinkRepository::new(app.pool.clone());
        let records = repo
            .search(&LinkSearch::new(Some(owner.clone()), None))
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.file_paths.len() == 1));

        app.cleanup().await.unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_publishes_keep_every_link() {
        let app = TestApp::new().await.unwrap();
        let owner = app.owner("racer");
        let repo = LinkRepository::new(app.pool.clone());

        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let repo = repo.clone();
                let link = NewLink::new(
                    owner.clone(),
                    "math".to_string(),
                    format!("link{}", i),
                    format!("other{}", i),
                )
                .unwrap();
                tokio::spawn(async move { repo.publish(&link).await })
            })
            .collect();

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let record = repo.find(&owner, "math").await.unwrap().unwrap();
        assert_eq!(record.file_paths.len(), 8);
        for i in 0..8 {
            assert!(record.file_paths.contains(&format!("link{}", i)));
        }

        let rows = repo
            .search(&LinkSearch::new(Some(owner.clone()), Some("math".to_string())))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);

        app.cleanup().await.unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_http_publishes_to_one_pair() {
        let app = TestApp::new().await.unwrap();
        let owner = app.owner("pair");

        tokio::join!(
            publish(&app, &owner, "math", "linkA", "otherA"),
            publish(&app, &owner, "math", "linkB", "otherB")
        );

        let repo = LinkRepository::new(app.pool.clone());
        let record = repo.find(&owner, "math").await.unwrap().unwrap();
        let mut links = record.file_paths.clone();
        links.sort();
        assert_eq!(links, vec!["linkA".to_string(), "linkB".to_string()]);
        assert!(record.links == "otherA" || record.links == "otherB");

        app.cleanup().await.unwrap();
    }

    #[tokio::test]
    async fn test_publish_missing_fields() {
        let app = TestApp::new().await.unwrap();

        let (status, body) = app
            .post(
                "/SrDashboard",
                json!({
                    "username": app.owner("x"),
                    "subject": "math",
                    "driveLink": ""
                }),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assertions::assert_error_code(&body, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_password_not_persisted_with_links() {
        let app = TestApp::new().await.unwrap();

        let (columns,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM information_schema.columns \
             WHERE table_name = 'files' AND column_name LIKE '%password%'",
        )
        .fetch_one(&app.pool)
        .await
        .unwrap();
        assert_eq!(columns, 0);
    }
}

mod test_search {
    use super::*;

    #[tokio::test]
    async fn test_junior_dashboard_by_senior() {
        let app = TestApp::new().await.unwrap();
        let owner = app.owner("senior");
        publish(&app, &owner, "math", "m1", "o").await;
        publish(&app, &owner, "art", "a1", "o").await;

        let (status, body) = app.get(&format!("/Jrdashboard?seniorname={}", owner)).await;

        assert_eq!(status, StatusCode::OK);
        let files = body["files"].as_array().unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f["username"] == owner.as_str()));

        app.cleanup().await.unwrap();
    }

    #[tokio::test]
    async fn test_junior_dashboard_filters_combine_with_and() {
        let app = TestApp::new().await.unwrap();
        let owner = app.owner("senior");
        let other_owner = app.owner("other");
        let subject = app.owner("subject");
        publish(&app, &owner, &subject, "mine", "o").await;
        publish(&app, &other_owner, &subject, "theirs", "o").await;

        let (status, body) = app
            .get(&format!(
                "/Jrdashboard?seniorname={}&subjectname={}",
                owner, subject
            ))
            .await;

        assert_eq!(status, StatusCode::OK);
        let files = body["files"].as_array().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0]["file_paths"], json!(["mine"]));

        // Subject alone matches both seniors
        let (status, body) = app
            .get(&format!("/Jrdashboard?subjectname={}", subject))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["files"].as_array().unwrap().len(), 2);

        app.cleanup().await.unwrap();
    }

    #[tokio::test]
    async fn test_junior_dashboard_requires_filter() {
        let app = TestApp::new().await.unwrap();

        let (status, body) = app.get("/Jrdashboard").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assertions::assert_error_code(&body, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_repeated_query_param_uses_envelope() {
        let app = TestApp::new().await.unwrap();

        let (status, body) = app.get("/Jrdashboard?seniorname=a&seniorname=b").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assertions::assert_error_code(&body, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_no_match_is_not_found_not_server_error() {
        let app = TestApp::new().await.unwrap();

        let (status, body) = app
            .get(&format!("/Jrdashboard?seniorname={}", app.owner("ghost")))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assertions::assert_error_code(&body, "NOT_FOUND");

        let (status, body) = app
            .get(&format!("/explore?subjectname={}", app.owner("nosubject")))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assertions::assert_error_code(&body, "NOT_FOUND");

        // Repository level: empty result, not an error
        let repo = LinkRepository::new(app.pool.clone());
        let records = repo
            .search(&LinkSearch::new(Some(app.owner("ghost")), None))
            .await
            .unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_explore_by_subject() {
        let app = TestApp::new().await.unwrap();
        let subject = app.owner("explore");
        publish(&app, &app.owner("s1"), &subject, "l1", "o").await;
        publish(&app, &app.owner("s2"), &subject, "l2", "o").await;
        publish(&app, &app.owner("s3"), "unrelated", "l3", "o").await;

        let (status, body) = app.get(&format!("/explore?subjectname={}", subject)).await;

        assert_eq!(status, StatusCode::OK);
        let files = body["files"].as_array().unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f["subject"] == subject.as_str()));

        app.cleanup().await.unwrap();
    }

    #[tokio::test]
    async fn test_explore_without_filter_returns_everything() {
        let app = TestApp::new().await.unwrap();
        let owner = app.owner("everyone");
        publish(&app, &owner, "math", "l1", "o").await;
        publish(&app, &owner, "art", "l2", "o").await;

        let (status, body) = app.get("/explore").await;

        assert_eq!(status, StatusCode::OK);
        let ours = body["files"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|f| f["username"] == owner.as_str())
            .count();
        assert_eq!(ours, 2);

        app.cleanup().await.unwrap();
    }
}
