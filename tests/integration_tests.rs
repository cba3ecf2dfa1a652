// Integration tests for Career Compass: CSV reference data, SQLite store and HTTP routes

use actix_web::{test, web, App};
use career_compass::config::RecommenderSettings;
use career_compass::routes::{self, AppState};
use career_compass::services::{ReferenceData, SqliteClient};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

fn write_fixtures(dir: &Path) {
    let files = [
        ("question.csv", "id_question,id_tag_class,name_question\n1,1,What do you enjoy?\n2,2,How do you like to work?\n"),
        ("tag_class.csv", "id_tag_class,name_tag_class\n1,Interest\n2,Style\n"),
        ("tag.csv", "id_tag_class,id_tag,name_tag\n1,101,Numbers\n1,102,People\n2,201,Alone\n2,202,In a team\n"),
        ("tag_to_jobs.csv", "id_tag,id_jobs\n101,J1\n101,J2\n201,J1\n102,J3\n"),
        ("jobs.csv", "id_jobs,name_jobs\nJ1,Data analyst\nJ2,Accountant\nJ3,Counselor\n"),
        ("ncs_to_jobs.csv", "id_jobs,ncs_code\nJ1,20010202\n"),
        ("edu_company.csv", "id_edu_company,name_edu_company,address\n1,Code Academy,서울 강남구 테헤란로\n2,Harbor School,부산 해운대구\n"),
        (
            "edu_program.csv",
            "id_edu_program,id_edu_company,name_edu_program,date_start,date_end,cost,oopc,link,online_status,employment_status,ncs_code\n\
             1,1,Data bootcamp,20240601,20240901,1000000,0,https://example.com/1,온라인,Y,20010202\n\
             2,2,SQL evening class,20240301,20240501,500000,120000,https://example.com/2,오프라인,N,20010202\n",
        ),
        ("jobs_to_worknet.csv", "id_jobs,work_code\nJ1,1001\n"),
        ("worknet_company.csv", "id_work_company,work_company\n10,Acme Analytics\n"),
        (
            "worknet_positions.csv",
            "id_work_positions,id_work_company,work_code,recruit,job_describ_1,job_describ_2,condition,date,link\n\
             1,10,1001,Junior data analyst,Dashboards,Reporting,Entry level,2024-06-30,https://example.com/job/1\n",
        ),
        ("job_info.csv", "직무,중분류_1\n응용SW엔지니어링,정보기술\nDB엔지니어링,정보기술\n유선통신구축,통신기술\n"),
        ("job_tag.csv", "직무\n응용SW엔지니어링\nDB엔지니어링\n유선통신구축\n"),
        ("job_int.csv", "NCS 기준,NCS 직무분류코드\n응용SW엔지니어링,20010202\nDB엔지니어링,\n"),
        ("hiring_trends.csv", "직종,2021년,2022년\n정보통신,\"1,200\",1350\n방송,90,\n"),
    ];

    for (name, body) in files {
        std::fs::write(dir.join(name), body).unwrap();
    }
}

async fn create_state() -> AppState {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let reference = ReferenceData::from_csv_dir(dir.path()).unwrap();

    let store = Arc::new(SqliteClient::new("sqlite::memory:", 1, 1).await.unwrap());
    AppState::new(store, reference, &RecommenderSettings::default())
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .app_data(web::JsonConfig::default().error_handler(routes::handle_json_payload_error))
                .app_data(web::QueryConfig::default().error_handler(routes::handle_query_payload_error))
                .app_data(web::PathConfig::default().error_handler(routes::handle_path_error))
                .configure(routes::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health() {
    let state = create_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_survey_lists_questions_with_options() {
    let state = create_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/v1/survey").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0]["questionId"], "1");
    assert_eq!(questions[0]["options"][1]["tagId"], "102");
    assert_eq!(questions[1]["options"][0]["label"], "Alone");
}

#[actix_web::test]
async fn test_submit_ranks_and_audits() {
    let state = create_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/survey/submit")
        .set_json(json!({ "responses": { "1": ["101"], "2": ["201"] } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["recommendation"]["status"], "ranked");
    assert_eq!(body["recommendation"]["tiers"][0]["jobs"], json!(["Data analyst"]));
    assert_eq!(body["recommendation"]["tiers"][0]["matchCount"], 2);
    assert_eq!(body["recommendation"]["tiers"][1]["jobs"], json!(["Accountant"]));
    assert_eq!(body["auditLogged"], true);

    let id: Uuid = body["responseId"].as_str().unwrap().parse().unwrap();
    let record = state.store.get_response(id).await.unwrap().unwrap();
    assert_eq!(record.tags, vec!["101", "201"]);
}

#[actix_web::test]
async fn test_submit_without_matches() {
    let state = create_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/survey/submit")
        .set_json(json!({ "responses": { "1": ["999"], "2": ["202"] } }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["recommendation"]["status"], "no_recommendation");
    assert_eq!(body["auditLogged"], true);
}

#[actix_web::test]
async fn test_submit_incomplete_is_rejected() {
    let state = create_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/survey/submit")
        .set_json(json!({ "responses": { "1": ["101"] } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["missingQuestions"], json!(["2"]));
    assert_eq!(body["message"], "missing responses for questions: 2");
    assert_eq!(state.store.response_count().await.unwrap(), 0);
}

#[actix_web::test]
async fn test_audit_failure_still_returns_ranking() {
    let state = create_state().await;
    let app = init_app!(state);
    state.store.close().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/survey/submit")
        .set_json(json!({ "responses": { "1": ["101"], "2": ["201"] } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["recommendation"]["status"], "ranked");
    assert_eq!(body["auditLogged"], false);
    assert!(body["responseId"].is_null());
    assert_eq!(body["warnings"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_malformed_json_is_a_400() {
    let state = create_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/survey/submit")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"responses\": [")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
}

#[actix_web::test]
async fn test_job_catalog() {
    let state = create_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/v1/jobs").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
    assert_eq!(body[2]["name"], "Counselor");
}

#[actix_web::test]
async fn test_job_categories() {
    let state = create_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/v1/jobs/categories").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "정보기술");
    assert_eq!(body[0]["jobs"], json!(["응용SW엔지니어링", "DB엔지니어링"]));

    let req = test::TestRequest::get()
        .uri("/api/v1/jobs/categories/%EC%A0%95%EB%B3%B4%EA%B8%B0%EC%88%A0")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["name"], "정보기술");

    // 유선통신구축 has no job_int row
    let req = test::TestRequest::get()
        .uri("/api/v1/jobs/categories/%ED%86%B5%EC%8B%A0%EA%B8%B0%EC%88%A0")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_hiring_insight() {
    let state = create_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/v1/insight/occupations").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!(["정보통신", "방송"]));

    let req = test::TestRequest::get()
        .uri("/api/v1/insight/%EC%A0%95%EB%B3%B4%ED%86%B5%EC%8B%A0")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["occupation"], "정보통신");
    assert_eq!(
        body["series"],
        json!([{ "year": 2021, "openings": 1200 }, { "year": 2022, "openings": 1350 }])
    );

    let req = test::TestRequest::get().uri("/api/v1/insight/unknown").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Unknown occupation");
}

#[actix_web::test]
async fn test_education_programs() {
    let state = create_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/v1/education/jobs").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!([{ "jobId": "J1", "name": "Data analyst" }]));

    let req = test::TestRequest::get().uri("/api/v1/education/regions").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!(["부산", "서울"]));

    let req = test::TestRequest::post()
        .uri("/api/v1/education/programs")
        .set_json(json!({ "job": "Data analyst" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let req = test::TestRequest::post()
        .uri("/api/v1/education/programs")
        .set_json(json!({ "job": "Data analyst", "mode": "online_only", "withoutFee": true, "startFrom": "2024-05-01" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Data bootcamp");
    assert_eq!(body[0]["region"], "서울");

    let req = test::TestRequest::post()
        .uri("/api/v1/education/programs")
        .set_json(json!({ "job": "Data analyst", "regions": ["대구"] }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!([]));

    let req = test::TestRequest::post()
        .uri("/api/v1/education/programs")
        .set_json(json!({ "job": "Counselor" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_postings() {
    let state = create_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/v1/postings/jobs").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!(["Data analyst"]));

    let req = test::TestRequest::get().uri("/api/v1/postings?job=Data%20analyst").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body[0]["company"], "Acme Analytics");
    assert_eq!(body[0]["description"], json!(["Dashboards", "Reporting"]));

    let req = test::TestRequest::get().uri("/api/v1/postings?job=Counselor").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!([]));

    let req = test::TestRequest::get().uri("/api/v1/postings").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_board_flow() {
    let state = create_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/board/posts")
        .set_json(json!({ "title": "Bootcamp reviews", "content": "Which one did you take?" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    let post_id = body["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/board/posts/{}/comments", post_id))
        .set_json(json!({ "content": "The data one" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/board/posts/{}/like", post_id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::get().uri("/api/v1/board/posts?q=reviews").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body[0]["commentCount"], 1);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/board/posts/{}", post_id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["likes"], 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/board/posts/{}", post_id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/board/posts/{}/comments", post_id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn test_board_rejects_bad_input() {
    let state = create_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/board/posts")
        .set_json(json!({ "title": "", "content": "x" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    let req = test::TestRequest::put()
        .uri("/api/v1/board/comments/77")
        .set_json(json!({ "content": "edit" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    let req = test::TestRequest::get().uri("/api/v1/board/posts/abc").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);
}

#[tokio::test]
async fn test_imported_tables_match_csv() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    let client = SqliteClient::new("sqlite::memory:", 1, 1).await.unwrap();
    let report = client.import_csv_dir(dir.path(), false).await.unwrap();
    assert_eq!(report.tables.len(), 15);
    assert!(report.skipped.is_empty());

    let from_db = client.load_reference().await.unwrap();
    let from_csv = ReferenceData::from_csv_dir(dir.path()).unwrap();
    assert_eq!(from_db.tags, from_csv.tags);
    assert_eq!(from_db.edu_programs, from_csv.edu_programs);
    assert_eq!(from_db.work_positions, from_csv.work_positions);
    assert_eq!(from_db.job_info, from_csv.job_info);
    assert_eq!(from_db.job_intros, from_csv.job_intros);
    assert_eq!(from_db.hiring_trends.len(), 3);
}
