#[cfg(test)]
mod integration_tests {
    use crate::schemas::{ApiResponse, ErrorResponse};
    use crate::test_utils::test_utils::{
        bearer, setup_test_server, TestUsers, TEST_HALL, TEST_PASSWORD,
    };
    use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use chrono::{Duration, NaiveDate, Utc};
    use model::entities::user;
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use std::str::FromStr;

    fn auth(user: &user::Model) -> HeaderValue {
        HeaderValue::from_str(&bearer(user)).unwrap()
    }

    fn hall_body(code: &str, name: &str, capacity: i32) -> Value {
        json!({
            "hall_code": code,
            "hall_name": name,
            "full_name": format!("{} Residential Hall", name),
            "hall_type": "MALE",
            "capacity": capacity,
            "provost": "Dr. Karim",
            "email": "hall@sust.edu",
            "phone": "0821-000000",
            "office_location": "Ground floor",
            "office_hours": "9am-5pm",
            "facilities": "Wi-Fi, Library , Gym"
        })
    }

    async fn create_hall(server: &TestServer, users: &TestUsers, body: Value) -> Value {
        let response = server
            .post("/api/v1/halls")
            .add_header(AUTHORIZATION, auth(&users.admin))
            .json(&body)
            .await;
        if response.status_code() != StatusCode::CREATED {
            println!("Error response: {}", response.text());
            panic!("Expected 201 Created, got {}", response.status_code());
        }
        response.json::<ApiResponse<Value>>().data
    }

    async fn file_complaint(server: &TestServer, owner: &user::Model, title: &str) -> Value {
        let response = server
            .post("/api/v1/complaints")
            .add_header(AUTHORIZATION, auth(owner))
            .json(&json!({
                "title": title,
                "description": "Water leaking from the ceiling",
                "category": "Plumbing"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<ApiResponse<Value>>().data
    }

    fn encoded(segment: &str) -> String {
        segment.replace(' ', "%20")
    }

    fn error_code(response: &axum_test::TestResponse) -> String {
        response.json::<ErrorResponse>().code
    }

    #[tokio::test]
    async fn test_health_check() {
        let (server, _) = setup_test_server().await;

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "connected");
    }

    // Registration and login

    #[tokio::test]
    async fn test_register_creates_pending_student() {
        let (server, _) = setup_test_server().await;

        let response = server
            .post("/api/v1/auth/register")
            .json(&json!({
                "name": "Nadia",
                "email": "nadia@sust.edu",
                "hall_name": TEST_HALL,
                "password": "secret123",
                "confirm_password": "secret123"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        assert!(body.success);
        assert_eq!(
            body.message,
            "Registration successful. Your account is pending admin approval."
        );
        assert_eq!(body.data["role"], "STUDENT");
        assert_eq!(body.data["account_status"], "PENDING");
        assert!(body.data.get("password_hash").is_none());

        // Pending accounts cannot log in yet
        let login = server
            .post("/api/v1/auth/login")
            .json(&json!({ "email": "nadia@sust.edu", "password": "secret123" }))
            .await;
        login.assert_status(StatusCode::FORBIDDEN);
        assert_eq!(error_code(&login), "ACCOUNT_PENDING");
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_input() {
        let (server, _) = setup_test_server().await;

        let cases = [
            ("nadia@gmail.com", "secret123", "secret123"),
            ("nadia@sust.edu", "abc", "abc"),
            ("nadia@sust.edu", "secret123", "secret124"),
        ];
        for (email, password, confirm) in cases {
            let response = server
                .post("/api/v1/auth/register")
                .json(&json!({
                    "name": "Nadia",
                    "email": email,
                    "hall_name": TEST_HALL,
                    "password": password,
                    "confirm_password": confirm
                }))
                .await;
            response.assert_status(StatusCode::BAD_REQUEST);
        }

        let mismatch = server
            .post("/api/v1/auth/register")
            .json(&json!({
                "name": "Nadia",
                "email": "nadia@sust.edu",
                "hall_name": TEST_HALL,
                "password": "secret123",
                "confirm_password": "secret124"
            }))
            .await;
        assert_eq!(mismatch.json::<ErrorResponse>().error, "Passwords do not match");
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let (server, users) = setup_test_server().await;

        let response = server
            .post("/api/v1/auth/register")
            .json(&json!({
                "name": "Copy",
                "email": users.student.email,
                "hall_name": TEST_HALL,
                "password": "secret123",
                "confirm_password": "secret123"
            }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(error_code(&response), "CONFLICT");
    }

    #[tokio::test]
    async fn test_login_returns_token_and_redirect() {
        let (server, users) = setup_test_server().await;

        let response = server
            .post("/api/v1/auth/login")
            .json(&json!({ "email": users.admin.email, "password": TEST_PASSWORD }))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = response.json();
        assert_eq!(body.message, "Login successful");
        assert_eq!(body.data["token_type"], "Bearer");
        assert_eq!(body.data["redirect"], "/admin");
        assert_eq!(body.data["user"]["role"], "ADMIN");

        // The issued token authenticates subsequent requests
        let token = body.data["token"].as_str().unwrap();
        let me = server
            .get("/api/v1/auth/me")
            .add_header(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
            )
            .await;
        me.assert_status(StatusCode::OK);
        assert_eq!(me.json::<ApiResponse<Value>>().data["email"], "admin@sust.edu");
    }

    #[tokio::test]
    async fn test_login_failures() {
        let (server, users) = setup_test_server().await;

        let wrong_password = server
            .post("/api/v1/auth/login")
            .json(&json!({ "email": users.student.email, "password": "not-the-password" }))
            .await;
        wrong_password.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(error_code(&wrong_password), "INVALID_CREDENTIALS");

        let unknown = server
            .post("/api/v1/auth/login")
            .json(&json!({ "email": "ghost@sust.edu", "password": TEST_PASSWORD }))
            .await;
        unknown.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(
            unknown.json::<ErrorResponse>().error,
            wrong_password.json::<ErrorResponse>().error
        );

        // Suspend the student, then try again
        server
            .post(&format!("/api/v1/admin/users/{}/suspend", users.student.id))
            .add_header(AUTHORIZATION, auth(&users.admin))
            .await
            .assert_status(StatusCode::OK);
        let suspended = server
            .post("/api/v1/auth/login")
            .json(&json!({ "email": users.student.email, "password": TEST_PASSWORD }))
            .await;
        suspended.assert_status(StatusCode::FORBIDDEN);
        assert_eq!(error_code(&suspended), "ACCOUNT_SUSPENDED");
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        let (server, _) = setup_test_server().await;

        let missing = server.get("/api/v1/auth/me").await;
        missing.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(error_code(&missing), "UNAUTHORIZED");

        let garbage = server
            .get("/api/v1/dashboard")
            .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer not-a-jwt"))
            .await;
        garbage.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_token_of_suspended_user_is_refused() {
        let (server, users) = setup_test_server().await;
        let header = auth(&users.student);

        server
            .post(&format!("/api/v1/admin/users/{}/suspend", users.student.id))
            .add_header(AUTHORIZATION, auth(&users.admin))
            .await
            .assert_status(StatusCode::OK);

        let response = server.get("/api/v1/auth/me").add_header(AUTHORIZATION, header).await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_navigation_per_role() {
        let (server, users) = setup_test_server().await;

        let response = server
            .get("/api/v1/auth/navigation")
            .add_header(AUTHORIZATION, auth(&users.canteen))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = response.json();
        assert_eq!(body.data["role"], "CANTEEN_MANAGER");
        assert_eq!(body.data["landing"], "/dashboard");
        let items = body.data["items"].as_array().unwrap();
        assert_eq!(items.first().unwrap()["path"], "/dashboard");
        assert_eq!(items.last().unwrap()["path"], "/profile");
        assert!(items.iter().any(|i| i["path"] == "/menu-management"));
    }

    // Account approval

    #[tokio::test]
    async fn test_admin_approval_flow() {
        let (server, users) = setup_test_server().await;

        let pending = server
            .get("/api/v1/admin/pending-users")
            .add_header(AUTHORIZATION, auth(&users.admin))
            .await;
        pending.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<Value>> = pending.json();
        assert_eq!(body.data.len(), 1);
        assert_eq!(body.data[0]["email"], "new@sust.edu");

        let approved = server
            .post(&format!("/api/v1/admin/users/{}/approve", users.pending.id))
            .add_header(AUTHORIZATION, auth(&users.admin))
            .await;
        approved.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = approved.json();
        assert_eq!(body.message, "User approved successfully");
        assert_eq!(body.data["account_status"], "APPROVED");

        let login = server
            .post("/api/v1/auth/login")
            .json(&json!({ "email": "new@sust.edu", "password": TEST_PASSWORD }))
            .await;
        login.assert_status(StatusCode::OK);

        let still_pending = server
            .get("/api/v1/admin/pending-users")
            .add_header(AUTHORIZATION, auth(&users.admin))
            .await;
        assert!(still_pending.json::<ApiResponse<Vec<Value>>>().data.is_empty());
    }

    #[tokio::test]
    async fn test_reject_and_activate() {
        let (server, users) = setup_test_server().await;

        server
            .post(&format!("/api/v1/admin/users/{}/reject", users.pending.id))
            .add_header(AUTHORIZATION, auth(&users.admin))
            .await
            .assert_status(StatusCode::OK);

        let rejected = server
            .get("/api/v1/admin/users/status/rejected")
            .add_header(AUTHORIZATION, auth(&users.admin))
            .await;
        rejected.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<Value>> = rejected.json();
        assert_eq!(body.data.len(), 1);

        let login = server
            .post("/api/v1/auth/login")
            .json(&json!({ "email": "new@sust.edu", "password": TEST_PASSWORD }))
            .await;
        assert_eq!(error_code(&login), "ACCOUNT_REJECTED");

        let activated = server
            .post(&format!("/api/v1/admin/users/{}/activate", users.pending.id))
            .add_header(AUTHORIZATION, auth(&users.admin))
            .await;
        activated.assert_status(StatusCode::OK);
        assert_eq!(activated.json::<ApiResponse<Value>>().data["account_status"], "APPROVED");
    }

    #[tokio::test]
    async fn test_unknown_status_is_bad_request() {
        let (server, users) = setup_test_server().await;

        let response = server
            .get("/api/v1/admin/users/status/archived")
            .add_header(AUTHORIZATION, auth(&users.admin))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_role() {
        let (server, users) = setup_test_server().await;

        let response = server
            .put(&format!("/api/v1/admin/users/{}/role", users.student.id))
            .add_header(AUTHORIZATION, auth(&users.admin))
            .json(&json!({ "role": "STAFF" }))
            .await;

        response.assert_status(StatusCode::OK);
        assert_eq!(response.json::<ApiResponse<Value>>().data["role"], "STAFF");
    }

    #[tokio::test]
    async fn test_admin_routes_are_admin_only() {
        let (server, users) = setup_test_server().await;

        for user in [&users.staff, &users.teacher, &users.student, &users.canteen] {
            let response = server
                .get("/api/v1/admin/pending-users")
                .add_header(AUTHORIZATION, auth(user))
                .await;
            response.assert_status(StatusCode::FORBIDDEN);
            assert_eq!(error_code(&response), "FORBIDDEN");
        }
    }

    // User management

    #[tokio::test]
    async fn test_create_user() {
        let (server, users) = setup_test_server().await;

        let response = server
            .post("/api/v1/users")
            .add_header(AUTHORIZATION, auth(&users.admin))
            .json(&json!({
                "name": "Provost",
                "email": "provost@sust.edu",
                "password": "secret123",
                "role": "TEACHER",
                "hall_name": TEST_HALL
            }))
            .await;

        if response.status_code() != StatusCode::CREATED {
            println!("Error response: {}", response.text());
            panic!("Expected 201 Created, got {}", response.status_code());
        }
        let body: ApiResponse<Value> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "User created successfully");
        assert_eq!(body.data["role"], "TEACHER");
        assert!(body.data["id"].as_i64().unwrap() > 0);

        let duplicate = server
            .post("/api/v1/users")
            .add_header(AUTHORIZATION, auth(&users.admin))
            .json(&json!({
                "name": "Provost",
                "email": "provost@sust.edu",
                "password": "secret123"
            }))
            .await;
        duplicate.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_get_users_with_filters() {
        let (server, users) = setup_test_server().await;

        let all = server
            .get("/api/v1/users")
            .add_header(AUTHORIZATION, auth(&users.admin))
            .await;
        all.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<Value>> = all.json();
        assert_eq!(body.message, "Users retrieved successfully");
        assert_eq!(body.data.len(), 7);

        let students = server
            .get("/api/v1/users")
            .add_query_param("role", "student")
            .add_header(AUTHORIZATION, auth(&users.admin))
            .await;
        let body: ApiResponse<Vec<Value>> = students.json();
        assert_eq!(body.data.len(), 3);
        assert!(body.data.iter().all(|u| u["role"] == "STUDENT"));

        let approved_students = server
            .get("/api/v1/users")
            .add_query_param("role", "STUDENT")
            .add_query_param("status", "APPROVED")
            .add_header(AUTHORIZATION, auth(&users.admin))
            .await;
        assert_eq!(approved_students.json::<ApiResponse<Vec<Value>>>().data.len(), 2);
    }

    #[tokio::test]
    async fn test_get_user_by_id_and_not_found() {
        let (server, users) = setup_test_server().await;

        let response = server
            .get(&format!("/api/v1/users/{}", users.teacher.id))
            .add_header(AUTHORIZATION, auth(&users.admin))
            .await;
        response.assert_status(StatusCode::OK);
        assert_eq!(response.json::<ApiResponse<Value>>().data["email"], "teacher@sust.edu");

        let missing = server
            .get("/api/v1/users/99999")
            .add_header(AUTHORIZATION, auth(&users.admin))
            .await;
        missing.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(
            missing.json::<ErrorResponse>().error,
            "User not found with id: 99999"
        );
    }

    #[tokio::test]
    async fn test_update_user_and_password() {
        let (server, users) = setup_test_server().await;

        let response = server
            .put(&format!("/api/v1/users/{}", users.student.id))
            .add_header(AUTHORIZATION, auth(&users.admin))
            .json(&json!({ "name": "Rahim Uddin", "password": "newsecret1" }))
            .await;
        response.assert_status(StatusCode::OK);
        assert_eq!(response.json::<ApiResponse<Value>>().data["name"], "Rahim Uddin");

        let login = server
            .post("/api/v1/auth/login")
            .json(&json!({ "email": users.student.email, "password": "newsecret1" }))
            .await;
        login.assert_status(StatusCode::OK);

        let taken = server
            .put(&format!("/api/v1/users/{}", users.student.id))
            .add_header(AUTHORIZATION, auth(&users.admin))
            .json(&json!({ "email": users.staff.email }))
            .await;
        taken.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_delete_user() {
        let (server, users) = setup_test_server().await;

        server
            .delete(&format!("/api/v1/users/{}", users.pending.id))
            .add_header(AUTHORIZATION, auth(&users.admin))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get(&format!("/api/v1/users/{}", users.pending.id))
            .add_header(AUTHORIZATION, auth(&users.admin))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_user_halls_and_statistics() {
        let (server, users) = setup_test_server().await;

        let halls = server
            .get("/api/v1/users/halls")
            .add_header(AUTHORIZATION, auth(&users.admin))
            .await;
        halls.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<String>> = halls.json();
        assert_eq!(body.data, vec![TEST_HALL.to_string()]);

        let statistics = server
            .get("/api/v1/users/statistics")
            .add_header(AUTHORIZATION, auth(&users.admin))
            .await;
        statistics.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<Value>> = statistics.json();
        let students = body
            .data
            .iter()
            .find(|row| row["hall_name"] == TEST_HALL && row["role"] == "STUDENT")
            .unwrap();
        assert_eq!(students["count"], 3);
        let total: u64 = body.data.iter().map(|row| row["count"].as_u64().unwrap()).sum();
        assert_eq!(total, 7);
    }

    #[tokio::test]
    async fn test_users_are_admin_only() {
        let (server, users) = setup_test_server().await;

        let response = server
            .get("/api/v1/users")
            .add_header(AUTHORIZATION, auth(&users.staff))
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
    }

    // Halls

    #[tokio::test]
    async fn test_create_and_get_hall() {
        let (server, users) = setup_test_server().await;

        let created = create_hall(&server, &users, hall_body("SPH", TEST_HALL, 500)).await;
        assert_eq!(created["current_occupancy"], 0);
        assert_eq!(created["available_seats"], 500);
        assert_eq!(created["is_active"], true);
        assert_eq!(created["facilities"], json!(["Wi-Fi", "Library", "Gym"]));
        let id = created["id"].as_i64().unwrap();

        let by_id = server.get(&format!("/api/v1/halls/{}", id)).await;
        by_id.assert_status(StatusCode::OK);
        assert_eq!(by_id.json::<ApiResponse<Value>>().data["hall_code"], "SPH");

        let by_code = server.get("/api/v1/halls/code/SPH").await;
        by_code.assert_status(StatusCode::OK);
        assert_eq!(by_code.json::<ApiResponse<Value>>().data["id"], id);

        let by_name = server.get(&format!("/api/v1/halls/name/{}", encoded(TEST_HALL))).await;
        by_name.assert_status(StatusCode::OK);

        let by_full_name = server
            .get(&format!(
                "/api/v1/halls/full-name/{}",
                encoded(&format!("{} Residential Hall", TEST_HALL))
            ))
            .await;
        by_full_name.assert_status(StatusCode::OK);

        server.get("/api/v1/halls/code/NOPE").await.assert_status(StatusCode::NOT_FOUND);
        server.get("/api/v1/halls/99999").await.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_hall_conflicts_and_validation() {
        let (server, users) = setup_test_server().await;
        create_hall(&server, &users, hall_body("SPH", TEST_HALL, 500)).await;

        let same_code = server
            .post("/api/v1/halls")
            .add_header(AUTHORIZATION, auth(&users.admin))
            .json(&hall_body("SPH", "Another Hall", 100))
            .await;
        same_code.assert_status(StatusCode::CONFLICT);
        assert_eq!(
            same_code.json::<ErrorResponse>().error,
            "Hall code already exists: SPH"
        );

        let same_name = server
            .post("/api/v1/halls")
            .add_header(AUTHORIZATION, auth(&users.admin))
            .json(&hall_body("XYZ", TEST_HALL, 100))
            .await;
        same_name.assert_status(StatusCode::CONFLICT);

        let mut overfull = hall_body("BBH", "Begum Hall", 10);
        overfull["current_occupancy"] = json!(11);
        let response = server
            .post("/api/v1/halls")
            .add_header(AUTHORIZATION, auth(&users.admin))
            .json(&overfull)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&response), "VALIDATION_ERROR");

        let student = server
            .post("/api/v1/halls")
            .add_header(AUTHORIZATION, auth(&users.student))
            .json(&hall_body("BBH", "Begum Hall", 10))
            .await;
        student.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_update_hall_and_occupancy() {
        let (server, users) = setup_test_server().await;
        let created = create_hall(&server, &users, hall_body("SPH", TEST_HALL, 100)).await;
        let id = created["id"].as_i64().unwrap();

        let updated = server
            .put(&format!("/api/v1/halls/{}", id))
            .add_header(AUTHORIZATION, auth(&users.admin))
            .json(&json!({ "provost": "Dr. Rahman", "capacity": 120 }))
            .await;
        updated.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = updated.json();
        assert_eq!(body.data["provost"], "Dr. Rahman");
        assert_eq!(body.data["capacity"], 120);
        assert_eq!(body.data["hall_code"], "SPH");

        let occupancy = server
            .put(&format!("/api/v1/halls/{}/occupancy", id))
            .add_header(AUTHORIZATION, auth(&users.admin))
            .json(&json!({ "current_occupancy": 80 }))
            .await;
        occupancy.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = occupancy.json();
        assert_eq!(body.data["current_occupancy"], 80);
        assert_eq!(body.data["available_seats"], 40);

        let too_many = server
            .put(&format!("/api/v1/halls/{}/occupancy", id))
            .add_header(AUTHORIZATION, auth(&users.admin))
            .json(&json!({ "current_occupancy": 121 }))
            .await;
        too_many.assert_status(StatusCode::BAD_REQUEST);

        let negative = server
            .put(&format!("/api/v1/halls/{}/occupancy", id))
            .add_header(AUTHORIZATION, auth(&users.admin))
            .json(&json!({ "current_occupancy": -1 }))
            .await;
        negative.assert_status(StatusCode::BAD_REQUEST);

        // Shrinking capacity below the residents is refused
        let shrink = server
            .put(&format!("/api/v1/halls/{}", id))
            .add_header(AUTHORIZATION, auth(&users.admin))
            .json(&json!({ "capacity": 50 }))
            .await;
        shrink.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_hall_is_soft() {
        let (server, users) = setup_test_server().await;
        let created = create_hall(&server, &users, hall_body("SPH", TEST_HALL, 100)).await;
        create_hall(&server, &users, hall_body("BBH", "Begum Hall", 50)).await;
        let id = created["id"].as_i64().unwrap();

        server
            .delete(&format!("/api/v1/halls/{}", id))
            .add_header(AUTHORIZATION, auth(&users.admin))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let hall = server.get(&format!("/api/v1/halls/{}", id)).await;
        hall.assert_status(StatusCode::OK);
        assert_eq!(hall.json::<ApiResponse<Value>>().data["is_active"], false);

        let active = server.get("/api/v1/halls/active").await;
        let body: ApiResponse<Vec<Value>> = active.json();
        assert_eq!(body.data.len(), 1);
        assert_eq!(body.data[0]["hall_code"], "BBH");

        let all = server.get("/api/v1/halls").await;
        assert_eq!(all.json::<ApiResponse<Vec<Value>>>().data.len(), 2);
    }

    #[tokio::test]
    async fn test_halls_by_type() {
        let (server, users) = setup_test_server().await;
        create_hall(&server, &users, hall_body("SPH", TEST_HALL, 100)).await;
        let mut female = hall_body("BBH", "Begum Hall", 50);
        female["hall_type"] = json!("FEMALE");
        create_hall(&server, &users, female).await;

        let response = server.get("/api/v1/halls/type/female").await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<Value>> = response.json();
        assert_eq!(body.data.len(), 1);
        assert_eq!(body.data[0]["hall_code"], "BBH");

        server.get("/api/v1/halls/type/mixed").await.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_hall_statistics_follow_writes() {
        let (server, users) = setup_test_server().await;

        let empty = server.get("/api/v1/halls/statistics/capacity").await;
        empty.assert_status(StatusCode::OK);
        assert_eq!(empty.json::<ApiResponse<i64>>().data, 0);

        let created = create_hall(&server, &users, hall_body("SPH", TEST_HALL, 100)).await;
        let mut female = hall_body("BBH", "Begum Hall", 50);
        female["hall_type"] = json!("FEMALE");
        female["current_occupancy"] = json!(20);
        create_hall(&server, &users, female).await;

        // Cached totals were invalidated by the inserts
        let capacity = server.get("/api/v1/halls/statistics/capacity").await;
        assert_eq!(capacity.json::<ApiResponse<i64>>().data, 150);
        let occupancy = server.get("/api/v1/halls/statistics/occupancy").await;
        assert_eq!(occupancy.json::<ApiResponse<i64>>().data, 20);
        let available = server.get("/api/v1/halls/statistics/available").await;
        assert_eq!(available.json::<ApiResponse<i64>>().data, 130);

        let summary = server.get("/api/v1/halls/statistics/summary").await;
        summary.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = summary.json();
        let by_type = body.data["by_type"].as_array().unwrap();
        assert_eq!(by_type.len(), 2);
        assert_eq!(by_type[0]["hall_type"], "FEMALE");
        assert_eq!(by_type[0]["total_occupancy"], 20);

        // Deactivated halls drop out of the totals
        server
            .delete(&format!("/api/v1/halls/{}", created["id"]))
            .add_header(AUTHORIZATION, auth(&users.admin))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        let capacity = server.get("/api/v1/halls/statistics/capacity").await;
        assert_eq!(capacity.json::<ApiResponse<i64>>().data, 50);
    }

    // Complaints

    #[tokio::test]
    async fn test_create_complaint_defaults() {
        let (server, users) = setup_test_server().await;

        let complaint = file_complaint(&server, &users.student, "Water leak").await;

        assert_eq!(complaint["status"], "OPEN");
        assert_eq!(complaint["priority"], "MEDIUM");
        assert_eq!(complaint["user_id"], users.student.id);
        assert_eq!(complaint["user_name"], "Rahim");
        assert!(complaint["resolved_at"].is_null());
    }

    #[tokio::test]
    async fn test_complaint_visibility() {
        let (server, users) = setup_test_server().await;
        let mine = file_complaint(&server, &users.student, "Water leak").await;
        file_complaint(&server, &users.other_student, "Broken fan").await;

        let own = server
            .get("/api/v1/complaints")
            .add_header(AUTHORIZATION, auth(&users.student))
            .await;
        let body: ApiResponse<Vec<Value>> = own.json();
        assert_eq!(body.data.len(), 1);
        assert_eq!(body.data[0]["title"], "Water leak");

        let desk = server
            .get("/api/v1/complaints")
            .add_header(AUTHORIZATION, auth(&users.staff))
            .await;
        assert_eq!(desk.json::<ApiResponse<Vec<Value>>>().data.len(), 2);

        let filtered = server
            .get("/api/v1/complaints")
            .add_query_param("user_id", users.other_student.id)
            .add_header(AUTHORIZATION, auth(&users.teacher))
            .await;
        let body: ApiResponse<Vec<Value>> = filtered.json();
        assert_eq!(body.data.len(), 1);
        assert_eq!(body.data[0]["title"], "Broken fan");

        let foreign = server
            .get(&format!("/api/v1/complaints/{}", mine["id"]))
            .add_header(AUTHORIZATION, auth(&users.other_student))
            .await;
        foreign.assert_status(StatusCode::FORBIDDEN);

        let by_other_user = server
            .get(&format!("/api/v1/complaints/user/{}", users.student.id))
            .add_header(AUTHORIZATION, auth(&users.other_student))
            .await;
        by_other_user.assert_status(StatusCode::FORBIDDEN);

        let unknown_user = server
            .get("/api/v1/complaints/user/99999")
            .add_header(AUTHORIZATION, auth(&users.staff))
            .await;
        unknown_user.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(
            unknown_user.json::<ErrorResponse>().error,
            "User not found with id: 99999"
        );

        let by_user = server
            .get(&format!("/api/v1/complaints/user/{}", users.student.id))
            .add_header(AUTHORIZATION, auth(&users.staff))
            .await;
        by_user.assert_status(StatusCode::OK);
        assert_eq!(by_user.json::<ApiResponse<Vec<Value>>>().data.len(), 1);

        let my = server
            .get("/api/v1/complaints/my")
            .add_header(AUTHORIZATION, auth(&users.other_student))
            .await;
        assert_eq!(my.json::<ApiResponse<Vec<Value>>>().data.len(), 1);
    }

    #[tokio::test]
    async fn test_complaints_by_status_and_category() {
        let (server, users) = setup_test_server().await;
        file_complaint(&server, &users.student, "Water leak").await;
        file_complaint(&server, &users.student, "Dripping tap").await;

        let open = server
            .get("/api/v1/complaints/status/open")
            .add_header(AUTHORIZATION, auth(&users.staff))
            .await;
        open.assert_status(StatusCode::OK);
        assert_eq!(open.json::<ApiResponse<Vec<Value>>>().data.len(), 2);

        let plumbing = server
            .get("/api/v1/complaints/category/Plumbing")
            .add_header(AUTHORIZATION, auth(&users.staff))
            .await;
        assert_eq!(plumbing.json::<ApiResponse<Vec<Value>>>().data.len(), 2);

        let student = server
            .get("/api/v1/complaints/status/open")
            .add_header(AUTHORIZATION, auth(&users.student))
            .await;
        student.assert_status(StatusCode::FORBIDDEN);

        let unknown = server
            .get("/api/v1/complaints/status/lost")
            .add_header(AUTHORIZATION, auth(&users.staff))
            .await;
        unknown.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_complaint_status_records_timeline() {
        let (server, users) = setup_test_server().await;
        let complaint = file_complaint(&server, &users.student, "Water leak").await;
        let path = format!("/api/v1/complaints/{}/status", complaint["id"]);

        let in_progress = server
            .put(&path)
            .add_header(AUTHORIZATION, auth(&users.staff))
            .json(&json!({ "status": "IN_PROGRESS", "note": "Plumber called" }))
            .await;
        in_progress.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = in_progress.json();
        assert_eq!(body.message, "Complaint status updated successfully");
        assert_eq!(body.data["status"], "IN_PROGRESS");
        assert!(body.data["resolved_at"].is_null());
        assert!(!body.data["updated_at"].is_null());
        assert_eq!(body.data["notes"].as_array().unwrap().len(), 1);

        let resolved = server
            .put(&path)
            .add_header(AUTHORIZATION, auth(&users.staff))
            .json(&json!({ "status": "RESOLVED", "admin_response": "Pipe replaced" }))
            .await;
        resolved.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = resolved.json();
        assert_eq!(body.data["status"], "RESOLVED");
        assert_eq!(body.data["admin_response"], "Pipe replaced");
        assert_eq!(body.data["responded_by"], users.staff.id);
        assert!(!body.data["resolved_at"].is_null());
        let notes = body.data["notes"].as_array().unwrap();
        assert_eq!(notes.len(), 2);
        assert!(notes.iter().all(|n| n["author_id"] == users.staff.id));

        // The first resolution time survives a reopen
        let resolved_at = body.data["resolved_at"].clone();
        let reopened = server
            .put(&path)
            .add_header(AUTHORIZATION, auth(&users.admin))
            .json(&json!({ "status": "OPEN" }))
            .await;
        let body: ApiResponse<Value> = reopened.json();
        assert_eq!(body.data["status"], "OPEN");
        assert_eq!(body.data["resolved_at"], resolved_at);

        let by_student = server
            .put(&path)
            .add_header(AUTHORIZATION, auth(&users.student))
            .json(&json!({ "status": "CLOSED" }))
            .await;
        by_student.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_add_complaint_note() {
        let (server, users) = setup_test_server().await;
        let complaint = file_complaint(&server, &users.student, "Water leak").await;
        let path = format!("/api/v1/complaints/{}/notes", complaint["id"]);

        let response = server
            .post(&path)
            .add_header(AUTHORIZATION, auth(&users.student))
            .json(&json!({ "note": "Still leaking this morning" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        let notes = body.data["notes"].as_array().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0]["note"], "Still leaking this morning");
        assert_eq!(notes[0]["author_name"], "Rahim");
        // The note and the complaint's touch are committed together
        assert_eq!(body.data["updated_at"], notes[0]["created_at"]);

        let blank = server
            .post(&path)
            .add_header(AUTHORIZATION, auth(&users.student))
            .json(&json!({ "note": "   " }))
            .await;
        blank.assert_status(StatusCode::BAD_REQUEST);

        let stranger = server
            .post(&path)
            .add_header(AUTHORIZATION, auth(&users.other_student))
            .json(&json!({ "note": "Me too" }))
            .await;
        stranger.assert_status(StatusCode::FORBIDDEN);

        let detail = server
            .get(&format!("/api/v1/complaints/{}", complaint["id"]))
            .add_header(AUTHORIZATION, auth(&users.staff))
            .await;
        assert_eq!(
            detail.json::<ApiResponse<Value>>().data["notes"].as_array().unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_delete_complaint_rules() {
        let (server, users) = setup_test_server().await;
        let first = file_complaint(&server, &users.student, "Water leak").await;
        let second = file_complaint(&server, &users.student, "Broken fan").await;

        // Desk staff may change a complaint but not delete it
        server
            .delete(&format!("/api/v1/complaints/{}", first["id"]))
            .add_header(AUTHORIZATION, auth(&users.staff))
            .await
            .assert_status(StatusCode::FORBIDDEN);

        server
            .post(&format!("/api/v1/complaints/{}/notes", first["id"]))
            .add_header(AUTHORIZATION, auth(&users.staff))
            .json(&json!({ "note": "Looking into it" }))
            .await
            .assert_status(StatusCode::CREATED);

        server
            .delete(&format!("/api/v1/complaints/{}", first["id"]))
            .add_header(AUTHORIZATION, auth(&users.student))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .delete(&format!("/api/v1/complaints/{}", second["id"]))
            .add_header(AUTHORIZATION, auth(&users.admin))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get(&format!("/api/v1/complaints/{}", first["id"]))
            .add_header(AUTHORIZATION, auth(&users.admin))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    // Meals

    async fn create_meal(server: &TestServer, users: &TestUsers, body: Value) -> Value {
        let response = server
            .post("/api/v1/meals")
            .add_header(AUTHORIZATION, auth(&users.canteen))
            .json(&body)
            .await;
        if response.status_code() != StatusCode::CREATED {
            println!("Error response: {}", response.text());
            panic!("Expected 201 Created, got {}", response.status_code());
        }
        response.json::<ApiResponse<Value>>().data
    }

    #[tokio::test]
    async fn test_create_meal_and_list_by_hall() {
        let (server, users) = setup_test_server().await;
        let hall = create_hall(&server, &users, hall_body("SPH", TEST_HALL, 100)).await;
        let hall_id = hall["id"].as_i64().unwrap();

        let meal = create_meal(
            &server,
            &users,
            json!({
                "hall_id": hall_id,
                "meal_type": "LUNCH",
                "meal_name": "Rice and chicken curry",
                "price": "45.50",
                "quantity": 120
            }),
        )
        .await;
        assert_eq!(meal["hall_code"], "SPH");
        assert_eq!(meal["is_available"], true);
        let price = Decimal::from_str(meal["price"].as_str().unwrap()).unwrap();
        assert_eq!(price, Decimal::new(4550, 2));

        let by_hall = server.get(&format!("/api/v1/meals/hall/{}", hall_id)).await;
        by_hall.assert_status(StatusCode::OK);
        assert_eq!(by_hall.json::<ApiResponse<Vec<Value>>>().data.len(), 1);

        let by_type = server
            .get(&format!("/api/v1/meals/hall/{}/type/lunch", hall_id))
            .await;
        assert_eq!(by_type.json::<ApiResponse<Vec<Value>>>().data.len(), 1);
        let dinner = server
            .get(&format!("/api/v1/meals/hall/{}/type/DINNER", hall_id))
            .await;
        assert!(dinner.json::<ApiResponse<Vec<Value>>>().data.is_empty());

        server.get("/api/v1/meals/hall/99999").await.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_meal_rejections() {
        let (server, users) = setup_test_server().await;
        let hall = create_hall(&server, &users, hall_body("SPH", TEST_HALL, 100)).await;

        let unknown_hall = server
            .post("/api/v1/meals")
            .add_header(AUTHORIZATION, auth(&users.canteen))
            .json(&json!({
                "hall_id": 99999,
                "meal_type": "LUNCH",
                "meal_name": "Khichuri",
                "price": "30",
                "quantity": 10
            }))
            .await;
        unknown_hall.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            unknown_hall.json::<ErrorResponse>().error,
            "Hall not found with id: 99999"
        );

        let negative_price = server
            .post("/api/v1/meals")
            .add_header(AUTHORIZATION, auth(&users.canteen))
            .json(&json!({
                "hall_id": hall["id"],
                "meal_type": "LUNCH",
                "meal_name": "Khichuri",
                "price": "-1",
                "quantity": 10
            }))
            .await;
        negative_price.assert_status(StatusCode::BAD_REQUEST);

        let student = server
            .post("/api/v1/meals")
            .add_header(AUTHORIZATION, auth(&users.student))
            .json(&json!({
                "hall_id": hall["id"],
                "meal_type": "LUNCH",
                "meal_name": "Khichuri",
                "price": "30",
                "quantity": 10
            }))
            .await;
        student.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_todays_meals_in_serving_order() {
        let (server, users) = setup_test_server().await;
        let hall = create_hall(&server, &users, hall_body("SPH", TEST_HALL, 100)).await;
        let hall_id = hall["id"].as_i64().unwrap();
        let today = Utc::now().date_naive().and_hms_opt(12, 0, 0).unwrap();
        let yesterday = today - Duration::days(1);

        for (meal_type, name, date) in [
            ("DINNER", "Fish curry", today),
            ("BREAKFAST", "Paratha", today),
            ("LUNCH", "Beef tehari", yesterday),
        ] {
            create_meal(
                &server,
                &users,
                json!({
                    "hall_id": hall_id,
                    "meal_type": meal_type,
                    "meal_name": name,
                    "price": "40",
                    "quantity": 50,
                    "meal_date": date
                }),
            )
            .await;
        }

        let response = server.get(&format!("/api/v1/meals/hall/{}/today", hall_id)).await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<Value>> = response.json();
        let names: Vec<&str> = body.data.iter().map(|m| m["meal_name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Paratha", "Fish curry"]);

        let everywhere = server.get("/api/v1/meals/today").await;
        assert_eq!(everywhere.json::<ApiResponse<Vec<Value>>>().data.len(), 2);
    }

    #[tokio::test]
    async fn test_meals_in_date_range() {
        let (server, users) = setup_test_server().await;
        let hall = create_hall(&server, &users, hall_body("SPH", TEST_HALL, 100)).await;
        let hall_id = hall["id"].as_i64().unwrap();

        for day in [1, 5, 10] {
            create_meal(
                &server,
                &users,
                json!({
                    "hall_id": hall_id,
                    "meal_type": "LUNCH",
                    "meal_name": format!("Lunch {}", day),
                    "price": "40",
                    "quantity": 50,
                    "meal_date": NaiveDate::from_ymd_opt(2024, 3, day).unwrap().and_hms_opt(13, 0, 0).unwrap()
                }),
            )
            .await;
        }

        let response = server
            .get(&format!("/api/v1/meals/hall/{}/range", hall_id))
            .add_query_param("start", "2024-03-01")
            .add_query_param("end", "2024-03-05")
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<Value>> = response.json();
        let names: Vec<&str> = body.data.iter().map(|m| m["meal_name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Lunch 1", "Lunch 5"]);

        let inverted = server
            .get(&format!("/api/v1/meals/hall/{}/range", hall_id))
            .add_query_param("start", "2024-03-05")
            .add_query_param("end", "2024-03-01")
            .await;
        inverted.assert_status(StatusCode::BAD_REQUEST);

        // The last calendar day chrono can represent still answers
        let open_ended = server
            .get(&format!("/api/v1/meals/hall/{}/range", hall_id))
            .add_query_param("start", "2024-03-05")
            .add_query_param("end", NaiveDate::MAX.to_string())
            .await;
        open_ended.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<Value>> = open_ended.json();
        let names: Vec<&str> = body.data.iter().map(|m| m["meal_name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Lunch 5", "Lunch 10"]);
    }

    #[tokio::test]
    async fn test_update_and_delete_meal() {
        let (server, users) = setup_test_server().await;
        let hall = create_hall(&server, &users, hall_body("SPH", TEST_HALL, 100)).await;
        let hall_id = hall["id"].as_i64().unwrap();
        let meal = create_meal(
            &server,
            &users,
            json!({
                "hall_id": hall_id,
                "meal_type": "DINNER",
                "meal_name": "Fish curry",
                "price": "60",
                "quantity": 30
            }),
        )
        .await;
        let path = format!("/api/v1/meals/{}", meal["id"]);

        let updated = server
            .put(&path)
            .add_header(AUTHORIZATION, auth(&users.canteen))
            .json(&json!({ "is_available": false, "quantity": 0 }))
            .await;
        updated.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = updated.json();
        assert_eq!(body.data["is_available"], false);
        assert_eq!(body.data["meal_name"], "Fish curry");

        let available = server
            .get(&format!("/api/v1/meals/hall/{}/available", hall_id))
            .await;
        assert!(available.json::<ApiResponse<Vec<Value>>>().data.is_empty());

        server
            .delete(&path)
            .add_header(AUTHORIZATION, auth(&users.admin))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
    }

    // Menu board

    #[tokio::test]
    async fn test_menu_board() {
        let (server, users) = setup_test_server().await;
        let today = Utc::now().date_naive();

        let created = server
            .post("/api/v1/menu")
            .add_header(AUTHORIZATION, auth(&users.canteen))
            .json(&json!({
                "hall_name": TEST_HALL,
                "meal_time": "Breakfast",
                "item_name": "Paratha",
                "price": "10"
            }))
            .await;
        created.assert_status(StatusCode::CREATED);
        let item = created.json::<ApiResponse<Value>>().data;
        assert_eq!(item["date"], today.to_string());

        server
            .post("/api/v1/menu")
            .add_header(AUTHORIZATION, auth(&users.canteen))
            .json(&json!({
                "hall_name": "Begum Hall",
                "meal_time": "Lunch",
                "item_name": "Khichuri",
                "price": "35",
                "date": "2024-03-01"
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let todays = server.get("/api/v1/menu/today").await;
        assert_eq!(todays.json::<ApiResponse<Vec<Value>>>().data.len(), 1);

        let hall_menu = server.get("/api/v1/menu/hall/Begum%20Hall").await;
        assert_eq!(hall_menu.json::<ApiResponse<Vec<Value>>>().data.len(), 1);

        let hall_today = server.get("/api/v1/menu/hall/Begum%20Hall/today").await;
        assert!(hall_today.json::<ApiResponse<Vec<Value>>>().data.is_empty());

        let updated = server
            .put(&format!("/api/v1/menu/{}", item["id"]))
            .add_header(AUTHORIZATION, auth(&users.canteen))
            .json(&json!({ "item_name": "Aloo paratha" }))
            .await;
        updated.assert_status(StatusCode::OK);
        assert_eq!(updated.json::<ApiResponse<Value>>().data["item_name"], "Aloo paratha");

        server
            .delete(&format!("/api/v1/menu/{}", item["id"]))
            .add_header(AUTHORIZATION, auth(&users.teacher))
            .await
            .assert_status(StatusCode::FORBIDDEN);
        server
            .delete(&format!("/api/v1/menu/{}", item["id"]))
            .add_header(AUTHORIZATION, auth(&users.canteen))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let all = server.get("/api/v1/menu").await;
        assert_eq!(all.json::<ApiResponse<Vec<Value>>>().data.len(), 1);
    }

    // Notices

    #[tokio::test]
    async fn test_notices_only_show_published() {
        let (server, users) = setup_test_server().await;

        let published = server
            .post("/api/v1/notices")
            .add_header(AUTHORIZATION, auth(&users.teacher))
            .json(&json!({
                "title": "Water supply off",
                "description": "No water on Friday morning",
                "hall_name": TEST_HALL,
                "priority": "high"
            }))
            .await;
        published.assert_status(StatusCode::CREATED);
        let notice = published.json::<ApiResponse<Value>>().data;
        assert_eq!(notice["priority"], "HIGH");
        assert_eq!(notice["published"], true);

        let draft = server
            .post("/api/v1/notices")
            .add_header(AUTHORIZATION, auth(&users.staff))
            .json(&json!({
                "title": "Draft",
                "description": "Not ready",
                "hall_name": TEST_HALL,
                "published": false
            }))
            .await;
        draft.assert_status(StatusCode::CREATED);
        let draft = draft.json::<ApiResponse<Value>>().data;
        assert_eq!(draft["priority"], "NORMAL");

        let list = server.get("/api/v1/notices").await;
        let body: ApiResponse<Vec<Value>> = list.json();
        assert_eq!(body.data.len(), 1);
        assert_eq!(body.data[0]["title"], "Water supply off");

        server
            .get(&format!("/api/v1/notices/{}", draft["id"]))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        // Publishing the draft makes it visible
        server
            .put(&format!("/api/v1/notices/{}", draft["id"]))
            .add_header(AUTHORIZATION, auth(&users.staff))
            .json(&json!({ "published": true }))
            .await
            .assert_status(StatusCode::OK);
        server
            .get(&format!("/api/v1/notices/{}", draft["id"]))
            .await
            .assert_status(StatusCode::OK);

        let other_hall = server
            .get("/api/v1/notices")
            .add_query_param("hall_name", "Begum Hall")
            .await;
        assert!(other_hall.json::<ApiResponse<Vec<Value>>>().data.is_empty());
    }

    #[tokio::test]
    async fn test_notice_permissions() {
        let (server, users) = setup_test_server().await;

        let body = json!({
            "title": "Party",
            "description": "Hall night",
            "hall_name": TEST_HALL
        });
        for user in [&users.student, &users.canteen] {
            server
                .post("/api/v1/notices")
                .add_header(AUTHORIZATION, auth(user))
                .json(&body)
                .await
                .assert_status(StatusCode::FORBIDDEN);
        }

        let created = server
            .post("/api/v1/notices")
            .add_header(AUTHORIZATION, auth(&users.admin))
            .json(&body)
            .await;
        created.assert_status(StatusCode::CREATED);
        let id = created.json::<ApiResponse<Value>>().data["id"].clone();

        server
            .delete(&format!("/api/v1/notices/{}", id))
            .add_header(AUTHORIZATION, auth(&users.teacher))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .get(&format!("/api/v1/notices/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    // Dashboard

    #[tokio::test]
    async fn test_student_dashboard() {
        let (server, users) = setup_test_server().await;
        let mut hall = hall_body("SPH", TEST_HALL, 100);
        hall["current_occupancy"] = json!(40);
        create_hall(&server, &users, hall).await;
        file_complaint(&server, &users.student, "Water leak").await;
        file_complaint(&server, &users.other_student, "Broken fan").await;

        let response = server
            .get("/api/v1/dashboard")
            .add_header(AUTHORIZATION, auth(&users.student))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = response.json();
        assert_eq!(body.message, "Dashboard retrieved successfully");
        assert_eq!(body.data["role"], "STUDENT");
        assert_eq!(body.data["hall"]["available_seats"], 60);
        assert_eq!(body.data["complaint_counts"], json!([{ "status": "OPEN", "count": 1 }]));
        assert!(body.data.get("pending_users").is_none());
    }

    #[tokio::test]
    async fn test_admin_dashboard() {
        let (server, users) = setup_test_server().await;
        create_hall(&server, &users, hall_body("SPH", TEST_HALL, 100)).await;
        file_complaint(&server, &users.student, "Water leak").await;
        file_complaint(&server, &users.other_student, "Broken fan").await;

        let response = server
            .get("/api/v1/dashboard")
            .add_header(AUTHORIZATION, auth(&users.admin))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = response.json();
        assert_eq!(body.data["pending_users"], 1);
        assert_eq!(body.data["total_users"], 7);
        assert_eq!(body.data["hall_statistics"]["total_capacity"], 100);
        assert_eq!(body.data["complaint_counts"][0]["count"], 2);
    }

    #[tokio::test]
    async fn test_staff_and_canteen_dashboards() {
        let (server, users) = setup_test_server().await;
        server
            .post("/api/v1/complaints")
            .add_header(AUTHORIZATION, auth(&users.student))
            .json(&json!({
                "title": "Fire alarm",
                "description": "Alarm keeps ringing",
                "category": "Safety",
                "priority": "URGENT"
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let staff = server
            .get("/api/v1/dashboard")
            .add_header(AUTHORIZATION, auth(&users.staff))
            .await;
        assert_eq!(staff.json::<ApiResponse<Value>>().data["urgent_open_complaints"], 1);

        let canteen = server
            .get("/api/v1/dashboard")
            .add_header(AUTHORIZATION, auth(&users.canteen))
            .await;
        let body: ApiResponse<Value> = canteen.json();
        assert_eq!(body.data["meals"]["total"], 0);
        assert!(body.data["complaint_counts"].as_array().unwrap().is_empty());
    }
}
