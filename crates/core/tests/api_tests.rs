// ═══════════════════════════════════════════════════════════════════
// API Tests — HttpFundApi against a local mock server
// ═══════════════════════════════════════════════════════════════════

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use fund_dashboard_core::api::credentials::Credential;
use fund_dashboard_core::api::http::HttpFundApi;
use fund_dashboard_core::api::traits::{FundApi, UserAction};
use fund_dashboard_core::errors::CoreError;
use fund_dashboard_core::models::settings::Settings;
use fund_dashboard_core::models::transaction::{
    NewTransaction, TransactionStatus, TransactionType, TransactionUpdate,
};
use fund_dashboard_core::models::user::UserRole;

// ═══════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════

fn client_for(server: &ServerGuard) -> HttpFundApi {
    let settings = Settings::with_base_url(server.url()).unwrap();
    HttpFundApi::new(&settings).unwrap()
}

fn credential() -> Credential {
    Credential::bearer("test-token").unwrap()
}

const BEARER: &str = "Bearer test-token";

// ═══════════════════════════════════════════════════════════════════
// Credential
// ═══════════════════════════════════════════════════════════════════

mod credential {
    use super::*;

    #[test]
    fn empty_token_is_missing() {
        assert!(matches!(Credential::bearer("  "), Err(CoreError::MissingCredential)));
        assert!(matches!(Credential::from_stored(None), Err(CoreError::MissingCredential)));
    }

    #[test]
    fn header_and_redacted_debug() {
        let c = Credential::from_stored(Some("abc".into())).unwrap();
        assert_eq!(c.authorization_header(), "Bearer abc");
        assert!(!format!("{c:?}").contains("abc"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Authentication endpoints
// ═══════════════════════════════════════════════════════════════════

mod auth {
    use super::*;

    #[tokio::test]
    async fn sign_in_posts_credentials_without_bearer() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/signin")
            .match_header("authorization", Matcher::Missing)
            .match_body(Matcher::Json(json!({"email": "a@b.io", "password": "pw"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token":"jwt-123","role":"fundManager"}"#)
            .create_async()
            .await;

        let resp = client_for(&server).sign_in("a@b.io", "pw").await.unwrap();
        assert_eq!(resp.token, "jwt-123");
        assert_eq!(resp.role, UserRole::FundManager);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn sign_in_failure_surfaces_server_message() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/signin")
            .with_status(401)
            .with_body(r#"{"message":"Account pending approval"}"#)
            .create_async()
            .await;

        let err = client_for(&server).sign_in("a@b.io", "pw").await.unwrap_err();
        assert!(matches!(err, CoreError::Unauthorized(m) if m == "Account pending approval"));
    }

    #[tokio::test]
    async fn sign_up_returns_message() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/signup")
            .match_body(Matcher::PartialJson(json!({"name": "Lina"})))
            .with_status(201)
            .with_body(r#"{"message":"Registration submitted"}"#)
            .create_async()
            .await;

        let ack = client_for(&server)
            .sign_up("lina@example.com", "pw", "Lina")
            .await
            .unwrap();
        assert_eq!(ack.message.as_deref(), Some("Registration submitted"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Depositor endpoints
// ═══════════════════════════════════════════════════════════════════

mod depositor {
    use super::*;

    #[tokio::test]
    async fn current_user_sends_bearer_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/user")
            .match_header("authorization", BEARER)
            .with_status(200)
            .with_body(r#"{"id":5,"name":"Yass","email":"y@example.com","portfolio":1200.5}"#)
            .create_async()
            .await;

        let user = client_for(&server).current_user(&credential()).await.unwrap();
        assert_eq!(user.id, "5");
        assert_eq!(user.portfolio, 1200.5);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn list_transactions_keeps_api_order() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/transactions/5")
            .match_header("authorization", BEARER)
            .with_status(200)
            .with_body(
                r#"[
                    {"id":2,"type":"Profit","amount":20,"fee":0,"currency":"USD","status":"processed","date":"2025-02-01"},
                    {"id":1,"type":"Deposit","amount":100,"fee":0,"currency":"USD","status":"processed","date":"2025-01-01"}
                ]"#,
            )
            .create_async()
            .await;

        let txs = client_for(&server)
            .list_transactions(&credential(), "5")
            .await
            .unwrap();
        let ids: Vec<&str> = txs.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[tokio::test]
    async fn create_transaction_posts_json() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/transactions")
            .match_header("authorization", BEARER)
            .match_body(Matcher::PartialJson(json!({
                "userId": "5",
                "type": "Deposit",
                "amount": 50.0,
                "status": "pending"
            })))
            .with_status(201)
            .with_body(r#"{"message":"Transaction recorded"}"#)
            .create_async()
            .await;

        let req = NewTransaction {
            user_id: "5".into(),
            transaction_type: TransactionType::Deposit,
            amount: 50.0,
            fee: 0.0,
            currency: "EUR".into(),
            details: "Send funds to EUR".into(),
            status: TransactionStatus::Pending,
        };
        client_for(&server)
            .create_transaction(&credential(), &req)
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn upload_profile_picture_is_multipart() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/users/profile-pic")
            .match_header("authorization", BEARER)
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data".into()),
            )
            .match_body(Matcher::Regex(r#"name="profilePic""#.into()))
            .with_status(200)
            .with_body(r#"{"profilePic":"/uploads/5.png","message":"Profile picture updated"}"#)
            .create_async()
            .await;

        let resp = client_for(&server)
            .upload_profile_picture(&credential(), "me.png", b"PNGDATA".to_vec())
            .await
            .unwrap();
        assert_eq!(resp.profile_pic, "/uploads/5.png");
        assert_eq!(resp.message, "Profile picture updated");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn upload_rejects_non_images_before_sending() {
        let server = Server::new_async().await;
        let err = client_for(&server)
            .upload_profile_picture(&credential(), "cv.pdf", vec![1, 2, 3])
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Fund manager endpoints
// ═══════════════════════════════════════════════════════════════════

mod manager {
    use super::*;

    #[tokio::test]
    async fn moderate_user_hits_action_path() {
        let mut server = Server::new_async().await;
        let approve = server
            .mock("POST", "/api/users/9/approve")
            .match_header("authorization", BEARER)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;
        let delete = server
            .mock("POST", "/api/users/9/delete")
            .with_status(200)
            .create_async()
            .await;

        let api = client_for(&server);
        api.moderate_user(&credential(), "9", UserAction::Approve)
            .await
            .unwrap();
        api.moderate_user(&credential(), "9", UserAction::Delete)
            .await
            .unwrap();
        approve.assert_async().await;
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn set_portfolio_sends_value() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/users/9/portfolio")
            .match_body(Matcher::Json(json!({"portfolio": 2500.0})))
            .with_status(200)
            .create_async()
            .await;

        client_for(&server)
            .set_portfolio(&credential(), "9", 2500.0)
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn update_and_delete_transaction() {
        let mut server = Server::new_async().await;
        let put = server
            .mock("PUT", "/api/transactions/t1")
            .match_body(Matcher::Json(json!({"amount": 90.0, "fee": 1.0, "status": "processed"})))
            .with_status(200)
            .create_async()
            .await;
        let del = server
            .mock("DELETE", "/api/transactions/t1")
            .with_status(204)
            .create_async()
            .await;

        let api = client_for(&server);
        let update = TransactionUpdate {
            amount: 90.0,
            fee: 1.0,
            status: TransactionStatus::Processed,
        };
        api.update_transaction(&credential(), "t1", &update)
            .await
            .unwrap();
        api.delete_transaction(&credential(), "t1").await.unwrap();
        put.assert_async().await;
        del.assert_async().await;
    }

    #[tokio::test]
    async fn pending_requests_include_requester() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/pending-requests")
            .with_status(200)
            .with_body(
                r#"[{"id":"t9","userId":"u2","type":"Withdrawal","amount":40,"fee":0,
                     "currency":"TND","status":"pending","date":"2025-05-05",
                     "details":"RIB 0403","name":"Omar","email":"omar@example.com"}]"#,
            )
            .create_async()
            .await;

        let pending = client_for(&server)
            .pending_requests(&credential())
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].name, "Omar");
        assert_eq!(pending[0].transaction.transaction_type, TransactionType::Withdrawal);
    }

    #[tokio::test]
    async fn list_users_parses_roles() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/users")
            .with_status(200)
            .with_body(
                r#"[{"id":1,"name":"Boss","role":"fundManager","status":"approved"},
                    {"id":2,"name":"Rim","role":"user","status":"pending"}]"#,
            )
            .create_async()
            .await;

        let users = client_for(&server).list_users(&credential()).await.unwrap();
        assert_eq!(users.len(), 2);
        assert!(users[0].is_fund_manager());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Error mapping
// ═══════════════════════════════════════════════════════════════════

mod errors {
    use super::*;

    #[tokio::test]
    async fn api_error_carries_status_and_message() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/transactions")
            .with_status(400)
            .with_body(r#"{"message":"Insufficient balance"}"#)
            .create_async()
            .await;

        let req = NewTransaction {
            user_id: "5".into(),
            transaction_type: TransactionType::Withdrawal,
            amount: 1e9,
            fee: 0.0,
            currency: "USD".into(),
            details: "IBAN".into(),
            status: TransactionStatus::Pending,
        };
        let err = client_for(&server)
            .create_transaction(&credential(), &req)
            .await
            .unwrap_err();
        match err {
            CoreError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Insufficient balance");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_deserialization_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/user")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let err = client_for(&server).current_user(&credential()).await.unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        let settings = Settings::with_base_url("http://127.0.0.1:1").unwrap();
        let api = HttpFundApi::new(&settings).unwrap();
        let err = api.current_user(&credential()).await.unwrap_err();
        assert!(matches!(err, CoreError::Network(_)));
    }

    #[tokio::test]
    async fn invalid_ids_never_reach_the_server() {
        let server = Server::new_async().await;
        let err = client_for(&server)
            .list_transactions(&credential(), "../users")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }
}
