// tests/transport_memory.rs

use serde::Serialize;
use serde_json::{json, Value};

use kdsvc_rpc::{
    // ---
    create_memory_transport,
    operations,
    ClientConfig,
    HttpResponse,
    LoginRequest,
    MemoryController,
    RequestEnvelope,
    RpcClient,
    RpcError,
    TransportKind,
    WebApiClient,
};

const AUTH: &str = "Kingdee.BOS.WebApi.ServicesStub.AuthService";
const FORMS: &str = "Kingdee.BOS.WebApi.ServicesStub.DynamicFormService";

fn facade() -> (WebApiClient, MemoryController) {
    // ---
    let (transport, controller) = create_memory_transport(TransportKind::Plain);
    let rpc = RpcClient::with_transport(transport, ClientConfig::new("http://erp.local/k3cloud/"))
        .expect("client");
    (WebApiClient::from_rpc(rpc), controller)
}

async fn sent(controller: &MemoryController) -> Vec<(String, Vec<Value>)> {
    // ---
    controller
        .requests()
        .await
        .into_iter()
        .map(|r| {
            let path = r.url.path().to_owned();
            let envelope = RequestEnvelope::from_slice(&r.body).expect("envelope");
            (path, envelope.parameters)
        })
        .collect()
}

fn path_of(service: &str, method: &str) -> String {
    format!("/k3cloud/{service}.{method}.common.kdsvc")
}

#[tokio::test]
async fn positional_login_forwards_to_validate_user() {
    // ---
    // Arrange
    // ---
    let (client, controller) = facade();
    controller
        .push_response(HttpResponse::ok(r#"{"LoginResultType":1}"#))
        .await;

    // ---
    // Act
    // ---
    let result = client
        .login_with_args(vec![json!("AA"), json!("bob"), json!("pw"), json!(2052)])
        .await
        .expect("login");

    // ---
    // Assert
    // ---
    assert_eq!(result, json!({"LoginResultType": 1}));
    assert_eq!(
        sent(&controller).await,
        vec![(
            path_of(AUTH, "ValidateUser"),
            vec![json!("AA"), json!("bob"), json!("pw"), json!(2052)],
        )]
    );
}

#[tokio::test]
async fn six_argument_login_picks_form_by_fifth_argument() {
    // ---
    let (client, controller) = facade();

    client
        .login_with_args(vec![
            json!("AA"),
            json!("bob"),
            json!("app"),
            json!("secret"),
            json!(true),
            json!(2052),
        ])
        .await
        .expect("app secret login");

    client
        .login_with_args(vec![
            json!("AA"),
            json!("bob"),
            json!("app"),
            json!("1700000000"),
            json!("c2lnbg=="),
            json!(1033),
        ])
        .await
        .expect("signature login");

    let paths: Vec<String> = sent(&controller).await.into_iter().map(|(p, _)| p).collect();
    assert_eq!(
        paths,
        vec![
            path_of(AUTH, "LoginByAppSecret2"),
            path_of(AUTH, "LoginBySign"),
        ]
    );
}

#[tokio::test]
async fn contract_violations_issue_no_request() {
    // ---
    let (client, controller) = facade();

    let err = client
        .login_with_args(vec![json!("only-one")])
        .await
        .unwrap_err();
    assert!(matches!(err, RpcError::Contract { .. }), "{err:?}");

    let err = client
        .save("BD_MATERIAL", &"not an object")
        .await
        .unwrap_err();
    assert!(matches!(err, RpcError::Contract { operation: "save", .. }), "{err:?}");
    assert!(err.is_pre_flight());

    let err = client.call("noSuchOperation", vec![]).await.unwrap_err();
    assert!(matches!(err, RpcError::Contract { .. }), "{err:?}");

    assert!(controller.requests().await.is_empty());
}

#[tokio::test]
async fn logout_and_data_center_send_empty_parameters() {
    // ---
    let (client, controller) = facade();
    controller.push_response(HttpResponse::ok("true")).await;
    controller
        .push_response(HttpResponse::ok(r#"[{"Id":"5f1a","Name":"Main"}]"#))
        .await;

    assert_eq!(client.logout().await.expect("logout"), json!(true));
    let centers = client.get_data_center().await.expect("data centers");
    assert_eq!(centers[0]["Name"], json!("Main"));

    let sent = sent(&controller).await;
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], (path_of(AUTH, "Logout"), vec![]));
    assert_eq!(
        sent[1].0,
        format!(
            "/k3cloud/{}.common.kdsvc",
            operations::GET_DATA_CENTER.identifier
        )
    );
    assert!(sent[1].1.is_empty());
}

#[derive(Serialize)]
struct SaveData {
    #[serde(rename = "Model")]
    model: Material,
}

#[derive(Serialize)]
struct Material {
    #[serde(rename = "FNumber")]
    number: &'static str,
}

#[tokio::test]
async fn business_operations_forward_form_id_and_data() {
    // ---
    let (client, controller) = facade();
    let data = SaveData {
        model: Material { number: "M-001" },
    };
    let numbers = json!({"Numbers": ["M-001"]});

    client.save("BD_MATERIAL", &data).await.expect("save");
    client.submit("BD_MATERIAL", &numbers).await.expect("submit");
    client.audit("BD_MATERIAL", &numbers).await.expect("audit");
    client
        .execute_operation("BD_MATERIAL", "Forbid", &numbers)
        .await
        .expect("operation");
    client
        .execute_bill_query(&json!({"FormId": "BD_MATERIAL"}))
        .await
        .expect("query");

    let sent = sent(&controller).await;
    assert_eq!(
        sent[0],
        (
            path_of(FORMS, "Save"),
            vec![json!("BD_MATERIAL"), json!({"Model": {"FNumber": "M-001"}})],
        )
    );
    assert_eq!(sent[1].0, path_of(FORMS, "Submit"));
    assert_eq!(sent[2].0, path_of(FORMS, "Audit"));
    assert_eq!(
        sent[3],
        (
            path_of(FORMS, "ExcuteOperation"),
            vec![json!("BD_MATERIAL"), json!("Forbid"), numbers.clone()],
        )
    );
    assert_eq!(
        sent[4],
        (
            path_of(FORMS, "ExecuteBillQuery"),
            vec![json!({"FormId": "BD_MATERIAL"})],
        )
    );
}

#[tokio::test]
async fn call_by_name_matches_named_method() {
    // ---
    let (client, controller) = facade();

    client
        .call("unAudit", vec![json!("SAL_SaleOrder"), json!({"Ids": "100"})])
        .await
        .expect("call");
    client
        .un_audit("SAL_SaleOrder", &json!({"Ids": "100"}))
        .await
        .expect("un_audit");

    let sent = sent(&controller).await;
    assert_eq!(sent[0], sent[1]);
    assert_eq!(sent[0].0, path_of(FORMS, "UnAudit"));
}

#[tokio::test]
async fn session_survives_across_facade_calls() {
    // ---
    let (client, controller) = facade();
    controller
        .push_response(
            HttpResponse::ok(r#"{"LoginResultType":1}"#)
                .with_header("set-cookie", "kdservice-sessionid=s1"),
        )
        .await;

    client
        .login(LoginRequest::credentials("AA", "bob", "pw").kick_off(true))
        .await
        .expect("login");
    client
        .view("BD_MATERIAL", &json!({"Number": "M-001"}))
        .await
        .expect("view");

    let requests = controller.requests().await;
    assert_eq!(requests[0].header("cookie"), None);
    assert_eq!(requests[1].header("cookie"), Some("kdservice-sessionid=s1"));

    let login = RequestEnvelope::from_slice(&requests[0].body).expect("envelope");
    assert_eq!(requests[0].url.path(), path_of(AUTH, "ValidateUser2"));
    assert_eq!(
        login.parameters,
        vec![json!("AA"), json!("bob"), json!("pw"), json!(true), json!(2052)]
    );
}

#[tokio::test]
async fn transport_failure_surfaces_unchanged() {
    // ---
    let (client, controller) = facade();
    controller.push_failure("connection reset by peer").await;

    let err = client
        .delete("BD_MATERIAL", &json!({"Numbers": ["M-001"]}))
        .await
        .unwrap_err();
    assert!(matches!(err, RpcError::Transport(ref m) if m == "connection reset by peer"));
    assert!(!err.is_pre_flight());
}

#[tokio::test]
async fn validate_login_helpers_forward_credentials() {
    // ---
    // Arrange
    // ---
    let (client, controller) = facade();

    // ---
    // Act
    // ---
    client
        .validate_login("AA", "bob", "pw", 2052)
        .await
        .expect("validate_login");
    client
        .validate_login2("AA", "bob", "pw", true, 1033)
        .await
        .expect("validate_login2");

    // ---
    // Assert
    // ---
    assert_eq!(
        sent(&controller).await,
        vec![
            (
                path_of(AUTH, "ValidateUser"),
                vec![json!("AA"), json!("bob"), json!("pw"), json!(2052)],
            ),
            (
                path_of(AUTH, "ValidateUser2"),
                vec![json!("AA"), json!("bob"), json!("pw"), json!(true), json!(1033)],
            ),
        ]
    );
}
