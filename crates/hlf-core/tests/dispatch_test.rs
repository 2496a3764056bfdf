//! Query/invoke dispatch and security check tests.

use std::time::Duration;

use bytes::Bytes;
use hlf_core::{Connection, ConnectionConfig, ConnectorError, SecurityError, TransportError};
use hlf_harness::{CountingCheck, FakeTransport, TransportCall};

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[tokio::test]
async fn query_passes_function_and_args_verbatim() {
    let transport = FakeTransport::new()
        .with_chaincode_id("muchchaincodeID")
        .with_query_result("getAsset", Ok(Bytes::from_static(b"asset")));
    let connection = Connection::new(transport.clone(), ConnectionConfig::default());
    let mut context = connection.login("doge", "suchsecret").await.unwrap();
    connection.deploy(&mut context).await.unwrap();

    let result = connection
        .query_chaincode(&context, "getAsset", &args(&["registry", "", "ASSET 1"]))
        .await
        .unwrap();

    assert_eq!(result, Bytes::from_static(b"asset"));
    assert_eq!(
        transport.calls().pop(),
        Some(TransportCall::Query {
            member: context.enrolled_member().clone(),
            chaincode_id: Some("muchchaincodeID".to_string()),
            function: "getAsset".to_string(),
            args: args(&["registry", "", "ASSET 1"]),
        })
    );
}

#[tokio::test]
async fn invoke_passes_function_args_and_wait_hint() {
    let transport = FakeTransport::new()
        .with_chaincode_id("muchchaincodeID")
        .with_invoke_result("submitTransaction", Ok(Bytes::from_static(b"txid")));
    let connection = Connection::new(transport.clone(), ConnectionConfig::default());
    let mut context = connection.login("doge", "suchsecret").await.unwrap();
    connection.deploy(&mut context).await.unwrap();

    let result =
        connection.invoke_chaincode(&context, "submitTransaction", &args(&["{}"])).await.unwrap();

    assert_eq!(result, Bytes::from_static(b"txid"));
    assert_eq!(
        transport.calls().pop(),
        Some(TransportCall::Invoke {
            member: context.enrolled_member().clone(),
            chaincode_id: Some("muchchaincodeID".to_string()),
            function: "submitTransaction".to_string(),
            args: args(&["{}"]),
            wait_time: Some(Duration::from_secs(30)),
        })
    );
}

#[tokio::test]
async fn unbound_context_dispatches_without_chaincode_id() {
    let transport = FakeTransport::new();
    let connection = Connection::new(transport.clone(), ConnectionConfig::default());
    let context = connection.login("doge", "suchsecret").await.unwrap();

    connection.query_chaincode(&context, "getAsset", &[]).await.unwrap();

    let Some(TransportCall::Query { chaincode_id, .. }) = transport.calls().pop() else {
        panic!("expected a trailing query");
    };
    assert_eq!(chaincode_id, None);
}

#[tokio::test]
async fn chaincode_failures_surface_verbatim() {
    let transport = FakeTransport::new()
        .with_query_result("getAsset", Err(TransportError::new("asset not found")))
        .with_invoke_result("submitTransaction", Err(TransportError::new("endorsement failed")));
    let connection = Connection::new(transport, ConnectionConfig::default());
    let context = connection.login("doge", "suchsecret").await.unwrap();

    let err = connection.query_chaincode(&context, "getAsset", &[]).await.unwrap_err();
    assert!(matches!(err, ConnectorError::ChainCode(_)));
    assert_eq!(err.to_string(), "asset not found");

    let err = connection.invoke_chaincode(&context, "submitTransaction", &[]).await.unwrap_err();
    assert!(matches!(err, ConnectorError::ChainCode(_)));
    assert_eq!(err.to_string(), "endorsement failed");
}

#[tokio::test]
async fn query_and_invoke_each_run_one_security_check() {
    let security = CountingCheck::new();
    let connection = Connection::with_security_check(
        FakeTransport::new(),
        ConnectionConfig::default(),
        security.clone(),
    );
    let context = connection.login("doge", "suchsecret").await.unwrap();
    assert_eq!(security.checks(), 0);

    connection.query_chaincode(&context, "getAsset", &[]).await.unwrap();
    assert_eq!(security.checks(), 1);

    connection.invoke_chaincode(&context, "submitTransaction", &[]).await.unwrap();
    assert_eq!(security.checks(), 2);
}

#[tokio::test]
async fn rejected_context_never_reaches_transport() {
    let transport = FakeTransport::new();
    let security = CountingCheck::rejecting("revoked");
    let connection =
        Connection::with_security_check(transport.clone(), ConnectionConfig::default(), security);
    let mut context = connection.login("doge", "suchsecret").await.unwrap();
    let before = transport.calls().len();

    let err = connection.query_chaincode(&context, "getAsset", &[]).await.unwrap_err();
    assert!(matches!(err, ConnectorError::Security(SecurityError::Rejected(ref reason)) if reason == "revoked"));

    assert!(connection.invoke_chaincode(&context, "submitTransaction", &[]).await.is_err());
    assert!(connection.ping(&context).await.is_err());
    assert!(connection.deploy(&mut context).await.is_err());

    assert_eq!(transport.calls().len(), before);
    assert_eq!(context.chaincode_id(), None);
}

#[tokio::test]
async fn context_from_another_connection_is_rejected() {
    let transport = FakeTransport::new();
    let issuer = Connection::new(transport.clone(), ConnectionConfig::default());
    let other = Connection::new(transport.clone(), ConnectionConfig::default());
    let context = issuer.login("doge", "suchsecret").await.unwrap();

    let err = other.query_chaincode(&context, "getAsset", &[]).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        format!(
            "security context issued by connection {} presented to connection {}",
            issuer.id(),
            other.id()
        )
    );
    assert_eq!(transport.count_calls(|call| matches!(call, TransportCall::Query { .. })), 0);
}

#[tokio::test]
async fn deploy_and_ping_check_the_context() {
    let security = CountingCheck::new();
    let connection = Connection::with_security_check(
        FakeTransport::new(),
        ConnectionConfig::default(),
        security.clone(),
    );
    let mut context = connection.login("doge", "suchsecret").await.unwrap();

    connection.ping(&context).await.unwrap();
    assert_eq!(security.checks(), 1);

    // deploy checks once itself, then once more through ping
    connection.deploy(&mut context).await.unwrap();
    assert_eq!(security.checks(), 3);
}

#[tokio::test]
async fn identities_share_one_connection() {
    let transport = FakeTransport::new();
    let connection = Connection::new(transport.clone(), ConnectionConfig::default());
    let alice = connection.login("alice", "s1").await.unwrap();
    let bob = connection.login("bob", "s2").await.unwrap();

    connection.invoke_chaincode(&alice, "submitTransaction", &[]).await.unwrap();
    connection.invoke_chaincode(&bob, "submitTransaction", &[]).await.unwrap();

    let submitters: Vec<String> = transport
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            TransportCall::Invoke { member, .. } => Some(member.enrollment_id),
            _ => None,
        })
        .collect();
    assert_eq!(submitters, vec!["alice".to_string(), "bob".to_string()]);
}
