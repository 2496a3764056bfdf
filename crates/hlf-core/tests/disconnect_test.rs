//! Event hub connect/disconnect tests.

use hlf_core::{Connection, ConnectionConfig, ConnectionProfile, ConnectorError};
use hlf_harness::{FakeTransport, TransportCall};

#[tokio::test]
async fn disconnect_when_never_connected_is_a_no_op() {
    let transport = FakeTransport::new();
    let connection = Connection::new(transport.clone(), ConnectionConfig::default());

    connection.disconnect().await.unwrap();

    assert!(transport.calls().is_empty());
    assert!(!connection.is_connected());
}

#[tokio::test]
async fn connect_uses_profile_event_hub_url() {
    let transport = FakeTransport::new();
    let profile = ConnectionProfile {
        event_hub_url: "grpc://vp0:7053".to_string(),
        ..ConnectionProfile::default()
    };
    let connection = Connection::new(transport.clone(), ConnectionConfig::new(profile));
    assert_eq!(connection.profile().event_hub_url, "grpc://vp0:7053");

    connection.connect_event_hub().await.unwrap();
    connection.connect_event_hub().await.unwrap();

    assert!(connection.is_connected());
    assert_eq!(
        transport.calls(),
        vec![TransportCall::EventHubConnect { url: "grpc://vp0:7053".to_string() }]
    );
}

#[tokio::test]
async fn repeated_disconnect_reaches_transport_once() {
    let transport = FakeTransport::new();
    let connection = Connection::new(transport.clone(), ConnectionConfig::default());
    connection.connect_event_hub().await.unwrap();

    connection.disconnect().await.unwrap();
    connection.disconnect().await.unwrap();

    assert_eq!(transport.event_hub_disconnects(), 1);
    assert!(!connection.is_connected());
}

#[tokio::test]
async fn reconnect_allows_another_disconnect() {
    let transport = FakeTransport::new();
    let connection = Connection::new(transport.clone(), ConnectionConfig::default());

    connection.connect_event_hub().await.unwrap();
    connection.disconnect().await.unwrap();
    connection.connect_event_hub().await.unwrap();
    connection.disconnect().await.unwrap();

    assert_eq!(transport.event_hub_disconnects(), 2);
}

#[tokio::test]
async fn failed_connect_stays_disconnected() {
    let transport = FakeTransport::new().failing_event_hub_connect("hub unreachable");
    let connection = Connection::new(transport.clone(), ConnectionConfig::default());

    let err = connection.connect_event_hub().await.unwrap_err();
    assert!(matches!(err, ConnectorError::EventHub(_)));
    assert_eq!(err.to_string(), "hub unreachable");
    assert!(!connection.is_connected());

    connection.disconnect().await.unwrap();
    assert_eq!(transport.event_hub_disconnects(), 0);
}

#[tokio::test]
async fn failed_disconnect_is_reported_once_and_not_retried() {
    let transport = FakeTransport::new().failing_event_hub_disconnect("hub gone");
    let connection = Connection::new(transport.clone(), ConnectionConfig::default());
    connection.connect_event_hub().await.unwrap();

    let err = connection.disconnect().await.unwrap_err();
    assert_eq!(err.to_string(), "hub gone");

    connection.disconnect().await.unwrap();
    assert_eq!(transport.event_hub_disconnects(), 1);
    assert!(!connection.is_connected());
}
