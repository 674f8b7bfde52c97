//! End-to-end service tests over a real in-process gRPC server.
//!
//! Each test starts a plaintext server on an ephemeral port and drives it
//! with a real client. Identity without TLS resolves to "anonymous", so
//! authorized scenarios grant that subject and the unauthorized scenario
//! grants nothing.

use std::sync::Arc;

use commitlog_proto::v1::log_client::LogClient;
use commitlog_proto::v1::log_server::LogServer;
use commitlog_proto::v1::{
    CreateRecordRequest, GetRecordRequest, GetServersRequest, Record,
};
use commitlog_server::auth::{PolicyEntry, CONSUME, PRODUCE};
use commitlog_server::{Authorizer, LogService, ServerInfo, StaticServerProvider};
use commitlog_storage::{Log, LogConfig};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::{Channel, Server};
use tonic::Code;

/// Start a server whose policy contains exactly `entries`; returns a
/// connected client and the log's temp dir (kept alive for the test).
async fn start_server(entries: Vec<PolicyEntry>) -> (LogClient<Channel>, TempDir) {
    let temp_dir = tempfile::tempdir().unwrap();
    let log = Arc::new(Log::open(temp_dir.path(), LogConfig::default()).unwrap());
    let authorizer = Arc::new(Authorizer::from_entries(entries));
    let servers = StaticServerProvider::new(vec![ServerInfo {
        id: "node-1".to_string(),
        rpc_addr: "127.0.0.1:8400".to_string(),
        is_leader: true,
    }]);

    let service = LogService::new(log, authorizer, servers);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        Server::builder()
            .add_service(LogServer::new(service))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .unwrap();
    });

    let client = LogClient::connect(format!("http://{addr}")).await.unwrap();
    (client, temp_dir)
}

fn anonymous_full_access() -> Vec<PolicyEntry> {
    vec![PolicyEntry {
        subject: "anonymous".to_string(),
        actions: vec![PRODUCE.to_string(), CONSUME.to_string()],
    }]
}

#[tokio::test]
async fn test_create_get_round_trip() {
    let (mut client, _temp) = start_server(anonymous_full_access()).await;

    let create = client
        .create(CreateRecordRequest {
            record: Some(Record {
                value: b"hello world".to_vec(),
                ..Default::default()
            }),
        })
        .await
        .unwrap()
        .into_inner();

    let get = client
        .get(GetRecordRequest {
            offset: create.offset,
        })
        .await
        .unwrap()
        .into_inner();

    let record = get.record.unwrap();
    assert_eq!(record.value, b"hello world");
    assert_eq!(record.offset, create.offset);
}

#[tokio::test]
async fn test_get_past_boundary_fails() {
    let (mut client, _temp) = start_server(anonymous_full_access()).await;

    let create = client
        .create(CreateRecordRequest {
            record: Some(Record {
                value: b"hello world!".to_vec(),
                ..Default::default()
            }),
        })
        .await
        .unwrap()
        .into_inner();

    let err = client
        .get(GetRecordRequest {
            offset: create.offset + 1,
        })
        .await
        .unwrap_err();

    assert_eq!(err.code(), Code::OutOfRange);
}

#[tokio::test]
async fn test_create_get_stream_round_trip() {
    let (mut client, _temp) = start_server(anonymous_full_access()).await;

    let values: Vec<&[u8]> = vec![b"hello world 1!", b"hello world 2!"];

    // Stream two creates; each response carries the assigned offset.
    let requests: Vec<CreateRecordRequest> = values
        .iter()
        .map(|v| CreateRecordRequest {
            record: Some(Record {
                value: v.to_vec(),
                ..Default::default()
            }),
        })
        .collect();

    let mut create_stream = client
        .create_stream(tokio_stream::iter(requests))
        .await
        .unwrap()
        .into_inner();

    for want_offset in 0..values.len() as u64 {
        let response = create_stream.message().await.unwrap().unwrap();
        assert_eq!(response.offset, want_offset);
    }
    assert!(create_stream.message().await.unwrap().is_none());

    // Stream the reads back.
    let gets: Vec<GetRecordRequest> = (0..values.len() as u64)
        .map(|offset| GetRecordRequest { offset })
        .collect();

    let mut get_stream = client
        .get_stream(tokio_stream::iter(gets))
        .await
        .unwrap()
        .into_inner();

    for (offset, value) in values.iter().enumerate() {
        let response = get_stream.message().await.unwrap().unwrap();
        let record = response.record.unwrap();
        assert_eq!(record.offset, offset as u64);
        assert_eq!(&record.value, value);
    }
}

#[tokio::test]
async fn test_stream_past_boundary_matches_unary_error_kind() {
    let (mut client, _temp) = start_server(anonymous_full_access()).await;

    client
        .create(CreateRecordRequest {
            record: Some(Record {
                value: b"only".to_vec(),
                ..Default::default()
            }),
        })
        .await
        .unwrap();

    let mut get_stream = client
        .get_stream(tokio_stream::iter(vec![GetRecordRequest { offset: 1 }]))
        .await
        .unwrap()
        .into_inner();

    let err = get_stream.message().await.unwrap_err();
    assert_eq!(err.code(), Code::OutOfRange);
}

#[tokio::test]
async fn test_unauthorized_client_is_not_served() {
    // Empty policy: nobody may do anything.
    let (mut client, _temp) = start_server(vec![]).await;

    let err = client
        .create(CreateRecordRequest {
            record: Some(Record {
                value: b"hello world".to_vec(),
                ..Default::default()
            }),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::PermissionDenied);

    let err = client
        .get(GetRecordRequest { offset: 0 })
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::PermissionDenied);
}

#[tokio::test]
async fn test_get_servers() {
    let (mut client, _temp) = start_server(anonymous_full_access()).await;

    let response = client
        .get_servers(GetServersRequest {})
        .await
        .unwrap()
        .into_inner();

    assert_eq!(response.servers.len(), 1);
    assert_eq!(response.servers[0].id, "node-1");
    assert!(response.servers[0].is_leader);
}
