//! Log gRPC Service
//!
//! Implements the generated `commitlog.v1.Log` service on top of the
//! storage engine. Every handler resolves the caller's subject and runs it
//! through the authorizer before touching the log; the engine's typed
//! errors are translated to protocol statuses here and nowhere else:
//!
//! - offset out of range → `OUT_OF_RANGE` (identical for unary and
//!   streaming calls)
//! - permission denied → `PERMISSION_DENIED`
//! - anything else → `INTERNAL`
//!
//! The engine blocks on disk, so log calls are moved onto the blocking
//! thread pool instead of stalling the runtime.

use std::sync::Arc;

use bytes::Bytes;
use commitlog_core::{Error as EngineError, Record};
use commitlog_proto::v1 as pb;
use commitlog_storage::Log as CommitLog;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status, Streaming};
use tracing::{debug, info};

use crate::auth::{self, AuthError, Authorizer};
use crate::discovery::ServerProvider;
use crate::identity;

/// Commitlog gRPC service.
pub struct LogService {
    log: Arc<CommitLog>,
    authorizer: Arc<Authorizer>,
    servers: Arc<dyn ServerProvider>,
}

impl LogService {
    pub fn new(
        log: Arc<CommitLog>,
        authorizer: Arc<Authorizer>,
        servers: Arc<dyn ServerProvider>,
    ) -> Self {
        Self {
            log,
            authorizer,
            servers,
        }
    }

    fn authorize<T>(&self, request: &Request<T>, action: &str) -> Result<String, Status> {
        let subject = identity::subject(request);
        self.authorizer
            .authorize(&subject, action)
            .map_err(auth_status)?;
        Ok(subject)
    }
}

/// Append one record on the blocking pool, returning its offset.
async fn append_record(log: &Arc<CommitLog>, record: pb::Record) -> Result<u64, Status> {
    let record = record_from_proto(record);
    let log = Arc::clone(log);
    tokio::task::spawn_blocking(move || log.append(&record))
        .await
        .map_err(|e| Status::internal(format!("append task failed: {e}")))?
        .map_err(engine_status)
}

/// Read one record on the blocking pool.
async fn read_record(log: &Arc<CommitLog>, offset: u64) -> Result<pb::Record, Status> {
    let log = Arc::clone(log);
    let record = tokio::task::spawn_blocking(move || log.read(offset))
        .await
        .map_err(|e| Status::internal(format!("read task failed: {e}")))?
        .map_err(engine_status)?;
    Ok(record_to_proto(record))
}

fn record_from_proto(record: pb::Record) -> Record {
    Record {
        value: Bytes::from(record.value),
        offset: record.offset,
        term: record.term,
        kind: record.r#type,
    }
}

fn record_to_proto(record: Record) -> pb::Record {
    pb::Record {
        value: record.value.to_vec(),
        offset: record.offset,
        term: record.term,
        r#type: record.kind,
    }
}

/// Translate engine errors into protocol statuses (spec'd mapping: range
/// errors are client-visible, everything else is internal).
fn engine_status(err: EngineError) -> Status {
    match err {
        EngineError::OffsetOutOfRange { offset } => {
            Status::out_of_range(format!("offset out of range: {offset}"))
        }
        other => Status::internal(other.to_string()),
    }
}

fn auth_status(err: AuthError) -> Status {
    match err {
        AuthError::PermissionDenied { .. } => Status::permission_denied(err.to_string()),
        other => Status::internal(other.to_string()),
    }
}

#[tonic::async_trait]
impl pb::log_server::Log for LogService {
    #[tracing::instrument(skip(self, request))]
    async fn create(
        &self,
        request: Request<pb::CreateRecordRequest>,
    ) -> Result<Response<pb::CreateRecordResponse>, Status> {
        let subject = self.authorize(&request, auth::PRODUCE)?;

        let record = request
            .into_inner()
            .record
            .ok_or_else(|| Status::invalid_argument("record is required"))?;

        let offset = append_record(&self.log, record).await?;
        debug!(subject = %subject, offset, "record created");

        Ok(Response::new(pb::CreateRecordResponse { offset }))
    }

    #[tracing::instrument(skip(self, request), fields(offset = request.get_ref().offset))]
    async fn get(
        &self,
        request: Request<pb::GetRecordRequest>,
    ) -> Result<Response<pb::GetRecordResponse>, Status> {
        self.authorize(&request, auth::CONSUME)?;

        let offset = request.into_inner().offset;
        let record = read_record(&self.log, offset).await?;

        Ok(Response::new(pb::GetRecordResponse {
            record: Some(record),
        }))
    }

    type CreateStreamStream = ReceiverStream<Result<pb::CreateRecordResponse, Status>>;

    async fn create_stream(
        &self,
        request: Request<Streaming<pb::CreateRecordRequest>>,
    ) -> Result<Response<Self::CreateStreamStream>, Status> {
        self.authorize(&request, auth::PRODUCE)?;

        let mut inbound = request.into_inner();
        let log = Arc::clone(&self.log);
        let (tx, rx) = mpsc::channel(16);

        tokio::spawn(async move {
            loop {
                match inbound.message().await {
                    Ok(Some(req)) => {
                        let result = match req.record {
                            Some(record) => append_record(&log, record)
                                .await
                                .map(|offset| pb::CreateRecordResponse { offset }),
                            None => Err(Status::invalid_argument("record is required")),
                        };
                        let failed = result.is_err();
                        if tx.send(result).await.is_err() || failed {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(status) => {
                        let _ = tx.send(Err(status)).await;
                        break;
                    }
                }
            }
        });

        Ok(Response::new(ReceiverStream::new(rx)))
    }

    type GetStreamStream = ReceiverStream<Result<pb::GetRecordResponse, Status>>;

    async fn get_stream(
        &self,
        request: Request<Streaming<pb::GetRecordRequest>>,
    ) -> Result<Response<Self::GetStreamStream>, Status> {
        self.authorize(&request, auth::CONSUME)?;

        let mut inbound = request.into_inner();
        let log = Arc::clone(&self.log);
        let (tx, rx) = mpsc::channel(16);

        tokio::spawn(async move {
            loop {
                match inbound.message().await {
                    Ok(Some(req)) => {
                        let result = read_record(&log, req.offset)
                            .await
                            .map(|record| pb::GetRecordResponse {
                                record: Some(record),
                            });
                        let failed = result.is_err();
                        if tx.send(result).await.is_err() || failed {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(status) => {
                        let _ = tx.send(Err(status)).await;
                        break;
                    }
                }
            }
        });

        Ok(Response::new(ReceiverStream::new(rx)))
    }

    #[tracing::instrument(skip(self, request))]
    async fn get_servers(
        &self,
        request: Request<pb::GetServersRequest>,
    ) -> Result<Response<pb::GetServersResponse>, Status> {
        self.authorize(&request, auth::CONSUME)?;

        let servers = self
            .servers
            .get_servers()
            .await
            .map_err(|e| Status::internal(format!("server discovery failed: {e}")))?;

        info!(count = servers.len(), "served cluster member list");

        Ok(Response::new(pb::GetServersResponse {
            servers: servers
                .into_iter()
                .map(|s| pb::Server {
                    id: s.id,
                    rpc_addr: s.rpc_addr,
                    is_leader: s.is_leader,
                })
                .collect(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::PolicyEntry;
    use crate::discovery::{ServerInfo, StaticServerProvider};
    use crate::identity::Subject;
    use commitlog_storage::LogConfig;
    use pb::log_server::Log as _;

    /// Service over a fresh log: "root" may produce and consume, nobody
    /// else may do anything.
    fn make_test_service() -> (LogService, tempfile::TempDir) {
        let temp_dir = tempfile::tempdir().unwrap();
        let log = Arc::new(CommitLog::open(temp_dir.path(), LogConfig::default()).unwrap());

        let authorizer = Arc::new(Authorizer::from_entries(vec![PolicyEntry {
            subject: "root".to_string(),
            actions: vec![auth::PRODUCE.to_string(), auth::CONSUME.to_string()],
        }]));

        let servers = StaticServerProvider::new(vec![ServerInfo {
            id: "node-1".to_string(),
            rpc_addr: "127.0.0.1:8400".to_string(),
            is_leader: true,
        }]);

        (LogService::new(log, authorizer, servers), temp_dir)
    }

    fn as_subject<T>(subject: &str, message: T) -> Request<T> {
        let mut request = Request::new(message);
        request
            .extensions_mut()
            .insert(Subject(subject.to_string()));
        request
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let (service, _temp) = make_test_service();

        let create = service
            .create(as_subject(
                "root",
                pb::CreateRecordRequest {
                    record: Some(pb::Record {
                        value: b"hello world".to_vec(),
                        offset: 0,
                        term: 5,
                        r#type: 2,
                    }),
                },
            ))
            .await
            .unwrap()
            .into_inner();

        let get = service
            .get(as_subject(
                "root",
                pb::GetRecordRequest {
                    offset: create.offset,
                },
            ))
            .await
            .unwrap()
            .into_inner();

        let record = get.record.unwrap();
        assert_eq!(record.value, b"hello world");
        assert_eq!(record.offset, create.offset);
        assert_eq!(record.term, 5);
        assert_eq!(record.r#type, 2);
    }

    #[tokio::test]
    async fn test_get_past_boundary_is_out_of_range() {
        let (service, _temp) = make_test_service();

        let create = service
            .create(as_subject(
                "root",
                pb::CreateRecordRequest {
                    record: Some(pb::Record {
                        value: b"only".to_vec(),
                        ..Default::default()
                    }),
                },
            ))
            .await
            .unwrap()
            .into_inner();

        let err = service
            .get(as_subject(
                "root",
                pb::GetRecordRequest {
                    offset: create.offset + 1,
                },
            ))
            .await
            .unwrap_err();

        assert_eq!(err.code(), tonic::Code::OutOfRange);
        assert!(err.message().contains(&(create.offset + 1).to_string()));
    }

    #[tokio::test]
    async fn test_unauthorized_subject_is_denied() {
        let (service, _temp) = make_test_service();

        let err = service
            .create(as_subject(
                "nobody",
                pb::CreateRecordRequest {
                    record: Some(pb::Record {
                        value: b"x".to_vec(),
                        ..Default::default()
                    }),
                },
            ))
            .await
            .unwrap_err();
        assert_eq!(err.code(), tonic::Code::PermissionDenied);
        assert!(err.message().contains("not permitted"));

        let err = service
            .get(as_subject("nobody", pb::GetRecordRequest { offset: 0 }))
            .await
            .unwrap_err();
        assert_eq!(err.code(), tonic::Code::PermissionDenied);
    }

    #[tokio::test]
    async fn test_anonymous_request_is_denied() {
        let (service, _temp) = make_test_service();

        // No Subject extension and no peer certificate.
        let err = service
            .get(Request::new(pb::GetRecordRequest { offset: 0 }))
            .await
            .unwrap_err();
        assert_eq!(err.code(), tonic::Code::PermissionDenied);
    }

    #[tokio::test]
    async fn test_create_without_record_is_invalid() {
        let (service, _temp) = make_test_service();

        let err = service
            .create(as_subject("root", pb::CreateRecordRequest { record: None }))
            .await
            .unwrap_err();
        assert_eq!(err.code(), tonic::Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_get_servers_reports_static_members() {
        let (service, _temp) = make_test_service();

        let response = service
            .get_servers(as_subject("root", pb::GetServersRequest {}))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(response.servers.len(), 1);
        assert_eq!(response.servers[0].id, "node-1");
        assert!(response.servers[0].is_leader);
    }
}
