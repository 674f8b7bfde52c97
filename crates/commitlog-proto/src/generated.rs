// @generated — equivalent to the output of `tonic-build` / `prost-build`
// for `proto/commitlog.proto` (package `commitlog.v1`).
//
// This module is checked in rather than produced by the build script
// because the `protoc` compiler is not available in every build
// environment. It is a faithful, deterministic rendering of the proto
// definitions and is kept in sync with `proto/commitlog.proto`.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Record {
    #[prost(bytes = "vec", tag = "1")]
    pub value: ::prost::alloc::vec::Vec<u8>,
    #[prost(uint64, tag = "2")]
    pub offset: u64,
    /// Opaque replication metadata, persisted and returned verbatim.
    #[prost(uint64, tag = "3")]
    pub term: u64,
    #[prost(uint32, tag = "4")]
    pub r#type: u32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateRecordRequest {
    #[prost(message, optional, tag = "1")]
    pub record: ::core::option::Option<Record>,
}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct CreateRecordResponse {
    #[prost(uint64, tag = "1")]
    pub offset: u64,
}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct GetRecordRequest {
    #[prost(uint64, tag = "1")]
    pub offset: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetRecordResponse {
    #[prost(message, optional, tag = "1")]
    pub record: ::core::option::Option<Record>,
}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct GetServersRequest {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Server {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub rpc_addr: ::prost::alloc::string::String,
    #[prost(bool, tag = "3")]
    pub is_leader: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetServersResponse {
    #[prost(message, repeated, tag = "1")]
    pub servers: ::prost::alloc::vec::Vec<Server>,
}
/// Generated client implementations.
pub mod log_client {
    #![allow(
        unused_variables,
        dead_code,
        missing_docs,
        clippy::wildcard_imports,
        clippy::let_unit_value
    )]
    use tonic::codegen::http::Uri;
    use tonic::codegen::*;
    /// The replicated commit-log service.
    #[derive(Debug, Clone)]
    pub struct LogClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl LogClient<tonic::transport::Channel> {
        /// Attempt to create a new client by connecting to a given endpoint.
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> LogClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::Error: Into<StdError>,
        T::ResponseBody: Body<Data = Bytes> + std::marker::Send + 'static,
        <T::ResponseBody as Body>::Error: Into<StdError> + std::marker::Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_origin(inner: T, origin: Uri) -> Self {
            let inner = tonic::client::Grpc::with_origin(inner, origin);
            Self { inner }
        }
        pub fn with_interceptor<F>(
            inner: T,
            interceptor: F,
        ) -> LogClient<InterceptedService<T, F>>
        where
            F: tonic::service::Interceptor,
            T::ResponseBody: Default,
            T: tonic::codegen::Service<
                http::Request<tonic::body::BoxBody>,
                Response = http::Response<
                    <T as tonic::client::GrpcService<tonic::body::BoxBody>>::ResponseBody,
                >,
            >,
            <T as tonic::codegen::Service<
                http::Request<tonic::body::BoxBody>,
            >>::Error: Into<StdError> + std::marker::Send + std::marker::Sync,
        {
            LogClient::new(InterceptedService::new(inner, interceptor))
        }
        /// Compress requests with the given encoding.
        #[must_use]
        pub fn send_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.inner = self.inner.send_compressed(encoding);
            self
        }
        /// Enable decompressing responses.
        #[must_use]
        pub fn accept_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.inner = self.inner.accept_compressed(encoding);
            self
        }
        /// Limits the maximum size of a decoded message.
        #[must_use]
        pub fn max_decoding_message_size(mut self, limit: usize) -> Self {
            self.inner = self.inner.max_decoding_message_size(limit);
            self
        }
        /// Limits the maximum size of an encoded message.
        #[must_use]
        pub fn max_encoding_message_size(mut self, limit: usize) -> Self {
            self.inner = self.inner.max_encoding_message_size(limit);
            self
        }
        /// Append one record; returns the offset it was assigned.
        pub async fn create(
            &mut self,
            request: impl tonic::IntoRequest<super::CreateRecordRequest>,
        ) -> std::result::Result<
            tonic::Response<super::CreateRecordResponse>,
            tonic::Status,
        > {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::unknown(
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/commitlog.v1.Log/Create",
            );
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new("commitlog.v1.Log", "Create"));
            self.inner.unary(req, path, codec).await
        }
        /// Read the record stored at an offset.
        pub async fn get(
            &mut self,
            request: impl tonic::IntoRequest<super::GetRecordRequest>,
        ) -> std::result::Result<
            tonic::Response<super::GetRecordResponse>,
            tonic::Status,
        > {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::unknown(
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/commitlog.v1.Log/Get",
            );
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new("commitlog.v1.Log", "Get"));
            self.inner.unary(req, path, codec).await
        }
        /// Append a stream of records; one response per inbound request.
        pub async fn create_stream(
            &mut self,
            request: impl tonic::IntoStreamingRequest<
                Message = super::CreateRecordRequest,
            >,
        ) -> std::result::Result<
            tonic::Response<tonic::codec::Streaming<super::CreateRecordResponse>>,
            tonic::Status,
        > {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::unknown(
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/commitlog.v1.Log/CreateStream",
            );
            let mut req = request.into_streaming_request();
            req.extensions_mut()
                .insert(GrpcMethod::new("commitlog.v1.Log", "CreateStream"));
            self.inner.streaming(req, path, codec).await
        }
        /// Read a stream of offsets; one response per inbound request.
        pub async fn get_stream(
            &mut self,
            request: impl tonic::IntoStreamingRequest<
                Message = super::GetRecordRequest,
            >,
        ) -> std::result::Result<
            tonic::Response<tonic::codec::Streaming<super::GetRecordResponse>>,
            tonic::Status,
        > {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::unknown(
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/commitlog.v1.Log/GetStream",
            );
            let mut req = request.into_streaming_request();
            req.extensions_mut()
                .insert(GrpcMethod::new("commitlog.v1.Log", "GetStream"));
            self.inner.streaming(req, path, codec).await
        }
        /// List the servers of the cluster and which one leads.
        pub async fn get_servers(
            &mut self,
            request: impl tonic::IntoRequest<super::GetServersRequest>,
        ) -> std::result::Result<
            tonic::Response<super::GetServersResponse>,
            tonic::Status,
        > {
            self.inner
                .ready()
                .await
                .map_err(|e| {
                    tonic::Status::unknown(
                        format!("Service was not ready: {}", e.into()),
                    )
                })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/commitlog.v1.Log/GetServers",
            );
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new("commitlog.v1.Log", "GetServers"));
            self.inner.unary(req, path, codec).await
        }
    }
}
/// Generated server implementations.
pub mod log_server {
    #![allow(
        unused_variables,
        dead_code,
        missing_docs,
        clippy::wildcard_imports,
        clippy::let_unit_value
    )]
    use tonic::codegen::*;
    /// Generated trait containing gRPC methods that should be implemented
    /// for use with LogServer.
    #[async_trait]
    pub trait Log: std::marker::Send + std::marker::Sync + 'static {
        /// Append one record; returns the offset it was assigned.
        async fn create(
            &self,
            request: tonic::Request<super::CreateRecordRequest>,
        ) -> std::result::Result<
            tonic::Response<super::CreateRecordResponse>,
            tonic::Status,
        >;
        /// Read the record stored at an offset.
        async fn get(
            &self,
            request: tonic::Request<super::GetRecordRequest>,
        ) -> std::result::Result<
            tonic::Response<super::GetRecordResponse>,
            tonic::Status,
        >;
        /// Server streaming response type for the CreateStream method.
        type CreateStreamStream: tonic::codegen::tokio_stream::Stream<
                Item = std::result::Result<
                    super::CreateRecordResponse,
                    tonic::Status,
                >,
            >
            + std::marker::Send
            + 'static;
        /// Append a stream of records; one response per inbound request.
        async fn create_stream(
            &self,
            request: tonic::Request<tonic::Streaming<super::CreateRecordRequest>>,
        ) -> std::result::Result<
            tonic::Response<Self::CreateStreamStream>,
            tonic::Status,
        >;
        /// Server streaming response type for the GetStream method.
        type GetStreamStream: tonic::codegen::tokio_stream::Stream<
                Item = std::result::Result<
                    super::GetRecordResponse,
                    tonic::Status,
                >,
            >
            + std::marker::Send
            + 'static;
        /// Read a stream of offsets; one response per inbound request.
        async fn get_stream(
            &self,
            request: tonic::Request<tonic::Streaming<super::GetRecordRequest>>,
        ) -> std::result::Result<
            tonic::Response<Self::GetStreamStream>,
            tonic::Status,
        >;
        /// List the servers of the cluster and which one leads.
        async fn get_servers(
            &self,
            request: tonic::Request<super::GetServersRequest>,
        ) -> std::result::Result<
            tonic::Response<super::GetServersResponse>,
            tonic::Status,
        >;
    }
    /// The replicated commit-log service.
    #[derive(Debug)]
    pub struct LogServer<T> {
        inner: Arc<T>,
        accept_compression_encodings: EnabledCompressionEncodings,
        send_compression_encodings: EnabledCompressionEncodings,
        max_decoding_message_size: Option<usize>,
        max_encoding_message_size: Option<usize>,
    }
    impl<T> LogServer<T> {
        pub fn new(inner: T) -> Self {
            Self::from_arc(Arc::new(inner))
        }
        pub fn from_arc(inner: Arc<T>) -> Self {
            Self {
                inner,
                accept_compression_encodings: Default::default(),
                send_compression_encodings: Default::default(),
                max_decoding_message_size: None,
                max_encoding_message_size: None,
            }
        }
        pub fn with_interceptor<F>(
            inner: T,
            interceptor: F,
        ) -> InterceptedService<Self, F>
        where
            F: tonic::service::Interceptor,
        {
            InterceptedService::new(Self::new(inner), interceptor)
        }
        /// Enable decompressing requests with the given encoding.
        #[must_use]
        pub fn accept_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.accept_compression_encodings.enable(encoding);
            self
        }
        /// Compress responses with the given encoding, if the client supports it.
        #[must_use]
        pub fn send_compressed(mut self, encoding: CompressionEncoding) -> Self {
            self.send_compression_encodings.enable(encoding);
            self
        }
        /// Limits the maximum size of a decoded message.
        #[must_use]
        pub fn max_decoding_message_size(mut self, limit: usize) -> Self {
            self.max_decoding_message_size = Some(limit);
            self
        }
        /// Limits the maximum size of an encoded message.
        #[must_use]
        pub fn max_encoding_message_size(mut self, limit: usize) -> Self {
            self.max_encoding_message_size = Some(limit);
            self
        }
    }
    impl<T, B> tonic::codegen::Service<http::Request<B>> for LogServer<T>
    where
        T: Log,
        B: Body + std::marker::Send + 'static,
        B::Error: Into<StdError> + std::marker::Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = std::convert::Infallible;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(
            &mut self,
            _cx: &mut Context<'_>,
        ) -> Poll<std::result::Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            match req.uri().path() {
                "/commitlog.v1.Log/Create" => {
                    #[allow(non_camel_case_types)]
                    struct CreateSvc<T: Log>(pub Arc<T>);
                    impl<
                        T: Log,
                    > tonic::server::UnaryService<super::CreateRecordRequest>
                    for CreateSvc<T> {
                        type Response = super::CreateRecordResponse;
                        type Future = BoxFuture<
                            tonic::Response<Self::Response>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::CreateRecordRequest>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as Log>::create(&inner, request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let method = CreateSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/commitlog.v1.Log/Get" => {
                    #[allow(non_camel_case_types)]
                    struct GetSvc<T: Log>(pub Arc<T>);
                    impl<
                        T: Log,
                    > tonic::server::UnaryService<super::GetRecordRequest>
                    for GetSvc<T> {
                        type Response = super::GetRecordResponse;
                        type Future = BoxFuture<
                            tonic::Response<Self::Response>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::GetRecordRequest>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as Log>::get(&inner, request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let method = GetSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/commitlog.v1.Log/CreateStream" => {
                    #[allow(non_camel_case_types)]
                    struct CreateStreamSvc<T: Log>(pub Arc<T>);
                    impl<
                        T: Log,
                    > tonic::server::StreamingService<super::CreateRecordRequest>
                    for CreateStreamSvc<T> {
                        type Response = super::CreateRecordResponse;
                        type ResponseStream = T::CreateStreamStream;
                        type Future = BoxFuture<
                            tonic::Response<Self::ResponseStream>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<
                                tonic::Streaming<super::CreateRecordRequest>,
                            >,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as Log>::create_stream(&inner, request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let method = CreateStreamSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.streaming(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/commitlog.v1.Log/GetStream" => {
                    #[allow(non_camel_case_types)]
                    struct GetStreamSvc<T: Log>(pub Arc<T>);
                    impl<
                        T: Log,
                    > tonic::server::StreamingService<super::GetRecordRequest>
                    for GetStreamSvc<T> {
                        type Response = super::GetRecordResponse;
                        type ResponseStream = T::GetStreamStream;
                        type Future = BoxFuture<
                            tonic::Response<Self::ResponseStream>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<
                                tonic::Streaming<super::GetRecordRequest>,
                            >,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as Log>::get_stream(&inner, request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let method = GetStreamSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.streaming(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/commitlog.v1.Log/GetServers" => {
                    #[allow(non_camel_case_types)]
                    struct GetServersSvc<T: Log>(pub Arc<T>);
                    impl<
                        T: Log,
                    > tonic::server::UnaryService<super::GetServersRequest>
                    for GetServersSvc<T> {
                        type Response = super::GetServersResponse;
                        type Future = BoxFuture<
                            tonic::Response<Self::Response>,
                            tonic::Status,
                        >;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::GetServersRequest>,
                        ) -> Self::Future {
                            let inner = Arc::clone(&self.0);
                            let fut = async move {
                                <T as Log>::get_servers(&inner, request).await
                            };
                            Box::pin(fut)
                        }
                    }
                    let accept_compression_encodings = self.accept_compression_encodings;
                    let send_compression_encodings = self.send_compression_encodings;
                    let max_decoding_message_size = self.max_decoding_message_size;
                    let max_encoding_message_size = self.max_encoding_message_size;
                    let inner = self.inner.clone();
                    let fut = async move {
                        let method = GetServersSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = tonic::server::Grpc::new(codec)
                            .apply_compression_config(
                                accept_compression_encodings,
                                send_compression_encodings,
                            )
                            .apply_max_message_size_config(
                                max_decoding_message_size,
                                max_encoding_message_size,
                            );
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => {
                    Box::pin(async move {
                        let mut response = http::Response::new(empty_body());
                        let headers = response.headers_mut();
                        headers
                            .insert(
                                tonic::Status::GRPC_STATUS,
                                (tonic::Code::Unimplemented as i32).into(),
                            );
                        headers
                            .insert(
                                http::header::CONTENT_TYPE,
                                tonic::metadata::GRPC_CONTENT_TYPE,
                            );
                        Ok(response)
                    })
                }
            }
        }
    }
    impl<T> Clone for LogServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self {
                inner,
                accept_compression_encodings: self.accept_compression_encodings,
                send_compression_encodings: self.send_compression_encodings,
                max_decoding_message_size: self.max_decoding_message_size,
                max_encoding_message_size: self.max_encoding_message_size,
            }
        }
    }
    /// Generated gRPC service name
    pub const SERVICE_NAME: &str = "commitlog.v1.Log";
    impl<T> tonic::server::NamedService for LogServer<T> {
        const NAME: &'static str = SERVICE_NAME;
    }
}
