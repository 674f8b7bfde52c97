// The protobuf-generated Rust code is checked in at `src/generated.rs`
// (a faithful rendering of `proto/commitlog.proto`) rather than produced
// here, so the crate builds without the `protoc` compiler installed.
//
// To regenerate from the `.proto` in an environment that has `protoc`,
// replace the body with:
//
//     tonic_build::compile_protos("proto/commitlog.proto")?;
//
// and point `src/lib.rs` back at `tonic::include_proto!`.
fn main() {
    println!("cargo:rerun-if-changed=proto/commitlog.proto");
}
