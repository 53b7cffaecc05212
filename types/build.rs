fn main() {
    println!("cargo:rerun-if-changed=proto/blockmult.proto");
    tonic_prost_build::configure()
        .compile_protos(&["proto/blockmult.proto"], &["proto/"])
        .expect("Failed to compile proto/blockmult.proto");
}
