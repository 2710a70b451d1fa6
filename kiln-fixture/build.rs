use std::path::PathBuf;

fn main() {
    let root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("cargo sets CARGO_MANIFEST_DIR"));
    for watched in ["kiln.toml", "schema", "testdata"] {
        println!("cargo:rerun-if-changed={}", root.join(watched).display());
    }
    kiln_build::Builder::from_config(root.join("kiln.toml"))
        .and_then(|builder| builder.run())
        .expect("Failed to generate data layer");
}
