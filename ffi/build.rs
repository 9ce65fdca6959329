use std::env;
use std::path::PathBuf;

fn main() {
    let crate_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo");
    let include_dir = PathBuf::from(&crate_dir).join("include");

    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=cbindgen.toml");

    let generated = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(cbindgen::Config::from_root_or_default(&crate_dir))
        .generate();

    // Header output is best effort; a Rust-only build still succeeds.
    match generated {
        Ok(bindings) => {
            if std::fs::create_dir_all(&include_dir).is_ok() {
                bindings.write_to_file(include_dir.join("http_response.h"));
            }
        }
        Err(e) => println!("cargo:warning=skipping C header generation: {e}"),
    }
}
