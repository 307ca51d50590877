//! Link configuration for the `libiop` feature.

fn main() {
    println!("cargo:rerun-if-env-changed=LIBIOP_FFI_DIR");
    if std::env::var_os("CARGO_FEATURE_LIBIOP").is_none() {
        return;
    }
    if let Ok(dir) = std::env::var("LIBIOP_FFI_DIR") {
        println!("cargo:rustc-link-search=native={dir}");
    }
}
