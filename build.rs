use std::{env, fs, path::PathBuf};

const DEFAULT_DEBOUNCE_MS: u64 = 200;
const DEFAULT_REFRESH_MS: u64 = 100;
const DEFAULT_MAX_CURRENT_MA: u64 = 0;

fn main() {
    // 1) Handle memory.x for the RP2040 target
    let target = env::var("TARGET").unwrap();
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    if target.starts_with("thumbv6m") {
        let memory_x = fs::read_to_string("memory.x").expect("Failed to read memory.x");
        let dest = out_dir.join("memory.x");
        fs::write(&dest, memory_x).expect("Failed to write memory.x");
        println!("cargo:rustc-link-search={}", out_dir.display());
        println!("cargo:rerun-if-changed=memory.x");
    }

    // 2) Load optional env files (still supported for convenience)
    let _ = dotenvy::from_filename(".env");
    load_home_env(".pico.env");

    // 3) Tuning knobs, validated here so a typo fails the build instead of the board
    let debounce_ms = env_u64_or_default("DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS);
    let refresh_ms = env_u64_or_default("REFRESH_MS", DEFAULT_REFRESH_MS);
    let max_current_ma = env_u64_or_default("MAX_CURRENT_MA", DEFAULT_MAX_CURRENT_MA);

    if refresh_ms == 0 {
        println!("cargo:warning=REFRESH_MS is 0; the main loop will spin without sleeping");
    }
    assert!(
        u16::try_from(max_current_ma).is_ok(),
        "MAX_CURRENT_MA must fit in u16, got {max_current_ma}"
    );

    // 4) Expose as compile-time constants
    println!("cargo:rustc-env=DEBOUNCE_MS={debounce_ms}");
    println!("cargo:rustc-env=REFRESH_MS={refresh_ms}");
    println!("cargo:rustc-env=MAX_CURRENT_MA={max_current_ma}");

    println!("cargo:rerun-if-env-changed=DEBOUNCE_MS");
    println!("cargo:rerun-if-env-changed=REFRESH_MS");
    println!("cargo:rerun-if-env-changed=MAX_CURRENT_MA");
    println!("cargo:rerun-if-changed=.env");
}

fn load_home_env(file: &str) {
    let home = match env::var_os("USERPROFILE").or_else(|| env::var_os("HOME")) {
        Some(path) => PathBuf::from(path),
        None => return,
    };
    let path = home.join(file);
    let _ = dotenvy::from_path(&path);
}

fn env_u64_or_default(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a non-negative integer, got {value:?}")),
        Err(_) => default,
    }
}
