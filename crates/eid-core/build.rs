//! Build script for eid-core
//!
//! With `test-support` on a Unix target, compiles the fake PKCS#11 modules
//! used by the native binding tests and exposes their directory as
//! `EID_FAKE_PKCS11_DIR`. Tests that need them are skipped when the
//! variable is absent.

use std::env;
use std::path::{Path, PathBuf};

const FIXTURE: &str = "tests/fixtures/fake_pkcs11.c";

/// Module variants: file stem suffix and compile-time overrides.
const VARIANTS: &[(&str, &[&str])] = &[
    ("ok", &[]),
    ("init_fail", &["-DFAKE_INIT_RV=5UL"]),
    ("find_fault", &["-DFAKE_FIND_INIT_RV=0x32UL"]),
    ("no_slots", &["-DFAKE_SLOT_COUNT=0UL"]),
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed={}", FIXTURE);

    let unix = env::var("CARGO_CFG_TARGET_FAMILY").is_ok_and(|family| family == "unix");
    if env::var_os("CARGO_FEATURE_TEST_SUPPORT").is_none() || !unix {
        return;
    }
    let Some(out_dir) = env::var_os("OUT_DIR").map(PathBuf::from) else {
        return;
    };

    match build_fake_modules(&out_dir) {
        Ok(()) => println!("cargo:rustc-env=EID_FAKE_PKCS11_DIR={}", out_dir.display()),
        Err(err) => println!(
            "cargo:warning=fake PKCS#11 modules not built, native binding tests will be skipped: {}",
            err
        ),
    }
}

fn build_fake_modules(out_dir: &Path) -> Result<(), String> {
    let compiler = cc::Build::new()
        .cargo_metadata(false)
        .try_get_compiler()
        .map_err(|e| e.to_string())?;
    let macos = env::var("CARGO_CFG_TARGET_OS").is_ok_and(|os| os == "macos");

    for (name, defines) in VARIANTS {
        let output = out_dir.join(format!("libfake_pkcs11_{}.so", name));
        let mut cmd = compiler.to_command();
        cmd.arg(if macos { "-dynamiclib" } else { "-shared" })
            .arg("-fPIC")
            .args(defines.iter())
            .arg("-o")
            .arg(&output)
            .arg(FIXTURE);
        if !macos {
            cmd.arg("-ldl");
        }

        let status = cmd.status().map_err(|e| e.to_string())?;
        if !status.success() {
            return Err(format!("compiling {} ({}) failed: {}", FIXTURE, name, status));
        }
    }
    Ok(())
}
