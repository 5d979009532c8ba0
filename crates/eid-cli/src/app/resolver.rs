//! Platform and middleware path resolution.

use std::path::PathBuf;

use eid_core::Platform;

use crate::cli::Cli;

/// The platform to resolve for.
///
/// `--platform` / `EID_PLATFORM` wins; otherwise the compile target is
/// used. This is the only place the host platform is looked up.
pub fn resolve_platform(cli: &Cli) -> Platform {
    match cli.platform.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => Platform::from_id(id),
        _ => Platform::from_target_os(std::env::consts::OS),
    }
}

/// The middleware library to load: `--library` if given, else the
/// platform's well-known install path.
pub fn resolve_library_path(cli: &Cli, platform: &Platform) -> PathBuf {
    match cli.library.as_deref() {
        Some(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from(platform.middleware_path()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use eid_core::platform::{DARWIN_MIDDLEWARE_PATH, DEFAULT_MIDDLEWARE_PATH};

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["eid"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_explicit_platform() {
        let cli = parse(&["--platform", "darwin"]);
        let platform = resolve_platform(&cli);
        assert_eq!(platform, Platform::Darwin);
        assert_eq!(
            resolve_library_path(&cli, &platform),
            PathBuf::from(DARWIN_MIDDLEWARE_PATH)
        );
    }

    #[test]
    fn test_unknown_platform_uses_default_path() {
        let cli = parse(&["--platform", "freebsd"]);
        let platform = resolve_platform(&cli);
        assert_eq!(
            resolve_library_path(&cli, &platform),
            PathBuf::from(DEFAULT_MIDDLEWARE_PATH)
        );
    }

    #[test]
    fn test_library_override() {
        let cli = parse(&["--platform", "win32", "--library", "/opt/pkcs11.so"]);
        let platform = resolve_platform(&cli);
        assert_eq!(
            resolve_library_path(&cli, &platform),
            PathBuf::from("/opt/pkcs11.so")
        );
    }
}
