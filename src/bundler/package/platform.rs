//! Go target names to npm platform names.
//!
//! Build tools name targets the Go way (`windows`, `amd64`), npm and Node.js
//! use `process.platform`/`process.arch` names (`win32`, `x64`). Names without
//! a known counterpart pass through unchanged.

/// Operating systems understood by the Go toolchain.
pub const GO_OPERATING_SYSTEMS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "illumos", "ios", "js", "linux",
    "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows",
];

/// Maps a Go `GOOS` to a Node.js `process.platform` value.
pub fn node_os(goos: &str) -> &str {
    match goos {
        "windows" => "win32",
        "solaris" | "illumos" => "sunos",
        other => other,
    }
}

/// Maps a Go `GOARCH` to a Node.js `process.arch` value.
pub fn node_cpu(goarch: &str) -> &str {
    match goarch {
        "amd64" => "x64",
        "386" => "ia32",
        "ppc64le" => "ppc64",
        "mipsle" => "mipsel",
        "mips64le" => "mips64el",
        other => other,
    }
}

/// Finds `(goos, goarch)` in a platform directory name.
///
/// Accepts bare pairs (`darwin_amd64`) as well as build directories that
/// carry a project name and variant (`mytool_darwin_amd64_v1`). The first
/// known OS token wins; the token after it is the architecture.
pub fn parse_platform_segment(segment: &str) -> Option<(&str, &str)> {
    let tokens: Vec<&str> = segment.split('_').collect();
    let os_index = tokens
        .iter()
        .position(|token| GO_OPERATING_SYSTEMS.contains(token))?;
    let arch = tokens.get(os_index + 1).filter(|arch| !arch.is_empty())?;
    Some((tokens[os_index], *arch))
}
