//! Manifest (.lst) parsing
//!
//! Archives carry no file names; a sidecar manifest lists one logical path
//! per entry, in offset-table order. Manifests come from DOS-era tooling:
//! Latin-1 text, backslash separators, optional drive prefixes, stray NULs,
//! and `#` comment lines all occur in the wild.

/// Parse manifest bytes into the ordered list of relative entry paths.
///
/// Per line: NULs are dropped, whitespace trimmed, the text lower-cased and
/// backslashes normalized to slashes. Blank lines, lines shorter than two
/// characters, and `#` comments are skipped. A `drive:`-style prefix is cut
/// through the colon plus one more character, and the remainder is lexically
/// normalized. The result count defines the archive's offset table length.
pub fn parse(bytes: &[u8]) -> Vec<String> {
    // Latin-1: every byte maps to the same code point
    let text: String = bytes.iter().map(|&b| b as char).collect();

    let mut paths = Vec::new();
    for line in text.lines() {
        let line: String = line.chars().filter(|&c| c != '\0').collect();
        let line = line.trim().to_lowercase().replace('\\', "/");
        if line.len() < 2 || line.starts_with('#') {
            continue;
        }
        paths.push(sanitize(&line));
    }
    paths
}

/// Strip any drive prefix and lexically normalize a manifest path
fn sanitize(path: &str) -> String {
    // Drive prefixes cut through the colon and the separator after it
    let path = match path.find(':') {
        Some(at) if at + 2 <= path.len() => &path[at + 2..],
        Some(_) => "",
        None => path,
    };

    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            _ => parts.push(part),
        }
    }
    parts.join("/")
}
