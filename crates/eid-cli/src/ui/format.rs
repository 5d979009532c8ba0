//! String formatting helpers.

/// Truncate to `max_len` characters, ending in "..." when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let kept: String = s.chars().take(max_len - 3).collect();
    format!("{}...", kept)
}

/// Human-readable byte size.
pub fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < KB * KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / (KB * KB) as f64)
    }
}

/// Tail of a long path, prefixed with "...".
pub fn shorten_path(path: &str, max_len: usize) -> String {
    let count = path.chars().count();
    if count <= max_len || max_len <= 3 {
        return path.to_string();
    }
    let tail: String = path.chars().skip(count - (max_len - 3)).collect();
    format!("...{}", tail)
}
