//! Linux-safe file stems for video identifiers.

/// Maps a video identifier to a file stem that stays inside its split directory.
///
/// - Replaces NUL, `/`, `\`, whitespace and control characters with `_`
/// - Leaves everything else untouched (YouTube ids may start with `-` or `_`
///   or contain `__`, and those must survive)
/// - Rewrites the special names `.` and `..`
/// - Limits length to 255 bytes minus room for the extension (Linux NAME_MAX)
pub fn file_stem_for_id(id: &str) -> String {
    const STEM_MAX: usize = 255 - 8;

    let mut out: String = id
        .chars()
        .map(|c| {
            if c == '\0' || c == '/' || c == '\\' || c.is_control() || c.is_whitespace() {
                '_'
            } else {
                c
            }
        })
        .collect();

    if out.is_empty() || out.chars().all(|c| c == '.') {
        out = out.replace('.', "_");
        if out.is_empty() {
            out.push('_');
        }
    }

    if out.len() > STEM_MAX {
        let mut take = STEM_MAX;
        while take > 0 && !out.is_char_boundary(take) {
            take -= 1;
        }
        out.truncate(take);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn youtube_ids_unchanged() {
        for id in ["abc123", "--PJHxphWEs", "_xX9__a-1Q0", "7fmOlUlwoNg"] {
            assert_eq!(file_stem_for_id(id), id);
        }
    }

    #[test]
    fn separators_replaced() {
        assert_eq!(file_stem_for_id("../etc/passwd"), ".._etc_passwd");
        assert_eq!(file_stem_for_id("a\\b c"), "a_b_c");
        assert_eq!(file_stem_for_id("a\0b"), "a_b");
    }

    #[test]
    fn dot_names_rewritten() {
        assert_eq!(file_stem_for_id(".."), "__");
        assert_eq!(file_stem_for_id("."), "_");
        assert_eq!(file_stem_for_id(""), "_");
    }

    #[test]
    fn long_ids_truncated() {
        let long = "x".repeat(400);
        assert_eq!(file_stem_for_id(&long).len(), 247);
    }
}
