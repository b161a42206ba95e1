use uuid::Uuid;

/// Length of the random hex token embedded in every stored resume name.
const TOKEN_LEN: usize = 16;

/// Returns the extension after the last `.` of the client-supplied file name,
/// ignoring any directory prefix a browser may have sent.
pub fn extension_of(file_name: &str) -> Option<&str> {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    match base.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Some(ext),
        _ => None,
    }
}

/// Builds a collision-resistant storage name `<first>_<last>_<token>.<ext>`.
/// The original extension is kept as sent; only unsafe characters are dropped.
pub fn unique_resume_name(first_name: &str, last_name: &str, original_name: &str) -> String {
    let token: String = Uuid::new_v4().simple().to_string()[..TOKEN_LEN].to_string();
    let stem = sanitize(&format!("{first_name}_{last_name}_{token}"));
    match extension_of(original_name).map(sanitize) {
        Some(ext) if !ext.is_empty() => format!("{stem}.{ext}"),
        _ => stem,
    }
}

/// Reduces arbitrary text to a flat, portable file name component:
/// ASCII alphanumerics plus `-`, `_` and `.`, whitespace folded to `_`,
/// leading and trailing dots/underscores stripped.
pub fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.') {
            out.push(ch);
        } else if ch.is_whitespace() || ch == '/' || ch == '\\' {
            if !out.ends_with('_') {
                out.push('_');
            }
        }
    }
    out.trim_matches(|c| c == '.' || c == '_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of_takes_last_segment() {
        assert_eq!(extension_of("resume.final.PDF"), Some("PDF"));
        assert_eq!(extension_of("C:\\Users\\me\\cv.docx"), Some("docx"));
        assert_eq!(extension_of("noextension"), None);
        assert_eq!(extension_of("trailingdot."), None);
    }

    #[test]
    fn test_sanitize_strips_traversal_and_spaces() {
        assert_eq!(sanitize("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize("Mary Ann"), "Mary_Ann");
        assert_eq!(sanitize("José"), "Jos");
    }

    #[test]
    fn test_unique_name_preserves_extension_and_names() {
        let name = unique_resume_name("Ada", "Lovelace", "My Resume.Pdf");
        assert!(name.starts_with("Ada_Lovelace_"));
        assert!(name.ends_with(".Pdf"));
        assert_eq!(name.len(), "Ada_Lovelace_".len() + TOKEN_LEN + ".Pdf".len());
    }

    #[test]
    fn test_unique_names_do_not_collide() {
        let a = unique_resume_name("Ada", "Lovelace", "cv.pdf");
        let b = unique_resume_name("Ada", "Lovelace", "cv.pdf");
        assert_ne!(a, b);
    }

    #[test]
    fn test_unique_name_never_contains_separators() {
        let name = unique_resume_name("../evil", "..\\name", "x.pdf");
        assert!(!name.contains('/'));
        assert!(!name.contains('\\'));
        assert!(!name.starts_with('.'));
    }
}
