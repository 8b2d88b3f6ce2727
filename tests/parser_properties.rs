use std::path::Path;

use memotrace::paths::normalize;
use memotrace::trace::TraceParser;
use proptest::prelude::*;

proptest! {
    #[test]
    fn classify_never_panics(line in ".*") {
        let parser = TraceParser::new();
        let _ = parser.classify(&line);
    }

    #[test]
    fn extraction_never_panics_on_junk_logs(log in "(?s).*") {
        let parser = TraceParser::new();
        let _ = parser.candidate_paths(&log);
    }

    #[test]
    fn normalize_is_idempotent(raw in "[a-z./]{0,40}") {
        let once = normalize(Path::new(&raw));
        prop_assert_eq!(normalize(&once), once.clone());
    }

    #[test]
    fn watched_quoted_lines_always_yield_their_path(path in "[a-zA-Z0-9_./-]{1,30}") {
        let parser = TraceParser::new();
        let line = format!(r#"open("{path}", O_RDONLY) = 3"#);
        let extracted = parser.candidate_paths(&line);
        prop_assert_eq!(extracted, vec![path.as_str()]);
    }

    #[test]
    fn pid_prefixes_never_change_the_extracted_path(
        pid in 1u32..=99999,
        path in "[a-zA-Z0-9_./-]{1,30}",
    ) {
        let parser = TraceParser::new();
        let bare = format!(r#"stat("{path}", 0x7ffd1234) = 0"#);
        let prefixed = format!("{pid}  {bare}");
        prop_assert_eq!(
            parser.candidate_paths(&bare),
            parser.candidate_paths(&prefixed)
        );
    }
}
