//! Builder and shorthand tests

use std::sync::Arc;

use rematch::{Capture, EngineConfig, MatchFlags, MatcherBuilder, Rematch};

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn test_flags_compose_the_modifier() {
        let matcher = Rematch::pattern("/abc/")
            .case_insensitive()
            .unicode()
            .case_insensitive()
            .build()
            .expect("default config is valid");
        assert_eq!(matcher.modifier(), "iu");
        assert_eq!(matcher.expression(), "/abc/iu");
        assert!(matcher.match_one("xxABC").expect("match").is_match());
    }

    #[test]
    fn test_modifier_replaces_flags() {
        let matcher = MatcherBuilder::new("/a.b/")
            .multi_line()
            .modifier("s")
            .build()
            .expect("default config is valid");
        assert_eq!(matcher.modifier(), "s");
        assert!(matcher.match_one("a\nb").expect("match").is_match());
    }

    #[test]
    fn test_default_matchers_share_the_global_engine() {
        let first = Rematch::pattern("/a/").build().expect("valid");
        let second = Rematch::pattern("/b/").build().expect("valid");
        assert!(std::ptr::eq(first.engine(), second.engine()));
        assert!(std::ptr::eq(first.engine(), Arc::as_ptr(&rematch::global_engine())));
    }

    #[test]
    fn test_custom_config_gets_its_own_engine() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"backtrack_limit": 128}"#).expect("valid config json");
        let matcher = Rematch::pattern("/(a+)+$/")
            .config(config)
            .build()
            .expect("valid config");
        assert_eq!(matcher.engine().config().backtrack_limit, 128);

        let err = matcher.match_one(format!("{}!", "a".repeat(4096))).unwrap_err();
        assert!(err.is_backtrack_limit());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = Rematch::pattern("/a/")
            .config(EngineConfig::default().with_recursion_limit(0))
            .build();
        assert!(result.is_err());
    }
}

#[cfg(test)]
mod shorthand_tests {
    use super::*;

    #[test]
    fn test_match_one_shorthand() {
        let found = rematch::match_one(r"/(\d+)-(\d+)/", "12-34 and 56-78").expect("match");
        assert_eq!(found.index(2).and_then(Capture::as_str), Some("34"));
    }

    #[test]
    fn test_match_all_shorthand_with_modifiers() {
        let all = rematch::match_all("/b/i", "aBcb").expect("match_all");
        assert_eq!(all.occurrences(), 2);
    }

    #[test]
    fn test_shorthand_errors_name_the_pattern() {
        let err = rematch::match_one("/x/u", b"\xff").unwrap_err();
        assert!(err.is_bad_utf8());
        assert_eq!(err.to_string(), "BAD_UTF8_ERROR using pattern: /x/u");
    }

    #[test]
    fn test_offsets_through_the_builder() {
        let matcher = Rematch::pattern(r"/\d/").build().expect("valid");
        let all = matcher
            .match_all_with("1a2b3", MatchFlags::OFFSET_CAPTURE, 1)
            .expect("match_all");
        let offsets: Vec<_> = all
            .index(0)
            .expect("group 0")
            .iter()
            .filter_map(Capture::offset)
            .collect();
        assert_eq!(offsets, [2, 4]);
    }
}
