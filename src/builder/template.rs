//! Build-output path templating.
//!
//! Templates are plain strings with three recognized tokens:
//!
//! - `%n` - plugin friendly name
//! - `%v` - plugin version name
//! - `%e` - engine install name
//!
//! Expansion is literal substring replacement. Tokens absent from the
//! template are no-ops, unrecognized `%x` sequences pass through unchanged,
//! and a token-free template comes back untouched. This is intentionally not
//! a general templating engine.

/// Token values for one expansion.
#[derive(Debug, Clone, Copy)]
pub struct TemplateTokens<'a> {
    /// Plugin friendly name (`%n`). May be empty.
    pub plugin_name: &'a str,

    /// Plugin version name (`%v`). May be empty.
    pub plugin_version: &'a str,

    /// Engine install name (`%e`).
    pub engine_name: &'a str,
}

/// Expand a path template.
///
/// Empty token values yield empty path segments, not errors; the three
/// replacements target disjoint substrings, so their order does not matter.
pub fn expand(template: &str, tokens: &TemplateTokens<'_>) -> String {
    template
        .replace("%n", tokens.plugin_name)
        .replace("%v", tokens.plugin_version)
        .replace("%e", tokens.engine_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKENS: TemplateTokens<'static> = TemplateTokens {
        plugin_name: "Foo",
        plugin_version: "1.0",
        engine_name: "UE_4.17",
    };

    #[test]
    fn test_expand_all_tokens() {
        assert_eq!(expand("/Builds/%n/%v/%e", &TOKENS), "/Builds/Foo/1.0/UE_4.17");
    }

    #[test]
    fn test_identity_without_tokens() {
        assert_eq!(expand("/static/path", &TOKENS), "/static/path");
    }

    #[test]
    fn test_absent_tokens_are_noops() {
        assert_eq!(expand("/Builds/%e", &TOKENS), "/Builds/UE_4.17");
    }

    #[test]
    fn test_unknown_sequences_pass_through() {
        assert_eq!(expand("/Builds/%x/%n", &TOKENS), "/Builds/%x/Foo");
    }

    #[test]
    fn test_empty_token_values_make_empty_segments() {
        let tokens = TemplateTokens {
            plugin_name: "",
            plugin_version: "",
            engine_name: "UE_5.0",
        };
        assert_eq!(expand("/Builds/%n/%v/%e", &tokens), "/Builds///UE_5.0");
    }

    #[test]
    fn test_repeated_tokens() {
        assert_eq!(expand("%n-%n", &TOKENS), "Foo-Foo");
    }
}
