use swc_common::comments::{Comment, CommentKind, Comments, SingleThreadedComments};
use swc_common::BytePos;

pub const DEFAULT_COMMENT_MARKER: &str = "///";

/// Collects translator comments placed before the statement holding a call.
pub struct CommentCollector<'a> {
    comments: &'a SingleThreadedComments,
    marker: &'a str,
    enabled: bool,
}

impl<'a> CommentCollector<'a> {
    pub fn new(comments: &'a SingleThreadedComments, marker: &'a str, enabled: bool) -> Self {
        Self {
            comments,
            marker,
            enabled,
        }
    }

    /// Bodies of the marker comments directly before `statement_start`, in source order.
    ///
    /// Only the last unbroken run of marker comments counts: an ordinary comment
    /// between them starts the run over.
    pub fn collect(&self, statement_start: BytePos) -> Vec<String> {
        if !self.enabled {
            return Vec::new();
        }

        let Some(leading) = self.comments.get_leading(statement_start) else {
            return Vec::new();
        };

        let mut bodies = Vec::new();
        for comment in &leading {
            match self.marker_body(comment) {
                Some(body) => bodies.push(body),
                None => bodies.clear(),
            }
        }
        bodies
    }

    fn marker_body(&self, comment: &Comment) -> Option<String> {
        if !matches!(comment.kind, CommentKind::Line) {
            return None;
        }

        // swc drops the leading `//` of line comments
        let full = format!("//{}", comment.text);
        let rest = full.strip_prefix(self.marker)?;
        // `////` dividers are not `///` markers
        if self.marker.ends_with('/') && rest.starts_with('/') {
            return None;
        }

        let mut chars = rest.chars();
        let body = match chars.next() {
            Some(c) if c.is_whitespace() => chars.as_str(),
            _ => rest,
        };
        Some(body.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swc_common::sync::Lrc;
    use swc_common::{FileName, SourceMap, Spanned};
    use swc_ecma_parser::{lexer::Lexer, Parser, StringInput, Syntax, TsSyntax};

    fn collect_first_stmt(source: &str, marker: &str, enabled: bool) -> Vec<String> {
        let cm: Lrc<SourceMap> = Default::default();
        let fm = cm.new_source_file(FileName::Anon.into(), source.to_string());
        let comments = SingleThreadedComments::default();
        let lexer = Lexer::new(
            Syntax::Typescript(TsSyntax::default()),
            Default::default(),
            StringInput::from(&*fm),
            Some(&comments),
        );
        let module = Parser::new_from(lexer).parse_module().unwrap();
        let start = module.body[0].span().lo;
        CommentCollector::new(&comments, marker, enabled).collect(start)
    }

    #[test]
    fn test_collects_marker_comment() {
        let bodies = collect_first_stmt("/// Greeting on the home page\ngettext(\"Hi\");", "///", true);
        assert_eq!(bodies, vec!["Greeting on the home page"]);
    }

    #[test]
    fn test_strips_at_most_one_space() {
        let bodies = collect_first_stmt("///   indented\ngettext(\"Hi\");", "///", true);
        assert_eq!(bodies, vec!["  indented"]);

        let bodies = collect_first_stmt("///tight\ngettext(\"Hi\");", "///", true);
        assert_eq!(bodies, vec!["tight"]);
    }

    #[test]
    fn test_multiple_comments_in_order() {
        let source = "/// first\n/// second\ngettext(\"Hi\");";
        assert_eq!(collect_first_stmt(source, "///", true), vec!["first", "second"]);
    }

    #[test]
    fn test_rejects_shorter_marker_and_block_comments() {
        assert!(collect_first_stmt("// plain\ngettext(\"Hi\");", "///", true).is_empty());
        assert!(collect_first_stmt("/* block */\ngettext(\"Hi\");", "///", true).is_empty());
    }

    #[test]
    fn test_longer_slash_run_is_not_a_marker() {
        assert!(collect_first_stmt("//// divider\ngettext(\"Hi\");", "///", true).is_empty());
        assert!(collect_first_stmt("////////////\ngettext(\"Hi\");", "///", true).is_empty());
    }

    #[test]
    fn test_plain_comment_breaks_the_run() {
        let source = "/// stale\n// unrelated\n/// kept\ngettext(\"Hi\");";
        assert_eq!(collect_first_stmt(source, "///", true), vec!["kept"]);
    }

    #[test]
    fn test_disabled_collects_nothing() {
        assert!(collect_first_stmt("/// note\ngettext(\"Hi\");", "///", false).is_empty());
    }

    #[test]
    fn test_custom_marker() {
        let bodies = collect_first_stmt("// TRANSLATORS: be brief\ngettext(\"Hi\");", "// TRANSLATORS:", true);
        assert_eq!(bodies, vec!["be brief"]);
    }
}
