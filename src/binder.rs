use swc_ecma_ast::ExprOrSpread;

use crate::error::ExtractError;
use crate::fold::{fold_literal, string_literal};
use crate::message::{role_index, Role};

/// Fields read from the arguments of one translation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageFields {
    /// `None` when the function has no domain parameter.
    pub domain: Option<String>,
    pub msgid: String,
    pub msgctxt: Option<String>,
    pub msgid_plural: Option<String>,
}

/// Identifies the call being bound, for error messages.
#[derive(Debug, Clone, Copy)]
pub struct CallSite<'a> {
    pub function: &'a str,
    pub location: &'a str,
}

#[derive(Clone, Copy)]
enum Slot {
    Context,
    Domain,
    Plural,
}

/// Bind call arguments to message fields according to `roles`.
///
/// `Ok(None)` means the call is skipped: no msgid argument, or one that doesn't
/// fold to a non-empty string. Declared context, domain and plural slots must be
/// present and plain string literals, otherwise the call is malformed.
pub fn bind(
    roles: &[Role],
    args: &[ExprOrSpread],
    site: CallSite<'_>,
) -> Result<Option<MessageFields>, ExtractError> {
    let Some(msgid_arg) = role_index(roles, &Role::Msgid).and_then(|i| args.get(i)) else {
        return Ok(None);
    };
    let msgid = match folded_argument(msgid_arg) {
        Some(msgid) if !msgid.is_empty() => msgid,
        _ => return Ok(None),
    };

    let msgctxt = bind_slot(roles, args, &Role::Msgctxt, Slot::Context, &msgid, site)?;
    let domain = bind_slot(roles, args, &Role::Domain, Slot::Domain, &msgid, site)?;
    let msgid_plural = bind_slot(roles, args, &Role::MsgidPlural, Slot::Plural, &msgid, site)?;

    Ok(Some(MessageFields {
        domain,
        msgid,
        msgctxt,
        msgid_plural,
    }))
}

fn folded_argument(arg: &ExprOrSpread) -> Option<String> {
    if arg.spread.is_some() {
        return None;
    }
    fold_literal(&arg.expr)
}

fn literal_argument(arg: &ExprOrSpread) -> Option<String> {
    if arg.spread.is_some() {
        return None;
    }
    string_literal(&arg.expr)
}

fn bind_slot(
    roles: &[Role],
    args: &[ExprOrSpread],
    role: &Role,
    slot: Slot,
    msgid: &str,
    site: CallSite<'_>,
) -> Result<Option<String>, ExtractError> {
    let Some(index) = role_index(roles, role) else {
        return Ok(None);
    };

    let function = site.function.to_string();
    let msgid = msgid.to_string();
    let location = site.location.to_string();

    let Some(arg) = args.get(index) else {
        return Err(match slot {
            Slot::Context => ExtractError::MissingContext {
                function,
                msgid,
                location,
            },
            Slot::Domain => ExtractError::MissingDomain {
                function,
                msgid,
                location,
            },
            Slot::Plural => ExtractError::MissingPlural {
                function,
                msgid,
                location,
            },
        });
    };

    match literal_argument(arg) {
        Some(value) => Ok(Some(value)),
        None => Err(match slot {
            Slot::Context => ExtractError::NonLiteralContext {
                function,
                msgid,
                location,
            },
            Slot::Domain => ExtractError::NonLiteralDomain {
                function,
                msgid,
                location,
            },
            Slot::Plural => ExtractError::NonLiteralPlural {
                function,
                msgid,
                location,
            },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::default_identifiers;
    use crate::testing::parse_expr;
    use swc_ecma_ast::Expr;

    fn bind_call(source: &str) -> Result<Option<MessageFields>, ExtractError> {
        let expr = parse_expr(source);
        let Expr::Call(call) = expr.as_ref() else {
            panic!("not a call expression: {}", source);
        };
        let name = crate::matcher::callee_name(&call.callee).unwrap();
        let identifiers = default_identifiers();
        let site = CallSite {
            function: &name,
            location: "test.js:1",
        };
        bind(&identifiers[name.as_ref()], &call.args, site)
    }

    #[test]
    fn test_bind_simple_msgid() {
        let fields = bind_call(r#"gettext("Hi")"#).unwrap().unwrap();
        assert_eq!(fields.msgid, "Hi");
        assert_eq!(fields.domain, None);
        assert_eq!(fields.msgctxt, None);
        assert_eq!(fields.msgid_plural, None);
    }

    #[test]
    fn test_bind_skips_missing_or_dynamic_msgid() {
        assert_eq!(bind_call("gettext()").unwrap(), None);
        assert_eq!(bind_call("gettext(someVariable)").unwrap(), None);
        assert_eq!(bind_call(r#"gettext("Hello " + name)"#).unwrap(), None);
        assert_eq!(bind_call(r#"gettext("")"#).unwrap(), None);
        assert_eq!(bind_call("gettext(...parts)").unwrap(), None);
    }

    #[test]
    fn test_bind_skips_before_checking_other_slots() {
        // no msgid means nothing to report, even with the context missing
        assert_eq!(bind_call("pgettext()").unwrap(), None);
    }

    #[test]
    fn test_bind_all_slots() {
        let fields = bind_call(r#"dcnpgettext("domain", "context", "id", "plural", "n", "category")"#)
            .unwrap()
            .unwrap();
        assert_eq!(fields.domain.as_deref(), Some("domain"));
        assert_eq!(fields.msgctxt.as_deref(), Some("context"));
        assert_eq!(fields.msgid, "id");
        assert_eq!(fields.msgid_plural.as_deref(), Some("plural"));
    }

    #[test]
    fn test_bind_empty_context_is_kept() {
        let fields = bind_call(r#"pgettext("", "File")"#).unwrap().unwrap();
        assert_eq!(fields.msgctxt.as_deref(), Some(""));
    }

    #[test]
    fn test_bind_missing_context_is_error() {
        // msgid sits at index 1, so with one argument the msgid is missing
        assert_eq!(bind_call(r#"pgettext("File")"#).unwrap(), None);

        let roles = vec![Role::Msgid, Role::Msgctxt];
        let expr = parse_expr(r#"f("File")"#);
        let Expr::Call(call) = expr.as_ref() else {
            unreachable!()
        };
        let site = CallSite {
            function: "f",
            location: "test.js:1",
        };
        let err = bind(&roles, &call.args, site).unwrap_err();
        assert!(matches!(err, ExtractError::MissingContext { .. }));
        assert_eq!(err.msgid(), "File");
    }

    #[test]
    fn test_bind_non_literal_context_is_error() {
        let err = bind_call(r#"pgettext(ctx, "File")"#).unwrap_err();
        assert!(matches!(err, ExtractError::NonLiteralContext { .. }));

        let err = bind_call(r#"pgettext("Ve" + "rb", "File")"#).unwrap_err();
        assert!(matches!(err, ExtractError::NonLiteralContext { .. }));
    }

    #[test]
    fn test_bind_domain_errors() {
        let err = bind_call(r#"dgettext(domain, "Hi")"#).unwrap_err();
        assert!(matches!(err, ExtractError::NonLiteralDomain { .. }));
        assert!(err.to_string().contains("domain must be a string literal"));
    }

    #[test]
    fn test_bind_missing_domain_is_error() {
        let roles = vec![Role::Msgid, Role::Domain];
        let expr = parse_expr(r#"f("Hi")"#);
        let Expr::Call(call) = expr.as_ref() else {
            unreachable!()
        };
        let site = CallSite {
            function: "f",
            location: "test.js:1",
        };
        let err = bind(&roles, &call.args, site).unwrap_err();
        assert!(matches!(err, ExtractError::MissingDomain { .. }));
        assert_eq!(err.msgid(), "Hi");
    }

    #[test]
    fn test_bind_parenthesized_literal_slots() {
        let fields = bind_call(r#"pgettext(("Verb"), "File")"#).unwrap().unwrap();
        assert_eq!(fields.msgctxt.as_deref(), Some("Verb"));

        let fields = bind_call(r#"ngettext("Boat", ("Boats"), 2)"#).unwrap().unwrap();
        assert_eq!(fields.msgid_plural.as_deref(), Some("Boats"));

        let fields = bind_call(r#"dgettext((("admin")), "Users")"#).unwrap().unwrap();
        assert_eq!(fields.domain.as_deref(), Some("admin"));

        let err = bind_call(r#"pgettext(("Ve" + "rb"), "File")"#).unwrap_err();
        assert!(matches!(err, ExtractError::NonLiteralContext { .. }));
    }

    #[test]
    fn test_bind_plural_errors() {
        let err = bind_call(r#"ngettext("Boat")"#).unwrap_err();
        assert!(matches!(err, ExtractError::MissingPlural { .. }));

        let err = bind_call(r#"ngettext("Boat", plural, 2)"#).unwrap_err();
        assert!(matches!(err, ExtractError::NonLiteralPlural { .. }));
    }

    #[test]
    fn test_bind_ignores_count_and_category_shape() {
        let fields = bind_call(r#"dcngettext("d", "Boat", "Boats", count, LC_MESSAGES)"#)
            .unwrap()
            .unwrap();
        assert_eq!(fields.msgid_plural.as_deref(), Some("Boats"));
    }
}
