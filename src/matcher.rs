use std::borrow::Cow;
use swc_ecma_ast::{Callee, ComputedPropName, Expr, MemberProp};

use crate::fold::string_literal;

/// Name a call's callee resolves to, if it has a shape we recognize.
///
/// - `gettext(..)` gives `gettext`
/// - `i18n.gettext(..)` gives `gettext`
/// - `i18n["gettext"](..)` gives `gettext`
/// - `(gettext)(..)` gives `gettext`
///
/// Anything else (calls on call results, computed keys that aren't literals,
/// `super(..)`, `import(..)`) gives `None`.
pub fn callee_name(callee: &Callee) -> Option<Cow<'_, str>> {
    let Callee::Expr(expr) = callee else {
        return None;
    };

    match expr.unwrap_parens() {
        Expr::Ident(ident) => Some(Cow::Borrowed(ident.sym.as_ref())),
        Expr::Member(member) => match &member.prop {
            MemberProp::Ident(prop) => Some(Cow::Borrowed(prop.sym.as_ref())),
            MemberProp::Computed(ComputedPropName { expr, .. }) => {
                string_literal(expr).map(Cow::Owned)
            }
            _ => None,
        },
        _ => None,
    }
}
