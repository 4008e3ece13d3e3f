use swc_ecma_ast::{BinExpr, BinaryOp, Expr, Lit, ParenExpr, Tpl};

/// Value of a single string literal.
///
/// Template literals count only when they have no `${}` substitutions.
/// Surrounding parentheses are ignored.
pub fn string_literal(expr: &Expr) -> Option<String> {
    match expr.unwrap_parens() {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|s| s.to_string()),
        Expr::Tpl(tpl) => static_template(tpl),
        _ => None,
    }
}

fn static_template(tpl: &Tpl) -> Option<String> {
    if !tpl.exprs.is_empty() || tpl.quasis.len() != 1 {
        return None;
    }

    let quasi = &tpl.quasis[0];
    if let Some(cooked) = quasi.cooked.as_ref() {
        return cooked.as_str().map(|s| s.to_string());
    }
    Some(quasi.raw.to_string())
}

/// Fold string literals joined with `+` into one string.
///
/// Returns `None` as soon as any operand is not foldable; a partially literal
/// concatenation never yields its literal parts. Walks with an explicit stack so
/// nesting depth does not grow the native stack.
pub fn fold_literal(expr: &Expr) -> Option<String> {
    let mut folded = String::new();
    let mut pending: Vec<&Expr> = vec![expr];

    while let Some(node) = pending.pop() {
        match node {
            Expr::Bin(BinExpr {
                op: BinaryOp::Add,
                left,
                right,
                ..
            }) => {
                // right first so left is popped next
                pending.push(right);
                pending.push(left);
            }
            Expr::Paren(ParenExpr { expr, .. }) => pending.push(expr),
            _ => folded.push_str(&string_literal(node)?),
        }
    }

    Some(folded)
}
