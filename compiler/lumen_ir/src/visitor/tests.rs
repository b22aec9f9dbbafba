use pretty_assertions::assert_eq;

use super::*;
use crate::ast::{BinaryOp, ExprKind, Literal};
use crate::{FileId, UnitBuilder};

/// `float main() { int x = (1 + 2); return x * 3; }` plus a global.
fn sample_unit() -> (ShaderUnit, ExprId, ExprId) {
    let mut b = UnitBuilder::new(FileId::new(0));
    let g = b.int(7);
    b.global("Scale", "int", Some(g));

    let one = b.int(1);
    let two = b.int(2);
    let sum = b.binary(BinaryOp::Add, one, two);
    let paren = b.paren(sum);
    let decl = b.decl("x", "int", Some(paren));
    let x = b.ident("x");
    let three = b.int(3);
    let product = b.binary(BinaryOp::Mul, x, three);
    let ret = b.return_stmt(Some(product));
    let body = b.block(vec![decl, ret]);
    b.function("main", Vec::new(), "float", body);
    (b.finish(), paren, sum)
}

#[derive(Default)]
struct LiteralCounter {
    literals: usize,
    statements: usize,
}

impl<'ast> Visitor<'ast> for LiteralCounter {
    fn visit_expr(&mut self, expr: &'ast Expr, arena: &'ast ShaderArena) {
        if matches!(expr.kind, ExprKind::Literal(_)) {
            self.literals += 1;
        }
        walk_expr(self, expr, arena);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt, arena: &'ast ShaderArena) {
        self.statements += 1;
        walk_stmt(self, stmt, arena);
    }
}

#[test]
fn visitor_reaches_every_node() {
    let (unit, _, _) = sample_unit();
    let mut counter = LiteralCounter::default();
    counter.visit_unit(&unit);
    assert_eq!(counter.literals, 4);
    assert_eq!(counter.statements, 3);
}

/// Replaces parens with their inner expression and `return` with `discard`,
/// recording the order in which hooks fire.
struct Recorder {
    mode: RewriteMode,
    order: Vec<String>,
}

impl Recorder {
    fn new(mode: RewriteMode) -> Self {
        Recorder {
            mode,
            order: Vec::new(),
        }
    }
}

impl Rewriter for Recorder {
    fn rewrite_mode(&self) -> RewriteMode {
        self.mode
    }

    fn enter_item(&mut self, item: &Item, _arena: &ShaderArena) {
        self.order.push(format!("enter {}", item.name()));
    }

    fn leave_item(&mut self, item: &Item, _arena: &ShaderArena) {
        self.order.push(format!("leave {}", item.name()));
    }

    fn rewrite_stmt(&mut self, id: StmtId, arena: &ShaderArena) -> Option<Stmt> {
        let stmt = arena.stmt(id);
        match stmt.kind {
            StmtKind::Return(_) => Some(Stmt::new(StmtKind::Discard, stmt.span)),
            _ => None,
        }
    }

    fn rewrite_expr(&mut self, id: ExprId, arena: &ShaderArena) -> Option<Expr> {
        let expr = arena.expr(id);
        self.order.push(format!("{:?}", expr.kind).chars().take(5).collect());
        match expr.kind {
            ExprKind::Paren(inner) => Some(arena.expr(inner).clone()),
            _ => None,
        }
    }
}

#[test]
fn expression_rewrites_replace_in_place() {
    let (mut unit, paren, sum) = sample_unit();
    let mut recorder = Recorder::new(RewriteMode::EXPRESSIONS);
    rewrite_unit(&mut recorder, &mut unit);

    // The paren node now holds the addition it wrapped.
    assert_eq!(unit.arena.expr(paren), unit.arena.expr(sum));
    // Statement rewrites are disabled: the return survives.
    let returns = (0..unit.arena.stmt_count())
        .filter(|i| {
            let id = StmtId::new(u32::try_from(*i).unwrap());
            matches!(unit.arena.stmt(id).kind, StmtKind::Return(_))
        })
        .count();
    assert_eq!(returns, 1);
}

#[test]
fn statement_rewrites_respect_toggle() {
    let (mut unit, paren, _) = sample_unit();
    let mut recorder = Recorder::new(RewriteMode::STATEMENTS);
    rewrite_unit(&mut recorder, &mut unit);

    // Expression rewrites are disabled: the paren survives.
    assert!(matches!(unit.arena.expr(paren).kind, ExprKind::Paren(_)));
    let discards = (0..unit.arena.stmt_count())
        .filter(|i| {
            let id = StmtId::new(u32::try_from(*i).unwrap());
            matches!(unit.arena.stmt(id).kind, StmtKind::Discard)
        })
        .count();
    assert_eq!(discards, 1);
}

#[test]
fn no_toggles_leaves_tree_untouched() {
    let (mut unit, _, _) = sample_unit();
    let before = unit.clone();
    let mut recorder = Recorder::new(RewriteMode::from_toggles(false, false));
    rewrite_unit(&mut recorder, &mut unit);
    assert_eq!(unit, before);
    // Hooks still ran for every expression.
    assert!(recorder.order.len() > 4);
}

#[test]
fn children_are_rewritten_before_parents() {
    let (mut unit, _, _) = sample_unit();
    let mut recorder = Recorder::new(RewriteMode::all());
    rewrite_unit(&mut recorder, &mut unit);
    assert_eq!(
        recorder.order,
        vec![
            "enter Scale",
            "Liter",
            "leave Scale",
            "enter main",
            "Liter",
            "Liter",
            "Binar",
            "Paren",
            "Ident",
            "Liter",
            "Binar",
            "leave main",
        ]
    );
}

#[test]
fn replacements_are_not_revisited() {
    struct Widen {
        calls: usize,
    }

    impl Rewriter for Widen {
        fn rewrite_mode(&self) -> RewriteMode {
            RewriteMode::EXPRESSIONS
        }

        fn rewrite_expr(&mut self, id: ExprId, arena: &ShaderArena) -> Option<Expr> {
            self.calls += 1;
            let expr = arena.expr(id);
            match expr.kind {
                ExprKind::Literal(Literal::Int(v)) => {
                    #[allow(clippy::cast_precision_loss)]
                    let widened = Literal::float(v as f64);
                    Some(Expr::new(ExprKind::Literal(widened), expr.span))
                }
                _ => None,
            }
        }
    }

    let mut b = UnitBuilder::new(FileId::new(0));
    let five = b.int(5);
    b.global("g", "float", Some(five));
    let mut unit = b.finish();

    let mut widen = Widen { calls: 0 };
    rewrite_unit(&mut widen, &mut unit);
    assert_eq!(widen.calls, 1);
    assert_eq!(unit.arena.expr(five).kind, ExprKind::Literal(Literal::float(5.0)));
}

#[test]
fn toggles_map_to_flags() {
    assert_eq!(RewriteMode::from_toggles(true, true), RewriteMode::all());
    assert_eq!(
        RewriteMode::from_toggles(true, false),
        RewriteMode::EXPRESSIONS
    );
    assert_eq!(RewriteMode::default(), RewriteMode::all());
}
