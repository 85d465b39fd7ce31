//! Data access layer repositories.
//!
//! This module contains all database repository implementations for the application.
//! Repositories provide an abstraction layer over database operations, organizing
//! data access by domain (accounts, bookshelf books, the catalog and API books).
//! Each repository is generic over [`sea_orm::ConnectionTrait`] so it runs the same
//! against a pooled connection or inside a transaction.

pub mod api_book;
pub mod book;
pub mod catalog;
pub mod user;

use sea_orm::{
    sea_query::{Expr, ExprTrait, Func, LikeExpr},
    ColumnTrait,
};

/// Case-insensitive "`column` contains `text`" condition.
///
/// `%`, `_` and `\` in `text` match themselves rather than acting as wildcards.
pub(crate) fn icontains<T: ColumnTrait>(column: T, text: &str) -> Expr {
    Func::lower(Expr::col(column.as_column_ref()))
        .like(LikeExpr::new(contains_pattern(text)).escape('\\'))
}

fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');

    pattern
}
