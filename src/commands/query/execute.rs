use std::error::Error;

use serde::Serialize;

use super::QueryCmd;
use crate::commands::{Context, Execute};
use crate::db::Database;
use crate::row::RowView;

/// Rows of a query, in result order.
#[derive(Debug, Default, Serialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl QueryResult {
    pub fn from_views(views: Vec<RowView<Option<String>>>) -> Self {
        let columns = views
            .first()
            .map(|row| row.column_names().to_vec())
            .unwrap_or_default();
        let rows = views.into_iter().map(RowView::into_values).collect();
        Self { columns, rows }
    }
}

impl Execute for QueryCmd {
    type Output = QueryResult;

    fn execute(self, context: &Context) -> Result<Self::Output, Box<dyn Error>> {
        let mut db = Database::new(&context.resolver, &context.overrides)?;
        db.connect()?;
        let views = db.query_text(&self.sql)?;
        db.close();
        Ok(QueryResult::from_views(views))
    }
}
