//! Conversion of `postgres` result rows into [`RowView`]s.
//!
//! Typed rows (`Client::query`) are converted per column type into [`Value`].
//! Simple-protocol rows (`Client::simple_query`) arrive as text and are kept
//! as `Option<String>`.

use std::sync::Arc;

use postgres::types::Type;
use postgres::{Row, SimpleQueryMessage, SimpleQueryRow};

use super::value::Value;
use crate::row::{ColumnIndex, RowError, RowView};

/// Wrap typed rows, sharing one column index across the result set.
pub fn rows_to_views(rows: &[Row]) -> Result<Vec<RowView<Value>>, RowError> {
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };
    let columns = Arc::new(ColumnIndex::new(first.columns().iter().map(|c| c.name())));

    rows.iter()
        .map(|row| {
            let values = (0..row.len())
                .map(|idx| convert_value(row, idx))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(RowView::new(Arc::clone(&columns), values))
        })
        .collect()
}

/// Wrap text rows from the simple query protocol.
pub fn simple_rows_to_views(messages: &[SimpleQueryMessage]) -> Vec<RowView<Option<String>>> {
    let mut columns: Option<Arc<ColumnIndex>> = None;
    let mut views = Vec::new();

    for message in messages {
        if let SimpleQueryMessage::Row(row) = message {
            let index = columns
                .get_or_insert_with(|| Arc::new(simple_column_index(row)))
                .clone();
            let values = (0..row.len())
                .map(|idx| row.get(idx).map(str::to_string))
                .collect();
            views.push(RowView::new(index, values));
        }
    }
    views
}

fn simple_column_index(row: &SimpleQueryRow) -> ColumnIndex {
    ColumnIndex::new(row.columns().iter().map(|c| c.name()))
}

fn convert_value(row: &Row, idx: usize) -> Result<Value, RowError> {
    let column = &row.columns()[idx];
    let ty = column.type_();
    let conversion_error = |message: String| RowError::Conversion {
        column: column.name().to_string(),
        type_name: ty.name().to_string(),
        message,
    };

    let value = if *ty == Type::BOOL {
        row.try_get::<_, Option<bool>>(idx).map(Value::from)
    } else if *ty == Type::INT2 {
        row.try_get::<_, Option<i16>>(idx)
            .map(|v| Value::from(v.map(i64::from)))
    } else if *ty == Type::INT4 {
        row.try_get::<_, Option<i32>>(idx).map(Value::from)
    } else if *ty == Type::INT8 {
        row.try_get::<_, Option<i64>>(idx).map(Value::from)
    } else if *ty == Type::OID {
        row.try_get::<_, Option<u32>>(idx)
            .map(|v| Value::from(v.map(i64::from)))
    } else if *ty == Type::FLOAT4 {
        row.try_get::<_, Option<f32>>(idx)
            .map(|v| Value::from(v.map(f64::from)))
    } else if *ty == Type::FLOAT8 {
        row.try_get::<_, Option<f64>>(idx).map(Value::from)
    } else if *ty == Type::BYTEA {
        row.try_get::<_, Option<Vec<u8>>>(idx).map(Value::from)
    } else if [Type::TEXT, Type::VARCHAR, Type::BPCHAR, Type::NAME, Type::UNKNOWN].contains(ty) {
        row.try_get::<_, Option<String>>(idx).map(Value::from)
    } else {
        return Err(conversion_error(
            "unsupported column type, cast it to text in the query".to_string(),
        ));
    };

    value.map_err(|e| conversion_error(e.to_string()))
}
