//! Tabular-backend seam and the Arrow frame builder.
//!
//! The projector hands the backend the original path strings as column
//! names, the collected rows in read order, and the raw nanosecond
//! timestamps. The shipped [`ArrowFrameBuilder`] materializes a
//! [`RecordBatch`] with a leading non-nullable time column; alternative
//! backends implement [`FrameBuilder`].
//!
//! Column Arrow types are taken from each column's first value; there is
//! no inference or coercion beyond what the values already carry, so a
//! later value of a different kind in the same column is an error. Opaque
//! nested-message values are stored in rendered (`Display`) form.

use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanBuilder, Float64Builder, Int64Builder, NullArray, RecordBatch, StringBuilder,
    TimestampNanosecondArray,
};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::error::ArrowError;
use snafu::prelude::*;

use crate::value::Value;

/// Default name of the leading time-index column.
///
/// A projected path equal to the time-column name is rejected with
/// [`BuildError::DuplicateColumn`]; rename the index via
/// [`ArrowFrameBuilder::with_time_column`] when a field is literally
/// called `time`.
pub const TIME_COLUMN: &str = "time";

/// Errors raised by a tabular backend while materializing a frame.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum BuildError {
    /// Arrow rejected the assembled columns.
    #[snafu(display("Arrow error while assembling frame: {source}"))]
    Arrow {
        /// Underlying Arrow error.
        source: ArrowError,
    },

    /// A column mixes value kinds across rows.
    #[snafu(display("Column {column:?} holds {expected} values but row {row} carries {found}"))]
    ColumnTypeConflict {
        /// Name of the conflicting column.
        column: String,
        /// Kind established by the column's first value.
        expected: &'static str,
        /// Kind of the conflicting value.
        found: &'static str,
        /// Zero-based row index of the conflicting value.
        row: usize,
    },

    /// Two columns in the same frame would share a name.
    ///
    /// Raised both for a repeated path and for a path that collides with
    /// the time-index column name.
    #[snafu(display("Column name {column:?} collides with another column in the frame"))]
    DuplicateColumn {
        /// The colliding column name.
        column: String,
    },

    /// A row's width does not match the column list.
    #[snafu(display("Row {row} has {found} values, expected {expected}"))]
    RowWidthMismatch {
        /// Zero-based index of the malformed row.
        row: usize,
        /// Expected number of values (one per column).
        expected: usize,
        /// Number of values the row actually carries.
        found: usize,
    },
}

/// Tabular-construction backend.
///
/// Receives rows in read order, one column name per projected path, and the
/// per-row timestamps, and returns the final frame object.
pub trait FrameBuilder {
    /// The materialized frame type.
    type Frame;

    /// Build a frame from `rows`, `columns`, and `timestamps`
    /// (nanoseconds since the Unix epoch, one per row).
    fn build(
        &self,
        columns: &[String],
        rows: Vec<Vec<Value>>,
        timestamps: Vec<i64>,
    ) -> Result<Self::Frame, BuildError>;
}

/// Arrow-backed frame builder producing a [`RecordBatch`].
#[derive(Debug, Clone)]
pub struct ArrowFrameBuilder {
    time_column: String,
}

impl ArrowFrameBuilder {
    /// Builder with the default [`TIME_COLUMN`] index name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rename the leading time-index column.
    ///
    /// Needed when a projected path collides with the default
    /// [`TIME_COLUMN`] name; [`build`](FrameBuilder::build) rejects such a
    /// collision instead of emitting a duplicate field.
    pub fn with_time_column(mut self, name: impl Into<String>) -> Self {
        self.time_column = name.into();
        self
    }
}

impl Default for ArrowFrameBuilder {
    fn default() -> Self {
        Self {
            time_column: TIME_COLUMN.to_string(),
        }
    }
}

/// Build one typed Arrow column from `rows`, taking the Arrow type from the
/// column's first value and rejecting any later value of a different kind.
macro_rules! primitive_column {
    ($builder_ty:ty, $variant:ident, $dtype:expr, $kind:literal, $name:expr, $idx:expr, $rows:expr) => {{
        let mut builder = <$builder_ty>::with_capacity($rows.len());
        for (row_idx, row) in $rows.iter().enumerate() {
            match &row[$idx] {
                Value::$variant(v) => builder.append_value(*v),
                other => {
                    return ColumnTypeConflictSnafu {
                        column: $name,
                        expected: $kind,
                        found: other.kind(),
                        row: row_idx,
                    }
                    .fail();
                }
            }
        }
        (
            Field::new($name, $dtype, false),
            Arc::new(builder.finish()) as ArrayRef,
        )
    }};
}

fn build_column(name: &str, idx: usize, rows: &[Vec<Value>]) -> Result<(Field, ArrayRef), BuildError> {
    let Some(first) = rows.first().map(|row| &row[idx]) else {
        // Zero rows: no value to take a type from.
        return Ok((
            Field::new(name, DataType::Null, true),
            Arc::new(NullArray::new(0)),
        ));
    };

    Ok(match first {
        Value::Int(_) => {
            primitive_column!(Int64Builder, Int, DataType::Int64, "int", name, idx, rows)
        }
        Value::Float(_) => primitive_column!(
            Float64Builder,
            Float,
            DataType::Float64,
            "float",
            name,
            idx,
            rows
        ),
        Value::Bool(_) => primitive_column!(
            BooleanBuilder,
            Bool,
            DataType::Boolean,
            "bool",
            name,
            idx,
            rows
        ),
        Value::Str(_) => {
            let mut builder = StringBuilder::new();
            for (row_idx, row) in rows.iter().enumerate() {
                match &row[idx] {
                    Value::Str(s) => builder.append_value(s),
                    other => {
                        return ColumnTypeConflictSnafu {
                            column: name,
                            expected: "str",
                            found: other.kind(),
                            row: row_idx,
                        }
                        .fail();
                    }
                }
            }
            (
                Field::new(name, DataType::Utf8, false),
                Arc::new(builder.finish()) as ArrayRef,
            )
        }
        Value::Message(_) => {
            // Opaque terminal values: keep them, rendered, rather than
            // rejecting the path.
            let mut builder = StringBuilder::new();
            for (row_idx, row) in rows.iter().enumerate() {
                match &row[idx] {
                    Value::Message(m) => builder.append_value(m.to_string()),
                    other => {
                        return ColumnTypeConflictSnafu {
                            column: name,
                            expected: "message",
                            found: other.kind(),
                            row: row_idx,
                        }
                        .fail();
                    }
                }
            }
            (
                Field::new(name, DataType::Utf8, false),
                Arc::new(builder.finish()) as ArrayRef,
            )
        }
    })
}

impl FrameBuilder for ArrowFrameBuilder {
    type Frame = RecordBatch;

    fn build(
        &self,
        columns: &[String],
        rows: Vec<Vec<Value>>,
        timestamps: Vec<i64>,
    ) -> Result<RecordBatch, BuildError> {
        // Arrow schemas permit duplicate field names, which would make
        // lookups by name ambiguous downstream.
        for (idx, name) in columns.iter().enumerate() {
            ensure!(
                name != &self.time_column && !columns[..idx].contains(name),
                DuplicateColumnSnafu {
                    column: name.as_str(),
                }
            );
        }

        for (row_idx, row) in rows.iter().enumerate() {
            ensure!(
                row.len() == columns.len(),
                RowWidthMismatchSnafu {
                    row: row_idx,
                    expected: columns.len(),
                    found: row.len(),
                }
            );
        }

        let mut fields = Vec::with_capacity(columns.len() + 1);
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(columns.len() + 1);

        fields.push(Field::new(
            self.time_column.as_str(),
            DataType::Timestamp(TimeUnit::Nanosecond, None),
            false,
        ));
        arrays.push(Arc::new(TimestampNanosecondArray::from(timestamps)));

        for (idx, name) in columns.iter().enumerate() {
            let (field, array) = build_column(name, idx, &rows)?;
            fields.push(field);
            arrays.push(array);
        }

        let schema = Arc::new(Schema::new(fields));
        RecordBatch::try_new(schema, arrays).context(ArrowSnafu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Message;
    use arrow::array::{Array, Float64Array, Int64Array, StringArray};

    fn build(
        columns: &[&str],
        rows: Vec<Vec<Value>>,
        timestamps: Vec<i64>,
    ) -> Result<RecordBatch, BuildError> {
        let columns: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        ArrowFrameBuilder::new().build(&columns, rows, timestamps)
    }

    #[test]
    fn typed_columns_and_time_index() {
        let batch = build(
            &["lat", "n", "name", "ok"],
            vec![
                vec![
                    Value::Float(1.5),
                    Value::Int(7),
                    Value::Str("a".to_string()),
                    Value::Bool(true),
                ],
                vec![
                    Value::Float(2.5),
                    Value::Int(8),
                    Value::Str("b".to_string()),
                    Value::Bool(false),
                ],
            ],
            vec![42, 666],
        )
        .expect("valid frame");

        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 5);
        assert_eq!(
            batch.schema().field(0).data_type(),
            &DataType::Timestamp(TimeUnit::Nanosecond, None)
        );
        assert!(!batch.schema().field(1).is_nullable());

        let time = batch
            .column(0)
            .as_any()
            .downcast_ref::<TimestampNanosecondArray>()
            .unwrap();
        assert_eq!(time.value(0), 42);
        assert_eq!(time.value(1), 666);

        let lat = batch
            .column(1)
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(lat.value(0), 1.5);
        assert_eq!(lat.value(1), 2.5);

        let n = batch
            .column(2)
            .as_any()
            .downcast_ref::<Int64Array>()
            .unwrap();
        assert_eq!(n.value(0), 7);
        assert_eq!(n.value(1), 8);
    }

    #[test]
    fn zero_columns_keeps_one_row_per_message() {
        let batch = build(&[], vec![vec![], vec![], vec![]], vec![1, 2, 3]).expect("time only");
        assert_eq!(batch.num_columns(), 1);
        assert_eq!(batch.num_rows(), 3);
    }

    #[test]
    fn zero_rows_yields_null_typed_columns() {
        let batch = build(&["lat"], vec![], vec![]).expect("empty frame");
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.schema().field(1).data_type(), &DataType::Null);
        assert!(batch.schema().field(1).is_nullable());
    }

    #[test]
    fn message_values_are_rendered() {
        let status = Message::new(
            "gps/Status",
            vec![("status".to_string(), Value::Int(0))],
        );
        let batch = build(
            &["status"],
            vec![vec![Value::Message(status)]],
            vec![42],
        )
        .expect("rendered column");

        let col = batch
            .column(1)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(col.value(0), "gps/Status{status: 0}");
    }

    #[test]
    fn mixed_kinds_in_one_column_error() {
        let err = build(
            &["x"],
            vec![vec![Value::Int(1)], vec![Value::Float(2.0)]],
            vec![1, 2],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            BuildError::ColumnTypeConflict {
                column,
                expected: "int",
                found: "float",
                row: 1,
            } if column == "x"
        ));
    }

    #[test]
    fn row_width_mismatch_errors() {
        let err = build(&["a", "b"], vec![vec![Value::Int(1)]], vec![1]).unwrap_err();
        assert!(matches!(
            err,
            BuildError::RowWidthMismatch {
                row: 0,
                expected: 2,
                found: 1,
            }
        ));
    }

    #[test]
    fn repeated_column_name_errors() {
        let err = build(
            &["lat", "lat"],
            vec![vec![Value::Float(1.0), Value::Float(1.0)]],
            vec![1],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BuildError::DuplicateColumn { column } if column == "lat"
        ));
    }

    #[test]
    fn column_colliding_with_time_index_errors() {
        let err = build(&["time"], vec![vec![Value::Int(1)]], vec![1]).unwrap_err();
        assert!(matches!(
            err,
            BuildError::DuplicateColumn { column } if column == "time"
        ));

        // Renaming the index frees the default name for a data column.
        let columns = vec!["time".to_string()];
        let batch = ArrowFrameBuilder::new()
            .with_time_column("stamp")
            .build(&columns, vec![vec![Value::Int(1)]], vec![1])
            .expect("renamed index avoids the collision");
        assert_eq!(batch.schema().field(0).name(), "stamp");
        assert_eq!(batch.schema().field(1).name(), "time");
    }

    #[test]
    fn renamed_time_column() {
        let builder = ArrowFrameBuilder::new().with_time_column("stamp");
        let batch = builder.build(&[], vec![], vec![]).expect("empty frame");
        assert_eq!(batch.schema().field(0).name(), "stamp");
        assert_eq!(batch.column(0).len(), 0);
    }
}
