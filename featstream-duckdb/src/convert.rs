//! Arrow record-batch to row conversion.
//!
//! Scalar types with a native tagged-value mapping are converted
//! directly; structs and lists become nested JSON (GeoParquet sources
//! usually carry a `bbox` struct column); anything else falls back to
//! Arrow's display form as text.

use duckdb::arrow::array::{
    Array, BooleanArray, Float32Array, Float64Array, Int16Array, Int32Array, Int64Array,
    Int8Array, LargeStringArray, ListArray, StringArray, StructArray, UInt16Array, UInt32Array,
    UInt64Array, UInt8Array,
};
use duckdb::arrow::datatypes::DataType;
use duckdb::arrow::record_batch::RecordBatch;
use duckdb::arrow::util::display::array_value_to_string;
use featstream_api::EngineError;
use featstream_core::{FieldValue, Row, RowBatch};
use serde_json::Value as JsonValue;

/// Convert one Arrow record batch into ordered rows.
pub fn record_batch_rows(batch: &RecordBatch) -> Result<RowBatch, EngineError> {
    let schema = batch.schema();
    let mut rows = Vec::with_capacity(batch.num_rows());
    for row_idx in 0..batch.num_rows() {
        let mut row = Row::with_capacity(batch.num_columns());
        for (col_idx, field) in schema.fields().iter().enumerate() {
            let column = batch.column(col_idx);
            row.push(field.name().clone(), cell_value(column.as_ref(), row_idx)?);
        }
        rows.push(row);
    }
    Ok(RowBatch { rows })
}

/// Extract one cell as a tagged value.
fn cell_value(column: &dyn Array, idx: usize) -> Result<FieldValue, EngineError> {
    if column.is_null(idx) {
        return Ok(FieldValue::Null);
    }

    let value = match column.data_type() {
        DataType::Boolean => FieldValue::Bool(downcast::<BooleanArray>(column)?.value(idx)),
        DataType::Int8 => FieldValue::Int(downcast::<Int8Array>(column)?.value(idx).into()),
        DataType::Int16 => FieldValue::Int(downcast::<Int16Array>(column)?.value(idx).into()),
        DataType::Int32 => FieldValue::Int(downcast::<Int32Array>(column)?.value(idx).into()),
        DataType::Int64 => FieldValue::Int(downcast::<Int64Array>(column)?.value(idx)),
        DataType::UInt8 => FieldValue::Int(downcast::<UInt8Array>(column)?.value(idx).into()),
        DataType::UInt16 => FieldValue::Int(downcast::<UInt16Array>(column)?.value(idx).into()),
        DataType::UInt32 => FieldValue::Int(downcast::<UInt32Array>(column)?.value(idx).into()),
        DataType::UInt64 => {
            let raw = downcast::<UInt64Array>(column)?.value(idx);
            match i64::try_from(raw) {
                Ok(v) => FieldValue::Int(v),
                Err(_) => FieldValue::String(raw.to_string()),
            }
        }
        DataType::Float32 => {
            FieldValue::Float(downcast::<Float32Array>(column)?.value(idx).into())
        }
        DataType::Float64 => FieldValue::Float(downcast::<Float64Array>(column)?.value(idx)),
        DataType::Utf8 => {
            FieldValue::String(downcast::<StringArray>(column)?.value(idx).to_string())
        }
        DataType::LargeUtf8 => {
            FieldValue::String(downcast::<LargeStringArray>(column)?.value(idx).to_string())
        }
        DataType::Struct(fields) => {
            let array = downcast::<StructArray>(column)?;
            let mut map = serde_json::Map::with_capacity(fields.len());
            for (field, child) in fields.iter().zip(array.columns()) {
                let nested = cell_value(child.as_ref(), idx)?;
                map.insert(field.name().clone(), nested.into_json());
            }
            FieldValue::Json(JsonValue::Object(map))
        }
        DataType::List(_) => {
            let array = downcast::<ListArray>(column)?;
            let values = array.value(idx);
            let mut items = Vec::with_capacity(values.len());
            for i in 0..values.len() {
                items.push(cell_value(values.as_ref(), i)?.into_json());
            }
            FieldValue::Json(JsonValue::Array(items))
        }
        // Dates, timestamps, decimals, binary: display form as text.
        _ => FieldValue::String(
            array_value_to_string(column, idx)
                .map_err(|e| EngineError::Execution(format!("arrow display error: {e}")))?,
        ),
    };
    Ok(value)
}

fn downcast<T: Array + 'static>(column: &dyn Array) -> Result<&T, EngineError> {
    column.as_any().downcast_ref::<T>().ok_or_else(|| {
        EngineError::Execution(format!(
            "arrow column downcast mismatch for {:?}",
            column.data_type()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use duckdb::arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray, StructArray};
    use duckdb::arrow::datatypes::{Field, Fields, Schema};
    use std::sync::Arc;

    #[test]
    fn scalar_columns_map_to_tagged_values() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("name", DataType::Utf8, true),
            Field::new("population", DataType::Int64, true),
            Field::new("area", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec![Some("Berlin"), None])) as ArrayRef,
                Arc::new(Int64Array::from(vec![Some(3_700_000), Some(0)])) as ArrayRef,
                Arc::new(Float64Array::from(vec![Some(891.7), Some(0.0)])) as ArrayRef,
            ],
        )
        .unwrap();

        let rows = record_batch_rows(&batch).unwrap();
        assert_eq!(rows.len(), 2);

        let first = &rows.rows[0];
        assert_eq!(
            first.get("name"),
            Some(&FieldValue::String("Berlin".to_string()))
        );
        assert_eq!(first.get("population"), Some(&FieldValue::Int(3_700_000)));
        assert_eq!(first.get("area"), Some(&FieldValue::Float(891.7)));

        // null cell becomes a tagged null, not a dropped field
        assert_eq!(rows.rows[1].get("name"), Some(&FieldValue::Null));
    }

    #[test]
    fn struct_column_becomes_nested_json() {
        let bbox_fields = Fields::from(vec![
            Field::new("xmin", DataType::Float64, true),
            Field::new("xmax", DataType::Float64, true),
        ]);
        let bbox = StructArray::new(
            bbox_fields.clone(),
            vec![
                Arc::new(Float64Array::from(vec![Some(1.0)])) as ArrayRef,
                Arc::new(Float64Array::from(vec![Some(2.0)])) as ArrayRef,
            ],
            None,
        );
        let schema = Arc::new(Schema::new(vec![Field::new(
            "bbox",
            DataType::Struct(bbox_fields),
            true,
        )]));
        let batch = RecordBatch::try_new(schema, vec![Arc::new(bbox) as ArrayRef]).unwrap();

        let rows = record_batch_rows(&batch).unwrap();
        assert_eq!(
            rows.rows[0].get("bbox"),
            Some(&FieldValue::Json(
                serde_json::json!({"xmin": 1.0, "xmax": 2.0})
            ))
        );
    }

    #[test]
    fn column_order_is_preserved() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("z", DataType::Int64, true),
            Field::new("a", DataType::Int64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(vec![Some(1)])) as ArrayRef,
                Arc::new(Int64Array::from(vec![Some(2)])) as ArrayRef,
            ],
        )
        .unwrap();

        let rows = record_batch_rows(&batch).unwrap();
        let names: Vec<&str> = rows.rows[0].iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["z", "a"]);
    }
}
