use serde_json::{Map, Value};

use super::SuccessSerializer;
use crate::pagination::{Cursor, PaginatorAdapter};

/// Returns transformed data without any envelope.
///
/// Meta, pagination and cursors render as empty objects so nothing is merged
/// into the output.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSerializer;

impl SuccessSerializer for NoopSerializer {
    fn item(&self, _resource_key: Option<&str>, data: Value) -> Value {
        data
    }

    fn collection(&self, _resource_key: Option<&str>, data: Vec<Value>) -> Value {
        Value::Array(data)
    }

    fn null(&self) -> Value {
        Value::Null
    }

    fn meta(&self, _meta: &Map<String, Value>) -> Value {
        Value::Object(Map::new())
    }

    fn paginator(&self, _paginator: &PaginatorAdapter) -> Value {
        Value::Object(Map::new())
    }

    fn cursor(&self, _cursor: &Cursor) -> Value {
        Value::Object(Map::new())
    }
}
