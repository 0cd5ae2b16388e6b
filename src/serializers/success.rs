use serde_json::{json, Map, Value};

use super::SuccessSerializer;
use crate::pagination::{Cursor, PaginatorAdapter};

/// The default success envelope.
///
/// Items and collections are nested under `"data"`, pagination under
/// `"pagination"`, cursors under `"cursor"`; meta entries are returned as-is
/// for the engine to merge into the top level.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use transformer::serializers::{SuccessEnvelopeSerializer, SuccessSerializer};
///
/// let serializer = SuccessEnvelopeSerializer;
/// assert_eq!(serializer.item(None, json!({"id": 1})), json!({"data": {"id": 1}}));
/// assert_eq!(serializer.null(), json!({"data": null}));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct SuccessEnvelopeSerializer;

impl SuccessSerializer for SuccessEnvelopeSerializer {
    fn item(&self, _resource_key: Option<&str>, data: Value) -> Value {
        json!({ "data": data })
    }

    fn collection(&self, _resource_key: Option<&str>, data: Vec<Value>) -> Value {
        json!({ "data": data })
    }

    fn null(&self) -> Value {
        json!({ "data": null })
    }

    fn meta(&self, meta: &Map<String, Value>) -> Value {
        Value::Object(meta.clone())
    }

    fn paginator(&self, paginator: &PaginatorAdapter) -> Value {
        let mut links = Map::new();
        if let Some(previous) = &paginator.previous_url {
            links.insert("previous".to_string(), json!(previous));
        }
        if let Some(next) = &paginator.next_url {
            links.insert("next".to_string(), json!(next));
        }

        json!({
            "pagination": {
                "total": paginator.total,
                "count": paginator.count,
                "perPage": paginator.per_page,
                "currentPage": paginator.current_page,
                "totalPages": paginator.last_page,
                "links": links,
            }
        })
    }

    fn cursor(&self, cursor: &Cursor) -> Value {
        json!({
            "cursor": {
                "current": cursor.current,
                "previous": cursor.previous,
                "next": cursor.next,
                "count": cursor.count,
            }
        })
    }
}
