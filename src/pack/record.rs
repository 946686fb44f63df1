use serde_json::Value;

/// Read access to the fields the icon scripts care about. Anything that is
/// not a JSON object with a non-empty string `name` is not a record.
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    value: &'a Value,
    name: &'a str,
}

impl<'a> RecordView<'a> {
    pub fn new(value: &'a Value) -> Option<Self> {
        let name = value.as_object()?.get("name")?.as_str()?.trim();
        if name.is_empty() {
            return None;
        }
        Some(RecordView { value, name })
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn id(&self) -> Option<&'a str> {
        self.value.get("_id").and_then(Value::as_str).filter(|id| !id.is_empty())
    }

    pub fn record_type(&self) -> Option<&'a str> {
        self.value.get("type").and_then(Value::as_str).map(str::trim)
    }

    pub fn img(&self) -> Option<&'a str> {
        self.value.get("img").and_then(Value::as_str)
    }

    pub fn school(&self) -> Option<&'a str> {
        self.system("school")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Numeric rank; numeric strings are accepted.
    pub fn rank(&self) -> Option<u64> {
        match self.system("rank")? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn system(&self, key: &str) -> Option<&'a Value> {
        self.value.get("system")?.get(key)
    }
}

/// Point the record's `img` at `reference`. Returns false for non-objects.
pub fn set_img(record: &mut Value, reference: &str) -> bool {
    match record.as_object_mut() {
        Some(map) => {
            map.insert("img".to_string(), Value::String(reference.to_string()));
            true
        }
        None => false,
    }
}
