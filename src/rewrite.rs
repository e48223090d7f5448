use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An action shape to collapse.
///
/// A mapping node matches when its `op` equals `op` and at least one entry of
/// its `parameters` array is an object with `"type" == param_type` and
/// `"value" == param_value`. A matching node gets `op` set to
/// `replacement_op` and `parameters` emptied; its other fields are kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Rule {
    pub op: String,
    pub replacement_op: String,
    pub param_type: String,
    pub param_value: String,
}

impl Default for Rule {
    fn default() -> Self {
        Rule {
            op: "mark_to_drop".to_string(),
            replacement_op: "drop".to_string(),
            param_type: "header".to_string(),
            param_value: "standard_metadata".to_string(),
        }
    }
}

impl Rule {
    pub fn matches(&self, node: &Map<String, Value>) -> bool {
        if node.get("op").and_then(Value::as_str) != Some(self.op.as_str()) {
            return false;
        }
        match node.get("parameters") {
            Some(Value::Array(params)) => params.iter().any(|p| self.is_target_param(p)),
            _ => false,
        }
    }

    fn is_target_param(&self, param: &Value) -> bool {
        match param {
            Value::Object(p) => {
                p.get("type").and_then(Value::as_str) == Some(self.param_type.as_str())
                    && p.get("value").and_then(Value::as_str) == Some(self.param_value.as_str())
            }
            _ => false,
        }
    }

    fn apply(&self, node: &mut Map<String, Value>) {
        node.insert("op".to_string(), Value::String(self.replacement_op.clone()));
        node.insert("parameters".to_string(), Value::Array(Vec::new()));
    }
}

/// Collapses every `mark_to_drop` on `standard_metadata` into a bare `drop`.
pub fn rewrite(value: Value) -> Value {
    rewrite_with(&Rule::default(), value)
}

pub fn rewrite_with(rule: &Rule, mut value: Value) -> Value {
    rewrite_in_place(rule, &mut value);
    value
}

/// Walks `value` depth-first and returns how many nodes were rewritten.
///
/// A node is tested against its contents before any substitution, then every
/// child is visited, including the ones just replaced. Pending nodes live on a
/// heap stack, so nesting depth is limited by memory only.
pub fn rewrite_in_place(rule: &Rule, value: &mut Value) -> usize {
    let mut count = 0;
    let mut pending = vec![value];
    while let Some(value) = pending.pop() {
        match value {
            Value::Array(items) => pending.extend(items.iter_mut().rev()),
            Value::Object(node) => {
                if rule.matches(node) {
                    rule.apply(node);
                    count += 1;
                }
                pending.extend(node.values_mut().rev());
            }
            _ => {}
        }
    }
    count
}
