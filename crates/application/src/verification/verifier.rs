//! Verifier implementation.
//!
//! Runs checks against responses and records and produces check results.

use restcheck_domain::{
    BodyShape, Check, CheckResult, Expectation, FieldPath, FieldSpec, ResponseEnvelope,
    StatusExpectation, Verdict,
};
use serde_json::Value;

/// Runs checks against responses.
#[derive(Debug, Default, Clone, Copy)]
pub struct Verifier;

impl Verifier {
    /// Create a new verifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Checks the response status.
    #[must_use]
    pub fn verify_status(
        &self,
        response: &ResponseEnvelope,
        expected: &StatusExpectation,
    ) -> CheckResult {
        let check = Check::StatusCode {
            expected: expected.clone(),
        };
        let actual = response.status;
        if expected.matches(actual) {
            CheckResult::pass_with_value(check, actual.to_string())
        } else {
            let wanted = match expected {
                StatusExpectation::Exact(code) => code.to_string(),
                other => other.description(),
            };
            CheckResult::fail_with_value(
                check,
                actual.to_string(),
                format!("Expected status code {wanted}, but got {actual}"),
            )
        }
    }

    /// Checks the body is an ordered sequence with at least one element.
    #[must_use]
    pub fn verify_sequence(&self, body: &Value) -> CheckResult {
        match body {
            Value::Array(items) if items.is_empty() => CheckResult::fail_with_value(
                Check::Sequence,
                "0",
                "Expected at least one element, got an empty sequence",
            ),
            Value::Array(items) => CheckResult::pass_with_value(Check::Sequence, items.len().to_string()),
            other => CheckResult::fail_with_value(
                Check::Sequence,
                kind_of(other),
                format!("Expected a sequence, got {}", kind_of(other)),
            ),
        }
    }

    /// Checks the body is a single object.
    #[must_use]
    pub fn verify_record(&self, body: &Value) -> CheckResult {
        if body.is_object() {
            CheckResult::pass(Check::Record)
        } else {
            CheckResult::fail_with_value(
                Check::Record,
                kind_of(body),
                format!("Expected an object, got {}", kind_of(body)),
            )
        }
    }

    /// Checks every field in `fields` is present in `record`, descending into
    /// nested specs.
    ///
    /// An empty `fields` list fails: a presence check that names nothing
    /// proves nothing.
    #[must_use]
    pub fn verify_fields_present(&self, record: &Value, fields: &[FieldSpec]) -> CheckResult {
        let check = Check::FieldsPresent {
            fields: fields.to_vec(),
        };
        if fields.is_empty() {
            return CheckResult::fail(check, "No required fields given");
        }
        let Some(object) = record.as_object() else {
            return CheckResult::fail_with_value(
                check,
                kind_of(record),
                format!("Expected an object, got {}", kind_of(record)),
            );
        };

        let mut missing = Vec::new();
        collect_missing(object, fields, "", &mut missing);

        if missing.is_empty() {
            return CheckResult::pass(check);
        }
        let present: Vec<_> = object.keys().map(String::as_str).collect();
        let message = if let [only] = missing.as_slice() {
            format!("Expected field '{only}' not found in response")
        } else {
            let quoted: Vec<_> = missing.iter().map(|m| format!("'{m}'")).collect();
            format!("Expected fields {} not found in response", quoted.join(", "))
        };
        CheckResult::fail_with_value(check, present.join(", "), message)
    }

    /// Checks the value at `path` equals `expected`.
    #[must_use]
    pub fn verify_field_equals(
        &self,
        record: &Value,
        path: &FieldPath,
        expected: &Value,
    ) -> CheckResult {
        let check = Check::FieldEquals {
            path: path.clone(),
            expected: expected.clone(),
        };
        match path.lookup(record) {
            Some(actual) if actual == expected => CheckResult::pass_with_value(check, actual.to_string()),
            Some(actual) => CheckResult::fail_with_value(
                check,
                actual.to_string(),
                format!("Field '{path}' mismatch: expected {expected}, got {actual}"),
            ),
            None => CheckResult::fail(check, format!("Expected field '{path}' not found in response")),
        }
    }

    /// Runs a whole expectation against a response.
    ///
    /// Order: status, JSON parse, shape, fields, values. Once the status,
    /// parse or shape check fails nothing further is attempted; field checks
    /// on a sequence apply to its first element.
    #[must_use]
    pub fn verify(&self, response: &ResponseEnvelope, expectation: &Expectation) -> Verdict {
        let mut results = Vec::new();

        let status = self.verify_status(response, &expectation.status);
        let status_passed = status.passed;
        results.push(status);
        let needs_body = expectation.shape != BodyShape::Any
            || !expectation.required_fields.is_empty()
            || !expectation.expected_values.is_empty();
        if !status_passed || !needs_body {
            return Verdict::new(results);
        }

        let body = match response.json() {
            Ok(body) => {
                results.push(CheckResult::pass(Check::JsonBody));
                body
            }
            Err(error) => {
                results.push(CheckResult::fail_with_value(
                    Check::JsonBody,
                    response.body_preview(),
                    format!("Body is not valid JSON: {error}"),
                ));
                return Verdict::new(results);
            }
        };

        let target = match expectation.shape {
            BodyShape::Any => &body,
            BodyShape::Record => {
                let shape = self.verify_record(&body);
                let passed = shape.passed;
                results.push(shape);
                if !passed {
                    return Verdict::new(results);
                }
                &body
            }
            BodyShape::Sequence => {
                let shape = self.verify_sequence(&body);
                results.push(shape);
                match body.as_array().and_then(|items| items.first()) {
                    Some(first) => first,
                    None => return Verdict::new(results),
                }
            }
        };

        if !expectation.required_fields.is_empty() {
            results.push(self.verify_fields_present(target, &expectation.required_fields));
        }

        for (path, expected) in &expectation.expected_values {
            results.push(self.verify_field_equals(target, path, expected));
        }

        Verdict::new(results)
    }
}

fn collect_missing(
    object: &serde_json::Map<String, Value>,
    fields: &[FieldSpec],
    prefix: &str,
    missing: &mut Vec<String>,
) {
    for field in fields {
        let path = if prefix.is_empty() {
            field.name.clone()
        } else {
            format!("{prefix}.{}", field.name)
        };
        match object.get(&field.name) {
            None => missing.push(path),
            Some(value) if !field.children.is_empty() => match value.as_object() {
                Some(inner) => collect_missing(inner, &field.children, &path, missing),
                None => missing.extend(
                    field
                        .children
                        .iter()
                        .map(|child| format!("{path}.{}", child.name)),
                ),
            },
            Some(_) => {}
        }
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use restcheck_domain::Payload;
    use serde_json::json;
    use std::time::Duration;

    fn response(status: u16, body: &str) -> ResponseEnvelope {
        ResponseEnvelope::new(status, Vec::new(), body.as_bytes(), Duration::from_millis(5))
    }

    fn user() -> Value {
        json!({
            "id": 1,
            "name": "Leanne Graham",
            "address": {
                "street": "Kulas Light",
                "geo": {"lat": "-37.3159", "lng": "81.1496"}
            },
            "company": {"name": "Romaguera-Crona", "catchPhrase": "x", "bs": "y"}
        })
    }

    #[test]
    fn test_status_exact() {
        let verifier = Verifier::new();
        let ok = verifier.verify_status(&response(200, ""), &StatusExpectation::exact(200));
        assert!(ok.passed);

        let bad = verifier.verify_status(&response(500, ""), &StatusExpectation::exact(201));
        assert!(!bad.passed);
        assert_eq!(bad.actual.as_deref(), Some("500"));
        assert_eq!(
            bad.error.as_deref(),
            Some("Expected status code 201, but got 500")
        );
    }

    #[test]
    fn test_status_range_message() {
        let bad = Verifier::new().verify_status(&response(404, ""), &StatusExpectation::success());
        assert_eq!(
            bad.error.as_deref(),
            Some("Expected status code in 200-299, but got 404")
        );
    }

    #[test]
    fn test_sequence_checks() {
        let verifier = Verifier::new();
        assert!(verifier.verify_sequence(&json!([{"id": 1}])).passed);

        let empty = verifier.verify_sequence(&json!([]));
        assert!(!empty.passed);

        let object = verifier.verify_sequence(&json!({"id": 1}));
        assert_eq!(object.error.as_deref(), Some("Expected a sequence, got object"));
    }

    #[test]
    fn test_fields_present_nested() {
        let verifier = Verifier::new();
        let fields = vec![
            FieldSpec::new("id"),
            FieldSpec::nested("address", [FieldSpec::nested("geo", ["lat", "lng"])]),
            FieldSpec::nested("company", ["name", "catchPhrase", "bs"]),
        ];
        let result = verifier.verify_fields_present(&user(), &fields);
        assert!(result.passed, "{:?}", result.error);
    }

    #[test]
    fn test_fields_missing_reports_dotted_paths() {
        let verifier = Verifier::new();
        let record = json!({"id": 1, "address": {"geo": {"lat": "1"}}});
        let fields = vec![
            FieldSpec::new("email"),
            FieldSpec::nested("address", [FieldSpec::nested("geo", ["lat", "lng"])]),
        ];
        let result = verifier.verify_fields_present(&record, &fields);
        assert!(!result.passed);
        assert_eq!(
            result.error.as_deref(),
            Some("Expected fields 'email', 'address.geo.lng' not found in response")
        );
    }

    #[test]
    fn test_single_missing_field_message() {
        let result =
            Verifier::new().verify_fields_present(&json!({"id": 1}), &FieldSpec::all(&["id", "title"]));
        assert_eq!(
            result.error.as_deref(),
            Some("Expected field 'title' not found in response")
        );
    }

    #[test]
    fn test_nested_spec_on_scalar_fails() {
        let record = json!({"company": "ACME"});
        let result = Verifier::new()
            .verify_fields_present(&record, &[FieldSpec::nested("company", ["name"])]);
        assert!(!result.passed);
        assert_eq!(
            result.error.as_deref(),
            Some("Expected field 'company.name' not found in response")
        );
    }

    #[test]
    fn test_empty_field_set_is_not_vacuous() {
        let record = json!({"id": 1});
        let result = Verifier::new().verify_fields_present(&record, &[]);
        assert!(!result.passed);
    }

    #[test]
    fn test_fields_on_non_object_fail() {
        let result = Verifier::new().verify_fields_present(&json!([]), &FieldSpec::all(&["id"]));
        assert!(!result.passed);
        assert_eq!(result.actual.as_deref(), Some("sequence"));
    }

    #[test]
    fn test_field_equals() {
        let verifier = Verifier::new();
        let record = user();

        let ok = verifier.verify_field_equals(&record, &FieldPath::field("id"), &json!(1));
        assert!(ok.passed);

        let nested = FieldPath::parse("address.geo.lng").unwrap();
        assert!(verifier.verify_field_equals(&record, &nested, &json!("81.1496")).passed);

        let wrong = verifier.verify_field_equals(&record, &FieldPath::field("id"), &json!(2));
        assert_eq!(
            wrong.error.as_deref(),
            Some("Field 'id' mismatch: expected 2, got 1")
        );

        let missing = verifier.verify_field_equals(&record, &FieldPath::field("phone"), &json!("x"));
        assert_eq!(
            missing.error.as_deref(),
            Some("Expected field 'phone' not found in response")
        );
    }

    #[test]
    fn test_field_equals_is_type_strict() {
        let result = Verifier::new().verify_field_equals(
            &json!({"userId": "1"}),
            &FieldPath::field("userId"),
            &json!(1),
        );
        assert!(!result.passed);
    }

    #[test]
    fn test_verify_list_expectation() {
        let body = r#"[{"id": 1, "title": "a", "body": "b", "userId": 1}, {"id": 2}]"#;
        let expectation = Expectation::status(200)
            .sequence()
            .require(["id", "title", "body", "userId"]);

        let verdict = Verifier::new().verify(&response(200, body), &expectation);
        assert!(verdict.all_passed());
        assert_eq!(verdict.total, 4);
    }

    #[test]
    fn test_verify_empty_list_stops_before_fields() {
        let expectation = Expectation::status(200).sequence().require(["id"]);
        let verdict = Verifier::new().verify(&response(200, "[]"), &expectation);
        assert!(!verdict.all_passed());
        let last = verdict.results.last().unwrap();
        assert_eq!(last.check, Check::Sequence);
    }

    #[test]
    fn test_verify_status_failure_skips_body() {
        let expectation = Expectation::status(201).record().require(["id"]);
        let verdict = Verifier::new().verify(&response(500, "not json"), &expectation);
        assert_eq!(verdict.total, 1);
        assert_eq!(verdict.failed, 1);
    }

    #[test]
    fn test_verify_malformed_body() {
        let expectation = Expectation::status(200).record();
        let verdict = Verifier::new().verify(&response(200, "<html>"), &expectation);
        assert_eq!(verdict.results[1].check, Check::JsonBody);
        assert!(!verdict.results[1].passed);
    }

    #[test]
    fn test_verify_create_echo() {
        let payload = Payload::new()
            .with("title", "Test Post")
            .with("body", "text")
            .with("userId", 1);
        let body = r#"{"id": 101, "title": "Test Post", "body": "changed", "userId": 1}"#;
        let expectation = Expectation::status(201)
            .record()
            .require(["id", "title", "body", "userId"])
            .echoes(&payload);

        let verdict = Verifier::new().verify(&response(201, body), &expectation);
        assert_eq!(verdict.failed, 1);
        let failure = verdict.failures().next().unwrap();
        assert_eq!(
            failure.error.as_deref(),
            Some(r#"Field 'body' mismatch: expected "text", got "changed""#)
        );
    }

    #[test]
    fn test_every_value_check_is_recorded() {
        let expectation = Expectation::status(200)
            .record()
            .value(FieldPath::field("a"), 1)
            .value(FieldPath::field("b"), 2);
        let verdict = Verifier::new().verify(&response(200, r#"{"a": 0, "b": 0}"#), &expectation);
        // status, json, record, both values
        assert_eq!(verdict.total, 5);
        assert_eq!(verdict.failed, 2);
    }

    #[test]
    fn test_status_only_expectation_ignores_body() {
        let verdict = Verifier::new().verify(&response(200, ""), &Expectation::status(200));
        assert!(verdict.all_passed());
        assert_eq!(verdict.total, 1);
    }
}
