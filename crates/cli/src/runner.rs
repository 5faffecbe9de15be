use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::tap::Tap;

/// Conformance suite runner.
///
/// Convention:
///   positive/   -- *.dspf + *.expected.json (serialized model of the member)
pub struct RunResult {
    pub passed: usize,
    pub failed: usize,
}

pub fn run_suite(suite_dir: &Path) -> RunResult {
    let mut tap = Tap::new();

    run_positive_dir(suite_dir, "positive", &mut tap);

    let result = RunResult {
        passed: tap.pass_count(),
        failed: tap.failure_count(),
    };
    tap.finish();
    result
}

fn run_positive_dir(suite_dir: &Path, subdir: &str, tap: &mut Tap) {
    let dir = suite_dir.join(subdir);
    if !dir.exists() {
        return;
    }
    let mut entries = glob_members(&dir);
    entries.sort();
    for member in &entries {
        let stem = stem(member);
        let expected_path = dir.join(format!("{}.expected.json", stem));
        if !expected_path.exists() {
            tap.not_ok(
                format!("{}/{}", subdir, stem),
                format!("missing expected file: {}", expected_path.display()),
            );
            continue;
        }
        run_positive_test(member, &expected_path, &stem, subdir, tap);
    }
}

fn run_positive_test(
    member: &Path,
    expected_path: &Path,
    name: &str,
    category: &str,
    tap: &mut Tap,
) {
    let test_name = format!("{}/{}", category, name);
    debug!(test = %test_name, "running fixture");

    let expected_json = match read_json(expected_path) {
        Ok(v) => v,
        Err(e) => {
            tap.not_ok(&test_name, format!("failed to read expected file: {}", e));
            return;
        }
    };

    match dspf_core::parse_file(member) {
        Ok(parsed) => {
            let got = parsed.to_json_value();
            if json_equal(&got, &expected_json) {
                tap.ok(&test_name);
            } else {
                let diff = json_diff(&expected_json, &got);
                tap.not_ok(&test_name, format!("output mismatch:\n{}", diff));
            }
        }
        Err(e) => {
            tap.not_ok(&test_name, format!("could not parse member: {}", e));
        }
    }
}

// -- Helpers --

fn glob_members(dir: &Path) -> Vec<PathBuf> {
    let mut results = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("dspf") {
                results.push(path);
            }
        }
    }
    results
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

fn read_json(path: &Path) -> Result<Value, String> {
    let src = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    serde_json::from_str(&src).map_err(|e| format!("invalid JSON in {}: {}", path.display(), e))
}

/// Deep equality of two JSON values, normalizing number types.
fn json_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Object(am), Value::Object(bm)) => {
            am.len() == bm.len()
                && am
                    .iter()
                    .all(|(k, v)| bm.get(k).is_some_and(|bv| json_equal(v, bv)))
        }
        (Value::Array(av), Value::Array(bv)) => {
            av.len() == bv.len() && av.iter().zip(bv).all(|(a, b)| json_equal(a, b))
        }
        (Value::Number(an), Value::Number(bn)) => an.as_f64() == bn.as_f64(),
        _ => a == b,
    }
}

/// Line-level diff: the paths of the first differing values, then both
/// documents in full.
fn json_diff(expected: &Value, got: &Value) -> String {
    let mut paths = Vec::new();
    collect_differences("$", expected, got, &mut paths);
    let exp_str = serde_json::to_string_pretty(expected).unwrap_or_default();
    let got_str = serde_json::to_string_pretty(got).unwrap_or_default();
    format!(
        "differs at: {}\n--- expected\n{}\n+++ got\n{}",
        paths.join(", "),
        exp_str,
        got_str
    )
}

const MAX_REPORTED_DIFFERENCES: usize = 5;

fn collect_differences(path: &str, expected: &Value, got: &Value, out: &mut Vec<String>) {
    if out.len() >= MAX_REPORTED_DIFFERENCES || json_equal(expected, got) {
        return;
    }
    match (expected, got) {
        (Value::Object(em), Value::Object(gm)) => {
            for (k, ev) in em {
                match gm.get(k) {
                    Some(gv) => collect_differences(&format!("{}.{}", path, k), ev, gv, out),
                    None => out.push(format!("{}.{} (missing)", path, k)),
                }
            }
            for k in gm.keys().filter(|k| !em.contains_key(*k)) {
                out.push(format!("{}.{} (unexpected)", path, k));
            }
        }
        (Value::Array(ev), Value::Array(gv)) if ev.len() == gv.len() => {
            for (i, (e, g)) in ev.iter().zip(gv).enumerate() {
                collect_differences(&format!("{}[{}]", path, i), e, g, out);
            }
        }
        _ => out.push(path.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_compare_by_value() {
        assert!(json_equal(&json!({"a": 1}), &json!({"a": 1.0})));
        assert!(!json_equal(&json!({"a": 1}), &json!({"a": 1, "b": null})));
    }

    #[test]
    fn diff_names_the_differing_paths() {
        let expected = json!({"formats": [{"name": "A", "fields": []}]});
        let got = json!({"formats": [{"name": "B", "fields": [], "extra": true}]});
        let diff = json_diff(&expected, &got);
        assert!(diff.starts_with(
            "differs at: $.formats[0].name, $.formats[0].extra (unexpected)\n"
        ));
    }

    #[test]
    fn array_length_mismatch_reports_the_array() {
        let mut out = Vec::new();
        collect_differences("$", &json!([1, 2]), &json!([1]), &mut out);
        assert_eq!(out, vec!["$"]);
    }
}
