//! Small utility helpers used across modules.

/// Substitute `{key}` placeholders in `tpl`. Unknown placeholders are left as-is.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  pairs
    .iter()
    .fold(tpl.to_string(), |out, (key, value)| out.replace(&format!("{{{key}}}"), value))
}
