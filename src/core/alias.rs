/// Turns a display name into an identifier usable by DOT and PlantUML:
/// trims the name and drops every remaining whitespace character.
///
/// Distinct names may map to the same alias ("Order Service" and
/// "OrderService"); no attempt is made to detect that.
pub fn normalize(name: &str) -> String {
    name.trim().chars().filter(|c| !c.is_whitespace()).collect()
}

/// Escapes backslashes and double quotes for use inside a quoted label.
pub fn escape_label(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
