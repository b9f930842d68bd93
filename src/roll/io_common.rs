use std::path::Path;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
        .to_string()
}

pub fn trimmed_header(cells: &[String]) -> Vec<String> {
    cells.iter().map(|s| s.trim().to_string()).collect()
}
