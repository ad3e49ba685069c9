//! File and directory naming for the documentation tree

use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Directory name for a category: lower-case, alphanumeric runs joined by `-`
///
/// `"Food Items!"` becomes `food-items`. Names with no alphanumeric
/// characters become `category`.
pub fn sanitize_dir_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let joined = NON_ALPHANUMERIC.replace_all(&lowered, "-");
    let trimmed = joined.trim_matches('-');
    if trimmed.is_empty() {
        "category".to_string()
    } else {
        trimmed.to_string()
    }
}

/// What an endpoint does, as used in its file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Create,
    GetAll,
    GetSingle,
    Update,
    Delete,
    Other,
}

impl OperationKind {
    /// Derive the kind from the method and whether the path has a placeholder
    pub fn classify(method: &str, path: &str) -> Self {
        let has_parameter = path.contains('{');
        match method.to_ascii_uppercase().as_str() {
            "POST" => OperationKind::Create,
            "GET" if !has_parameter => OperationKind::GetAll,
            "GET" => OperationKind::GetSingle,
            "PUT" | "PATCH" => OperationKind::Update,
            "DELETE" => OperationKind::Delete,
            _ => OperationKind::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Create => "create",
            OperationKind::GetAll => "get-all",
            OperationKind::GetSingle => "get-single",
            OperationKind::Update => "update",
            OperationKind::Delete => "delete",
            OperationKind::Other => "other",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First path segment, sanitized; `root` for `/`
pub fn resource_name(path: &str) -> String {
    match path.split('/').find(|segment| !segment.is_empty()) {
        Some(segment) => {
            let name = NON_ALPHANUMERIC.replace_all(&segment.to_lowercase(), "-").into_owned();
            let name = name.trim_matches('-');
            if name.is_empty() {
                "root".to_string()
            } else {
                name.to_string()
            }
        }
        None => "root".to_string(),
    }
}

/// `<operation-kind>-<resource>` without extension
pub fn endpoint_file_stem(method: &str, path: &str) -> String {
    format!("{}-{}", OperationKind::classify(method, path), resource_name(path))
}

/// Hands out names, suffixing `-2`, `-3`, … on collision
#[derive(Debug, Default)]
pub struct UniqueNames {
    taken: HashSet<String>,
}

impl UniqueNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, base: &str) -> String {
        let mut candidate = base.to_string();
        let mut counter = 2;
        while !self.taken.insert(candidate.clone()) {
            candidate = format!("{}-{}", base, counter);
            counter += 1;
        }
        candidate
    }
}
