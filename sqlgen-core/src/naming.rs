use std::{collections::HashSet, path::Path, sync::LazyLock};

use regex::Regex;

use crate::descriptor::{Column, Parameter};

static NON_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9_$]").expect("identifier pattern is a valid regex")
});

pub fn to_pascal(mixed_case_name: &str) -> String {
    let mut words = vec![];
    let mut curr = String::new();
    for character in mixed_case_name.chars() {
        let is_snake = character == '_';
        if character.is_uppercase() || is_snake {
            words.push(curr.clone());
            curr.clear();
        }
        if is_snake {
            continue;
        }
        if curr.is_empty() {
            curr.push(character.to_ascii_uppercase());
        } else {
            curr.push(character.to_ascii_lowercase());
        }
    }
    words.push(curr);
    words.join("")
}

pub fn to_lower_camel(mixed_case_name: &str) -> String {
    let pascal = to_pascal(mixed_case_name);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => pascal,
    }
}

/// Replaces characters TypeScript does not allow in identifiers with `_`.
fn sanitize(name: &str) -> String {
    NON_IDENTIFIER.replace_all(name, "_").into_owned()
}

fn identifier(name: &str) -> Option<String> {
    let camel = to_lower_camel(&sanitize(name));
    if camel.is_empty() {
        return None;
    }
    match camel.starts_with(|c: char| c.is_ascii_digit()) {
        true => Some(format!("_{camel}")),
        false => Some(camel),
    }
}

pub fn function_name(query_name: &str) -> String {
    identifier(query_name).unwrap_or_else(|| "query".to_owned())
}

pub fn query_const_name(query_name: &str) -> String {
    format!("{}Query", function_name(query_name))
}

fn type_identifier(query_name: &str) -> String {
    let pascal = to_pascal(&sanitize(query_name));
    if pascal.is_empty() {
        return "Query".to_owned();
    }
    match pascal.starts_with(|c: char| c.is_ascii_digit()) {
        true => format!("_{pascal}"),
        false => pascal,
    }
}

pub fn args_interface_name(query_name: &str) -> String {
    format!("{}Args", type_identifier(query_name))
}

pub fn row_interface_name(query_name: &str) -> String {
    format!("{}Row", type_identifier(query_name))
}

/// Later duplicates get `_{index}` appended until unique.
fn dedupe(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut taken = HashSet::new();
    let mut unique = vec![];
    for (idx, mut name) in names.enumerate() {
        while taken.contains(&name) {
            name = format!("{name}_{idx}");
        }
        taken.insert(name.clone());
        unique.push(name);
    }
    unique
}

/// Field names of the argument interface, one per parameter in bind order.
/// Unnamed parameters are called after their bind index, or their position
/// when the request carries no number.
pub fn arg_field_names(params: &[Parameter]) -> Vec<String> {
    dedupe(params.iter().enumerate().map(|(pos, param)| {
        param
            .column
            .as_ref()
            .and_then(|column| identifier(&column.name))
            .unwrap_or_else(|| format!("arg{}", param.index().unwrap_or(pos)))
    }))
}

/// Field names of the row interface, one per result column.
pub fn column_field_names(columns: &[Column]) -> Vec<String> {
    dedupe(columns.iter().enumerate().map(|(idx, column)| {
        identifier(&column.name).unwrap_or_else(|| format!("column{}", idx + 1))
    }))
}

/// `query.sql` becomes `query_sql`.
pub fn output_stem(filename: &str) -> String {
    let base = Path::new(filename)
        .file_name()
        .map(|name| name.to_string_lossy().replace('.', "_"))
        .unwrap_or_default();
    match base.is_empty() {
        true => "queries".to_owned(),
        false => base,
    }
}
