//! Format decoded containers as human-readable text.

use crate::attributes::AttributeTable;
use crate::header::Header;
use crate::tree::{DirectoryNode, FlatIndex, MetadataEntry};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Display form of a path; the root's empty path is shown as "/".
pub fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "/"
    } else {
        path
    }
}

pub fn format_header_text(header: &Header) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Header")));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["Magic".to_string(), header.magic_hex()]);
    table.add_row(vec![
        "Version".to_string(),
        format!("{}.{}", header.major, header.minor),
    ]);
    table.add_row(vec!["Rotated".to_string(), header.rotated.to_string()]);
    table.add_row(vec![
        "Random tag".to_string(),
        format!("{:#010x}", header.random_tag),
    ]);
    table.add_row(vec!["Root offset".to_string(), header.root_offset.to_string()]);
    table.add_row(vec![
        "Attributes offset".to_string(),
        header.attributes_offset.to_string(),
    ]);
    table.add_row(vec!["Timestamp".to_string(), header.timestamp.to_string()]);
    out.push_str(&format!("{}\n", table));
    out
}

pub fn format_attributes_text(attributes: &AttributeTable) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Attributes")));
    if attributes.is_empty() {
        out.push_str("No attributes.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Key", "Name"]);
    for (key, name) in attributes.iter().enumerate() {
        table.add_row(vec![key.to_string(), name.to_string()]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!("Total: {} attributes.\n", attributes.len()));
    out
}

/// Indented tree listing; `depth` limits how many levels below the root are shown.
pub fn format_tree_text(root: &DirectoryNode, depth: Option<usize>) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Tree")));
    write_node(&mut out, root, 0, depth);
    out
}

fn write_node(out: &mut String, node: &DirectoryNode, level: usize, depth: Option<usize>) {
    let indent = "  ".repeat(level);
    let label = if level == 0 { "/" } else { node.name.as_str() };
    if node.is_leaf() {
        out.push_str(&format!("{}{}\n", indent, label));
    } else {
        out.push_str(&format!("{}{}\n", indent, label.bold()));
    }
    for entry in &node.metadata {
        out.push_str(&format!(
            "{}  {} = {}\n",
            indent,
            entry.attribute.dimmed(),
            entry.value
        ));
    }
    if depth.is_some_and(|d| level >= d) {
        if !node.children.is_empty() {
            out.push_str(&format!(
                "{}  ... {} more\n",
                indent,
                node.count() - 1
            ));
        }
        return;
    }
    for child in &node.children {
        write_node(out, child, level + 1, depth);
    }
}

pub fn format_index_text(index: &FlatIndex) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Index")));
    if index.is_empty() {
        out.push_str("No indexed paths.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Path", "Attribute", "Value"]);
    for (path, metadata) in index.iter() {
        for entry in metadata {
            table.add_row(vec![
                display_path(path).to_string(),
                entry.attribute.to_string(),
                entry.value.clone(),
            ]);
        }
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!("Total: {} paths.\n", index.len()));
    out
}

pub fn format_metadata_text(path: &str, metadata: &[MetadataEntry]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading(display_path(path))));
    if metadata.is_empty() {
        out.push_str("No metadata.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Attribute", "Value"]);
    for entry in metadata {
        table.add_row(vec![entry.attribute.to_string(), entry.value.clone()]);
    }
    out.push_str(&format!("{}\n", table));
    out
}
