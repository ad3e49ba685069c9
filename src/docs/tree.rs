//! Documentation tree layout
//!
//! The builder is pure: it turns synthesized content into an ordered list of
//! pages. Writing happens separately so the same rendering can be placed in
//! both the current and the versioned tree.

use super::getting_started;
use super::naming::{endpoint_file_stem, sanitize_dir_name, UniqueNames};
use crate::spec::ParsedEndpoint;

const API_REFERENCE_DIR: &str = "api-reference";

/// Generated text for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryContent {
    pub name: String,
    pub overview: String,
    /// Endpoints in insertion order with their page bodies
    pub pages: Vec<(ParsedEndpoint, String)>,
}

/// Everything the synthesizer produced for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynthesizedDocs {
    pub introduction: String,
    pub categories: Vec<CategoryContent>,
}

impl SynthesizedDocs {
    pub fn endpoint_count(&self) -> usize {
        self.categories.iter().map(|c| c.pages.len()).sum()
    }
}

/// One file of the tree, relative to the tree root with `/` separators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocPage {
    pub path: String,
    pub contents: String,
}

/// A fully laid out documentation tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedTree {
    pages: Vec<DocPage>,
}

impl RenderedTree {
    pub fn pages(&self) -> &[DocPage] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    fn push(&mut self, path: impl Into<String>, contents: &str) {
        let mut contents = contents.to_string();
        if !contents.ends_with('\n') {
            contents.push('\n');
        }
        self.pages.push(DocPage {
            path: path.into(),
            contents,
        });
    }
}

/// Lays out synthesized content and the navigation index
pub struct DocTreeBuilder;

impl DocTreeBuilder {
    pub fn build(docs: &SynthesizedDocs) -> RenderedTree {
        let mut tree = RenderedTree::default();
        let mut summary = String::from("# Summary\n\n");

        tree.push("introduction.md", &docs.introduction);
        summary.push_str("* [Introduction](introduction.md)\n");

        for (index, (file, title, contents)) in getting_started::PAGES.iter().enumerate() {
            let path = format!("{}/{}", getting_started::DIR, file);
            tree.push(path.as_str(), contents);
            let indent = if index == 0 { "" } else { "  " };
            summary.push_str(&format!("{}* [{}]({})\n", indent, title, path));
        }
        summary.push('\n');

        summary.push_str(&format!("* [API Reference]({}/README.md)\n", API_REFERENCE_DIR));

        let mut directories = UniqueNames::new();
        let mut reference_index = String::from("# API Reference\n\n");
        let mut category_sections = Vec::new();

        for category in &docs.categories {
            let dir = directories.claim(&sanitize_dir_name(&category.name));
            let base = format!("{}/{}", API_REFERENCE_DIR, dir);
            let mut section = String::new();

            reference_index.push_str(&format!(
                "- [{}]({}/README.md)\n",
                link_text(&category.name),
                dir
            ));

            tree.push(format!("{}/README.md", base), &category.overview);
            section.push_str(&format!(
                "  * [{}]({}/README.md)\n",
                link_text(&category.name),
                base
            ));

            let mut files = UniqueNames::new();
            for (endpoint, contents) in &category.pages {
                let stem = files.claim(&endpoint_file_stem(&endpoint.method, &endpoint.path));
                let path = format!("{}/{}.md", base, stem);
                section.push_str(&format!(
                    "    * [{}]({})\n",
                    link_text(&endpoint.title),
                    path
                ));
                tree.push(path, contents);
            }
            category_sections.push(section);
        }

        tree.push(format!("{}/README.md", API_REFERENCE_DIR), &reference_index);

        summary.push_str(&category_sections.join("\n"));
        tree.push("SUMMARY.md", &summary);
        tree
    }
}

/// Escape characters that would end a Markdown link label
fn link_text(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}
