//! DOM Operations Adapter
//!
//! Thin, named wrappers over `dom_query` used by the metadata, URL and
//! sanitizing code, so call sites read as element operations rather than
//! selection plumbing.

pub use dom_query::{Document, Selection};

// Text results are StrTendril: reference counted, O(1) to clone, Deref<Target = str>
pub use tendril::StrTendril;

// === Attribute Operations ===

/// Get an attribute value of the first element in the selection
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Set an attribute value on every element in the selection
#[inline]
pub fn set_attribute(sel: &Selection, name: &str, value: &str) {
    sel.set_attr(name, value);
}

/// Remove an attribute from every element in the selection
#[inline]
pub fn remove_attribute(sel: &Selection, name: &str) {
    sel.remove_attr(name);
}

/// Get all attributes as key-value pairs
///
/// Returns empty vector if node has no attributes or if selection is empty.
#[must_use]
pub fn get_all_attributes(sel: &Selection) -> Vec<(String, String)> {
    sel.nodes()
        .first()
        .map(|node| {
            node.attrs()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_string())
}

// === Content ===

/// Get all text content of node and descendants
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Get inner HTML content
#[inline]
#[must_use]
pub fn inner_html(sel: &Selection) -> StrTendril {
    sel.inner_html()
}

// === Tree Modification ===

/// Remove elements from tree
#[inline]
pub fn remove(sel: &Selection) {
    sel.remove();
}

/// Remove elements but keep their children (unwrap)
#[inline]
pub fn strip_tags(sel: &Selection, tags: &[&str]) {
    sel.strip_elements(tags);
}
