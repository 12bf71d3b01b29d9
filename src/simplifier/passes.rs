//! Rewriting passes over the extracted content region.
//!
//! Order matters: denylisted subtrees are already gone when these run,
//! and [`reduce_tags`] must run before [`prune_empty`].

use crate::simplifier::dom::{Element, Node};
use crate::simplifier::resolve::{resolve_href, resolve_image_src};
use crate::simplifier::SimplifierConfig;

const IMAGE_SOURCE_ATTRS: &[&str] = &["src", "data-src", "data-original"];
const STRIPPED_ATTRS: &[&str] = &["class", "style", "id"];

/// Give every `img` an absolute `src`, an `alt` and a lazy-loading hint,
/// dropping all other attributes. Images with no usable source are removed.
pub fn normalize_images(nodes: &mut Vec<Node>, origin: &str) {
    nodes.retain_mut(|node| {
        let Node::Element(el) = node else {
            return true;
        };

        if !el.is("img") {
            normalize_images(&mut el.children, origin);
            return true;
        }

        let Some(src) = IMAGE_SOURCE_ATTRS
            .iter()
            .filter_map(|name| el.attr(name))
            .find(|value| !value.trim().is_empty())
        else {
            return false;
        };

        let src = resolve_image_src(src.trim(), origin);
        let alt = el.attr("alt").unwrap_or_default().to_string();
        el.attrs = vec![
            ("src".to_string(), src),
            ("alt".to_string(), alt),
            ("loading".to_string(), "lazy".to_string()),
        ];
        true
    });
}

/// Absolutize root-relative hrefs and open every link in a new tab
/// without opener or referrer access.
pub fn normalize_links(nodes: &mut [Node], origin: &str) {
    for node in nodes.iter_mut() {
        let Node::Element(el) = node else {
            continue;
        };

        let href = el
            .attr("href")
            .filter(|h| el.is("a") && !h.is_empty())
            .map(|h| resolve_href(h, origin));

        if let Some(href) = href {
            el.set_attr("href", &href);
            el.set_attr("target", "_blank");
            el.set_attr("rel", "noopener noreferrer");
        }

        normalize_links(&mut el.children, origin);
    }
}

/// Strip presentational attributes everywhere and unwrap every element
/// outside the allowed vocabulary, keeping its children in place.
pub fn reduce_tags(nodes: Vec<Node>, config: &SimplifierConfig) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());

    for node in nodes {
        match node {
            Node::Text(_) => out.push(node),
            Node::Element(mut el) => {
                el.children = reduce_tags(std::mem::take(&mut el.children), config);
                if config.is_allowed(&el.name) || config.is_preserved(&el.name) {
                    el.attrs.retain(|(k, _)| !STRIPPED_ATTRS.contains(&k.as_str()));
                    out.push(Node::Element(el));
                } else {
                    out.extend(el.children);
                }
            }
        }
    }

    merge_adjacent_text(out)
}

fn merge_adjacent_text(nodes: Vec<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let (Node::Text(text), Some(Node::Text(prev))) = (&node, out.last_mut()) {
            prev.push_str(text);
            continue;
        }
        out.push(node);
    }
    out
}

/// Remove elements with no visible text and no image, innermost first,
/// so wrappers emptied by their children's removal go too.
///
/// `img` and `br` are kept: they carry no text by nature.
pub fn prune_empty(nodes: &mut Vec<Node>) {
    nodes.retain_mut(|node| match node {
        Node::Text(_) => true,
        Node::Element(el) => {
            prune_empty(&mut el.children);
            is_kept(el)
        }
    });
}

fn is_kept(el: &Element) -> bool {
    el.is("br") || el.has_image() || !el.text_content().trim().is_empty()
}
