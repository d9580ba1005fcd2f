//! XML helpers for namespace-aware DOM navigation.

mod utils;

pub use utils::{
    element_children, get_tag_name, get_text, has_tag, is_in_namespace, is_xml_char, stray_text,
};
