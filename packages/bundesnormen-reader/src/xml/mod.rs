//! XML utilities and the owned content-section tree.

mod element;
mod utils;

pub use element::RawElement;
pub use utils::{find_ris_child, get_tag_name, is_ris_element};
