//! View models for the listing page and the quick-add modal.
//!
//! ```text
//! ProductList ──▶ ProductElement × N ──▶ QuickAddModal (mounted on demand)
//! ```
//!
//! The only data crossing component boundaries is the checkout ID (read
//! only). A card's modal is open while its slot holds the fragment served
//! by `GET /products/{slug}/quick-add`; Cancel empties the slot.

pub mod product_element;
pub mod product_list;
pub mod quick_add_modal;

pub use product_element::{ImageLoading, ProductElement};
pub use product_list::{EAGER_IMAGE_COUNT, ProductList};
pub use quick_add_modal::{ModalBody, QuickAddModalTemplate};
