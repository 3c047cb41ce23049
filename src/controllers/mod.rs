//! # Page controllers
//!
//! Each list page is an explicit state machine: paging, debounced search,
//! filters and the open dialog. Views feed it discrete events (keystroke, timer
//! fire, filter change, navigation) and read back the query it should render.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bakery_admin::prelude::*;
//!
//! # async fn run(api: AdminApi) -> ApiResult<()> {
//! let mut page = ProductsController::new(api, 15);
//! page.list.type_search("rye", Instant::now());
//! // ...400ms later, on a timer
//! if page.list.tick(Instant::now()) {
//!     let products = page.load().await?;
//! }
//! # Ok(())
//! # }
//! ```

mod admin_users;
mod categories;
mod delivery_boys;
mod list;
mod modal;
mod products;

pub use admin_users::{AdminUserFilters, AdminUsersController};
pub use categories::{CategoriesController, CategoryFilters};
pub use delivery_boys::{DeliveryBoyFilters, DeliveryBoysController};
pub use list::{Debouncer, Instant, ListState, SEARCH_DEBOUNCE};
pub use modal::{Modal, ModalState};
pub use products::{ProductFilters, ProductsController};
