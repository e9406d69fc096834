pub mod order_status;
pub mod product_kind;
pub mod user_role;

pub use order_status::{ProductionOrderStatus, PurchaseOrderStatus, SalesOrderStatus};
pub use product_kind::ProductKind;
pub use user_role::UserRole;
