//! Domain services: validation, existence checks and one commit per
//! mutating call

pub mod product_service;
pub mod store_service;

pub use product_service::ProductDomainService;
pub use store_service::StoreDomainService;
