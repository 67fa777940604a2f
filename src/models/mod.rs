//! Wave-selection domain models.
//!
//! Provides the data types for describing a picking problem (orders,
//! aisles, wave-size window) and a candidate answer (wave).
//!
//! # Domain Mappings
//!
//! | u-wave | Warehouse | Generic |
//! |--------|-----------|---------|
//! | Order | Customer order | Demand vector |
//! | Aisle | Storage aisle | Supply vector |
//! | Instance | Picking shift | Problem |
//! | Wave | Pick batch | Solution |

mod aisle;
mod instance;
mod order;
mod wave;

pub use aisle::Aisle;
pub use instance::{Instance, WaveBounds};
pub use order::Order;
pub use wave::{Violation, ViolationType, Wave};
