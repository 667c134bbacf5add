//! # Retail Intel Workspace
//!
//! Umbrella crate re-exporting the workspace members.
//!
//! ## Example
//!
//! ```
//! use retail_intel_workspace::pricing_engine::{PricingEngine, PricingStrategy};
//!
//! let engine = PricingEngine::new();
//! let rec = engine
//!     .recommend_pricing(100.0, None, PricingStrategy::Conservative, "NEW")
//!     .unwrap();
//! assert_eq!(rec.recommended_price, 100.0);
//! ```

pub use market_data;
pub use price_forecast;
pub use price_math;
pub use pricing_engine;
pub use retail_intel;
