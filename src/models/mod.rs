pub mod moving_average;
pub mod options;
pub mod period;
pub mod price;
pub mod quote;
pub mod ticker;

pub use moving_average::*;
pub use options::*;
pub use period::*;
pub use price::*;
pub use quote::*;
pub use ticker::*;
