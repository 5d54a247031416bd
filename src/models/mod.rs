pub mod payment;
pub mod pay;
pub mod provider;
pub mod response;

pub use payment::*;
pub use pay::*;
pub use provider::*;
pub use response::*;
