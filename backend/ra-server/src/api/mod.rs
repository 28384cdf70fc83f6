pub mod error;
pub mod guest;
pub mod qr;
pub mod tenant;
