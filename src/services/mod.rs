pub mod qr;
pub mod upstream;
