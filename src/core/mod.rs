pub mod bottles;
pub mod paths;
pub mod record;
pub mod scripts;
pub mod store;
pub mod transfer;
