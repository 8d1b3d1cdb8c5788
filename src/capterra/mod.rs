mod directory;

pub use directory::{first_digit_run, CapterraDirectory};
