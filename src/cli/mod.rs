// Terminal front end: marshals raw input into transaction requests and
// renders receipts and errors.

pub mod interactive;
pub mod transaction;
pub mod utils;
