pub mod functions;
pub mod select;
