// Core modules implementing the field codec, row assembly, and error modeling.
pub mod codec;
pub mod error;
pub mod field;
pub mod line;
pub mod separator;
pub mod sink;
pub mod table;
pub mod template;
