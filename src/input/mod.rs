//! Reading passages from files or stdin.

mod reader;

pub use reader::{InputReader, MAX_INPUT_SIZE};
