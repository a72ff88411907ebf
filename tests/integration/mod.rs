#![allow(missing_docs)]

mod collection;
mod status;
