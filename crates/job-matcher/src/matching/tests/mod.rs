mod catalog;
mod common;
mod position;
