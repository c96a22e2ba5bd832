// Built-in commands

pub mod serve_html_interface;

pub use serve_html_interface::{InterfaceServer, ServeHtmlInterface, DEFAULT_PORT};
