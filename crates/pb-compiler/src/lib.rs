//! PersianBlocker Output Compiler
//!
//! This crate turns cleaned domain lists and ad-block style host files into
//! the text artifacts that get published.

pub mod builder;
pub mod parser;

pub use builder::{
    build_domain_lists, compile_hosts, render_domain_list, render_hosts, sorted_unique, Artifact,
    DEFAULT_HOSTS_ADDRESS,
};
pub use parser::parse_adblock_hosts;
