//! Integration tests for manifest-merge

mod cli_parse;
mod merge_contracts;
mod support;
