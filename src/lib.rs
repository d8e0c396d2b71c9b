//! Workspace root package. It only carries the pre-commit hook
//! configuration; the library lives in `crates/antfarm-lib` and the binary in
//! `crates/antfarm-cli`.
