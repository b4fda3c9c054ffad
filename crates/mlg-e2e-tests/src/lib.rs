//! End-to-end tests for MultiLingo live in `tests/`; this crate has no
//! library code of its own.
