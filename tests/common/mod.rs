//! Consolidated test utilities for ctxpack
//!
//! This module provides unified testing utilities for integration tests,
//! built around throwaway project directories and reply files on disk.

pub mod assertions;
pub mod fixtures;
pub mod project;
